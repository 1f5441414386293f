//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// JWT configuration.
    pub jwt: JwtConfig,
    /// Financial report constants.
    #[serde(default)]
    pub reports: ReportsConfig,
    /// Human verification challenge.
    #[serde(default)]
    pub captcha: CaptchaConfig,
    /// Booking form relay.
    #[serde(default)]
    pub form_relay: FormRelayConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// JWT configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    /// Secret shared with the authentication provider.
    pub secret: String,
    /// Lifetime of refreshed tokens in seconds.
    #[serde(default = "default_token_expiry")]
    pub token_expiry_secs: u64,
}

fn default_token_expiry() -> u64 {
    3600 // 1 hour
}

/// What an empty month contributes when the year table is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyMonthSalary {
    /// Months without reports render as all-zero rows.
    #[default]
    Skip,
    /// Months without reports still accrue the fixed driver salary.
    Accrue,
}

/// Constants used by the monthly and yearly financial reports.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportsConfig {
    /// Fixed monthly driver salary.
    #[serde(default = "default_driver_salary")]
    pub driver_salary: Decimal,
    /// Share of the amount due kept as management fee.
    #[serde(default = "default_management_fee_rate")]
    pub management_fee_rate: Decimal,
    /// Yearly rental target.
    #[serde(default = "default_annual_target")]
    pub annual_target: Decimal,
    /// Salary policy for months without reports.
    #[serde(default)]
    pub empty_month_salary: EmptyMonthSalary,
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            driver_salary: default_driver_salary(),
            management_fee_rate: default_management_fee_rate(),
            annual_target: default_annual_target(),
            empty_month_salary: EmptyMonthSalary::default(),
        }
    }
}

fn default_driver_salary() -> Decimal {
    Decimal::from(50_000)
}

fn default_management_fee_rate() -> Decimal {
    Decimal::new(10, 2)
}

fn default_annual_target() -> Decimal {
    Decimal::from(1_000_000)
}

/// Human verification challenge configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CaptchaConfig {
    /// When false every token is accepted (local development).
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Verification endpoint.
    #[serde(default = "default_verify_url")]
    pub verify_url: String,
    /// Server-side secret.
    #[serde(default)]
    pub secret: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for CaptchaConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            verify_url: default_verify_url(),
            secret: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_verify_url() -> String {
    "https://www.google.com/recaptcha/api/siteverify".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

/// Booking form relay configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormRelayConfig {
    /// Form-intake endpoint; relay is disabled when unset.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or is inconsistent.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_with(config::Environment::with_prefix("CARRENTAL").separator("__"))
    }

    fn load_with(environment: config::Environment) -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(environment)
            .build()?;

        let app: Self = config.try_deserialize()?;
        app.validate()?;
        Ok(app)
    }

    /// Checks cross-field constraints serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Message` describing the first violated constraint.
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.reports.annual_target <= Decimal::ZERO {
            return Err(config::ConfigError::Message(
                "reports.annual_target must be positive".to_string(),
            ));
        }
        if self.reports.management_fee_rate < Decimal::ZERO
            || self.reports.management_fee_rate > Decimal::ONE
        {
            return Err(config::ConfigError::Message(
                "reports.management_fee_rate must be between 0 and 1".to_string(),
            ));
        }
        if self.jwt.token_expiry_secs < 60 {
            return Err(config::ConfigError::Message(
                "jwt.token_expiry_secs must be at least 60".to_string(),
            ));
        }
        if self.captcha.enabled && self.captcha.secret.is_empty() {
            return Err(config::ConfigError::Message(
                "captcha.secret is required when captcha is enabled".to_string(),
            ));
        }
        Ok(())
    }
}
