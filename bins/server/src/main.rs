//! CarRental API Server
//!
//! Main entry point for the car rental management backend.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use carrental_api::{AppState, create_router};
use carrental_core::reports::ReportSettings;
use carrental_db::connect_with;
use carrental_shared::{AppConfig, CaptchaVerifier, FormRelay, JwtConfig, JwtService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "carrental=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Connect to database
    let db = connect_with(&config.database).await?;
    info!("Connected to database");

    // Token verification and refresh
    let jwt_config = JwtConfig {
        secret: config.jwt.secret.clone(),
        token_expires_minutes: i64::try_from(config.jwt.token_expiry_secs / 60)
            .context("jwt.token_expiry_secs is out of range")?,
    };
    let jwt_service = JwtService::new(jwt_config);

    // External form services
    let captcha = CaptchaVerifier::new(config.captcha.clone());
    if !captcha.is_enabled() {
        warn!("Captcha verification disabled; any non-empty token is accepted");
    }
    let form_relay = FormRelay::new(&config.form_relay);
    info!(enabled = form_relay.is_enabled(), "Booking form relay configured");

    let report_settings = ReportSettings::from(&config.reports);
    info!(
        driver_salary = %report_settings.driver_salary,
        management_fee_rate = %report_settings.management_fee_rate,
        annual_target = %report_settings.annual_target,
        "Report settings loaded"
    );

    // Create application state
    let state = AppState {
        db: Arc::new(db),
        jwt_service: Arc::new(jwt_service),
        captcha: Arc::new(captcha),
        form_relay: Arc::new(form_relay),
        report_settings: Arc::new(report_settings),
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
