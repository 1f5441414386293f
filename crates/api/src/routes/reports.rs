//! Daily report entry and the monthly / yearly financial views.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use carrental_core::reports::{
    DailyReport, MonthlySummary, NewDailyReport, ReportService, YearTable, YearlyRollup,
    validate_new_report,
};
use carrental_db::DailyReportRepository;
use carrental_shared::types::{CarId, PageRequest, PageResponse, ReportId};
use chrono::{Datelike, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{AppState, error::ApiResult, middleware::AuthUser, routes::cars::load_car_for};

/// Creates the report routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/cars/{car_id}/reports",
            get(list_reports).post(create_report),
        )
        .route("/cars/{car_id}/reports/monthly", get(get_monthly))
        .route("/cars/{car_id}/reports/yearly", get(get_yearly))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for logging a daily report.
#[derive(Debug, Deserialize)]
pub struct CreateReportRequest {
    /// Human verification token.
    #[serde(default)]
    pub captcha_token: String,
    /// The report itself.
    #[serde(flatten)]
    pub report: NewDailyReport,
}

/// Query parameters selecting a calendar year.
#[derive(Debug, Default, Deserialize)]
pub struct YearQuery {
    /// Calendar year; defaults to the current one.
    pub year: Option<i32>,
}

impl YearQuery {
    fn year(&self) -> i32 {
        self.year.unwrap_or_else(|| Utc::now().year())
    }
}

/// A report with its derived amounts.
#[derive(Debug, Serialize)]
pub struct ReportResponse {
    /// Stored report.
    #[serde(flatten)]
    pub report: DailyReport,
    /// Rate times days.
    pub amount_due: Decimal,
    /// Amount due minus paid, floored at zero.
    pub balance_amount: Decimal,
}

impl From<DailyReport> for ReportResponse {
    fn from(report: DailyReport) -> Self {
        Self {
            amount_due: report.amount_due(),
            balance_amount: report.balance_amount(),
            report,
        }
    }
}

/// Year table plus every month on record for the car.
#[derive(Debug, Serialize)]
pub struct MonthlyReportResponse {
    /// Twelve rows and the rollup for the requested year.
    #[serde(flatten)]
    pub table: YearTable,
    /// Summaries of all months with reports, oldest first.
    pub summaries: Vec<MonthlySummary>,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /cars/{car_id}/reports - Log a daily report for a car.
async fn create_report(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(car_id): Path<CarId>,
    Json(payload): Json<CreateReportRequest>,
) -> ApiResult<(StatusCode, Json<ReportResponse>)> {
    validate_new_report(&payload.report)?;
    state.captcha.verify(&payload.captcha_token).await?;

    let car = load_car_for(&state, car_id, &auth).await?;

    let report = payload.report.into_report(ReportId::new(), car.id, auth.user_id());
    DailyReportRepository::new((*state.db).clone())
        .create(&report)
        .await?;

    info!(
        report_id = %report.id,
        car_id = %car.id,
        amount_due = %report.amount_due(),
        "Daily report created"
    );
    Ok((StatusCode::CREATED, Json(ReportResponse::from(report))))
}

/// GET /cars/{car_id}/reports - One page of a car's reports, newest first.
///
/// Records whose date cannot be read are left out of the page.
async fn list_reports(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(car_id): Path<CarId>,
    Query(page): Query<PageRequest>,
) -> ApiResult<Json<PageResponse<ReportResponse>>> {
    let car = load_car_for(&state, car_id, &auth).await?;

    let (records, total) = DailyReportRepository::new((*state.db).clone())
        .list_page_by_car(car.id, &page)
        .await?;

    let data = records
        .into_iter()
        .filter_map(|raw| match raw.into_report() {
            Ok(report) => Some(ReportResponse::from(report)),
            Err(e) => {
                warn!(car_id = %car.id, error = %e, "Skipping unreadable daily report");
                None
            }
        })
        .collect();

    Ok(Json(PageResponse::new(data, &page, total)))
}

/// GET /cars/{car_id}/reports/monthly?year= - Twelve-row year table.
async fn get_monthly(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(car_id): Path<CarId>,
    Query(query): Query<YearQuery>,
) -> ApiResult<Json<MonthlyReportResponse>> {
    let car = load_car_for(&state, car_id, &auth).await?;

    let records = DailyReportRepository::new((*state.db).clone())
        .list_by_car(car.id)
        .await?;
    let aggregation = ReportService::aggregate_records(records, &state.report_settings);
    if aggregation.skipped_records > 0 {
        warn!(car_id = %car.id, skipped = aggregation.skipped_records, "Reports with unreadable dates skipped");
    }

    let table = ReportService::year_table(&aggregation, query.year(), &state.report_settings);
    let summaries = aggregation.months.into_values().collect();

    Ok(Json(MonthlyReportResponse { table, summaries }))
}

/// GET /cars/{car_id}/reports/yearly?year= - Yearly rollup against the target.
async fn get_yearly(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(car_id): Path<CarId>,
    Query(query): Query<YearQuery>,
) -> ApiResult<Json<YearlyRollup>> {
    let car = load_car_for(&state, car_id, &auth).await?;

    let records = DailyReportRepository::new((*state.db).clone())
        .list_by_car(car.id)
        .await?;
    let aggregation = ReportService::aggregate_records(records, &state.report_settings);

    Ok(Json(ReportService::yearly_rollup(
        &aggregation.months,
        query.year(),
        &state.report_settings,
    )))
}
