//! Dashboard routes: aggregated statistics for the admin overview page.

use axum::{extract::State, Json};
use chrono::Local;

use crate::errors::AppError;
use crate::middleware::extract::PeriodQuery;
use crate::models::dashboard::DashboardOverview;
use crate::services::dashboard;
use crate::AppState;

/// GET /api/dashboard/overview: statistics for `?time_range=day|week|month|year`.
pub async fn overview(
    State(state): State<AppState>,
    PeriodQuery(period): PeriodQuery,
) -> Result<Json<DashboardOverview>, AppError> {
    let now = Local::now().naive_local();
    let overview = dashboard::overview(state.stats.as_ref(), period, now).await?;
    Ok(Json(overview))
}
