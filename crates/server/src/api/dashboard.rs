use std::sync::Arc;

use axum::{extract::State, Json};
use crm_api::dashboard;
use shared::protocol::DashboardSummary;

use crate::app_state::AppState;

/// Serves both `/dashboard` and `/analytics`.
pub(crate) async fn summary(State(state): State<Arc<AppState>>) -> Json<DashboardSummary> {
    Json(dashboard::summary(&state.api).await)
}
