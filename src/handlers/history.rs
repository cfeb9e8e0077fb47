use axum::{
    Json,
    extract::{Query, State},
};
use axum_valid::Valid;
use common::HistoryRecord;
use serde::Deserialize;
use tracing::{debug, instrument};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::auth::AuthUser;
use crate::schemas::{ApiError, AppState};

/// Query parameters for `GET /previsoes`
#[derive(Debug, Deserialize, ToSchema, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct HistoryQuery {
    /// Maximum number of runs to return (default: all kept)
    #[validate(range(min = 1, max = 500))]
    pub limit: Option<usize>,
}

/// List past forecast runs, most recent first
#[utoipa::path(
    get,
    path = "/previsoes",
    tag = "forecast",
    params(HistoryQuery),
    responses(
        (status = 200, description = "Array of {id_previsao, dt_processamento, ds_modelo, qtd_total_skus, SKU/Tipo}"),
        (status = 400, description = "Invalid limit"),
        (status = 401, description = "Missing or expired token", body = ApiError)
    )
)]
#[instrument(skip_all, fields(user = %user.0.email))]
pub async fn list_history(
    user: AuthUser,
    State(state): State<AppState>,
    Valid(Query(query)): Valid<Query<HistoryQuery>>,
) -> Json<Vec<HistoryRecord>> {
    // apply pending evictions so the listing respects the capacity
    state.history.run_pending_tasks().await;

    let mut runs: Vec<(u64, HistoryRecord)> = state
        .history
        .iter()
        .map(|(sequence, record)| (*sequence, record))
        .collect();
    runs.sort_by(|a, b| b.0.cmp(&a.0));

    let limit = query.limit.unwrap_or(runs.len());
    debug!("Listing {} of {} runs", limit.min(runs.len()), runs.len());

    Json(runs.into_iter().take(limit).map(|(_, record)| record).collect())
}
