use std::sync::atomic::Ordering;
use std::time::Instant;

use axum::{Json, extract::State, http::StatusCode};
use chrono::Local;
use common::{ForecastResult, HistoryRecord, PredictRequest, Role, RouteAccess, TargetSet};
use tracing::{debug, info, instrument, warn};

use super::auth::AuthUser;
use crate::schemas::{ApiError, ApiFailure, ApiJson, AppState, failure};
use crate::synthetic;
use crate::validation::validate_request;

fn history_record(request: &PredictRequest, result: &ForecastResult) -> HistoryRecord {
    let sku_or_kind = match &request.target {
        TargetSet::Sku { sku } => sku.clone(),
        _ => "aggregated".to_string(),
    };

    HistoryRecord {
        id_previsao: result.run_id.clone().unwrap_or_default(),
        dt_processamento: Some(Local::now().naive_local().format("%Y-%m-%dT%H:%M:%S").to_string()),
        ds_modelo: result.model_used.clone(),
        qtd_total_skus: result.aggregation_info.as_ref().and_then(|info| info.skus_count),
        sku_or_kind: Some(sku_or_kind),
    }
}

/// Run a synthetic forecast
///
/// Accepts the body built by the forecast wizard: `periods`, `preview_rows`,
/// `model` and the target set flattened under `aggregation_type`.
#[utoipa::path(
    post,
    path = "/predict",
    tag = "forecast",
    responses(
        (status = 200, description = "Forecast produced; body is the forecast result with preview, metrics and aggregation_info"),
        (status = 401, description = "Missing or expired token", body = ApiError),
        (status = 403, description = "Role below analista", body = ApiError),
        (status = 422, description = "Malformed body or request violating the payload contract", body = ApiError)
    )
)]
#[instrument(skip_all, fields(user = %user.0.email))]
pub async fn predict(
    user: AuthUser,
    State(state): State<AppState>,
    ApiJson(request): ApiJson<PredictRequest>,
) -> Result<Json<ForecastResult>, ApiFailure> {
    user.require(&RouteAccess::AtLeast(Role::Analista))?;

    if let Err(e) = validate_request(&request) {
        warn!("Rejected forecast request: {}", e);
        return Err(failure(StatusCode::UNPROCESSABLE_ENTITY, e.to_string()));
    }
    debug!(
        "Forecast request: {} periods, model {}, target {}",
        request.periods,
        request.model,
        request.target.aggregation_type()
    );

    let started = Instant::now();
    let sequence = state.run_counter.fetch_add(1, Ordering::Relaxed) + 1;
    let run_id = format!("run-{:06}", sequence);

    let mut result = synthetic::forecast(&request, &run_id, Local::now().date_naive());
    result.time = Some(started.elapsed().as_secs_f64());

    state
        .history
        .insert(sequence, history_record(&request, &result))
        .await;
    info!("Served forecast {} ({:?})", run_id, result.model_used);

    Ok(Json(result))
}
