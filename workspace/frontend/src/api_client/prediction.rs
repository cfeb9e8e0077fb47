use common::{ForecastResult, PredictRequest};
use crate::api_client;

/// Run a forecast
pub async fn predict(request: &PredictRequest) -> Result<ForecastResult, String> {
    log::debug!(
        "Requesting {} forecast for {} months with model {}",
        request.target.aggregation_type(),
        request.periods,
        request.model
    );
    let result = api_client::post::<ForecastResult, _>("/predict", request).await;
    match &result {
        Ok(forecast) => log::info!(
            "Forecast {} returned {} rows",
            forecast.run_id.as_deref().unwrap_or("-"),
            forecast.preview.as_ref().map(Vec::len).unwrap_or(0)
        ),
        Err(e) => log::error!("Forecast request failed: {}", e),
    }
    result
}
