use common::HistoryRecord;
use crate::api_client;

/// Get past forecast runs, most recent first
pub async fn get_history() -> Result<Vec<HistoryRecord>, String> {
    log::trace!("Fetching forecast history");
    let result = api_client::get::<Vec<HistoryRecord>>("/previsoes").await;
    match &result {
        Ok(records) => log::info!("Fetched {} forecast runs", records.len()),
        Err(e) => log::error!("Failed to fetch forecast history: {}", e),
    }
    result
}
