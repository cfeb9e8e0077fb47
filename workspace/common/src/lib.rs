//! Common transport-layer types shared between the prediction API stub, the
//! wizard core and the browser frontend.
//! These structs mirror the external prediction service's request/response
//! payloads so every crate deserializes the same shapes without duplicating them.

mod auth;
mod history;
mod prediction;
mod users;

pub use auth::{AccessDecision, LoginRequest, LoginResponse, Role, RouteAccess, UserRecord};
pub use history::{HistoryFilter, HistoryPeriod, HistoryRecord, models_in};
pub use prediction::{
    AccuracyMetrics, AggregationInfo, DateSpan, FeatureImportance, ForecastMetrics,
    ForecastResult, GlobalMetrics, PredictRequest, PreviewPoint, TargetSet, TrendBounds,
};
pub use users::{
    UserCreateRequest, UserDeleteResponse, UserListResponse, UserUpdateRequest,
    account_form_problems,
};

use serde::{Deserialize, Serialize};

/// Error body returned by the prediction service.
///
/// The service reports failures as `{"detail": ...}` where `detail` is either a
/// message or a list of validation issues, so it is kept as raw JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ErrorResponse {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorResponse {
    /// Human readable form of `detail`, if any.
    pub fn message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            serde_json::Value::String(text) => Some(text.clone()),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_message_variants() {
        let text: ErrorResponse = serde_json::from_str(r#"{"detail":"SKU not found"}"#).unwrap();
        assert_eq!(text.message().as_deref(), Some("SKU not found"));

        let list: ErrorResponse =
            serde_json::from_str(r#"{"detail":[{"loc":["body","periods"]}]}"#).unwrap();
        assert!(list.message().unwrap().contains("periods"));

        let empty: ErrorResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.message(), None);
    }
}
