use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request body for `POST /predict`.
///
/// The target-set fields are flattened next to the scalar fields, with the
/// variant name carried by `aggregation_type`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictRequest {
    /// Number of months to forecast
    pub periods: u32,
    /// Number of forecast rows returned in `preview` (mirrors `periods`)
    pub preview_rows: u32,
    /// Wire name of the forecasting model (`auto`, `Prophet`, `Xgboost`, `Ml`)
    pub model: String,
    #[serde(flatten)]
    pub target: TargetSet,
}

/// Which entities a forecast request covers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "aggregation_type")]
pub enum TargetSet {
    #[serde(rename = "all")]
    All,
    #[serde(rename = "sku")]
    Sku { sku: String },
    #[serde(rename = "combined")]
    Combined {
        /// Numeric line ordinals
        #[serde(default)]
        familia: Option<Vec<u32>>,
        #[serde(default)]
        processo: Option<Vec<String>>,
        #[serde(default)]
        abc_class: Option<Vec<String>>,
    },
}

impl TargetSet {
    /// Value of `aggregation_type` on the wire.
    pub fn aggregation_type(&self) -> &'static str {
        match self {
            TargetSet::All => "all",
            TargetSet::Sku { .. } => "sku",
            TargetSet::Combined { .. } => "combined",
        }
    }
}

/// Response of `POST /predict`.
///
/// Every field is optional: the service omits whole sections depending on the
/// model and aggregation used, and the result view must stay renderable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct ForecastResult {
    pub run_id: Option<String>,
    pub status: Option<String>,
    pub preview: Option<Vec<PreviewPoint>>,
    pub metrics: Option<ForecastMetrics>,
    pub aggregation_info: Option<AggregationInfo>,
    pub model_used: Option<String>,
    pub auto_selected: Option<bool>,
    /// Execution time in seconds
    pub time: Option<f64>,
    /// SKU the request targeted; filled in locally, the service does not echo it
    pub sku: Option<String>,
}

/// One forecast row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct PreviewPoint {
    /// ISO date (or date-time) of the forecast period
    pub ds: Option<String>,
    pub yhat: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct ForecastMetrics {
    pub global: Option<GlobalMetrics>,
    #[serde(rename = "WMAPE (%)")]
    pub wmape: Option<f64>,
    #[serde(rename = "Bias (%)")]
    pub bias: Option<f64>,
    pub trend: Option<TrendBounds>,
    pub feature_importance: Option<Vec<FeatureImportance>>,
}

impl ForecastMetrics {
    fn global_accuracy(&self) -> Option<&AccuracyMetrics> {
        self.global.as_ref()?.metrics_global.as_ref()
    }

    /// WMAPE in percent, preferring the nested global block.
    pub fn wmape_pct(&self) -> Option<f64> {
        self.global_accuracy().and_then(|m| m.wmape).or(self.wmape)
    }

    /// Bias in percent, preferring the nested global block.
    pub fn bias_pct(&self) -> Option<f64> {
        self.global_accuracy().and_then(|m| m.bias).or(self.bias)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct GlobalMetrics {
    pub metrics_global: Option<AccuracyMetrics>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct AccuracyMetrics {
    #[serde(rename = "WMAPE (%)")]
    pub wmape: Option<f64>,
    #[serde(rename = "Bias (%)")]
    pub bias: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct TrendBounds {
    pub first_value: Option<f64>,
    pub last_value: Option<f64>,
}

impl TrendBounds {
    /// Both bounds, or `None` if either is missing.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        Some((self.first_value?, self.last_value?))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct FeatureImportance {
    pub feature: Option<String>,
    pub importance_pct: Option<f64>,
}

/// Description of the aggregation the service actually performed.
///
/// Filter lists come back either as strings or numbers depending on the
/// dimension, so they are kept as raw JSON and rendered on demand.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct AggregationInfo {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub skus_count: Option<u64>,
    pub familia: Option<Vec<Value>>,
    pub familias_included: Option<Vec<Value>>,
    pub familias: Option<Vec<Value>>,
    pub processo: Option<Vec<Value>>,
    pub processos_included: Option<Vec<Value>>,
    pub abc_class: Option<Vec<Value>>,
    pub date_range: Option<DateSpan>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct DateSpan {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl DateSpan {
    /// Both ends, or `None` if either is missing.
    pub fn ends(&self) -> Option<(&str, &str)> {
        Some((self.start.as_deref()?, self.end.as_deref()?))
    }
}

fn render_values(values: &[Value]) -> Vec<String> {
    values
        .iter()
        .map(|value| match value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        })
        .collect()
}

/// First non-empty list among the candidates.
fn first_filled<'a>(candidates: &[&'a Option<Vec<Value>>]) -> Vec<String> {
    candidates
        .iter()
        .filter_map(|c| c.as_deref())
        .find(|values| !values.is_empty())
        .map(render_values)
        .unwrap_or_default()
}

impl AggregationInfo {
    /// Line filters, accepting the alternative keys used by the service.
    pub fn lines(&self) -> Vec<String> {
        first_filled(&[&self.familia, &self.familias_included, &self.familias])
    }

    pub fn processes(&self) -> Vec<String> {
        first_filled(&[&self.processo, &self.processos_included])
    }

    pub fn classes(&self) -> Vec<String> {
        first_filled(&[&self.abc_class])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_combined_request_flattens_target() {
        let request = PredictRequest {
            periods: 18,
            preview_rows: 18,
            model: "Prophet".to_string(),
            target: TargetSet::Combined {
                familia: Some(vec![3]),
                processo: Some(vec!["processo_2".to_string()]),
                abc_class: Some(vec!["A".to_string()]),
            },
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "periods": 18,
                "preview_rows": 18,
                "model": "Prophet",
                "aggregation_type": "combined",
                "familia": [3],
                "processo": ["processo_2"],
                "abc_class": ["A"]
            })
        );
    }

    #[test]
    fn test_empty_combined_filters_are_null() {
        let target = TargetSet::Combined {
            familia: None,
            processo: None,
            abc_class: Some(vec!["B".to_string()]),
        };
        let value = serde_json::to_value(&target).unwrap();
        assert_eq!(value["familia"], Value::Null);
        assert_eq!(value["processo"], Value::Null);
        assert_eq!(value["abc_class"], json!(["B"]));
    }

    #[test]
    fn test_request_parses_from_wire() {
        let request: PredictRequest = serde_json::from_value(json!({
            "periods": 12,
            "preview_rows": 12,
            "model": "auto",
            "aggregation_type": "sku",
            "sku": "PROD123"
        }))
        .unwrap();

        assert_eq!(request.target, TargetSet::Sku { sku: "PROD123".to_string() });
        assert_eq!(request.target.aggregation_type(), "sku");
    }

    #[test]
    fn test_empty_response_parses_to_defaults() {
        let result: ForecastResult = serde_json::from_str("{}").unwrap();
        assert_eq!(result, ForecastResult::default());
    }

    #[test]
    fn test_incomplete_entries_still_parse() {
        let result: ForecastResult = serde_json::from_value(json!({
            "preview": [{"ds": "2025-01-01", "yhat": 1.0}, {"yhat": 2.0}],
            "metrics": {"feature_importance": [{"importance_pct": 12.5}]},
            "aggregation_info": {"date_range": {"start": "2022-01-01"}}
        }))
        .unwrap();

        let preview = result.preview.unwrap();
        assert_eq!(preview[1].ds, None);
        assert_eq!(preview[1].yhat, Some(2.0));

        let features = result.metrics.unwrap().feature_importance.unwrap();
        assert_eq!(features[0].feature, None);

        let span = result.aggregation_info.unwrap().date_range.unwrap();
        assert_eq!(span.start.as_deref(), Some("2022-01-01"));
        assert_eq!(span.ends(), None);
    }

    #[test]
    fn test_metrics_prefer_global_block() {
        let metrics: ForecastMetrics = serde_json::from_value(json!({
            "global": {"metrics_global": {"WMAPE (%)": 21.5, "Bias (%)": -3.2}},
            "WMAPE (%)": 99.0,
            "trend": {"first_value": 100.0, "last_value": 200.0}
        }))
        .unwrap();

        assert_eq!(metrics.wmape_pct(), Some(21.5));
        assert_eq!(metrics.bias_pct(), Some(-3.2));
        assert_eq!(metrics.trend.unwrap().bounds(), Some((100.0, 200.0)));
    }

    #[test]
    fn test_metrics_fall_back_to_flattened_keys() {
        let metrics: ForecastMetrics =
            serde_json::from_value(json!({"WMAPE (%)": 40.0, "Bias (%)": null})).unwrap();
        assert_eq!(metrics.wmape_pct(), Some(40.0));
        assert_eq!(metrics.bias_pct(), None);
    }

    #[test]
    fn test_aggregation_info_renders_mixed_lists() {
        let info: AggregationInfo = serde_json::from_value(json!({
            "type": "combined",
            "familias_included": [3, 1],
            "processo": [],
            "processos_included": ["processo_2"],
            "abc_class": ["A"]
        }))
        .unwrap();

        assert_eq!(info.kind.as_deref(), Some("combined"));
        assert_eq!(info.lines(), vec!["3", "1"]);
        assert_eq!(info.processes(), vec!["processo_2"]);
        assert_eq!(info.classes(), vec!["A"]);
    }
}
