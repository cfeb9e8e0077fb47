//! Deterministic synthetic forecasts.
//!
//! The same request always yields the same series and metrics, only the run
//! id and the start month differ between calls.

use std::f64::consts::PI;

use chrono::{Datelike, Months, NaiveDate};
use common::{
    AccuracyMetrics, AggregationInfo, DateSpan, FeatureImportance, ForecastMetrics,
    ForecastResult, GlobalMetrics, PredictRequest, PreviewPoint, TargetSet, TrendBounds,
};
use serde_json::Value;

/// Features reported by the stub, with their relative weight before noise.
const FEATURES: &[(&str, f64)] = &[
    ("lag_1", 24.0),
    ("rolling_mean_3", 18.0),
    ("trend", 14.0),
    ("month_sin", 11.0),
    ("selic_value", 9.0),
    ("rolling_std_6", 8.0),
    ("incc_value", 6.0),
    ("is_holiday", 4.0),
];

/// Months of history the synthetic model pretends to have trained on.
const HISTORY_MONTHS: u32 = 36;

const CATALOG_SKUS: u64 = 1250;

/// FNV-1a over the serialized target, stable across runs and platforms.
fn seed_of(request: &PredictRequest) -> u64 {
    let key = serde_json::to_string(&request.target).unwrap_or_default();
    key.bytes()
        .chain(request.model.bytes())
        .fold(0xcbf2_9ce4_8422_2325, |hash, byte| {
            (hash ^ byte as u64).wrapping_mul(0x0100_0000_01b3)
        })
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Shape of the synthetic demand curve.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Curve {
    base: f64,
    slope: f64,
    amplitude: f64,
}

impl Curve {
    fn from_seed(seed: u64) -> Self {
        let base = 800.0 + (seed % 400) as f64;
        Self {
            base,
            slope: ((seed >> 8) % 21) as f64 - 10.0,
            amplitude: base * 0.08,
        }
    }

    fn trend_at(&self, index: usize) -> f64 {
        self.base + self.slope * index as f64
    }

    fn value_at(&self, index: usize) -> f64 {
        let seasonal = self.amplitude * (2.0 * PI * index as f64 / 12.0).sin();
        ((self.trend_at(index) + seasonal) * 100.0).round() / 100.0
    }
}

fn model_choice(request: &PredictRequest, seed: u64) -> (String, bool) {
    if request.model.eq_ignore_ascii_case("auto") {
        let chosen = if seed % 2 == 0 { "XGBoost" } else { "Prophet" };
        (chosen.to_string(), true)
    } else {
        (request.model.clone(), false)
    }
}

fn feature_importance(seed: u64) -> Vec<FeatureImportance> {
    let weights: Vec<f64> = FEATURES
        .iter()
        .enumerate()
        .map(|(i, (_, weight))| weight + ((seed >> (i * 4)) % 5) as f64)
        .collect();
    let total: f64 = weights.iter().sum();

    FEATURES
        .iter()
        .zip(weights)
        .map(|((feature, _), weight)| FeatureImportance {
            feature: Some(feature.to_string()),
            importance_pct: Some((weight / total * 10_000.0).round() / 100.0),
        })
        .collect()
}

fn aggregation_info(target: &TargetSet, seed: u64, history: DateSpan) -> AggregationInfo {
    let mut info = AggregationInfo {
        kind: Some(target.aggregation_type().to_string()),
        date_range: Some(history),
        ..AggregationInfo::default()
    };

    match target {
        TargetSet::All => info.skus_count = Some(CATALOG_SKUS),
        TargetSet::Sku { .. } => info.skus_count = Some(1),
        TargetSet::Combined {
            familia,
            processo,
            abc_class,
        } => {
            info.skus_count = Some(40 + seed % 160);
            info.familia = familia
                .as_ref()
                .map(|lines| lines.iter().map(|n| Value::from(*n)).collect());
            info.processo = processo
                .as_ref()
                .map(|processes| processes.iter().cloned().map(Value::from).collect());
            info.abc_class = abc_class
                .as_ref()
                .map(|classes| classes.iter().cloned().map(Value::from).collect());
        }
    }

    info
}

/// Produces the forecast for `request`, with the first period in the month
/// after `today`.
pub fn forecast(request: &PredictRequest, run_id: &str, today: NaiveDate) -> ForecastResult {
    let seed = seed_of(request);
    let curve = Curve::from_seed(seed);
    let this_month = first_of_month(today);
    let start = this_month + Months::new(1);
    let rows = request.periods.min(request.preview_rows) as usize;

    let preview: Vec<PreviewPoint> = (0..rows)
        .map(|i| PreviewPoint {
            ds: Some((start + Months::new(i as u32)).format("%Y-%m-%d").to_string()),
            yhat: Some(curve.value_at(i)),
        })
        .collect();

    let history = DateSpan {
        start: Some(
            (this_month - Months::new(HISTORY_MONTHS))
                .format("%Y-%m-%d")
                .to_string(),
        ),
        end: Some(this_month.format("%Y-%m-%d").to_string()),
    };

    let wmape = 8.0 + (seed % 2000) as f64 / 100.0;
    let bias = ((seed >> 16) % 1000) as f64 / 100.0 - 5.0;
    let (model_used, auto_selected) = model_choice(request, seed);

    ForecastResult {
        run_id: Some(run_id.to_string()),
        status: Some("success".to_string()),
        metrics: Some(ForecastMetrics {
            global: Some(GlobalMetrics {
                metrics_global: Some(AccuracyMetrics {
                    wmape: Some(wmape),
                    bias: Some(bias),
                }),
            }),
            trend: (rows > 0).then(|| TrendBounds {
                first_value: Some(curve.trend_at(0)),
                last_value: Some(curve.trend_at(rows - 1)),
            }),
            feature_importance: Some(feature_importance(seed)),
            ..ForecastMetrics::default()
        }),
        aggregation_info: Some(aggregation_info(&request.target, seed, history)),
        model_used: Some(model_used),
        auto_selected: Some(auto_selected),
        preview: Some(preview),
        time: None,
        sku: None,
    }
}
