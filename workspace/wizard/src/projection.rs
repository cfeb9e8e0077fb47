//! Shapes a [`ForecastResult`] into what the result step renders.
//!
//! Every function here tolerates missing sections: an empty response projects
//! to empty series and lists.

mod labels;

pub use labels::{aggregation_label, day_label, feature_label, month_label, parse_date};

use common::{AggregationInfo, ForecastResult};
use tracing::trace;

/// Colors assigned to influence factors by rank.
pub const INFLUENCE_PALETTE: [&str; 5] = ["#3B82F6", "#10B981", "#8B5CF6", "#F97316", "#EC4899"];

/// Maximum number of influence factors shown.
pub const MAX_INFLUENCES: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub label: String,
    pub date: String,
    pub predicted_value: f64,
    /// Point on the straight trend line; `None` when the service sent no trend
    pub trend_value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InfluenceFactor {
    pub feature: String,
    pub label: String,
    pub importance_pct: f64,
    pub color: &'static str,
}

/// Linear interpolation between the trend bounds at `index` of `len` points.
pub fn interpolate_trend(first: f64, last: f64, index: usize, len: usize) -> f64 {
    if len <= 1 {
        return first;
    }
    first + (last - first) * (index as f64 / (len - 1) as f64)
}

/// Forecast rows sorted by date with their trend line.
///
/// Empty unless both `preview` and `metrics` are present.
pub fn chart_series(result: &ForecastResult) -> Vec<ChartPoint> {
    let (Some(preview), Some(metrics)) = (&result.preview, &result.metrics) else {
        trace!("No preview or metrics in result, empty chart series");
        return Vec::new();
    };

    // rows without a date cannot be placed on the axis
    let mut rows: Vec<(&str, Option<f64>)> = preview
        .iter()
        .filter_map(|row| Some((row.ds.as_deref()?, row.yhat)))
        .collect();
    rows.sort_by(|a, b| a.0.cmp(b.0));

    let bounds = metrics.trend.as_ref().and_then(|trend| trend.bounds());
    let len = rows.len();

    rows.into_iter()
        .enumerate()
        .map(|(index, (ds, yhat))| ChartPoint {
            label: month_label(ds),
            date: ds.to_string(),
            predicted_value: yhat.unwrap_or(0.0),
            trend_value: bounds.map(|(first, last)| interpolate_trend(first, last, index, len)),
        })
        .collect()
}

/// The most important features, highest first, each with its palette color.
pub fn top_influences(result: &ForecastResult) -> Vec<InfluenceFactor> {
    let Some(features) = result
        .metrics
        .as_ref()
        .and_then(|metrics| metrics.feature_importance.as_ref())
    else {
        return Vec::new();
    };

    let mut ranked: Vec<(&str, f64)> = features
        .iter()
        .filter_map(|f| {
            let pct = f.importance_pct.filter(|pct| *pct > 0.0)?;
            Some((f.feature.as_deref()?, pct))
        })
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    ranked
        .into_iter()
        .take(MAX_INFLUENCES)
        .zip(INFLUENCE_PALETTE)
        .map(|((feature, importance_pct), color)| InfluenceFactor {
            feature: feature.to_string(),
            label: feature_label(feature),
            importance_pct,
            color,
        })
        .collect()
}

/// Quality band of a WMAPE value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccuracyBand {
    Good,
    Fair,
    Poor,
    Critical,
}

impl AccuracyBand {
    pub fn label(self) -> &'static str {
        match self {
            AccuracyBand::Good => "Boa",
            AccuracyBand::Fair => "Regular",
            AccuracyBand::Poor => "Baixa",
            AccuracyBand::Critical => "Crítica",
        }
    }
}

pub fn accuracy_band(wmape_pct: f64) -> AccuracyBand {
    if wmape_pct <= 30.0 {
        AccuracyBand::Good
    } else if wmape_pct <= 50.0 {
        AccuracyBand::Fair
    } else if wmape_pct <= 70.0 {
        AccuracyBand::Poor
    } else {
        AccuracyBand::Critical
    }
}

/// Headline figures of a forecast run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultSummary {
    pub wmape_pct: Option<f64>,
    pub bias_pct: Option<f64>,
    pub model_used: Option<String>,
    pub auto_selected: Option<bool>,
    pub run_id: Option<String>,
    pub elapsed_seconds: Option<f64>,
    pub sku: Option<String>,
    pub aggregation_label: Option<&'static str>,
    pub skus_count: Option<u64>,
    /// The run covered every product
    pub all_products: bool,
}

impl ResultSummary {
    pub fn accuracy(&self) -> Option<AccuracyBand> {
        self.wmape_pct.map(accuracy_band)
    }
}

pub fn summarize(result: &ForecastResult) -> ResultSummary {
    let metrics = result.metrics.as_ref();
    let info = result.aggregation_info.as_ref();
    let kind = info.and_then(|info| info.kind.as_deref());

    ResultSummary {
        wmape_pct: metrics.and_then(|m| m.wmape_pct()),
        bias_pct: metrics.and_then(|m| m.bias_pct()),
        model_used: result.model_used.clone(),
        auto_selected: result.auto_selected,
        run_id: result.run_id.clone(),
        elapsed_seconds: result.time,
        sku: result.sku.clone(),
        aggregation_label: kind.map(aggregation_label),
        skus_count: info.and_then(|info| info.skus_count),
        all_products: kind == Some("all"),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppliedFilter {
    pub label: &'static str,
    pub value: String,
}

fn sorted_joined(mut values: Vec<String>) -> String {
    values.sort();
    values.join(", ")
}

/// Filters the service reports it applied, in display order.
pub fn applied_filters(info: &AggregationInfo) -> Vec<AppliedFilter> {
    let mut filters = Vec::new();

    for (label, values) in [
        ("Processos", info.processes()),
        ("Linhas", info.lines()),
        ("ABC", info.classes()),
    ] {
        if !values.is_empty() {
            filters.push(AppliedFilter { label, value: sorted_joined(values) });
        }
    }

    if let Some((start, end)) = info.date_range.as_ref().and_then(|range| range.ends()) {
        filters.push(AppliedFilter {
            label: "Período",
            value: format!("{} - {}", day_label(start), day_label(end)),
        });
    }

    filters
}

/// Everything the result step shows, derived once per response.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProjectedResult {
    pub series: Vec<ChartPoint>,
    pub influences: Vec<InfluenceFactor>,
    pub summary: ResultSummary,
    pub filters: Vec<AppliedFilter>,
}

pub fn project(result: &ForecastResult) -> ProjectedResult {
    let filters = match &result.aggregation_info {
        Some(info) if info.kind.as_deref() != Some("all") => applied_filters(info),
        _ => Vec::new(),
    };

    ProjectedResult {
        series: chart_series(result),
        influences: top_influences(result),
        summary: summarize(result),
        filters,
    }
}
