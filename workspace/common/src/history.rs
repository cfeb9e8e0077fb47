use std::collections::BTreeSet;

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One past forecast run as listed by `GET /previsoes`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryRecord {
    pub id_previsao: String,
    /// Processing timestamp, ISO formatted
    #[serde(default)]
    pub dt_processamento: Option<String>,
    #[serde(default)]
    pub ds_modelo: Option<String>,
    #[serde(default)]
    pub qtd_total_skus: Option<u64>,
    /// SKU code for single-SKU runs, `aggregated` otherwise
    #[serde(rename = "SKU/Tipo", default)]
    pub sku_or_kind: Option<String>,
}

impl HistoryRecord {
    pub fn processed_at(&self) -> Option<NaiveDateTime> {
        let raw = self.dt_processamento.as_deref()?;
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
            .ok()
    }

    /// `dd/mm/yyyy hh:mm`, or an empty string when the timestamp is unusable.
    pub fn processed_at_label(&self) -> String {
        self.processed_at()
            .map(|ts| ts.format("%d/%m/%Y %H:%M").to_string())
            .unwrap_or_default()
    }

    pub fn details(&self) -> String {
        match self.sku_or_kind.as_deref() {
            Some("aggregated") => "Agregado".to_string(),
            Some(sku) if !sku.is_empty() => sku.to_string(),
            _ => "Previsão".to_string(),
        }
    }
}

/// Age window of the history filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryPeriod {
    Last7Days,
    #[default]
    Last30Days,
    Last90Days,
    LastYear,
    All,
}

impl HistoryPeriod {
    pub const ALL: [HistoryPeriod; 5] = [
        HistoryPeriod::Last7Days,
        HistoryPeriod::Last30Days,
        HistoryPeriod::Last90Days,
        HistoryPeriod::LastYear,
        HistoryPeriod::All,
    ];

    fn days(self) -> Option<i64> {
        match self {
            HistoryPeriod::Last7Days => Some(7),
            HistoryPeriod::Last30Days => Some(30),
            HistoryPeriod::Last90Days => Some(90),
            HistoryPeriod::LastYear => Some(365),
            HistoryPeriod::All => None,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            HistoryPeriod::Last7Days => "ultimos-7",
            HistoryPeriod::Last30Days => "ultimos-30",
            HistoryPeriod::Last90Days => "ultimos-90",
            HistoryPeriod::LastYear => "ultimo-ano",
            HistoryPeriod::All => "todos",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|period| period.key() == key)
    }

    pub fn label(self) -> &'static str {
        match self {
            HistoryPeriod::Last7Days => "Últimos 7 dias",
            HistoryPeriod::Last30Days => "Últimos 30 dias",
            HistoryPeriod::Last90Days => "Últimos 90 dias",
            HistoryPeriod::LastYear => "Último ano",
            HistoryPeriod::All => "Todos",
        }
    }
}

/// Client-side filter of the history page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HistoryFilter {
    pub period: HistoryPeriod,
    /// Exact model name, case-insensitive; `None` keeps every model
    pub model: Option<String>,
    /// Substring of the run id or of the SKU/kind column
    pub search: String,
}

impl HistoryFilter {
    /// Runs outside a bounded period are dropped, and so are runs without a
    /// usable timestamp.
    pub fn matches(&self, record: &HistoryRecord, now: NaiveDateTime) -> bool {
        if let Some(days) = self.period.days() {
            match record.processed_at() {
                Some(ts) if ts >= now - Duration::days(days) => {}
                _ => return false,
            }
        }

        if let Some(model) = &self.model {
            let same = record
                .ds_modelo
                .as_deref()
                .is_some_and(|used| used.eq_ignore_ascii_case(model));
            if !same {
                return false;
            }
        }

        let needle = self.search.trim().to_lowercase();
        needle.is_empty()
            || record.id_previsao.to_lowercase().contains(&needle)
            || record.details().to_lowercase().contains(&needle)
    }

    pub fn apply(&self, records: &[HistoryRecord], now: NaiveDateTime) -> Vec<HistoryRecord> {
        records
            .iter()
            .filter(|record| self.matches(record, now))
            .cloned()
            .collect()
    }
}

/// Distinct model names present in `records`, sorted.
pub fn models_in(records: &[HistoryRecord]) -> Vec<String> {
    records
        .iter()
        .filter_map(|record| record.ds_modelo.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
