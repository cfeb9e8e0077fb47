use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use tracing::{debug, trace};

use crate::catalog::{self, AbcClass};
use crate::error::{Result, WizardError};

/// Forecast horizons offered by the basic step, in months.
pub const HORIZON_CHOICES: [u32; 4] = [12, 18, 24, 36];

pub const DEFAULT_HORIZON: u32 = 18;

/// External factors with their display label and default flag.
pub const EXTERNAL_FACTORS: &[(&str, &str, bool)] = &[
    ("marketing", "Dados de Marketing", true),
    ("climate", "Dados Climáticos", false),
    ("sector_events", "Eventos Setoriais", false),
    ("seasonality", "Sazonalidade", true),
    ("holidays", "Calendário de Feriados", false),
    ("macro_indicators", "Indicadores Macroeconômicos", false),
];

static NO_IDS: BTreeSet<String> = BTreeSet::new();
static NO_CLASSES: BTreeSet<AbcClass> = BTreeSet::new();

/// Forecasting model requested from the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ForecastModel {
    XGBoost,
    Prophet,
    Ml,
    /// Let the service pick a model per SKU
    #[default]
    Auto,
}

impl ForecastModel {
    pub const ALL: [ForecastModel; 4] = [
        ForecastModel::Auto,
        ForecastModel::Prophet,
        ForecastModel::XGBoost,
        ForecastModel::Ml,
    ];

    /// Internal tag used by the UI.
    pub fn tag(self) -> &'static str {
        match self {
            ForecastModel::XGBoost => "xgboost",
            ForecastModel::Prophet => "prophet",
            ForecastModel::Ml => "ml",
            ForecastModel::Auto => "auto",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ForecastModel::XGBoost => "XGBoost",
            ForecastModel::Prophet => "Prophet",
            ForecastModel::Ml => "ML",
            ForecastModel::Auto => "Automático (Melhor Fit)",
        }
    }

    /// Name transmitted in the `model` field: `auto` as is, any other tag
    /// with its first letter upper-cased.
    pub fn wire_name(self) -> String {
        match self {
            ForecastModel::Auto => "auto".to_string(),
            other => capitalize(other.tag()),
        }
    }

    /// Inverse of [`ForecastModel::wire_name`].
    pub fn from_wire_name(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|model| model.wire_name() == name)
            .ok_or_else(|| WizardError::UnknownModel(name.to_string()))
    }
}

impl FromStr for ForecastModel {
    type Err = WizardError;

    fn from_str(s: &str) -> Result<Self> {
        let tag = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|model| model.tag() == tag)
            .ok_or_else(|| WizardError::UnknownModel(s.to_string()))
    }
}

impl fmt::Display for ForecastModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

fn capitalize(tag: &str) -> String {
    let mut chars = tag.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Axis along which the forecast request is scoped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GranularityLevel {
    #[default]
    All,
    Combination,
    BySku,
}

impl GranularityLevel {
    pub const ALL: [GranularityLevel; 3] = [
        GranularityLevel::All,
        GranularityLevel::Combination,
        GranularityLevel::BySku,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            GranularityLevel::All => "all",
            GranularityLevel::Combination => "combination",
            GranularityLevel::BySku => "by_sku",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GranularityLevel::All => "Todas",
            GranularityLevel::Combination => "Combinação",
            GranularityLevel::BySku => "SKUs Específicos",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            GranularityLevel::All => "Previsão de todas as linhas e processos",
            GranularityLevel::Combination => "Selecione linhas, processos e classificações",
            GranularityLevel::BySku => "Previsão individual de SKUs",
        }
    }
}

impl FromStr for GranularityLevel {
    type Err = WizardError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|level| level.tag() == s.trim())
            .ok_or_else(|| WizardError::UnknownGranularity(s.to_string()))
    }
}

/// In-progress forecast configuration.
///
/// Fields are private: every change goes through a named operation so the
/// line/process compatibility rules and SKU uniqueness always hold.
#[derive(Debug, Clone, PartialEq)]
pub struct WizardState {
    horizon_months: u32,
    model: ForecastModel,
    granularity: GranularityLevel,
    selected_lines: BTreeSet<String>,
    selected_processes: BTreeSet<String>,
    selected_classes: BTreeSet<AbcClass>,
    selected_skus: Vec<String>,
    external_factors: BTreeMap<String, bool>,
}

impl Default for WizardState {
    fn default() -> Self {
        Self {
            horizon_months: DEFAULT_HORIZON,
            model: ForecastModel::default(),
            granularity: GranularityLevel::default(),
            selected_lines: BTreeSet::new(),
            selected_processes: BTreeSet::new(),
            selected_classes: BTreeSet::new(),
            selected_skus: Vec::new(),
            external_factors: EXTERNAL_FACTORS
                .iter()
                .map(|(key, _, enabled)| (key.to_string(), *enabled))
                .collect(),
        }
    }
}

impl WizardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn horizon_months(&self) -> u32 {
        self.horizon_months
    }

    pub fn model(&self) -> ForecastModel {
        self.model
    }

    pub fn granularity(&self) -> GranularityLevel {
        self.granularity
    }

    /// Selected lines; empty unless the granularity is `combination`.
    pub fn selected_lines(&self) -> &BTreeSet<String> {
        match self.granularity {
            GranularityLevel::Combination => &self.selected_lines,
            _ => &NO_IDS,
        }
    }

    /// Selected processes; empty unless the granularity is `combination`.
    pub fn selected_processes(&self) -> &BTreeSet<String> {
        match self.granularity {
            GranularityLevel::Combination => &self.selected_processes,
            _ => &NO_IDS,
        }
    }

    /// Selected ABC classes; empty unless the granularity is `combination`.
    pub fn selected_classes(&self) -> &BTreeSet<AbcClass> {
        match self.granularity {
            GranularityLevel::Combination => &self.selected_classes,
            _ => &NO_CLASSES,
        }
    }

    /// Selected SKUs in insertion order; empty unless the granularity is `by_sku`.
    pub fn selected_skus(&self) -> &[String] {
        match self.granularity {
            GranularityLevel::BySku => &self.selected_skus,
            _ => &[],
        }
    }

    pub fn external_factors(&self) -> &BTreeMap<String, bool> {
        &self.external_factors
    }

    pub fn factor_enabled(&self, key: &str) -> bool {
        self.external_factors.get(key).copied().unwrap_or(false)
    }

    pub fn set_horizon(&mut self, months: u32) -> Result<()> {
        if !HORIZON_CHOICES.contains(&months) {
            return Err(WizardError::InvalidHorizon(months));
        }
        trace!("Horizon set to {} months", months);
        self.horizon_months = months;
        Ok(())
    }

    pub fn set_model(&mut self, model: ForecastModel) {
        trace!("Model set to {}", model);
        self.model = model;
    }

    /// Switches the granularity level, clearing the selections of the level
    /// being left.
    pub fn set_granularity(&mut self, level: GranularityLevel) {
        if level == self.granularity {
            return;
        }
        debug!("Granularity changed from {} to {}", self.granularity.tag(), level.tag());
        self.granularity = level;
        self.selected_lines.clear();
        self.selected_processes.clear();
        self.selected_classes.clear();
        self.selected_skus.clear();
    }

    /// Adds or removes a line. Processes not shared by every selected line are
    /// dropped afterwards.
    pub fn toggle_line(&mut self, line_id: &str) -> Result<()> {
        if catalog::line(line_id).is_none() {
            return Err(WizardError::UnknownLine(line_id.to_string()));
        }

        if !self.selected_lines.remove(line_id) {
            self.selected_lines.insert(line_id.to_string());
        }

        if !self.selected_lines.is_empty() {
            let allowed: BTreeSet<&str> = catalog::enabled_processes(&self.selected_lines)
                .iter()
                .map(|p| p.id)
                .collect();
            let before = self.selected_processes.len();
            self.selected_processes.retain(|p| allowed.contains(p.as_str()));
            if self.selected_processes.len() != before {
                debug!("Dropped {} process(es) not shared by the selected lines",
                    before - self.selected_processes.len());
            }
        }
        Ok(())
    }

    /// Adds or removes a process. Lines that do not run every selected process
    /// are dropped afterwards.
    pub fn toggle_process(&mut self, process_id: &str) -> Result<()> {
        if catalog::process(process_id).is_none() {
            return Err(WizardError::UnknownProcess(process_id.to_string()));
        }

        if !self.selected_processes.remove(process_id) {
            self.selected_processes.insert(process_id.to_string());
        }

        let processes = &self.selected_processes;
        self.selected_lines.retain(|id| {
            catalog::line(id)
                .map(|line| processes.iter().all(|p| line.offers(p)))
                .unwrap_or(false)
        });
        Ok(())
    }

    pub fn toggle_class(&mut self, class: AbcClass) {
        if !self.selected_classes.remove(&class) {
            self.selected_classes.insert(class);
        }
    }

    /// Appends a SKU. Input is trimmed; blank input and duplicates are
    /// ignored. Returns whether the SKU was added.
    pub fn add_sku(&mut self, sku: &str) -> bool {
        let sku = sku.trim();
        if sku.is_empty() || self.selected_skus.iter().any(|s| s == sku) {
            return false;
        }
        self.selected_skus.push(sku.to_string());
        true
    }

    pub fn remove_sku(&mut self, sku: &str) -> bool {
        let before = self.selected_skus.len();
        self.selected_skus.retain(|s| s != sku);
        self.selected_skus.len() != before
    }

    pub fn set_factor(&mut self, key: &str, enabled: bool) {
        self.external_factors.insert(key.to_string(), enabled);
    }

    /// Whether the active granularity has enough selected to scope a request.
    pub fn has_target_selection(&self) -> bool {
        match self.granularity {
            GranularityLevel::All => true,
            GranularityLevel::Combination => {
                !self.selected_lines.is_empty()
                    || !self.selected_processes.is_empty()
                    || !self.selected_classes.is_empty()
            }
            GranularityLevel::BySku => !self.selected_skus.is_empty(),
        }
    }

    /// One-line description of the current selection.
    pub fn selection_summary(&self) -> String {
        match self.granularity {
            GranularityLevel::All => "Todas as linhas, processos e classificações".to_string(),
            GranularityLevel::Combination => format!(
                "{} linha(s) • {} processo(s) • {} classe(s)",
                self.selected_lines.len(),
                self.selected_processes.len(),
                self.selected_classes.len()
            ),
            GranularityLevel::BySku => match self.selected_skus.as_slice() {
                [] => String::new(),
                skus => format!("SKU: {}", skus.join(", ")),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn combination_state() -> WizardState {
        let mut state = WizardState::new();
        state.set_granularity(GranularityLevel::Combination);
        state
    }

    #[test]
    fn test_defaults() {
        let state = WizardState::new();
        assert_eq!(state.horizon_months(), 18);
        assert_eq!(state.model(), ForecastModel::Auto);
        assert_eq!(state.granularity(), GranularityLevel::All);
        assert!(state.factor_enabled("marketing"));
        assert!(!state.factor_enabled("climate"));
    }

    #[test]
    fn test_horizon_must_be_a_listed_choice() {
        let mut state = WizardState::new();
        assert_eq!(state.set_horizon(7), Err(WizardError::InvalidHorizon(7)));
        assert_eq!(state.set_horizon(0), Err(WizardError::InvalidHorizon(0)));
        assert_eq!(state.horizon_months(), 18);
        state.set_horizon(36).unwrap();
        assert_eq!(state.horizon_months(), 36);
    }

    #[test]
    fn test_model_tags_and_wire_names() {
        assert_eq!("prophet".parse::<ForecastModel>(), Ok(ForecastModel::Prophet));
        assert_eq!("XGBoost".parse::<ForecastModel>(), Ok(ForecastModel::XGBoost));
        assert_eq!(
            "arima".parse::<ForecastModel>(),
            Err(WizardError::UnknownModel("arima".to_string()))
        );

        assert_eq!(ForecastModel::Auto.wire_name(), "auto");
        assert_eq!(ForecastModel::Prophet.wire_name(), "Prophet");
        assert_eq!(ForecastModel::XGBoost.wire_name(), "Xgboost");
        assert_eq!(ForecastModel::Ml.wire_name(), "Ml");

        for model in ForecastModel::ALL {
            assert_eq!(ForecastModel::from_wire_name(&model.wire_name()), Ok(model));
        }
    }

    #[test]
    fn test_granularity_parsing() {
        assert_eq!("by_sku".parse::<GranularityLevel>(), Ok(GranularityLevel::BySku));
        assert!("por_linha".parse::<GranularityLevel>().is_err());
    }

    #[test]
    fn test_duplicate_sku_does_not_grow_sequence() {
        let mut state = WizardState::new();
        state.set_granularity(GranularityLevel::BySku);

        assert!(state.add_sku("PROD123"));
        assert!(!state.add_sku(" PROD123 "));
        assert!(!state.add_sku("   "));
        assert!(state.add_sku("PROD456"));
        assert_eq!(state.selected_skus(), ["PROD123", "PROD456"]);

        assert!(state.remove_sku("PROD123"));
        assert_eq!(state.selected_skus(), ["PROD456"]);
    }

    #[test]
    fn test_stale_selections_are_not_visible() {
        let mut state = WizardState::new();
        state.set_granularity(GranularityLevel::BySku);
        state.add_sku("PROD123");

        // Selections made while another level is active never leak out
        state.set_granularity(GranularityLevel::Combination);
        assert!(state.selected_skus().is_empty());
        state.toggle_line("linha_1").unwrap();

        state.set_granularity(GranularityLevel::All);
        assert!(state.selected_lines().is_empty());
        assert!(state.has_target_selection());
    }

    #[test]
    fn test_toggle_line_prunes_incompatible_processes() {
        let mut state = combination_state();
        state.toggle_process("processo_1").unwrap();
        state.toggle_process("processo_2").unwrap();

        state.toggle_line("linha_3").unwrap();

        assert!(state.selected_lines().contains("linha_3"));
        let processes: Vec<&str> = state.selected_processes().iter().map(String::as_str).collect();
        assert_eq!(processes, vec!["processo_2"]);
    }

    #[test]
    fn test_toggle_process_prunes_lines_without_it() {
        let mut state = combination_state();
        state.toggle_line("linha_1").unwrap();
        state.toggle_line("linha_3").unwrap();

        state.toggle_process("processo_4").unwrap();

        let lines: Vec<&str> = state.selected_lines().iter().map(String::as_str).collect();
        assert_eq!(lines, vec!["linha_3"]);

        // toggling again removes it
        state.toggle_process("processo_4").unwrap();
        assert!(state.selected_processes().is_empty());
    }

    #[test]
    fn test_unknown_catalog_ids_are_rejected() {
        let mut state = combination_state();
        assert_eq!(
            state.toggle_line("linha_9"),
            Err(WizardError::UnknownLine("linha_9".to_string()))
        );
        assert_eq!(
            state.toggle_process("processo_x"),
            Err(WizardError::UnknownProcess("processo_x".to_string()))
        );
    }

    #[test]
    fn test_selection_summary() {
        let mut state = combination_state();
        state.toggle_line("linha_2").unwrap();
        state.toggle_class(AbcClass::A);
        state.toggle_class(AbcClass::C);
        assert_eq!(state.selection_summary(), "1 linha(s) • 0 processo(s) • 2 classe(s)");
    }
}
