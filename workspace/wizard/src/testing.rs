pub mod scenario_combination;
pub mod scenario_defaults;
pub mod scenario_multi_sku;

pub use scenario_combination::ScenarioCombination;
pub use scenario_defaults::ScenarioDefaults;
pub use scenario_multi_sku::ScenarioMultiSku;

use common::ForecastResult;
use serde_json::{Value, json};

use crate::controller::ForecastWizard;
use crate::sequencer::WizardStep;
use crate::state::{GranularityLevel, WizardState};

/// Expected `POST /predict` body of a scenario.
pub type AssertResult = Value;

/// Prepared test scenario.
pub type TestScenario = (WizardState, AssertResult);

/// Trait for building test scenarios.
pub trait TestScenarioBuilder {
    fn get_scenario(&self) -> TestScenario;
}

/// Walks the scenario state through the wizard up to submission and checks
/// the submitted payload.
pub fn run_and_assert_scenario(builder: &dyn TestScenarioBuilder) {
    let (state, expected) = builder.get_scenario();
    let mut wizard = ForecastWizard::with_state(state);

    while wizard.current_step() != WizardStep::Review {
        assert!(wizard.advance(), "stuck on step {}", wizard.current_step());
    }

    let submission = wizard.begin_submission().unwrap();
    assert_eq!(serde_json::to_value(&submission.payload).unwrap(), expected);
}

pub fn scenario_combination_line_3() -> WizardState {
    ScenarioCombination::new().get_scenario().0
}

pub fn scenario_multi_sku() -> WizardState {
    ScenarioMultiSku::new().get_scenario().0
}

pub fn scenario_empty_combination() -> WizardState {
    let mut state = WizardState::new();
    state.set_granularity(GranularityLevel::Combination);
    state
}

/// Monthly forecast of `len` rows starting January 2025 with the given trend
/// bounds.
pub fn result_with_trend(len: usize, first: f64, last: f64) -> ForecastResult {
    let preview: Vec<Value> = (0..len)
        .map(|i| {
            let year = 2025 + i / 12;
            let month = i % 12 + 1;
            json!({"ds": format!("{}-{:02}-01", year, month), "yhat": 1000.0 + i as f64})
        })
        .collect();

    serde_json::from_value(json!({
        "run_id": "run-test",
        "status": "ok",
        "preview": preview,
        "metrics": {"trend": {"first_value": first, "last_value": last}}
    }))
    .unwrap()
}

/// Response of a combined run with every optional section filled.
pub fn combined_result() -> ForecastResult {
    serde_json::from_value(json!({
        "run_id": "run-42",
        "status": "ok",
        "model_used": "Prophet",
        "auto_selected": false,
        "time": 3.217,
        "preview": [
            {"ds": "2025-01-01", "yhat": 1200.5},
            {"ds": "2025-02-01", "yhat": 1310.0}
        ],
        "metrics": {
            "global": {"metrics_global": {"WMAPE (%)": 24.8, "Bias (%)": 1.9}},
            "trend": {"first_value": 1200.0, "last_value": 1300.0},
            "feature_importance": [
                {"feature": "rolling_mean_3", "importance_pct": 12.2},
                {"feature": "lag_1", "importance_pct": 40.1}
            ]
        },
        "aggregation_info": {
            "type": "combined",
            "skus_count": 42,
            "familia": [3],
            "processo": ["processo_2"],
            "abc_class": ["A"],
            "date_range": {"start": "2022-01-01", "end": "2024-12-31"}
        }
    }))
    .unwrap()
}
