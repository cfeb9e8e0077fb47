use serde_json::json;

use crate::catalog::AbcClass;
use crate::state::{ForecastModel, GranularityLevel, WizardState};
use crate::testing::{TestScenario, TestScenarioBuilder};

/// Line 3, process 2, class A with Prophet over 18 months.
pub struct ScenarioCombination {}

impl ScenarioCombination {
    pub fn new() -> Self {
        Self {}
    }
}

impl TestScenarioBuilder for ScenarioCombination {
    fn get_scenario(&self) -> TestScenario {
        let mut state = WizardState::new();
        state.set_model(ForecastModel::Prophet);
        state.set_granularity(GranularityLevel::Combination);
        state.toggle_line("linha_3").unwrap();
        state.toggle_process("processo_2").unwrap();
        state.toggle_class(AbcClass::A);

        let expected = json!({
            "periods": 18,
            "preview_rows": 18,
            "model": "Prophet",
            "aggregation_type": "combined",
            "familia": [3],
            "processo": ["processo_2"],
            "abc_class": ["A"]
        });

        (state, expected)
    }
}
