use serde_json::json;

use crate::state::WizardState;
use crate::testing::{TestScenario, TestScenarioBuilder};

/// Untouched wizard: every product, automatic model, 18 months.
pub struct ScenarioDefaults {}

impl ScenarioDefaults {
    pub fn new() -> Self {
        Self {}
    }
}

impl TestScenarioBuilder for ScenarioDefaults {
    fn get_scenario(&self) -> TestScenario {
        let expected = json!({
            "periods": 18,
            "preview_rows": 18,
            "model": "auto",
            "aggregation_type": "all"
        });

        (WizardState::new(), expected)
    }
}
