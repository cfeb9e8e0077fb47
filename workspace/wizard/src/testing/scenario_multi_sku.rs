use serde_json::json;

use crate::state::{ForecastModel, GranularityLevel, WizardState};
use crate::testing::{TestScenario, TestScenarioBuilder};

/// Two SKUs selected: only the first one is forecast.
pub struct ScenarioMultiSku {}

impl ScenarioMultiSku {
    pub fn new() -> Self {
        Self {}
    }
}

impl TestScenarioBuilder for ScenarioMultiSku {
    fn get_scenario(&self) -> TestScenario {
        let mut state = WizardState::new();
        state.set_horizon(12).unwrap();
        state.set_model(ForecastModel::XGBoost);
        state.set_granularity(GranularityLevel::BySku);
        state.add_sku(" PROD123 ");
        state.add_sku("PROD456");
        state.add_sku("PROD123");

        let expected = json!({
            "periods": 12,
            "preview_rows": 12,
            "model": "Xgboost",
            "aggregation_type": "sku",
            "sku": "PROD123"
        });

        (state, expected)
    }
}
