use common::PredictRequest;
use tracing::debug;

use crate::error::{Result, WizardError};
use crate::granularity::resolve_target;
use crate::state::WizardState;

/// Assembles the `POST /predict` body from the wizard state.
///
/// Pure: the state is not touched and equal states give equal payloads.
pub fn build_payload(state: &WizardState) -> Result<PredictRequest> {
    let periods = state.horizon_months();
    if periods == 0 {
        return Err(WizardError::InvalidHorizon(periods));
    }

    let target = resolve_target(state)?;
    let request = PredictRequest {
        periods,
        preview_rows: periods,
        model: state.model().wire_name(),
        target,
    };

    debug!(
        "Built {} payload for {} months with model {}",
        request.target.aggregation_type(),
        request.periods,
        request.model
    );
    Ok(request)
}
