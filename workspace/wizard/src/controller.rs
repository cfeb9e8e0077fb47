use common::{ForecastResult, PredictRequest, TargetSet};
use tracing::{debug, info, warn};

use crate::error::{Result, WizardError};
use crate::payload::build_payload;
use crate::projection::{self, ProjectedResult};
use crate::sequencer::{StepSequencer, WizardStep};
use crate::state::WizardState;

/// A prediction request handed out by [`ForecastWizard::begin_submission`].
///
/// The ticket must be passed back when the request finishes; outcomes carrying
/// any other ticket are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub ticket: u64,
    pub payload: PredictRequest,
}

#[derive(Debug, Clone, PartialEq)]
struct PendingSubmission {
    ticket: u64,
    sku: Option<String>,
}

/// Single owner of the wizard: form state, current step, the last forecast
/// and the in-flight request.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ForecastWizard {
    state: WizardState,
    sequencer: StepSequencer,
    result: Option<ForecastResult>,
    projection: Option<ProjectedResult>,
    pending: Option<PendingSubmission>,
    next_ticket: u64,
    last_error: Option<String>,
}

impl ForecastWizard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts on the first step with an already prepared state.
    pub fn with_state(state: WizardState) -> Self {
        Self { state, ..Self::default() }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn current_step(&self) -> WizardStep {
        self.sequencer.current()
    }

    pub fn result(&self) -> Option<&ForecastResult> {
        self.result.as_ref()
    }

    pub fn projection(&self) -> Option<&ProjectedResult> {
        self.projection.as_ref()
    }

    /// Message of the last failed submission, cleared by the next edit or
    /// submission.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.pending.is_some()
    }

    pub fn can_advance(&self) -> bool {
        !self.is_submitting() && self.sequencer.can_advance(&self.state, self.result.is_some())
    }

    pub fn can_retreat(&self) -> bool {
        !self.is_submitting() && self.current_step().previous().is_some()
    }

    /// Applies `change` to the form state.
    ///
    /// Refused on the result step and while a request is in flight. A
    /// previous result no longer matches the edited state and is dropped.
    pub fn edit<R>(&mut self, change: impl FnOnce(&mut WizardState) -> R) -> Result<R> {
        if self.current_step() == WizardStep::Result {
            return Err(WizardError::ReadOnlyStep);
        }
        if self.pending.is_some() {
            return Err(WizardError::SubmissionPending);
        }

        let outcome = change(&mut self.state);
        if self.result.take().is_some() {
            debug!("Edit dropped the previous forecast result");
            self.projection = None;
        }
        self.last_error = None;
        Ok(outcome)
    }

    /// [`ForecastWizard::edit`] for changes that can fail themselves.
    pub fn try_edit<R>(
        &mut self,
        change: impl FnOnce(&mut WizardState) -> Result<R>,
    ) -> Result<R> {
        self.edit(change)?
    }

    pub fn advance(&mut self) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.sequencer.advance(&self.state, self.result.is_some())
    }

    pub fn retreat(&mut self) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.sequencer.retreat()
    }

    /// Back to a fresh wizard ("new simulation"). Tickets issued before the
    /// reset stay invalid.
    pub fn reset(&mut self) {
        info!("Forecast wizard reset");
        *self = Self { next_ticket: self.next_ticket, ..Self::default() };
    }

    /// The payload the current state would submit.
    pub fn preview_payload(&self) -> Result<PredictRequest> {
        build_payload(&self.state)
    }

    /// Builds the payload and marks a request as in flight.
    pub fn begin_submission(&mut self) -> Result<Submission> {
        if self.current_step() != WizardStep::Review {
            return Err(WizardError::NotOnReviewStep);
        }
        if self.pending.is_some() {
            return Err(WizardError::SubmissionPending);
        }

        let payload = build_payload(&self.state)?;
        let ticket = self.next_ticket;
        self.next_ticket += 1;

        let sku = match &payload.target {
            TargetSet::Sku { sku } => Some(sku.clone()),
            _ => None,
        };
        self.pending = Some(PendingSubmission { ticket, sku });
        self.last_error = None;

        info!("Submitting forecast request #{}", ticket);
        Ok(Submission { ticket, payload })
    }

    /// Records the outcome of the request identified by `ticket`.
    ///
    /// Returns `false` when the ticket is not the outstanding one. On success
    /// the result is stored and the wizard enters the result step; on failure
    /// it stays on review with the error recorded.
    pub fn complete_submission(
        &mut self,
        ticket: u64,
        outcome: std::result::Result<ForecastResult, String>,
    ) -> bool {
        let pending = match self.pending.take() {
            Some(pending) if pending.ticket == ticket => pending,
            other => {
                warn!("Ignoring outcome of stale forecast request #{}", ticket);
                self.pending = other;
                return false;
            }
        };

        match outcome {
            Ok(mut result) => {
                if result.sku.is_none() {
                    result.sku = pending.sku;
                }
                info!(
                    "Forecast request #{} completed (run {})",
                    ticket,
                    result.run_id.as_deref().unwrap_or("-")
                );
                self.projection = Some(projection::project(&result));
                self.result = Some(result);
                self.sequencer.advance(&self.state, true);
            }
            Err(message) => {
                warn!("Forecast request #{} failed: {}", ticket, message);
                self.last_error = Some(message);
            }
        }
        true
    }

    /// Drops the outstanding request without an outcome.
    pub fn abandon_submission(&mut self, ticket: u64) -> bool {
        if !self.pending.as_ref().is_some_and(|pending| pending.ticket == ticket) {
            return false;
        }
        debug!("Forecast request #{} abandoned", ticket);
        self.pending = None;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::GranularityLevel;
    use crate::testing::{self, ScenarioCombination, ScenarioDefaults, ScenarioMultiSku};

    fn on_review(state: WizardState) -> ForecastWizard {
        let mut wizard = ForecastWizard::with_state(state);
        assert!(wizard.advance());
        assert!(wizard.advance());
        assert_eq!(wizard.current_step(), WizardStep::Review);
        wizard
    }

    #[test]
    fn test_scenarios_submit_expected_payloads() {
        testing::run_and_assert_scenario(&ScenarioDefaults::new());
        testing::run_and_assert_scenario(&ScenarioCombination::new());
        testing::run_and_assert_scenario(&ScenarioMultiSku::new());
    }

    #[test]
    fn test_successful_submission_enters_result() {
        let mut wizard = on_review(testing::scenario_multi_sku());
        let submission = wizard.begin_submission().unwrap();
        assert!(wizard.is_submitting());
        assert!(!wizard.can_advance());

        assert!(wizard.complete_submission(submission.ticket, Ok(testing::result_with_trend(3, 1.0, 2.0))));

        assert_eq!(wizard.current_step(), WizardStep::Result);
        assert!(!wizard.is_submitting());
        // the SKU is echoed locally
        assert_eq!(wizard.result().unwrap().sku.as_deref(), Some("PROD123"));
        assert_eq!(wizard.projection().unwrap().series.len(), 3);
    }

    #[test]
    fn test_only_one_submission_at_a_time() {
        let mut wizard = on_review(WizardState::new());
        let first = wizard.begin_submission().unwrap();

        assert_eq!(wizard.begin_submission(), Err(WizardError::SubmissionPending));
        assert_eq!(
            wizard.edit(|state| state.set_granularity(GranularityLevel::BySku)),
            Err(WizardError::SubmissionPending)
        );
        assert!(!wizard.retreat());

        assert!(wizard.abandon_submission(first.ticket));
        assert!(wizard.begin_submission().is_ok());
    }

    #[test]
    fn test_stale_ticket_is_ignored() {
        let mut wizard = on_review(WizardState::new());
        let first = wizard.begin_submission().unwrap();
        wizard.abandon_submission(first.ticket);
        let second = wizard.begin_submission().unwrap();

        assert!(!wizard.complete_submission(first.ticket, Ok(ForecastResult::default())));
        assert!(wizard.is_submitting());
        assert_eq!(wizard.current_step(), WizardStep::Review);

        assert!(wizard.complete_submission(second.ticket, Ok(ForecastResult::default())));
        assert_eq!(wizard.current_step(), WizardStep::Result);
    }

    #[test]
    fn test_failed_submission_stays_on_review() {
        let mut wizard = on_review(WizardState::new());
        let submission = wizard.begin_submission().unwrap();

        assert!(wizard.complete_submission(submission.ticket, Err("HTTP 500".to_string())));
        assert_eq!(wizard.current_step(), WizardStep::Review);
        assert_eq!(wizard.last_error(), Some("HTTP 500"));
        assert!(wizard.result().is_none());

        // the next edit clears the error
        wizard.edit(|state| state.set_factor("climate", true)).unwrap();
        assert_eq!(wizard.last_error(), None);
    }

    #[test]
    fn test_result_step_is_read_only() {
        let mut wizard = on_review(WizardState::new());
        let submission = wizard.begin_submission().unwrap();
        wizard.complete_submission(submission.ticket, Ok(ForecastResult::default()));

        assert_eq!(
            wizard.try_edit(|state| state.set_horizon(24)),
            Err(WizardError::ReadOnlyStep)
        );
        assert_eq!(wizard.state().horizon_months(), 18);

        // going back makes the form editable and the old result stale
        assert!(wizard.retreat());
        wizard.try_edit(|state| state.set_horizon(24)).unwrap();
        assert!(wizard.result().is_none());
        assert!(!wizard.advance());
    }

    #[test]
    fn test_submission_only_from_review() {
        let mut wizard = ForecastWizard::new();
        assert_eq!(wizard.begin_submission(), Err(WizardError::NotOnReviewStep));
    }

    #[test]
    fn test_reset_keeps_old_tickets_invalid() {
        let mut wizard = on_review(WizardState::new());
        let submission = wizard.begin_submission().unwrap();

        wizard.reset();
        assert_eq!(wizard.current_step(), WizardStep::Basic);
        assert!(!wizard.is_submitting());
        assert!(!wizard.complete_submission(submission.ticket, Ok(ForecastResult::default())));

        assert!(wizard.advance());
        assert!(wizard.advance());
        let next = wizard.begin_submission().unwrap();
        assert_ne!(next.ticket, submission.ticket);
    }
}
