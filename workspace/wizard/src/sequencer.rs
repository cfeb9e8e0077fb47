use std::fmt;

use tracing::{debug, trace};

use crate::state::{GranularityLevel, WizardState};

/// Steps of the forecast wizard, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum WizardStep {
    #[default]
    Basic,
    DataSelection,
    Review,
    /// Read-only view of a completed forecast
    Result,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::Basic,
        WizardStep::DataSelection,
        WizardStep::Review,
        WizardStep::Result,
    ];

    /// 1-based position shown in the progress bar.
    pub fn number(self) -> u8 {
        match self {
            WizardStep::Basic => 1,
            WizardStep::DataSelection => 2,
            WizardStep::Review => 3,
            WizardStep::Result => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WizardStep::Basic => "Configuração Básica",
            WizardStep::DataSelection => "Agregação/Seleção de Dados",
            WizardStep::Review => "Revisão",
            WizardStep::Result => "Resultado",
        }
    }

    pub fn next(self) -> Option<WizardStep> {
        match self {
            WizardStep::Basic => Some(WizardStep::DataSelection),
            WizardStep::DataSelection => Some(WizardStep::Review),
            WizardStep::Review => Some(WizardStep::Result),
            WizardStep::Result => None,
        }
    }

    pub fn previous(self) -> Option<WizardStep> {
        match self {
            WizardStep::Basic => None,
            WizardStep::DataSelection => Some(WizardStep::Basic),
            WizardStep::Review => Some(WizardStep::DataSelection),
            WizardStep::Result => Some(WizardStep::Review),
        }
    }

    pub fn is_terminal(self) -> bool {
        self.next().is_none()
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number(), self.label())
    }
}

/// Whether `step` may be left forward given the current state.
pub fn step_is_valid(step: WizardStep, state: &WizardState, has_result: bool) -> bool {
    match step {
        WizardStep::Basic => true,
        WizardStep::DataSelection => match state.granularity() {
            GranularityLevel::All => true,
            GranularityLevel::Combination | GranularityLevel::BySku => {
                state.has_target_selection()
            }
        },
        // Leaving review means entering the result step
        WizardStep::Review => has_result,
        WizardStep::Result => has_result,
    }
}

/// Linear step machine with a validity gate on every forward move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepSequencer {
    current: WizardStep,
}

impl StepSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> WizardStep {
        self.current
    }

    /// Whether [`StepSequencer::advance`] would move with the given inputs.
    pub fn can_advance(&self, state: &WizardState, has_result: bool) -> bool {
        self.current.next().is_some() && step_is_valid(self.current, state, has_result)
    }

    /// Moves one step forward. Returns `false` without moving at the last step
    /// or when the current step is not valid.
    pub fn advance(&mut self, state: &WizardState, has_result: bool) -> bool {
        match self.current.next() {
            Some(next) if step_is_valid(self.current, state, has_result) => {
                debug!("Wizard step {} -> {}", self.current, next);
                self.current = next;
                true
            }
            _ => {
                trace!("Advance refused on step {}", self.current);
                false
            }
        }
    }

    /// Moves one step back. Returns `false` on the first step.
    pub fn retreat(&mut self) -> bool {
        match self.current.previous() {
            Some(previous) => {
                debug!("Wizard step {} -> {}", self.current, previous);
                self.current = previous;
                true
            }
            None => false,
        }
    }

    pub fn reset(&mut self) {
        self.current = WizardStep::Basic;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::AbcClass;

    fn at(step: WizardStep) -> StepSequencer {
        StepSequencer { current: step }
    }

    #[test]
    fn test_step_numbers_and_labels() {
        let numbers: Vec<u8> = WizardStep::ALL.iter().map(|s| s.number()).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
        assert_eq!(WizardStep::DataSelection.to_string(), "2. Agregação/Seleção de Dados");
        assert!(WizardStep::Result.is_terminal());
    }

    #[test]
    fn test_empty_combination_blocks_data_selection() {
        let mut state = WizardState::new();
        state.set_granularity(GranularityLevel::Combination);

        let mut sequencer = at(WizardStep::DataSelection);
        assert!(!sequencer.advance(&state, false));
        assert_eq!(sequencer.current(), WizardStep::DataSelection);

        state.toggle_class(AbcClass::B);
        assert!(sequencer.advance(&state, false));
        assert_eq!(sequencer.current(), WizardStep::Review);
    }

    #[test]
    fn test_by_sku_advances_iff_sku_selected() {
        let mut state = WizardState::new();
        state.set_granularity(GranularityLevel::BySku);

        let mut sequencer = at(WizardStep::DataSelection);
        assert!(!sequencer.advance(&state, false));

        state.add_sku("PROD123");
        assert!(sequencer.advance(&state, false));
    }

    #[test]
    fn test_result_requires_a_result() {
        let state = WizardState::new();
        let mut sequencer = at(WizardStep::Review);

        assert!(!sequencer.advance(&state, false));
        assert!(sequencer.advance(&state, true));
        assert_eq!(sequencer.current(), WizardStep::Result);

        // last step
        assert!(!sequencer.advance(&state, true));
    }

    #[test]
    fn test_can_advance_agrees_with_advance() {
        let state = WizardState::new();
        let mut sequencer = StepSequencer::new();

        for expected in [WizardStep::DataSelection, WizardStep::Review, WizardStep::Result] {
            assert!(sequencer.can_advance(&state, true));
            assert!(sequencer.advance(&state, true));
            assert_eq!(sequencer.current(), expected);
        }

        assert!(!sequencer.can_advance(&state, true));
        assert!(!sequencer.advance(&state, true));
        assert_eq!(sequencer.current(), WizardStep::Result);
    }

    #[test]
    fn test_retreat() {
        let mut sequencer = StepSequencer::new();
        assert!(!sequencer.retreat());
        assert_eq!(sequencer.current(), WizardStep::Basic);

        let mut sequencer = at(WizardStep::Result);
        assert!(sequencer.retreat());
        assert_eq!(sequencer.current(), WizardStep::Review);
    }
}
