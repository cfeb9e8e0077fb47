//! Derivation of the target-set descriptor sent with a forecast request.

use common::TargetSet;
use tracing::{debug, warn};

use crate::error::{Result, WizardError};
use crate::state::{GranularityLevel, WizardState};

/// Numeric ordinal carried by the trailing digits of a line id
/// (`linha_3` -> 3).
pub fn line_ordinal(line_id: &str) -> Option<u32> {
    let prefix_len = line_id.trim_end_matches(|c: char| c.is_ascii_digit()).len();
    line_id[prefix_len..].parse().ok()
}

fn non_empty<T>(values: Vec<T>) -> Option<Vec<T>> {
    if values.is_empty() { None } else { Some(values) }
}

/// Resolves the active granularity of `state` into a [`TargetSet`].
pub fn resolve_target(state: &WizardState) -> Result<TargetSet> {
    match state.granularity() {
        GranularityLevel::All => Ok(TargetSet::All),
        GranularityLevel::BySku => {
            let skus = state.selected_skus();
            let sku = skus.first().ok_or(WizardError::MissingSku)?;
            if skus.len() > 1 {
                // Only one SKU per request is transmitted
                warn!(
                    "{} SKUs selected, forecasting only {} (ignored: {:?})",
                    skus.len(),
                    sku,
                    &skus[1..]
                );
            }
            Ok(TargetSet::Sku { sku: sku.clone() })
        }
        GranularityLevel::Combination => {
            let familia: Vec<u32> = state
                .selected_lines()
                .iter()
                .filter_map(|id| {
                    let ordinal = line_ordinal(id);
                    if ordinal.is_none() {
                        debug!("Line id {} has no ordinal, skipping filter", id);
                    }
                    ordinal
                })
                .collect();
            let processo: Vec<String> = state.selected_processes().iter().cloned().collect();
            let abc_class: Vec<String> = state
                .selected_classes()
                .iter()
                .map(|class| class.as_str().to_string())
                .collect();

            if familia.is_empty() && processo.is_empty() && abc_class.is_empty() {
                return Err(WizardError::EmptyCombination);
            }

            Ok(TargetSet::Combined {
                familia: non_empty(familia),
                processo: non_empty(processo),
                abc_class: non_empty(abc_class),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::AbcClass;

    #[test]
    fn test_line_ordinal() {
        assert_eq!(line_ordinal("linha_3"), Some(3));
        assert_eq!(line_ordinal("linha_12"), Some(12));
        assert_eq!(line_ordinal("linha"), None);
        assert_eq!(line_ordinal(""), None);
    }

    #[test]
    fn test_all_resolves_without_filters() {
        assert_eq!(resolve_target(&WizardState::new()), Ok(TargetSet::All));
    }

    #[test]
    fn test_by_sku_narrows_to_first_sku() {
        let mut state = WizardState::new();
        state.set_granularity(GranularityLevel::BySku);
        assert_eq!(resolve_target(&state), Err(WizardError::MissingSku));

        state.add_sku("PROD123");
        state.add_sku("PROD456");
        assert_eq!(
            resolve_target(&state),
            Ok(TargetSet::Sku { sku: "PROD123".to_string() })
        );
    }

    #[test]
    fn test_combination_with_only_classes() {
        let mut state = WizardState::new();
        state.set_granularity(GranularityLevel::Combination);
        assert_eq!(resolve_target(&state), Err(WizardError::EmptyCombination));

        state.toggle_class(AbcClass::C);
        state.toggle_class(AbcClass::A);
        assert_eq!(
            resolve_target(&state),
            Ok(TargetSet::Combined {
                familia: None,
                processo: None,
                abc_class: Some(vec!["A".to_string(), "C".to_string()]),
            })
        );
    }

    #[test]
    fn test_combination_lines_become_ordinals() {
        let mut state = WizardState::new();
        state.set_granularity(GranularityLevel::Combination);
        state.toggle_line("linha_4").unwrap();
        state.toggle_line("linha_1").unwrap();

        let TargetSet::Combined { familia, processo, .. } = resolve_target(&state).unwrap() else {
            panic!("expected a combined target");
        };
        assert_eq!(familia, Some(vec![1, 4]));
        assert_eq!(processo, None);
    }
}
