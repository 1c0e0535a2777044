//! Cross-field checks
//!
//! Runs after every field has parsed. Contradictory combinations are
//! corrected in place and reported; nothing here fails resolution.

use crate::config::{defaults, keys};
use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::plan::RunPlan;
use crate::settings::SettingsStore;

/// Correct contradictory settings on a freshly parsed plan.
pub(crate) fn reconcile(plan: &mut RunPlan) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    // Nothing to check if results are not kept.
    if plan.check_results && !plan.record_results {
        plan.check_results = false;
        diagnostics.push(Diagnostic::warning(DiagnosticKind::ResultCheckDisabled));
    }

    // A fixed seed only means something for a timed, randomized run.
    if plan.random_seed != defaults::DISABLED_SEED {
        let timed = plan.is_timed();
        let random = plan.is_random();
        if timed && random {
            diagnostics.push(Diagnostic::info(DiagnosticKind::SeedInUse {
                seed: plan.random_seed,
            }));
        } else {
            diagnostics.push(Diagnostic::warning(DiagnosticKind::SeedIgnored {
                seed: plan.random_seed,
                timed,
                random,
            }));
            plan.random_seed = defaults::DISABLED_SEED;
        }
    }

    diagnostics
}

/// Flag keys that nothing reads; usually a typo.
pub(crate) fn unknown_keys(store: &SettingsStore) -> Vec<Diagnostic> {
    store
        .keys()
        .filter(|key| !keys::is_known(key))
        .map(|key| {
            Diagnostic::warning(DiagnosticKind::UnknownKey {
                key: key.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_keys_flagged_in_key_order() {
        let store = SettingsStore::from_pairs([
            ("numThread", "4"),
            ("port", "8003"),
            ("hosts", "a"),
        ]);
        let diagnostics = unknown_keys(&store);
        let flagged: Vec<_> = diagnostics
            .iter()
            .map(|d| match &d.kind {
                DiagnosticKind::UnknownKey { key } => key.as_str(),
                other => panic!("unexpected diagnostic {other:?}"),
            })
            .collect();
        assert_eq!(flagged, vec!["hosts", "numThread"]);
    }

    #[test]
    fn test_no_unknown_keys() {
        let store = SettingsStore::from_pairs([("forceResults", "true")]);
        assert!(unknown_keys(&store).is_empty());
    }
}
