use std::cmp::Ordering;

use taskfinder_protocol::{Confidence, InferenceResult};

/// Appended to results whose task cannot take a session right now.
pub const UNREACHABLE_SUFFIX: &str = " (task stopped - unreachable)";

/// Final ordering of a merged result pool.
///
/// Live tasks come first, ordered by confidence then score (stable on ties).
/// Every other task follows in pool order, demoted to low confidence and a
/// zero score.
#[must_use]
pub fn classify_and_sort(pool: Vec<InferenceResult>) -> Vec<InferenceResult> {
    let (mut live, dead): (Vec<_>, Vec<_>) = pool.into_iter().partition(InferenceResult::is_live);

    live.sort_by(compare_results);

    live.extend(dead.into_iter().map(|mut result| {
        result.confidence = Confidence::Low;
        result.score = 0;
        result.reason.push_str(UNREACHABLE_SUFFIX);
        result
    }));
    live
}

/// Best first: higher confidence, then higher score.
#[must_use]
pub fn compare_results(a: &InferenceResult, b: &InferenceResult) -> Ordering {
    b.confidence
        .rank()
        .cmp(&a.confidence.rank())
        .then_with(|| b.score.cmp(&a.score))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{cluster, task};
    use proptest::prelude::*;
    use taskfinder_protocol::{InferenceMethod, TaskStatus};

    fn result(name: &str, status: TaskStatus, confidence: Confidence, score: u32) -> InferenceResult {
        InferenceResult {
            cluster: cluster("c"),
            task: task(name, name, status),
            confidence,
            method: InferenceMethod::Naming,
            score,
            reason: "r".to_string(),
        }
    }

    #[test]
    fn stopped_high_scorer_lands_after_live_results() {
        let pool = vec![
            result("stopped", TaskStatus::Stopped, Confidence::High, 90),
            result("weak", TaskStatus::Running, Confidence::Low, 25),
            result("ok", TaskStatus::Pending, Confidence::Medium, 60),
        ];
        let ranked = classify_and_sort(pool);

        let names: Vec<&str> = ranked.iter().map(|r| r.task.display_name.as_str()).collect();
        assert_eq!(names, vec!["ok", "weak", "stopped"]);
        assert_eq!(ranked[2].score, 0);
        assert_eq!(ranked[2].confidence, Confidence::Low);
        assert_eq!(ranked[2].reason, format!("r{UNREACHABLE_SUFFIX}"));
    }

    #[test]
    fn confidence_outranks_score() {
        let pool = vec![
            result("medium", TaskStatus::Running, Confidence::Medium, 74),
            result("high", TaskStatus::Running, Confidence::High, 45),
        ];
        let ranked = classify_and_sort(pool);
        assert_eq!(ranked[0].task.display_name, "high");
    }

    #[test]
    fn equal_keys_keep_pool_order() {
        let pool = vec![
            result("first", TaskStatus::Running, Confidence::High, 95),
            result("second", TaskStatus::Running, Confidence::High, 95),
        ];
        let ranked = classify_and_sort(pool);
        assert_eq!(ranked[0].task.display_name, "first");
        assert_eq!(ranked[1].task.display_name, "second");
    }

    fn status_strategy() -> impl Strategy<Value = TaskStatus> {
        prop_oneof![
            Just(TaskStatus::Provisioning),
            Just(TaskStatus::Pending),
            Just(TaskStatus::Activating),
            Just(TaskStatus::Running),
            Just(TaskStatus::Deactivating),
            Just(TaskStatus::Stopping),
            Just(TaskStatus::Deprovisioning),
            Just(TaskStatus::Stopped),
        ]
    }

    fn confidence_strategy() -> impl Strategy<Value = Confidence> {
        prop_oneof![
            Just(Confidence::High),
            Just(Confidence::Medium),
            Just(Confidence::Low),
        ]
    }

    proptest! {
        #[test]
        fn ranked_output_respects_liveness_and_order(
            entries in prop::collection::vec((status_strategy(), confidence_strategy(), 0u32..200), 0..24)
        ) {
            let pool: Vec<InferenceResult> = entries
                .iter()
                .enumerate()
                .map(|(idx, (status, confidence, score))| {
                    result(&format!("t{idx}"), *status, *confidence, *score)
                })
                .collect();
            let ranked = classify_and_sort(pool.clone());

            prop_assert_eq!(ranked.len(), pool.len());
            for pair in ranked.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                prop_assert!(a.is_live() || !b.is_live());
                if a.is_live() == b.is_live() {
                    prop_assert!(a.confidence.rank() >= b.confidence.rank());
                    if a.confidence == b.confidence {
                        prop_assert!(a.score >= b.score);
                    }
                }
            }
            for dead in ranked.iter().filter(|r| !r.is_live()) {
                prop_assert_eq!(dead.confidence, Confidence::Low);
                prop_assert_eq!(dead.score, 0);
            }
        }
    }
}
