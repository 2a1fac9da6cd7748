use taskfinder_protocol::{Confidence, InferenceResult};

fn indicator(confidence: Confidence) -> &'static str {
    match confidence {
        Confidence::High => "[+++]",
        Confidence::Medium => "[++ ]",
        Confidence::Low => "[+  ]",
    }
}

/// One-line label for a ranked result, e.g.
/// `[+++] prod-web / web-service (web) RUNNING - high, environment, score 110`.
#[must_use]
pub fn format_result(result: &InferenceResult) -> String {
    format!(
        "{} {} / {} ({}) {} - {}, {}, score {}",
        indicator(result.confidence),
        result.cluster.name,
        result.task.display_name,
        result.task.service_name,
        result.task.status,
        result.confidence,
        result.method,
        result.score
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{cluster, task};
    use taskfinder_protocol::{InferenceMethod, TaskStatus};

    #[test]
    fn label_carries_identity_and_confidence() {
        let result = InferenceResult {
            cluster: cluster("prod-web"),
            task: task("web-service", "web", TaskStatus::Running),
            confidence: Confidence::High,
            method: InferenceMethod::Environment,
            score: 110,
            reason: "Environment match".to_string(),
        };
        assert_eq!(
            format_result(&result),
            "[+++] prod-web / web-service (web) RUNNING - high, environment, score 110"
        );
    }

    #[test]
    fn low_confidence_has_distinct_indicator() {
        assert_ne!(indicator(Confidence::Low), indicator(Confidence::Medium));
        assert_ne!(indicator(Confidence::Medium), indicator(Confidence::High));
    }
}
