use taskfinder_protocol::{
    AnalysisMatch, Cluster, Confidence, DatabaseInstance, InferenceMethod, InferenceResult, Task,
};

use crate::tokenizer::{is_significant, segments};

const NAME_CONTAINS_DB: u32 = 40;
const SERVICE_CONTAINS_DB: u32 = 40;
const SEGMENT_IN_NAME: u32 = 15;
const SEGMENT_IN_SERVICE: u32 = 15;

/// Simulated environment matches at or below this score are discarded.
pub const ENV_SCORE_FLOOR: u32 = 20;

const HIGH_THRESHOLD: u32 = 80;
const MEDIUM_THRESHOLD: u32 = 50;

const ANALYSIS_FALLBACK_REASON: &str = "Matched by pre-computed analysis";

/// Environment-style association heuristic.
///
/// Real task environments are not inspected: the variables a task would
/// carry (`DB_HOST`, `DATABASE_URL`, ...) are approximated by the task and
/// service names. Pre-computed [`AnalysisMatch`] hints for the same database
/// contribute independent results. A hint with a missing or empty task
/// family is skipped.
///
/// Tasks are scored one after another; concurrency lives one level up, where
/// each candidate cluster is listed and scored in its own branch.
pub struct EnvironmentScorer;

impl EnvironmentScorer {
    #[must_use]
    pub fn score_against_instance(
        tasks: &[Task],
        cluster: &Cluster,
        database: &DatabaseInstance,
        analysis_matches: &[AnalysisMatch],
    ) -> Vec<InferenceResult> {
        let db = database.identifier.to_lowercase();
        let db_segments: Vec<String> = segments(&database.identifier)
            .into_iter()
            .filter(|segment| is_significant(segment))
            .collect();
        let relevant: Vec<&AnalysisMatch> = analysis_matches
            .iter()
            .filter(|m| m.database_identifier == database.identifier)
            .collect();

        let mut results = Vec::new();
        for task in tasks {
            if let Some(result) = Self::simulated_env_match(task, cluster, &db, &db_segments) {
                results.push(result);
            }
            results.extend(
                relevant
                    .iter()
                    .filter_map(|analysis| Self::analysis_match(task, cluster, analysis)),
            );
        }

        log::debug!(
            "Environment scoring in {}: {} results from {} tasks",
            cluster.name,
            results.len(),
            tasks.len()
        );
        results
    }

    fn simulated_env_match(
        task: &Task,
        cluster: &Cluster,
        db: &str,
        db_segments: &[String],
    ) -> Option<InferenceResult> {
        let name = task.display_name.to_lowercase();
        let service = task.service_name.to_lowercase();
        let mut score = 0;
        let mut details = Vec::new();

        if name.contains(db) {
            score += NAME_CONTAINS_DB;
            details.push(format!("task name references {db}"));
        }
        if service.contains(db) {
            score += SERVICE_CONTAINS_DB;
            details.push(format!("service name references {db}"));
        }
        for segment in db_segments {
            if name.contains(segment.as_str()) {
                score += SEGMENT_IN_NAME;
                details.push(format!("task name shares '{segment}'"));
            }
            if service.contains(segment.as_str()) {
                score += SEGMENT_IN_SERVICE;
                details.push(format!("service name shares '{segment}'"));
            }
        }

        if score <= ENV_SCORE_FLOOR {
            return None;
        }

        Some(InferenceResult {
            cluster: cluster.clone(),
            task: task.clone(),
            confidence: Self::confidence(score),
            method: InferenceMethod::Environment,
            score,
            reason: format!("Environment match: {}", details.join(", ")),
        })
    }

    fn analysis_match(
        task: &Task,
        cluster: &Cluster,
        analysis: &AnalysisMatch,
    ) -> Option<InferenceResult> {
        let family = analysis
            .task_family
            .as_deref()
            .filter(|family| !family.is_empty())?;
        if !(task.task_id.contains(family) || task.service_name.contains(family)) {
            return None;
        }

        let reason = if analysis.reasons.is_empty() {
            ANALYSIS_FALLBACK_REASON.to_string()
        } else {
            format!("Analysis: {}", analysis.reasons.join("; "))
        };

        Some(InferenceResult {
            cluster: cluster.clone(),
            task: task.clone(),
            confidence: analysis.confidence,
            method: InferenceMethod::Environment,
            score: Self::analysis_score(analysis.confidence),
            reason,
        })
    }

    #[must_use]
    pub const fn analysis_score(confidence: Confidence) -> u32 {
        match confidence {
            Confidence::High => 95,
            Confidence::Medium => 75,
            Confidence::Low => 45,
        }
    }

    #[must_use]
    pub const fn confidence(score: u32) -> Confidence {
        if score >= HIGH_THRESHOLD {
            Confidence::High
        } else if score >= MEDIUM_THRESHOLD {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }
}
