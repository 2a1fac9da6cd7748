use taskfinder_protocol::{
    Cluster, Confidence, DatabaseInstance, InferenceMethod, InferenceResult, Task,
};

use crate::tokenizer::{is_significant, segments};

const BASE_SCORE: u32 = 25;
const NAME_CONTAINS_DB: u32 = 35;
const SERVICE_CONTAINS_DB: u32 = 30;
const SEGMENT_IN_NAME: u32 = 20;
const SEGMENT_IN_SERVICE: u32 = 15;

const HIGH_THRESHOLD: u32 = 75;
const MEDIUM_THRESHOLD: u32 = 50;

/// Name-overlap heuristic used when the environment heuristic under-delivers.
///
/// Every task yields exactly one result; weak matches surface as low
/// confidence instead of being dropped.
pub struct NamingScorer;

impl NamingScorer {
    #[must_use]
    pub fn score_by_naming(
        tasks: &[Task],
        cluster: &Cluster,
        database: &DatabaseInstance,
    ) -> Vec<InferenceResult> {
        let db = database.identifier.to_lowercase();
        let db_segments: Vec<String> = segments(&database.identifier)
            .into_iter()
            .filter(|segment| is_significant(segment))
            .collect();

        tasks
            .iter()
            .map(|task| {
                let (score, reasons) = Self::score_task(task, &db, &db_segments);
                let reason = if reasons.is_empty() {
                    "Naming baseline only".to_string()
                } else {
                    format!("Naming match: {}", reasons.join(", "))
                };
                InferenceResult {
                    cluster: cluster.clone(),
                    task: task.clone(),
                    confidence: Self::confidence(score),
                    method: InferenceMethod::Naming,
                    score,
                    reason,
                }
            })
            .collect()
    }

    fn score_task(task: &Task, db: &str, db_segments: &[String]) -> (u32, Vec<String>) {
        let name = task.display_name.to_lowercase();
        let service = task.service_name.to_lowercase();
        let mut score = BASE_SCORE;
        let mut reasons = Vec::new();

        if name.contains(db) {
            score += NAME_CONTAINS_DB;
            reasons.push("task name contains database identifier".to_string());
        }
        if service.contains(db) {
            score += SERVICE_CONTAINS_DB;
            reasons.push("service name contains database identifier".to_string());
        }
        for segment in db_segments {
            if name.contains(segment.as_str()) {
                score += SEGMENT_IN_NAME;
                reasons.push(format!("task name contains '{segment}'"));
            }
            if service.contains(segment.as_str()) {
                score += SEGMENT_IN_SERVICE;
                reasons.push(format!("service name contains '{segment}'"));
            }
        }

        (score, reasons)
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
