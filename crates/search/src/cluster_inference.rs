use serde::Serialize;
use taskfinder_protocol::Cluster;

use crate::tokenizer::{is_significant, segments, words};

const EXACT_MATCH: u32 = 100;
const PREFIX_MATCH: u32 = 80;
const CLUSTER_CONTAINS_DB: u32 = 70;
const DB_CONTAINS_CLUSTER: u32 = 60;
const SEGMENT_MATCH: u32 = 30;
const WORD_MATCH: u32 = 15;
const ENV_KEYWORD_MATCH: u32 = 25;
const PATTERN_KEYWORD_MATCH: u32 = 20;

/// Cluster names shorter than this never earn the "identifier contains
/// cluster" bonus.
const MIN_CONTAINED_CLUSTER_LEN: usize = 4;

const ENV_KEYWORDS: [&str; 8] = [
    "dev",
    "development",
    "staging",
    "stage",
    "stg",
    "prod",
    "production",
    "test",
];

const PATTERN_KEYWORDS: [&str; 6] = ["app", "web", "api", "service", "backend", "frontend"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClusterScore {
    pub name: String,
    pub score: u32,
}

/// Ranks clusters by how strongly their names echo a database identifier.
pub struct ClusterNameInferencer;

impl ClusterNameInferencer {
    /// Ordered cluster names with a positive score, best first.
    #[must_use]
    pub fn infer(database_identifier: &str, clusters: &[Cluster]) -> Vec<String> {
        Self::rank(database_identifier, clusters)
            .into_iter()
            .map(|scored| scored.name)
            .collect()
    }

    /// Same ordering as [`Self::infer`], keeping the scores.
    #[must_use]
    pub fn rank(database_identifier: &str, clusters: &[Cluster]) -> Vec<ClusterScore> {
        let db = database_identifier.to_lowercase();
        let db_segments = segments(database_identifier);
        let db_words = words(database_identifier);

        let mut scored: Vec<ClusterScore> = clusters
            .iter()
            .map(|cluster| ClusterScore {
                name: cluster.name.clone(),
                score: Self::score(&db, &db_segments, &db_words, &cluster.name),
            })
            .filter(|scored| scored.score > 0)
            .collect();

        // Stable: equal scores keep listing order.
        scored.sort_by(|a, b| b.score.cmp(&a.score));

        log::debug!(
            "Cluster inference for '{}': {} of {} clusters scored",
            database_identifier,
            scored.len(),
            clusters.len()
        );

        scored
    }

    fn score(db: &str, db_segments: &[String], db_words: &[String], cluster_name: &str) -> u32 {
        let cluster = cluster_name.to_lowercase();
        let mut score = 0;

        if cluster == db {
            score += EXACT_MATCH;
        }
        if cluster.starts_with(db) || db.starts_with(&cluster) {
            score += PREFIX_MATCH;
        }
        if cluster.contains(db) {
            score += CLUSTER_CONTAINS_DB;
        }
        if db.contains(&cluster) && cluster.chars().count() >= MIN_CONTAINED_CLUSTER_LEN {
            score += DB_CONTAINS_CLUSTER;
        }

        score += count_contained(db_segments, &cluster) * SEGMENT_MATCH;
        score += count_contained(db_words, &cluster) * WORD_MATCH;

        score += shared_keywords(&ENV_KEYWORDS, db, &cluster) * ENV_KEYWORD_MATCH;
        score += shared_keywords(&PATTERN_KEYWORDS, db, &cluster) * PATTERN_KEYWORD_MATCH;

        score
    }
}

fn count_contained(tokens: &[String], haystack: &str) -> u32 {
    let hits = tokens
        .iter()
        .filter(|token| is_significant(token) && haystack.contains(token.as_str()))
        .count();
    u32::try_from(hits).unwrap_or(u32::MAX)
}

fn shared_keywords(keywords: &[&str], db: &str, cluster: &str) -> u32 {
    let hits = keywords
        .iter()
        .filter(|keyword| db.contains(*keyword) && cluster.contains(*keyword))
        .count();
    u32::try_from(hits).unwrap_or(u32::MAX)
}
