use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::Confidence;

/// Pre-computed association hint between a database and a task family.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct AnalysisMatch {
    pub database_identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_family: Option<String>,
    pub confidence: Confidence,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reasons: Vec<String>,
}

/// On-disk analysis file. Both a bare array and a `{ "matches": [...] }`
/// envelope are accepted.
#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
#[serde(untagged)]
pub enum AnalysisFile {
    Matches(Vec<AnalysisMatch>),
    Envelope { matches: Vec<AnalysisMatch> },
}

impl AnalysisFile {
    pub fn into_matches(self) -> Vec<AnalysisMatch> {
        match self {
            Self::Matches(matches) | Self::Envelope { matches } => matches,
        }
    }
}
