//! # taskfinder search engine
//!
//! Ranks the (cluster, task) pairs most likely to reach a database instance
//! when no explicit mapping exists.
//!
//! ```text
//! DatabaseInstance
//!     │
//!     ├──> ClusterNameInferencer ──> candidate clusters
//!     │
//!     ├──> primary fan-out (top 3)   ──> EnvironmentScorer
//!     ├──> fallback fan-out (next 5) ──> NamingScorer   (only when short)
//!     │
//!     └──> classify_and_sort: live by confidence/score, then dead as low
//! ```

mod cluster_inference;
mod config;
mod environment;
mod error;
mod format;
mod naming;
mod orchestrator;
mod ranking;
mod source;
pub mod tokenizer;

#[cfg(test)]
mod test_support;

pub use cluster_inference::{ClusterNameInferencer, ClusterScore};
pub use config::{SearchConfig, FALLBACK_WIDTH, MIN_PRIMARY_RESULTS, PRIMARY_WIDTH};
pub use environment::{EnvironmentScorer, ENV_SCORE_FLOOR};
pub use error::{Result, SearchError};
pub use format::format_result;
pub use naming::NamingScorer;
pub use orchestrator::{SearchOutcome, TaskFinder};
pub use ranking::{classify_and_sort, compare_results, UNREACHABLE_SUFFIX};
pub use source::{AnalysisSource, FileAnalysisSource, Inventory, NoAnalysis, DEFAULT_ANALYSIS_FILE};

// Re-export the data model for convenience
pub use taskfinder_protocol::{
    AnalysisMatch, Cluster, Confidence, DatabaseInstance, InferenceMethod, InferenceResult, Task,
    TaskStatus,
};
