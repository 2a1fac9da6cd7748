use std::path::{Path, PathBuf};

use async_trait::async_trait;
use taskfinder_protocol::{AnalysisFile, AnalysisMatch, Cluster, Task};

use crate::error::{Result, SearchError};

/// File name of the analysis hints under the system temp directory.
pub const DEFAULT_ANALYSIS_FILE: &str = "taskfinder-analysis.json";

/// Scheduler inventory the engine reads from.
#[async_trait]
pub trait Inventory: Send + Sync {
    /// Every cluster visible to the caller. A failure here aborts inference.
    async fn list_clusters(&self) -> Result<Vec<Cluster>>;

    /// Tasks in `cluster` that accept remote sessions.
    ///
    /// A cluster without such tasks returns `Ok(vec![])`; `Err` is reserved
    /// for transport or permission failures.
    async fn list_tasks_with_capability(&self, cluster: &Cluster) -> Result<Vec<Task>>;
}

/// Source of pre-computed database/task associations.
#[async_trait]
pub trait AnalysisSource: Send + Sync {
    async fn load_analysis_matches(&self) -> Result<Vec<AnalysisMatch>>;
}

/// Analysis source that never has hints.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoAnalysis;

#[async_trait]
impl AnalysisSource for NoAnalysis {
    async fn load_analysis_matches(&self) -> Result<Vec<AnalysisMatch>> {
        Ok(Vec::new())
    }
}

/// Reads analysis hints from a JSON file; a missing file means no hints.
#[derive(Debug, Clone)]
pub struct FileAnalysisSource {
    path: PathBuf,
}

impl FileAnalysisSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// `<temp dir>/taskfinder-analysis.json`
    pub fn default_location() -> Self {
        Self::new(std::env::temp_dir().join(DEFAULT_ANALYSIS_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl AnalysisSource for FileAnalysisSource {
    async fn load_analysis_matches(&self) -> Result<Vec<AnalysisMatch>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No analysis file at {}", self.path.display());
                return Ok(Vec::new());
            }
            Err(err) => return Err(err.into()),
        };

        let file: AnalysisFile = serde_json::from_slice(&bytes).map_err(|err| {
            SearchError::analysis(format!("{}: {err}", self.path.display()))
        })?;
        let matches = file.into_matches();
        log::debug!(
            "Loaded {} analysis matches from {}",
            matches.len(),
            self.path.display()
        );
        Ok(matches)
    }
}
