use thiserror::Error;

pub type Result<T> = std::result::Result<T, SearchError>;

#[derive(Error, Debug)]
pub enum SearchError {
    /// Without the cluster list there is nothing to rank.
    #[error("Cluster listing failed: {0}")]
    ClusterListing(String),

    #[error("Task listing failed for cluster {cluster}: {message}")]
    TaskListing { cluster: String, message: String },

    #[error("Analysis source error: {0}")]
    Analysis(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

impl SearchError {
    pub fn cluster_listing(msg: impl Into<String>) -> Self {
        Self::ClusterListing(msg.into())
    }

    pub fn task_listing(cluster: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::TaskListing {
            cluster: cluster.into(),
            message: msg.into(),
        }
    }

    pub fn analysis(msg: impl Into<String>) -> Self {
        Self::Analysis(msg.into())
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
