use anyhow::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod analysis;
pub mod inventory;

pub use analysis::{AnalysisFile, AnalysisMatch};
pub use inventory::{InventoryCluster, InventoryFile, InventoryTask};

/// A named pool of compute capacity hosting tasks.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash, JsonSchema)]
pub struct Cluster {
    pub name: String,
    pub arn: String,
}

impl Cluster {
    pub fn new(name: impl Into<String>, arn: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arn: arn.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Provisioning,
    Pending,
    Activating,
    Running,
    Deactivating,
    Stopping,
    Deprovisioning,
    Stopped,
}

impl TaskStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Provisioning => "PROVISIONING",
            Self::Pending => "PENDING",
            Self::Activating => "ACTIVATING",
            Self::Running => "RUNNING",
            Self::Deactivating => "DEACTIVATING",
            Self::Stopping => "STOPPING",
            Self::Deprovisioning => "DEPROVISIONING",
            Self::Stopped => "STOPPED",
        }
    }

    /// Live tasks can still accept a forwarded session.
    pub const fn is_live(self) -> bool {
        matches!(self, Self::Running | Self::Pending)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of a task as reported by the scheduler for one cluster.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct Task {
    /// Synthetic composite key, unique within one listing.
    pub task_ref: String,
    /// Native scheduler reference (ARN or equivalent).
    pub real_ref: String,
    pub display_name: String,
    pub runtime_id: String,
    pub task_id: String,
    pub cluster_name: String,
    pub service_name: String,
    pub status: TaskStatus,
    /// Creation time in unix milliseconds, when the scheduler reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<u64>,
}

impl Task {
    pub fn is_live(&self) -> bool {
        self.status.is_live()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct DatabaseInstance {
    pub identifier: String,
    pub endpoint: String,
    pub port: u16,
    pub engine: String,
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Ranking weight: high=3, medium=2, low=1.
    pub const fn rank(self) -> u8 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Heuristic family that produced a result.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum InferenceMethod {
    Environment,
    Naming,
    /// Reserved for a reachability-based heuristic; no scorer emits it yet.
    Network,
}

impl InferenceMethod {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Environment => "environment",
            Self::Naming => "naming",
            Self::Network => "network",
        }
    }
}

impl fmt::Display for InferenceMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct InferenceResult {
    pub cluster: Cluster,
    pub task: Task,
    pub confidence: Confidence,
    pub method: InferenceMethod,
    pub score: u32,
    pub reason: String,
}

impl InferenceResult {
    pub fn is_live(&self) -> bool {
        self.task.is_live()
    }
}

pub fn serialize_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(Into::into)
}

pub fn serialize_json_pretty<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(Into::into)
}

/// Pretty-printed JSON schema for one of the file formats.
pub fn schema_json<T: JsonSchema>() -> Result<String> {
    serialize_json_pretty(&schemars::schema_for!(T))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_status_uses_scheduler_spelling() {
        let status: TaskStatus = serde_json::from_str("\"DEPROVISIONING\"").unwrap();
        assert_eq!(status, TaskStatus::Deprovisioning);
        assert_eq!(serialize_json(&TaskStatus::Running).unwrap(), "\"RUNNING\"");
    }

    #[test]
    fn only_running_and_pending_are_live() {
        let live: Vec<TaskStatus> = [
            TaskStatus::Provisioning,
            TaskStatus::Pending,
            TaskStatus::Activating,
            TaskStatus::Running,
            TaskStatus::Deactivating,
            TaskStatus::Stopping,
            TaskStatus::Deprovisioning,
            TaskStatus::Stopped,
        ]
        .into_iter()
        .filter(|s| s.is_live())
        .collect();
        assert_eq!(live, vec![TaskStatus::Pending, TaskStatus::Running]);
    }

    #[test]
    fn confidence_rank_orders_high_first() {
        assert!(Confidence::High.rank() > Confidence::Medium.rank());
        assert!(Confidence::Medium.rank() > Confidence::Low.rank());
        assert_eq!(serialize_json(&Confidence::Medium).unwrap(), "\"medium\"");
    }

    #[test]
    fn task_created_at_is_optional() {
        let raw = r#"{
            "task_ref": "prod-web|abc",
            "real_ref": "arn:aws:ecs:eu-west-1:1:task/prod-web/abc",
            "display_name": "web",
            "runtime_id": "abc-123",
            "task_id": "abc",
            "cluster_name": "prod-web",
            "service_name": "web",
            "status": "RUNNING"
        }"#;
        let task: Task = serde_json::from_str(raw).unwrap();
        assert!(task.created_at.is_none());
        assert!(task.is_live());
    }

    #[test]
    fn inventory_schema_names_its_fields() {
        let schema = schema_json::<InventoryFile>().unwrap();
        assert!(schema.contains("clusters"));
        assert!(schema.contains("databases"));
    }
}
