use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{Cluster, DatabaseInstance, Task};

/// Offline snapshot of a scheduler account, as consumed by the CLI.
#[derive(Debug, Serialize, Deserialize, Clone, Default, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct InventoryFile {
    #[serde(default)]
    pub clusters: Vec<InventoryCluster>,
    #[serde(default)]
    pub databases: Vec<DatabaseInstance>,
}

#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
pub struct InventoryCluster {
    pub name: String,
    pub arn: String,
    #[serde(default)]
    pub tasks: Vec<InventoryTask>,
    /// When set, listing this cluster's tasks fails with this message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unavailable: Option<String>,
}

impl InventoryCluster {
    pub fn cluster(&self) -> Cluster {
        Cluster::new(&self.name, &self.arn)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
pub struct InventoryTask {
    #[serde(flatten)]
    pub task: Task,
    /// Whether the task accepts remote sessions.
    #[serde(default = "default_exec_enabled")]
    pub exec_enabled: bool,
}

fn default_exec_enabled() -> bool {
    true
}

impl InventoryFile {
    pub fn database(&self, identifier: &str) -> Option<&DatabaseInstance> {
        self.databases.iter().find(|db| db.identifier == identifier)
    }

    pub fn cluster(&self, name: &str) -> Option<&InventoryCluster> {
        self.clusters.iter().find(|c| c.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exec_flag_defaults_to_enabled() {
        let raw = r#"{
            "clusters": [{
                "name": "prod-web",
                "arn": "arn:aws:ecs:eu-west-1:1:cluster/prod-web",
                "tasks": [{
                    "task_ref": "web|1",
                    "real_ref": "arn:aws:ecs:eu-west-1:1:task/prod-web/1",
                    "display_name": "web",
                    "runtime_id": "1-rt",
                    "task_id": "1",
                    "cluster_name": "prod-web",
                    "service_name": "web",
                    "status": "RUNNING"
                }]
            }],
            "databases": [{
                "identifier": "prod-web-db",
                "endpoint": "prod-web-db.example.com",
                "port": 5432,
                "engine": "postgres",
                "status": "available"
            }]
        }"#;
        let inventory: InventoryFile = serde_json::from_str(raw).unwrap();

        let cluster = inventory.cluster("prod-web").unwrap();
        assert!(cluster.tasks[0].exec_enabled);
        assert!(cluster.unavailable.is_none());
        assert_eq!(cluster.cluster().name, "prod-web");
        assert_eq!(inventory.database("prod-web-db").map(|db| db.port), Some(5432));
        assert!(inventory.database("missing").is_none());
    }
}
