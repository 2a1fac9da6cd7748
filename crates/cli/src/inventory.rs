use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::Path;
use taskfinder_protocol::{Cluster, InventoryFile, Task};
use taskfinder_search::{Inventory, SearchError};

/// Inventory backed by a JSON snapshot on disk.
pub struct FileInventory {
    file: InventoryFile,
}

impl FileInventory {
    pub async fn load(path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Cannot read inventory {}", path.display()))?;
        let file: InventoryFile = serde_json::from_slice(&bytes)
            .with_context(|| format!("Invalid inventory {}", path.display()))?;
        log::debug!(
            "Loaded inventory {}: {} clusters, {} databases",
            path.display(),
            file.clusters.len(),
            file.databases.len()
        );
        Ok(Self { file })
    }

    pub fn file(&self) -> &InventoryFile {
        &self.file
    }
}

#[async_trait]
impl Inventory for FileInventory {
    async fn list_clusters(&self) -> taskfinder_search::Result<Vec<Cluster>> {
        Ok(self.file.clusters.iter().map(|c| c.cluster()).collect())
    }

    async fn list_tasks_with_capability(
        &self,
        cluster: &Cluster,
    ) -> taskfinder_search::Result<Vec<Task>> {
        let Some(entry) = self.file.cluster(&cluster.name) else {
            return Err(SearchError::task_listing(&cluster.name, "cluster not found"));
        };
        if let Some(message) = &entry.unavailable {
            return Err(SearchError::task_listing(&cluster.name, message));
        }

        Ok(entry
            .tasks
            .iter()
            .filter(|t| t.exec_enabled)
            .map(|t| t.task.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskfinder_protocol::{InventoryCluster, InventoryTask, TaskStatus};

    fn entry(task_id: &str, exec_enabled: bool) -> InventoryTask {
        InventoryTask {
            task: Task {
                task_ref: format!("svc|{task_id}"),
                real_ref: format!("arn:aws:ecs:eu-west-1:1:task/c/{task_id}"),
                display_name: task_id.to_string(),
                runtime_id: format!("{task_id}-rt"),
                task_id: task_id.to_string(),
                cluster_name: "c".to_string(),
                service_name: "svc".to_string(),
                status: TaskStatus::Running,
                created_at: None,
            },
            exec_enabled,
        }
    }

    fn inventory(unavailable: Option<&str>) -> FileInventory {
        FileInventory {
            file: InventoryFile {
                clusters: vec![InventoryCluster {
                    name: "c".to_string(),
                    arn: "arn:aws:ecs:eu-west-1:1:cluster/c".to_string(),
                    tasks: vec![entry("one", true), entry("two", false)],
                    unavailable: unavailable.map(str::to_string),
                }],
                databases: vec![],
            },
        }
    }

    #[tokio::test]
    async fn lists_only_exec_enabled_tasks() {
        let inventory = inventory(None);
        let clusters = inventory.list_clusters().await.unwrap();
        let tasks = inventory
            .list_tasks_with_capability(&clusters[0])
            .await
            .unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].task_id, "one");
    }

    #[tokio::test]
    async fn unavailable_cluster_fails_listing() {
        let inventory = inventory(Some("AccessDeniedException"));
        let clusters = inventory.list_clusters().await.unwrap();
        let err = inventory
            .list_tasks_with_capability(&clusters[0])
            .await
            .unwrap_err();
        assert!(err.to_string().contains("AccessDeniedException"));
    }
}
