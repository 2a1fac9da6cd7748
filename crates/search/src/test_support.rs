use taskfinder_protocol::{Cluster, DatabaseInstance, Task, TaskStatus};

pub fn cluster(name: &str) -> Cluster {
    Cluster::new(name, format!("arn:aws:ecs:us-east-1:123456789012:cluster/{name}"))
}

pub fn database(identifier: &str) -> DatabaseInstance {
    DatabaseInstance {
        identifier: identifier.to_string(),
        endpoint: format!("{identifier}.abc123.us-east-1.rds.amazonaws.com"),
        port: 5432,
        engine: "postgres".to_string(),
        status: "available".to_string(),
    }
}

pub fn task(display_name: &str, service_name: &str, status: TaskStatus) -> Task {
    task_with_id(display_name, display_name, service_name, status)
}

pub fn task_with_id(
    task_id: &str,
    display_name: &str,
    service_name: &str,
    status: TaskStatus,
) -> Task {
    Task {
        task_ref: format!("{service_name}|{task_id}"),
        real_ref: format!("arn:aws:ecs:us-east-1:123456789012:task/{task_id}"),
        display_name: display_name.to_string(),
        runtime_id: format!("{task_id}-runtime"),
        task_id: task_id.to_string(),
        cluster_name: String::new(),
        service_name: service_name.to_string(),
        status,
        created_at: None,
    }
}
