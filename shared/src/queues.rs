//! Queue lookup used while rendering the task list.

use std::collections::HashMap;

use crate::task::{Queue, Task};

/// Queues keyed by id, for display names and archived checks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueueDirectory {
    queues: Vec<Queue>,
    by_id: HashMap<String, usize>,
}

impl QueueDirectory {
    /// Index the queues returned by `GET /api/queues`.
    pub fn new(queues: Vec<Queue>) -> Self {
        let by_id = queues
            .iter()
            .enumerate()
            .map(|(index, queue)| (queue.id.clone(), index))
            .collect();
        Self {
            queues,
            by_id,
        }
    }

    /// All queues in server order.
    pub fn queues(&self) -> &[Queue] {
        &self.queues
    }

    /// Queue with the given id.
    pub fn get(&self, queue_id: &str) -> Option<&Queue> {
        self.by_id.get(queue_id).map(|index| &self.queues[*index])
    }

    /// Display name for a queue id, falling back to the id itself.
    pub fn name_for<'a>(&'a self, queue_id: &'a str) -> &'a str {
        self.get(queue_id).map(Queue::display_name).unwrap_or(queue_id)
    }

    /// Tasks of archived queues cannot be selected or acted on from the list.
    pub fn is_task_locked(&self, task: &Task) -> bool {
        task.queue_id
            .as_deref()
            .and_then(|queue_id| self.get(queue_id))
            .is_some_and(Queue::is_archived)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn archived_queue_locks_its_tasks() {
        let directory = QueueDirectory::new(vec![
            Queue {
                id: "q1".to_string(),
                name: "Ingest".to_string(),
                status: Some("active".to_string()),
            },
            Queue {
                id: "q2".to_string(),
                name: "Old".to_string(),
                status: Some("archived".to_string()),
            },
        ]);
        let task = |queue: &str| -> Task {
            serde_json::from_value(json!({"id": "t", "queue_id": queue, "status": "queued"}))
                .expect("decode task")
        };

        assert!(!directory.is_task_locked(&task("q1")));
        assert!(directory.is_task_locked(&task("q2")));
        assert!(!directory.is_task_locked(&task("missing")));
        assert_eq!(directory.name_for("q1"), "Ingest");
        assert_eq!(directory.name_for("missing"), "missing");
    }
}
