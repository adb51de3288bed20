// =============== Mock 数据 ===============
//
// Only compiled with the `mock` feature: a small in-memory queue service so the
// console can be clicked through without a backend.

use chrono::{DateTime, Duration, Utc};
use serde_json::{json, Value};
use task_admin_shared::{
    ActionResponse, Queue, Task, TaskAction, TaskListResponse, TaskListView, TaskRef, TaskStatus,
    ToolInfo,
};

fn now() -> DateTime<Utc> {
    DateTime::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_default()
}

pub fn mock_queues() -> Vec<Queue> {
    [("q-ingest", "Ingest", "active"), ("q-review", "Review", "active"), ("q-2024", "Legacy 2024", "archived")]
        .into_iter()
        .map(|(id, name, status)| Queue {
            id: id.to_string(),
            name: name.to_string(),
            status: Some(status.to_string()),
        })
        .collect()
}

pub fn mock_tools() -> Vec<ToolInfo> {
    vec![
        ToolInfo {
            name: "web_search".to_string(),
            display_name: Some("Web Search".to_string()),
        },
        ToolInfo {
            name: "summarize".to_string(),
            display_name: Some("Summarizer".to_string()),
        },
    ]
}

struct TaskSeed {
    queue: &'static str,
    tool: &'static str,
    status: TaskStatus,
    claimed_secs_ago: Option<i64>,
    error: Option<&'static str>,
    payload: Value,
}

fn build_task(index: usize, seed: TaskSeed, now: DateTime<Utc>) -> Task {
    let created_at = now - Duration::seconds(3600 + index as i64 * 60);
    let claimed_at = seed.claimed_secs_ago.map(|secs| now - Duration::seconds(secs));
    let finished_at = claimed_at.map(|claimed| claimed + Duration::seconds(45));
    Task {
        id: format!("task-{:03}", index + 1),
        queue_id: Some(seed.queue.to_string()),
        tool_name: Some(seed.tool.to_string()),
        agent_role_key: Some("researcher".to_string()),
        agent_role_label: Some("Researcher".to_string()),
        completed_at: finished_at.filter(|_| seed.status == TaskStatus::Succeeded),
        failed_at: finished_at.filter(|_| seed.status == TaskStatus::Failed),
        result_summary: (seed.status == TaskStatus::Succeeded)
            .then(|| "Collected 12 sources".to_string()),
        error_message: seed.error.map(str::to_string),
        error_type: seed.error.map(|_| "timeout".to_string()),
        status: seed.status,
        created_at: Some(created_at),
        claimed_at,
        stale_warned_at: None,
        payload: seed.payload,
        timeout_seconds: Some(300),
    }
}

fn mock_tasks() -> Vec<Task> {
    let now = now();
    let seeds = (0..64).map(|index| {
        let queue = match index % 3 {
            0 => "q-ingest",
            1 => "q-review",
            _ => "q-2024",
        };
        let tool = if index % 2 == 0 { "web_search" } else { "summarize" };
        let (status, claimed_secs_ago, error) = match index % 6 {
            0 => (TaskStatus::Queued, None, None),
            1 => (TaskStatus::Running, Some(60), None),
            2 => (TaskStatus::Running, Some(250), None),
            3 => (TaskStatus::Running, Some(420), None),
            4 => (TaskStatus::Succeeded, Some(900), None),
            _ if index % 4 == 1 => {
                (TaskStatus::Failed, Some(1200), Some("Auto-failed: exceeded 2x timeout"))
            },
            _ => (TaskStatus::Failed, Some(1200), Some("Tool returned HTTP 502")),
        };
        let payload = match index % 3 {
            0 => json!({ "prompt": format!("Research topic #{index}") }),
            1 => Value::String(format!("{{\"prompt_text\":\"Summarise document {index}\"}}")),
            _ => json!({ "url": "https://example.com", "depth": 2 }),
        };
        TaskSeed {
            queue,
            tool,
            status,
            claimed_secs_ago,
            error,
            payload,
        }
    });
    seeds
        .enumerate()
        .map(|(index, seed)| build_task(index, seed, now))
        .collect()
}

pub fn mock_task_page(view: &TaskListView) -> TaskListResponse {
    let matching: Vec<Task> = mock_tasks()
        .into_iter()
        .filter(|task| {
            view.filter
                .queue_id
                .as_deref()
                .map_or(true, |queue_id| task.queue_id.as_deref() == Some(queue_id))
        })
        .filter(|task| {
            view.filter
                .status
                .as_ref()
                .map_or(true, |status| &task.status == status)
        })
        .collect();
    let total = matching.len();
    TaskListResponse {
        tasks: matching
            .into_iter()
            .skip(view.page.offset)
            .take(view.page.limit)
            .collect(),
        total,
    }
}

pub fn mock_task(task_id: &str) -> Option<Task> {
    mock_tasks().into_iter().find(|task| task.id == task_id)
}

pub fn mock_action(task_id: &str, action: TaskAction, now_ms: u64) -> ActionResponse {
    let task = match action {
        TaskAction::Retry | TaskAction::Requeue => mock_task(task_id).map(|_| TaskRef {
            id: format!("task-{:03}", now_ms % 64 + 1),
        }),
        _ => None,
    };
    ActionResponse {
        task,
    }
}
