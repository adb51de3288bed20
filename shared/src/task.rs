//! Wire model for the task-queue REST API.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::TaskAdminError;

/// Marker the queue service puts into `error_message` when it fails a task
/// on its own after the task overran twice its timeout.
pub const AUTO_FAILED_MARKER: &str = "Auto-failed";

/// Lifecycle status of a task, as reported by the queue service.
///
/// The service is not consistent about naming, so a handful of synonyms are
/// folded into the four statuses the console knows how to act on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaskStatus {
    /// Waiting for a worker.
    Queued,
    /// Claimed by a worker and in flight.
    Running,
    /// Finished successfully.
    Succeeded,
    /// Finished with an error, either reported or automatic.
    Failed,
    /// Anything else the server sends; shown verbatim, never actionable.
    Other(String),
}

impl TaskStatus {
    /// Statuses offered by the list filter, in display order.
    pub const FILTERABLE: [TaskStatus; 4] =
        [TaskStatus::Queued, TaskStatus::Running, TaskStatus::Succeeded, TaskStatus::Failed];

    /// Parse a wire status, folding known synonyms.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "queued" | "pending" => Self::Queued,
            "running" | "claimed" | "in_progress" => Self::Running,
            "succeeded" | "completed" | "done" | "success" => Self::Succeeded,
            "failed" | "error" => Self::Failed,
            _ => Self::Other(trimmed.to_string()),
        }
    }

    /// Canonical wire name.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Queued => "queued",
            Self::Running => "running",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
            Self::Other(raw) => raw.as_str(),
        }
    }

    /// Succeeded and failed tasks will not change again on their own.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

impl From<String> for TaskStatus {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<TaskStatus> for String {
    fn from(status: TaskStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of one task as returned by `GET /api/tasks` and `GET /api/tasks/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Task identifier.
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    /// Queue the task belongs to.
    #[serde(default, deserialize_with = "de_opt_id")]
    pub queue_id: Option<String>,
    /// Tool the task invokes; resolved to a friendly name for display.
    #[serde(default)]
    pub tool_name: Option<String>,
    /// Machine key of the agent role that owns the task.
    #[serde(default)]
    pub agent_role_key: Option<String>,
    /// Human label of the agent role.
    #[serde(default)]
    pub agent_role_label: Option<String>,
    /// Current lifecycle status.
    pub status: TaskStatus,
    /// When the task was enqueued.
    #[serde(default, deserialize_with = "de_opt_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    /// When a worker claimed the task.
    #[serde(default, deserialize_with = "de_opt_timestamp")]
    pub claimed_at: Option<DateTime<Utc>>,
    /// When the task succeeded.
    #[serde(default, deserialize_with = "de_opt_timestamp")]
    pub completed_at: Option<DateTime<Utc>>,
    /// When the task failed.
    #[serde(default, deserialize_with = "de_opt_timestamp")]
    pub failed_at: Option<DateTime<Utc>>,
    /// When the server last flagged the task as approaching its timeout.
    #[serde(default, deserialize_with = "de_opt_timestamp")]
    pub stale_warned_at: Option<DateTime<Utc>>,
    /// Opaque payload; may be an object or a string holding JSON.
    #[serde(default)]
    pub payload: Value,
    /// Summary recorded on completion.
    #[serde(default)]
    pub result_summary: Option<String>,
    /// Error text recorded on failure.
    #[serde(default)]
    pub error_message: Option<String>,
    /// Error category recorded on failure.
    #[serde(default)]
    pub error_type: Option<String>,
    /// Per-task timeout, when the server exposes one.
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

impl Task {
    /// Role label, falling back to the role key.
    pub fn agent_role_display(&self) -> Option<&str> {
        self.agent_role_label
            .as_deref()
            .filter(|label| !label.trim().is_empty())
            .or(self.agent_role_key.as_deref())
    }

    /// Failed by the server itself after overrunning its timeout.
    pub fn is_auto_failed(&self) -> bool {
        self.status == TaskStatus::Failed
            && self
                .error_message
                .as_deref()
                .is_some_and(|message| message.contains(AUTO_FAILED_MARKER))
    }
}

/// A named grouping of tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Queue {
    /// Queue identifier.
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Lifecycle status such as `active` or `archived`.
    #[serde(default)]
    pub status: Option<String>,
}

impl Queue {
    /// Archived queues are read-only in the console.
    pub fn is_archived(&self) -> bool {
        self.status
            .as_deref()
            .is_some_and(|status| status.trim().eq_ignore_ascii_case("archived"))
    }

    /// Name when set, otherwise the id.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

/// A tool known to the queue service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolInfo {
    /// Machine name, as found in `Task::tool_name`.
    pub name: String,
    /// Friendly name shown in the console.
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Body of `GET /api/queues`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct QueueListResponse {
    /// All queues, archived ones included.
    #[serde(default)]
    pub queues: Vec<Queue>,
}

/// Body of `GET /api/tasks`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TaskListResponse {
    /// Tasks on the requested page.
    #[serde(default)]
    pub tasks: Vec<Task>,
    /// Number of tasks matching the filter across all pages.
    #[serde(default)]
    pub total: usize,
}

/// Body of `GET /api/tasks/{id}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TaskEnvelope {
    /// The requested task.
    pub task: Task,
}

/// Bare reference to a task created by an action.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaskRef {
    /// Identifier of the task.
    #[serde(deserialize_with = "de_id")]
    pub id: String,
}

/// Body returned by the `POST /api/tasks/{id}/{action}` endpoints.
///
/// Only requeue and retry promise a `task` reference; the other actions may
/// answer with anything, including an empty body.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ActionResponse {
    /// Task created by the action, if any.
    #[serde(default)]
    pub task: Option<TaskRef>,
}

impl ActionResponse {
    /// Decode a raw action response body. Blank bodies are accepted.
    pub fn from_body(body: &str) -> Result<Self, TaskAdminError> {
        if body.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(body)?)
    }

    /// Identifier of the task created by the action.
    pub fn new_task_id(&self) -> Option<&str> {
        self.task.as_ref().map(|task| task.id.as_str())
    }
}

/// Body of `GET /api/tools`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ToolListResponse {
    /// Every tool the service knows.
    #[serde(default)]
    pub tools: Vec<ToolInfo>,
}

/// Body of `POST /api/tasks/{id}/complete`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompleteTaskRequest {
    /// Operator-provided summary of the result.
    pub result_summary: String,
    /// Structured result; the console never sends one.
    pub result_data: Option<Value>,
}

/// Body of `POST /api/tasks/{id}/fail`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FailTaskRequest {
    /// Human readable failure description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// Failure category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Why the operator failed the task.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl FailTaskRequest {
    /// Body used when failing a selection of tasks from the list.
    pub fn bulk() -> Self {
        Self {
            error_message: Some("Failed from the admin console (bulk action)".to_string()),
            error_type: Some("manual".to_string()),
            reason: Some("bulk_fail".to_string()),
        }
    }
}

/// Parse a timestamp in any of the shapes the queue service emits.
///
/// Accepts RFC 3339, naive `YYYY-MM-DD HH:MM:SS[.fff]` (taken as UTC) and
/// the same with a `T` separator.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

/// Epoch numbers above this are milliseconds, below are seconds.
const EPOCH_MILLIS_THRESHOLD: i64 = 100_000_000_000;

fn timestamp_from_epoch(value: i64) -> Option<DateTime<Utc>> {
    if value.abs() >= EPOCH_MILLIS_THRESHOLD {
        DateTime::from_timestamp_millis(value)
    } else {
        DateTime::from_timestamp(value, 0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Text(String),
    Integer(i64),
    Float(f64),
}

fn de_opt_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let parsed = match Option::<RawTimestamp>::deserialize(deserializer)? {
        None => None,
        Some(RawTimestamp::Text(raw)) => {
            let parsed = parse_timestamp(&raw);
            if parsed.is_none() && !raw.trim().is_empty() {
                tracing::debug!("ignoring unparseable timestamp {raw:?}");
            }
            parsed
        },
        Some(RawTimestamp::Integer(value)) => timestamp_from_epoch(value),
        Some(RawTimestamp::Float(value)) => timestamp_from_epoch(value as i64),
    };
    Ok(parsed)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Integer(i64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(text) => text,
            RawId::Integer(value) => value.to_string(),
        }
    }
}

fn de_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer).map(String::from)
}

fn de_opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawId>::deserialize(deserializer)?.map(String::from))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    #[test]
    fn status_synonyms_fold_to_canonical_names() {
        assert_eq!(TaskStatus::parse("pending"), TaskStatus::Queued);
        assert_eq!(TaskStatus::parse("IN_PROGRESS"), TaskStatus::Running);
        assert_eq!(TaskStatus::parse("completed"), TaskStatus::Succeeded);
        assert_eq!(TaskStatus::parse(" error "), TaskStatus::Failed);
        assert_eq!(TaskStatus::parse("paused"), TaskStatus::Other("paused".to_string()));
        assert_eq!(String::from(TaskStatus::parse("done")), "succeeded");
    }

    #[test]
    fn task_decodes_numeric_ids_and_mixed_timestamps() {
        let task: Task = serde_json::from_value(json!({
            "id": 42,
            "queue_id": 7,
            "status": "claimed",
            "created_at": "2025-03-01 10:00:00",
            "claimed_at": "2025-03-01T10:01:00Z",
            "stale_warned_at": null,
            "completed_at": 1740823320000_i64,
            "failed_at": "not a date",
        }))
        .expect("decode task");

        assert_eq!(task.id, "42");
        assert_eq!(task.queue_id.as_deref(), Some("7"));
        assert_eq!(task.status, TaskStatus::Running);
        assert_eq!(task.created_at, Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 0).single());
        assert_eq!(task.claimed_at, Utc.with_ymd_and_hms(2025, 3, 1, 10, 1, 0).single());
        assert_eq!(task.completed_at, Utc.with_ymd_and_hms(2025, 3, 1, 10, 2, 0).single());
        assert_eq!(task.failed_at, None);
        assert_eq!(task.payload, Value::Null);
    }

    #[test]
    fn auto_failed_requires_failed_status_and_marker() {
        let mut task: Task = serde_json::from_value(json!({
            "id": "t1",
            "status": "failed",
            "error_message": "Auto-failed: exceeded 2x timeout",
        }))
        .expect("decode task");
        assert!(task.is_auto_failed());

        task.status = TaskStatus::Running;
        assert!(!task.is_auto_failed());

        task.status = TaskStatus::Failed;
        task.error_message = Some("worker crashed".to_string());
        assert!(!task.is_auto_failed());
    }

    #[test]
    fn role_display_prefers_label() {
        let task: Task = serde_json::from_value(json!({
            "id": "t1",
            "status": "queued",
            "agent_role_key": "reviewer",
            "agent_role_label": "  ",
        }))
        .expect("decode task");
        assert_eq!(task.agent_role_display(), Some("reviewer"));
    }

    #[test]
    fn queue_archived_flag_is_case_insensitive() {
        let queue = Queue {
            id: "q1".to_string(),
            name: String::new(),
            status: Some("Archived".to_string()),
        };
        assert!(queue.is_archived());
        assert_eq!(queue.display_name(), "q1");
    }

    #[test]
    fn action_response_accepts_blank_and_task_bodies() {
        let empty = ActionResponse::from_body("  ").expect("blank body");
        assert_eq!(empty.new_task_id(), None);

        let created =
            ActionResponse::from_body(r#"{"task":{"id":99,"status":"queued"}}"#).expect("body");
        assert_eq!(created.new_task_id(), Some("99"));

        assert!(ActionResponse::from_body("<html>").is_err());
    }

    #[test]
    fn fail_request_omits_unset_fields() {
        let body = serde_json::to_value(FailTaskRequest {
            error_message: Some("boom".to_string()),
            ..FailTaskRequest::default()
        })
        .expect("encode");
        assert_eq!(body, json!({ "error_message": "boom" }));
    }
}
