//! Per-task lifecycle actions offered by the detail modal.
//!
//! The console never enforces transitions itself. It only offers the actions
//! whose precondition matches the task's current status and trusts whatever
//! the server answers.

use crate::{
    error::ActionInputError,
    task::{CompleteTaskRequest, FailTaskRequest, TaskStatus},
};

/// A lifecycle action on one task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskAction {
    /// `POST /api/tasks/{id}/claim`.
    Claim,
    /// `POST /api/tasks/{id}/complete`.
    Complete,
    /// `POST /api/tasks/{id}/fail`.
    Fail,
    /// `POST /api/tasks/{id}/retry`; creates a new task.
    Retry,
    /// `POST /api/tasks/{id}/requeue`; creates a new task.
    Requeue,
}

/// What the console does once an action succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FollowUp {
    /// Close the modal and open the detail of this task.
    OpenDetail(String),
    /// Close the modal and reload the task list.
    ReloadList,
}

impl TaskAction {
    /// Last path segment of the action endpoint.
    pub fn path_segment(self) -> &'static str {
        match self {
            Self::Claim => "claim",
            Self::Complete => "complete",
            Self::Fail => "fail",
            Self::Retry => "retry",
            Self::Requeue => "requeue",
        }
    }

    /// Button label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Claim => "Claim",
            Self::Complete => "Complete",
            Self::Fail => "Fail",
            Self::Retry => "Retry",
            Self::Requeue => "Requeue",
        }
    }

    fn past_tense(self) -> &'static str {
        match self {
            Self::Claim => "claimed",
            Self::Complete => "completed",
            Self::Fail => "failed",
            Self::Retry => "retried",
            Self::Requeue => "requeued",
        }
    }

    /// Success notification text.
    pub fn success_message(self, task_id: &str, new_task_id: Option<&str>) -> String {
        match new_task_id {
            Some(new_id) => format!("Task {task_id} {} as task {new_id}", self.past_tense()),
            None => format!("Task {task_id} {}", self.past_tense()),
        }
    }

    /// Where to go after the action succeeded.
    ///
    /// Claim, complete and fail reopen the same task. Requeue opens the task
    /// it created, or the original one when the server did not name it.
    /// Retry goes back to the list.
    pub fn follow_up(self, task_id: &str, new_task_id: Option<&str>) -> FollowUp {
        match self {
            Self::Claim | Self::Complete | Self::Fail => FollowUp::OpenDetail(task_id.to_string()),
            Self::Requeue => FollowUp::OpenDetail(new_task_id.unwrap_or(task_id).to_string()),
            Self::Retry => FollowUp::ReloadList,
        }
    }
}

/// Actions offered for a task in `status`, in button order.
pub fn available_actions(status: &TaskStatus) -> Vec<TaskAction> {
    match status {
        TaskStatus::Queued => vec![TaskAction::Claim],
        TaskStatus::Running => vec![TaskAction::Complete, TaskAction::Fail],
        TaskStatus::Failed => vec![TaskAction::Retry, TaskAction::Requeue],
        TaskStatus::Succeeded => vec![TaskAction::Requeue],
        TaskStatus::Other(_) => Vec::new(),
    }
}

fn required(input: Option<String>) -> Option<String> {
    input
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Build the complete request from the operator's summary prompt.
///
/// `None` means the prompt was dismissed.
pub fn complete_request(summary: Option<String>) -> Result<CompleteTaskRequest, ActionInputError> {
    let result_summary = required(summary).ok_or(ActionInputError::MissingResultSummary)?;
    Ok(CompleteTaskRequest {
        result_summary,
        result_data: None,
    })
}

/// Build the fail request from the operator's error prompt.
pub fn fail_request(message: Option<String>) -> Result<FailTaskRequest, ActionInputError> {
    let error_message = required(message).ok_or(ActionInputError::MissingErrorMessage)?;
    Ok(FailTaskRequest {
        error_message: Some(error_message),
        error_type: Some("manual".to_string()),
        reason: None,
    })
}

/// An action with the operator input it needs already collected.
#[derive(Debug, Clone, PartialEq)]
pub enum PreparedAction {
    /// Claim, no body.
    Claim,
    /// Complete with the prompted summary.
    Complete(CompleteTaskRequest),
    /// Fail with the prompted message.
    Fail(FailTaskRequest),
    /// Retry, no body.
    Retry,
    /// Requeue, no body.
    Requeue,
}

impl PreparedAction {
    /// Collect the input `action` needs on `task_id`.
    ///
    /// `ask` shows a prompt and returns `None` when it is dismissed. Only
    /// complete and fail ask. A missing or blank answer is an error, and
    /// nothing should be sent.
    pub fn prepare(
        action: TaskAction,
        task_id: &str,
        ask: impl FnOnce(&str) -> Option<String>,
    ) -> Result<Self, ActionInputError> {
        Ok(match action {
            TaskAction::Claim => Self::Claim,
            TaskAction::Complete => {
                Self::Complete(complete_request(ask(&format!("Result summary for task {task_id}")))?)
            },
            TaskAction::Fail => Self::Fail(fail_request(ask(&format!("Why did task {task_id} fail?")))?),
            TaskAction::Retry => Self::Retry,
            TaskAction::Requeue => Self::Requeue,
        })
    }
}
