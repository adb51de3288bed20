//! Data model and view logic for the task admin console.
//!
//! Everything here is free of DOM concerns so it builds for both the host
//! (tests) and `wasm32` (the Yew frontend). The frontend only renders what
//! these functions decide.

pub mod actions;
pub mod batch;
pub mod error;
pub mod format;
pub mod payload;
pub mod queues;
pub mod selection;
pub mod task;
pub mod time_status;
pub mod tool_names;
pub mod view_state;

pub use actions::{available_actions, FollowUp, PreparedAction, TaskAction};
pub use batch::{run_best_effort, BatchItem, BatchOutcome, BatchReport};
pub use error::{ActionInputError, TaskAdminError};
pub use payload::payload_preview;
pub use queues::QueueDirectory;
pub use selection::Selection;
pub use task::{
    ActionResponse, CompleteTaskRequest, FailTaskRequest, Queue, QueueListResponse, Task,
    TaskEnvelope, TaskListResponse, TaskRef, TaskStatus, ToolInfo, ToolListResponse,
};
pub use time_status::{row_badge, row_tone, time_status, RowTone, TimeBadge, TimeStatus};
pub use tool_names::ToolNames;
pub use view_state::{Pagination, TaskFilter, TaskListView, PAGE_LIMIT};
