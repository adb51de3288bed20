pub mod not_found;
pub mod task_detail;
pub mod tasks;

pub use tasks::TasksPage;
