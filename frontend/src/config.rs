/// Configuration for the frontend application

/// Base URL the console is served from
/// - For local development: "/"
/// - For the mock build: "/task_admin/"
#[cfg(not(feature = "mock"))]
pub const BASE_URL: &str = "/";

#[cfg(feature = "mock")]
pub const BASE_URL: &str = "/task_admin/";

/// API base URL, read at compile time from `TASK_ADMIN_API_BASE`.
#[cfg(not(feature = "mock"))]
pub const API_BASE: &str = match option_env!("TASK_ADMIN_API_BASE") {
    Some(url) => url,
    None => "http://localhost:3000/api",
};

/// How long a notification stays on screen.
pub const TOAST_DISMISS_MS: u32 = 4000;

/// Helper function to construct in-app paths
pub fn app_path(path: &str) -> String {
    // Remove leading slash if present
    let path = path.strip_prefix('/').unwrap_or(path);
    format!("{}{}", BASE_URL, path)
}
