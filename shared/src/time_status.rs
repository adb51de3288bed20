//! Elapsed/remaining time and the timeout badge shown next to a task.

use chrono::{DateTime, Utc};

use crate::{
    format::format_duration,
    task::{Task, TaskStatus},
};

/// Timeout assumed when the server does not send one for a task.
pub const DEFAULT_TIMEOUT_SECS: u64 = 600;

/// Share of the timeout after which a running task counts as warned.
const WARN_PERCENT: i64 = 80;

/// Timeout that applies to `task`, in seconds.
pub fn timeout_seconds(task: &Task) -> u64 {
    task.timeout_seconds
        .filter(|secs| *secs > 0)
        .unwrap_or(DEFAULT_TIMEOUT_SECS)
}

/// Time classification of a task at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeStatus {
    /// Timeout in seconds.
    pub timeout: i64,
    /// Seconds since the task was claimed (or created, if never claimed),
    /// up to its terminal timestamp for finished tasks.
    pub elapsed: Option<i64>,
    /// Seconds left before the timeout; negative once overdue. Running tasks only.
    pub remaining: Option<i64>,
    /// Running past its timeout.
    pub is_stale: bool,
    /// Running close to its timeout, or flagged by the server.
    pub is_warned: bool,
}

/// Compute the time status of `task` as seen at `now`.
pub fn time_status(task: &Task, now: DateTime<Utc>) -> TimeStatus {
    let timeout = i64::try_from(timeout_seconds(task)).unwrap_or(i64::MAX);
    let start = task.claimed_at.or(task.created_at);
    let end = if task.status.is_terminal() {
        task.completed_at.or(task.failed_at)
    } else {
        Some(now)
    };
    let elapsed = match (start, end) {
        (Some(start), Some(end)) => Some((end - start).num_seconds().max(0)),
        _ => None,
    };

    let running = task.status == TaskStatus::Running;
    let remaining =
        if running { elapsed.map(|elapsed| timeout.saturating_sub(elapsed)) } else { None };
    let is_stale = running && elapsed.is_some_and(|elapsed| elapsed > timeout);
    let is_warned = running
        && (task.stale_warned_at.is_some()
            || elapsed.is_some_and(|elapsed| {
                elapsed.saturating_mul(100) >= timeout.saturating_mul(WARN_PERCENT)
            }));

    TimeStatus {
        timeout,
        elapsed,
        remaining,
        is_stale,
        is_warned,
    }
}

/// The one timeout badge a task row may carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeBadge {
    /// The server failed the task after twice its timeout.
    AutoFailed {
        /// Twice the task timeout, in seconds.
        after_secs: i64,
    },
    /// Running past its timeout.
    OverTime {
        /// Seconds past the timeout.
        overdue_secs: i64,
    },
    /// Running close to its timeout.
    ApproachingTimeout {
        /// Seconds left, never negative.
        remaining_secs: i64,
    },
}

impl TimeBadge {
    /// Short badge text.
    pub fn label(&self) -> &'static str {
        match self {
            Self::AutoFailed { .. } => "Auto-failed",
            Self::OverTime { .. } => "Over time",
            Self::ApproachingTimeout { .. } => "Near timeout",
        }
    }

    /// Tooltip / detail line.
    pub fn message(&self) -> String {
        match self {
            Self::AutoFailed {
                after_secs,
            } => format!("Failed automatically after {}", format_duration(*after_secs)),
            Self::OverTime {
                overdue_secs,
            } => format!("Over timeout by {}", format_duration(*overdue_secs)),
            Self::ApproachingTimeout {
                remaining_secs,
            } => format!("{} left before timeout", format_duration(*remaining_secs)),
        }
    }

    /// Rendered with error styling rather than warning styling.
    pub fn is_error(&self) -> bool {
        !matches!(self, Self::ApproachingTimeout { .. })
    }
}

/// Pick the badge for a task: auto-failed, then over time, then warned.
pub fn row_badge(task: &Task, status: &TimeStatus) -> Option<TimeBadge> {
    if task.is_auto_failed() {
        return Some(TimeBadge::AutoFailed {
            after_secs: status.timeout.saturating_mul(2),
        });
    }
    if status.is_stale {
        let overdue_secs = status
            .remaining
            .map(i64::saturating_neg)
            .unwrap_or_default()
            .max(0);
        return Some(TimeBadge::OverTime {
            overdue_secs,
        });
    }
    if status.is_warned {
        return Some(TimeBadge::ApproachingTimeout {
            remaining_secs: status.remaining.unwrap_or_default().max(0),
        });
    }
    None
}

/// Row highlight derived from the time status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowTone {
    /// No highlight.
    Normal,
    /// Approaching the timeout.
    Warning,
    /// Past the timeout.
    Error,
}

/// Row highlight for a task with the given time status.
pub fn row_tone(status: &TimeStatus) -> RowTone {
    if status.is_stale {
        RowTone::Error
    } else if status.is_warned {
        RowTone::Warning
    } else {
        RowTone::Normal
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use serde_json::json;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0)
            .single()
            .expect("valid instant")
    }

    fn running_for(secs: i64, timeout: Option<u64>) -> Task {
        let mut task: Task = serde_json::from_value(json!({
            "id": "t1",
            "status": "running",
        }))
        .expect("decode task");
        task.claimed_at = Some(now() - Duration::seconds(secs));
        task.timeout_seconds = timeout;
        task
    }

    #[test]
    fn timeout_falls_back_to_default() {
        assert_eq!(timeout_seconds(&running_for(0, None)), DEFAULT_TIMEOUT_SECS);
        assert_eq!(timeout_seconds(&running_for(0, Some(0))), DEFAULT_TIMEOUT_SECS);
        assert_eq!(timeout_seconds(&running_for(0, Some(90))), 90);
    }

    #[test]
    fn fresh_running_task_has_no_badge() {
        let task = running_for(30, Some(100));
        let status = time_status(&task, now());
        assert_eq!(status.elapsed, Some(30));
        assert_eq!(status.remaining, Some(70));
        assert!(!status.is_stale);
        assert!(!status.is_warned);
        assert_eq!(row_badge(&task, &status), None);
        assert_eq!(row_tone(&status), RowTone::Normal);
    }

    #[test]
    fn warned_at_eighty_percent() {
        let task = running_for(80, Some(100));
        let status = time_status(&task, now());
        assert!(status.is_warned);
        assert!(!status.is_stale);
        assert_eq!(
            row_badge(&task, &status),
            Some(TimeBadge::ApproachingTimeout {
                remaining_secs: 20
            })
        );
        assert_eq!(row_tone(&status), RowTone::Warning);
    }

    #[test]
    fn server_warning_flag_counts_as_warned() {
        let mut task = running_for(10, Some(100));
        task.stale_warned_at = Some(now());
        assert!(time_status(&task, now()).is_warned);
    }

    #[test]
    fn huge_timeout_never_goes_stale() {
        let task = running_for(3_600, Some(u64::MAX));
        let status = time_status(&task, now());
        assert_eq!(status.timeout, i64::MAX);
        assert_eq!(status.remaining, Some(i64::MAX - 3_600));
        assert!(!status.is_stale);
        assert!(!status.is_warned);
        assert_eq!(row_badge(&task, &status), None);

        let task = running_for(60, Some(200_000_000_000_000_000));
        assert!(!time_status(&task, now()).is_warned);
    }

    #[test]
    fn auto_failed_limit_saturates() {
        let mut task = running_for(10, Some(u64::MAX));
        task.status = TaskStatus::Failed;
        task.error_message = Some("Auto-failed after timeout".to_string());
        let status = time_status(&task, now());
        assert_eq!(
            row_badge(&task, &status),
            Some(TimeBadge::AutoFailed {
                after_secs: i64::MAX
            })
        );
    }

    #[test]
    fn stale_wins_over_warned() {
        let task = running_for(130, Some(100));
        let status = time_status(&task, now());
        assert!(status.is_stale);
        assert!(status.is_warned);
        assert_eq!(
            row_badge(&task, &status),
            Some(TimeBadge::OverTime {
                overdue_secs: 30
            })
        );
        assert_eq!(row_tone(&status), RowTone::Error);
    }

    #[test]
    fn auto_failed_badge_ignores_elapsed() {
        let mut task = running_for(5, Some(120));
        task.status = TaskStatus::Failed;
        task.failed_at = Some(now());
        task.error_message = Some("Auto-failed after exceeding 2x timeout".to_string());
        let status = time_status(&task, now());
        assert_eq!(
            row_badge(&task, &status),
            Some(TimeBadge::AutoFailed {
                after_secs: 240
            })
        );
    }

    #[test]
    fn finished_tasks_measure_to_their_end() {
        let mut task = running_for(500, Some(100));
        task.status = TaskStatus::Succeeded;
        task.completed_at = task.claimed_at.map(|claimed| claimed + Duration::seconds(45));
        let status = time_status(&task, now());
        assert_eq!(status.elapsed, Some(45));
        assert_eq!(status.remaining, None);
        assert!(!status.is_stale);
        assert_eq!(row_badge(&task, &status), None);
    }

    #[test]
    fn badge_text() {
        let badge = TimeBadge::OverTime {
            overdue_secs: 185,
        };
        assert_eq!(badge.label(), "Over time");
        assert_eq!(badge.message(), "Over timeout by 3m 05s");
        assert!(badge.is_error());
    }
}
