//! Filter and pagination state of the task list.
//!
//! The list view owns one `TaskListView` value. Every user interaction maps
//! to a transition returning the next value; the list reload reads the
//! request parameters back out of it.

use crate::task::TaskStatus;

/// Page size of the task list.
pub const PAGE_LIMIT: usize = 50;

/// Server-side filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Only tasks of this queue.
    pub queue_id: Option<String>,
    /// Only tasks in this status.
    pub status: Option<TaskStatus>,
}

/// Offset pagination, as the server understands it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Index of the first task on the page.
    pub offset: usize,
    /// Page size.
    pub limit: usize,
    /// Total tasks matching the filter, from the last response.
    pub total: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: PAGE_LIMIT,
            total: 0,
        }
    }
}

/// Everything the task list needs to rebuild itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskListView {
    /// Active filters.
    pub filter: TaskFilter,
    /// Current page.
    pub page: Pagination,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

impl TaskListView {
    /// Filter by queue; blank clears the filter. Starts over at the first page.
    pub fn with_queue(mut self, queue_id: Option<String>) -> Self {
        self.filter.queue_id = non_blank(queue_id);
        self.page.offset = 0;
        self
    }

    /// Filter by status; blank clears the filter. Starts over at the first page.
    pub fn with_status(mut self, status: Option<String>) -> Self {
        self.filter.status = non_blank(status).map(|status| TaskStatus::parse(&status));
        self.page.offset = 0;
        self
    }

    /// Move to the next page.
    pub fn load_more(mut self) -> Self {
        self.page.offset += self.page.limit;
        self
    }

    /// Record the total reported by the server.
    pub fn with_total(mut self, total: usize) -> Self {
        self.page.total = total;
        self
    }

    /// Query parameters of `GET /api/tasks`, blank filters omitted.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(4);
        if let Some(queue_id) = &self.filter.queue_id {
            pairs.push(("queue_id", queue_id.clone()));
        }
        if let Some(status) = &self.filter.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        pairs.push(("offset", self.page.offset.to_string()));
        pairs.push(("limit", self.page.limit.to_string()));
        pairs
    }

    /// One-based inclusive range of the `shown` tasks on this page.
    pub fn shown_range(&self, shown: usize) -> Option<(usize, usize)> {
        (shown > 0).then(|| (self.page.offset + 1, self.page.offset + shown))
    }

    /// More tasks exist past this page.
    pub fn has_more(&self, shown: usize) -> bool {
        self.page.offset + shown < self.page.total
    }

    /// Pagination info line under the table.
    pub fn range_label(&self, shown: usize) -> String {
        match self.shown_range(shown) {
            Some((first, last)) => format!("Showing {first}-{last} of {}", self.page.total),
            None if self.page.offset > 0 => {
                format!("No tasks past {} of {}", self.page.offset, self.page.total)
            },
            None => "No tasks".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_query_has_only_paging() {
        let view = TaskListView::default();
        assert_eq!(
            view.query_pairs(),
            vec![("offset", "0".to_string()), ("limit", "50".to_string())]
        );
    }

    #[test]
    fn filters_are_added_and_blank_ones_dropped() {
        let view = TaskListView::default()
            .with_queue(Some("q1".to_string()))
            .with_status(Some("pending".to_string()));
        assert_eq!(
            view.query_pairs(),
            vec![
                ("queue_id", "q1".to_string()),
                ("status", "queued".to_string()),
                ("offset", "0".to_string()),
                ("limit", "50".to_string()),
            ]
        );

        let cleared = view.with_queue(Some("  ".to_string())).with_status(None);
        assert_eq!(cleared.filter, TaskFilter::default());
    }

    #[test]
    fn status_change_resets_offset() {
        let view = TaskListView::default().with_total(200).load_more().load_more();
        assert_eq!(view.page.offset, 100);
        let view = view.with_status(Some("failed".to_string()));
        assert_eq!(view.page.offset, 0);
        assert_eq!(view.page.total, 200);
    }

    #[test]
    fn load_more_moves_the_shown_range() {
        let view = TaskListView::default().with_total(120);
        assert_eq!(view.shown_range(50), Some((1, 50)));
        assert!(view.has_more(50));

        let view = view.load_more();
        assert_eq!(view.page.offset, 50);
        assert_eq!(view.shown_range(50), Some((51, 100)));
        assert_eq!(view.range_label(50), "Showing 51-100 of 120");

        let view = view.load_more();
        assert_eq!(view.range_label(20), "Showing 101-120 of 120");
        assert!(!view.has_more(20));
    }

    #[test]
    fn empty_pages() {
        assert_eq!(TaskListView::default().range_label(0), "No tasks");
        let past_end = TaskListView::default().with_total(10).load_more();
        assert_eq!(past_end.range_label(0), "No tasks past 50 of 10");
    }
}
