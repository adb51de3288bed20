//! Task list and detail rules checked against server-shaped JSON.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::json;
use task_admin_shared::{
    available_actions, payload_preview, row_badge, row_tone, run_best_effort, time_status,
    ActionInputError, PreparedAction, QueueDirectory, QueueListResponse, RowTone, Selection,
    TaskAction, TaskEnvelope, TaskListResponse, TaskListView, TimeBadge, PAGE_LIMIT,
};

fn now() -> Result<DateTime<Utc>> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0)
        .single()
        .context("valid instant")
}

fn rfc3339(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339()
}

fn list_fixture(now: DateTime<Utc>) -> Result<TaskListResponse> {
    let body = json!({
        "total": 4,
        "tasks": [
            {
                "id": "t-auto",
                "queue_id": "q-live",
                "tool_name": "web_search",
                "status": "failed",
                "timeout_seconds": 60,
                "claimed_at": rfc3339(now - Duration::seconds(10)),
                "failed_at": rfc3339(now - Duration::seconds(5)),
                "error_message": "Auto-failed: task exceeded 2x timeout"
            },
            {
                "id": "t-stale",
                "queue_id": "q-live",
                "status": "running",
                "timeout_seconds": 60,
                "claimed_at": rfc3339(now - Duration::seconds(90))
            },
            {
                "id": "t-warned",
                "queue_id": "q-live",
                "status": "running",
                "timeout_seconds": 60,
                "claimed_at": rfc3339(now - Duration::seconds(20)),
                "stale_warned_at": rfc3339(now - Duration::seconds(1))
            },
            {
                "id": "t-archived",
                "queue_id": "q-old",
                "status": "queued",
                "created_at": rfc3339(now - Duration::seconds(3))
            }
        ]
    });
    serde_json::from_value(body).context("decode task list")
}

fn queue_fixture() -> Result<QueueDirectory> {
    let body = json!({
        "queues": [
            { "id": "q-live", "name": "Live", "status": "active" },
            { "id": "q-old", "name": "Old", "status": "archived" }
        ]
    });
    let response: QueueListResponse = serde_json::from_value(body).context("decode queues")?;
    Ok(QueueDirectory::new(response.queues))
}

#[test]
fn rows_get_exactly_one_badge_by_priority() -> Result<()> {
    let now = now()?;
    let list = list_fixture(now)?;

    let badges: Vec<Option<TimeBadge>> = list
        .tasks
        .iter()
        .map(|task| row_badge(task, &time_status(task, now)))
        .collect();

    assert_eq!(
        badges,
        vec![
            Some(TimeBadge::AutoFailed {
                after_secs: 120
            }),
            Some(TimeBadge::OverTime {
                overdue_secs: 30
            }),
            Some(TimeBadge::ApproachingTimeout {
                remaining_secs: 40
            }),
            None,
        ]
    );
    Ok(())
}

#[test]
fn filtered_view_shows_the_server_page_untouched() -> Result<()> {
    let view = TaskListView::default()
        .with_queue(Some("q-live".to_string()))
        .with_status(Some("in_progress".to_string()));
    assert_eq!(
        view.query_pairs(),
        vec![
            ("queue_id", "q-live".to_string()),
            ("status", "running".to_string()),
            ("offset", "0".to_string()),
            ("limit", PAGE_LIMIT.to_string()),
        ]
    );

    // The server answered with rows outside the filter; they stay.
    let list = list_fixture(now()?)?;
    let view = view.with_total(list.total);
    let ids: Vec<&str> = list.tasks.iter().map(|task| task.id.as_str()).collect();
    assert_eq!(ids, vec!["t-auto", "t-stale", "t-warned", "t-archived"]);
    assert_eq!(view.range_label(list.tasks.len()), "Showing 1-4 of 4");
    Ok(())
}

#[test]
fn clicking_a_row_twice_leaves_nothing_selected() -> Result<()> {
    let list = list_fixture(now()?)?;
    let queues = queue_fixture()?;

    let clicked = Selection::default().toggled(&list.tasks[1], &queues);
    assert_eq!(clicked.ordered_ids(&list.tasks), vec!["t-stale"]);
    let clicked_again = clicked.toggled(&list.tasks[1], &queues);
    assert!(clicked_again.is_empty());
    assert!(clicked_again.ordered_ids(&list.tasks).is_empty());
    Ok(())
}

#[test]
fn dismissed_or_blank_prompt_sends_nothing() {
    let mut sent = Vec::new();
    let mut errors = Vec::new();
    let answers = [
        (TaskAction::Complete, None),
        (TaskAction::Complete, Some("   ".to_string())),
        (TaskAction::Fail, None),
        (TaskAction::Fail, Some(String::new())),
    ];
    for (action, answer) in answers {
        match PreparedAction::prepare(action, "t-stale", |_| answer) {
            Ok(prepared) => sent.push(prepared),
            Err(err) => errors.push(err),
        }
    }
    assert!(sent.is_empty());
    assert_eq!(
        errors,
        vec![
            ActionInputError::MissingResultSummary,
            ActionInputError::MissingResultSummary,
            ActionInputError::MissingErrorMessage,
            ActionInputError::MissingErrorMessage,
        ]
    );
}

#[test]
fn plain_failure_with_overdue_timestamps_has_no_badge() -> Result<()> {
    let now = now()?;
    let envelope: TaskEnvelope = serde_json::from_value(json!({
        "task": {
            "id": "t-broken",
            "status": "failed",
            "timeout_seconds": 60,
            "claimed_at": rfc3339(now - Duration::seconds(600)),
            "failed_at": rfc3339(now - Duration::seconds(10)),
            "stale_warned_at": rfc3339(now - Duration::seconds(300)),
            "error_message": "Tool returned HTTP 502"
        }
    }))
    .context("decode task")?;

    let status = time_status(&envelope.task, now);
    assert_eq!(status.elapsed, Some(590));
    assert!(!status.is_stale);
    assert!(!status.is_warned);
    assert_eq!(row_badge(&envelope.task, &status), None);
    assert_eq!(row_tone(&status), RowTone::Normal);
    Ok(())
}

#[test]
fn archived_rows_cannot_be_selected() -> Result<()> {
    let list = list_fixture(now()?)?;
    let queues = queue_fixture()?;
    let mut selection = Selection::default();

    for _ in 0..3 {
        selection.toggle(&list.tasks[3], &queues);
    }
    assert!(selection.is_empty());

    selection.toggle_all(&list.tasks, &queues);
    assert_eq!(selection.ordered_ids(&list.tasks), vec!["t-auto", "t-stale", "t-warned"]);
    Ok(())
}

#[test]
fn detail_buttons_by_status() -> Result<()> {
    let cases = [
        ("queued", vec![TaskAction::Claim]),
        ("running", vec![TaskAction::Complete, TaskAction::Fail]),
        ("failed", vec![TaskAction::Retry, TaskAction::Requeue]),
        ("succeeded", vec![TaskAction::Requeue]),
    ];
    for (status, expected) in cases {
        let envelope: TaskEnvelope =
            serde_json::from_value(json!({ "task": { "id": "t1", "status": status } }))
                .with_context(|| format!("decode {status} task"))?;
        assert_eq!(available_actions(&envelope.task.status), expected, "status {status}");
    }
    Ok(())
}

#[test]
fn payload_preview_of_detail_task() -> Result<()> {
    let envelope: TaskEnvelope = serde_json::from_value(json!({
        "task": {
            "id": "t1",
            "status": "queued",
            "payload": "{\"prompt_text\":\"summarise the report\"}"
        }
    }))
    .context("decode task")?;
    assert_eq!(payload_preview(&envelope.task.payload), "summarise the report");
    Ok(())
}

#[test]
fn detail_queue_uses_the_list_name() -> Result<()> {
    let queues = queue_fixture()?;
    let envelope: TaskEnvelope =
        serde_json::from_value(json!({ "task": { "id": "t1", "queue_id": "q-old", "status": "queued" } }))
            .context("decode task")?;
    let queue_id = envelope.task.queue_id.as_deref().context("queue id")?;
    assert_eq!(queues.name_for(queue_id), "Old");
    assert_eq!(queues.name_for("q-gone"), "q-gone");
    Ok(())
}

#[tokio::test]
async fn bulk_action_issues_one_request_per_selected_task() -> Result<()> {
    let list = list_fixture(now()?)?;
    let queues = queue_fixture()?;
    let mut selection = Selection::default();
    selection.toggle_all(&list.tasks, &queues);

    let mut issued = Vec::new();
    let report = run_best_effort(selection.ordered_ids(&list.tasks), |id| {
        issued.push(id.clone());
        async move {
            if id == "t-stale" {
                Err("HTTP error: 500".to_string())
            } else {
                Ok(())
            }
        }
    })
    .await;

    assert_eq!(issued, vec!["t-auto", "t-stale", "t-warned"]);
    assert_eq!(report.summary(), "2/3 task(s)");
    Ok(())
}

#[test]
fn load_more_advances_by_page_limit() {
    let view = TaskListView::default().with_total(75).load_more();
    assert_eq!(view.page.offset, PAGE_LIMIT);
    assert_eq!(view.shown_range(25), Some((PAGE_LIMIT + 1, 75)));
}
