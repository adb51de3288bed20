//! Best-effort sequential batch used by the bulk fail/requeue actions.

use std::{fmt::Display, future::Future};

/// Result of one item in a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome {
    /// The request succeeded.
    Succeeded,
    /// The request failed with this message.
    Failed(String),
}

/// One processed item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchItem {
    /// Task id the request was sent for.
    pub id: String,
    /// How it went.
    pub outcome: BatchOutcome,
}

/// Per-item results of a batch, in submission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// One entry per input id.
    pub items: Vec<BatchItem>,
}

impl BatchReport {
    /// Items that succeeded.
    pub fn succeeded(&self) -> usize {
        self.items
            .iter()
            .filter(|item| item.outcome == BatchOutcome::Succeeded)
            .count()
    }

    /// Items attempted.
    pub fn total(&self) -> usize {
        self.items.len()
    }

    /// Items that failed, with their error.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &str)> {
        self.items.iter().filter_map(|item| match &item.outcome {
            BatchOutcome::Failed(err) => Some((item.id.as_str(), err.as_str())),
            BatchOutcome::Succeeded => None,
        })
    }

    /// `<succeeded>/<total> task(s)`.
    pub fn summary(&self) -> String {
        format!("{}/{} task(s)", self.succeeded(), self.total())
    }
}

/// Run `op` for every id, one at a time, never stopping on failure.
///
/// Each request is awaited before the next one is issued. Failures are
/// logged and recorded in the report.
pub async fn run_best_effort<F, Fut, T, E>(ids: Vec<String>, mut op: F) -> BatchReport
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let mut items = Vec::with_capacity(ids.len());
    for id in ids {
        let outcome = match op(id.clone()).await {
            Ok(_) => BatchOutcome::Succeeded,
            Err(err) => {
                tracing::warn!(task_id = %id, "batch item failed: {err}");
                BatchOutcome::Failed(err.to_string())
            },
        };
        items.push(BatchItem {
            id,
            outcome,
        });
    }
    BatchReport {
        items,
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;

    #[tokio::test]
    async fn every_item_is_attempted_in_order() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let ids = vec!["a".to_string(), "b".to_string(), "c".to_string(), "d".to_string()];

        let report = run_best_effort(ids, |id| {
            let calls = calls.clone();
            async move {
                calls.borrow_mut().push(id.clone());
                if id == "b" || id == "d" {
                    Err(format!("HTTP error: 409 for {id}"))
                } else {
                    Ok(())
                }
            }
        })
        .await;

        assert_eq!(*calls.borrow(), vec!["a", "b", "c", "d"]);
        assert_eq!(report.total(), 4);
        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.summary(), "2/4 task(s)");
        assert_eq!(
            report.failures().collect::<Vec<_>>(),
            vec![("b", "HTTP error: 409 for b"), ("d", "HTTP error: 409 for d")]
        );
    }

    #[tokio::test]
    async fn empty_batch_reports_zero_of_zero() {
        let report = run_best_effort(Vec::new(), |_id| async { Ok::<(), String>(()) }).await;
        assert_eq!(report.summary(), "0/0 task(s)");
    }
}
