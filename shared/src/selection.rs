//! Checked rows of the task list.

use std::collections::HashSet;

use crate::{queues::QueueDirectory, task::Task};

/// Task ids checked in the current list. Cleared on every list reload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: HashSet<String>,
}

impl Selection {
    /// Flip one task. Tasks of archived queues are ignored.
    ///
    /// Returns whether the task is selected afterwards.
    pub fn toggle(&mut self, task: &Task, queues: &QueueDirectory) -> bool {
        if queues.is_task_locked(task) {
            self.ids.remove(&task.id);
            return false;
        }
        if self.ids.remove(&task.id) {
            false
        } else {
            self.ids.insert(task.id.clone());
            true
        }
    }

    /// Copy of this selection with `task` flipped, as a row click leaves it.
    pub fn toggled(&self, task: &Task, queues: &QueueDirectory) -> Self {
        let mut next = self.clone();
        next.toggle(task, queues);
        next
    }

    /// Header checkbox: select every selectable visible task, or clear them
    /// all when they are already selected.
    pub fn toggle_all(&mut self, tasks: &[Task], queues: &QueueDirectory) {
        let selectable: Vec<&Task> =
            tasks.iter().filter(|task| !queues.is_task_locked(task)).collect();
        if self.all_selected(tasks, queues) {
            for task in selectable {
                self.ids.remove(&task.id);
            }
        } else {
            self.ids
                .extend(selectable.into_iter().map(|task| task.id.clone()));
        }
    }

    /// Every selectable visible task is selected, and there is at least one.
    pub fn all_selected(&self, tasks: &[Task], queues: &QueueDirectory) -> bool {
        let mut selectable = tasks.iter().filter(|task| !queues.is_task_locked(task)).peekable();
        selectable.peek().is_some() && selectable.all(|task| self.ids.contains(&task.id))
    }

    /// Whether `task_id` is selected.
    pub fn contains(&self, task_id: &str) -> bool {
        self.ids.contains(task_id)
    }

    /// Number of selected tasks.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Drop the whole selection.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Selected ids in table order, for sequential bulk requests.
    pub fn ordered_ids(&self, tasks: &[Task]) -> Vec<String> {
        tasks
            .iter()
            .filter(|task| self.ids.contains(&task.id))
            .map(|task| task.id.clone())
            .collect()
    }
}
