use std::rc::Rc;

use task_admin_shared::TaskListView;
use yew::prelude::*;

/// Filter and pagination of the task list, kept above the router so it
/// survives leaving and re-entering the page. Gone on reload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskViewState {
    pub view: TaskListView,
}

pub enum TaskViewAction {
    SetQueue(Option<String>),
    SetStatus(Option<String>),
    LoadMore,
    SetTotal(usize),
}

impl Reducible for TaskViewState {
    type Action = TaskViewAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let view = self.view.clone();
        let view = match action {
            TaskViewAction::SetQueue(queue_id) => view.with_queue(queue_id),
            TaskViewAction::SetStatus(status) => view.with_status(status),
            TaskViewAction::LoadMore => view.load_more(),
            TaskViewAction::SetTotal(total) => {
                if total == self.view.page.total {
                    return self;
                }
                view.with_total(total)
            },
        };
        Rc::new(Self {
            view,
        })
    }
}

pub type TaskViewContext = UseReducerHandle<TaskViewState>;

#[derive(Properties, PartialEq)]
pub struct TaskViewProviderProps {
    pub children: Html,
}

#[function_component(TaskViewProvider)]
pub fn task_view_provider(props: &TaskViewProviderProps) -> Html {
    let state = use_reducer(TaskViewState::default);
    html! {
        <ContextProvider<TaskViewContext> context={state}>
            {props.children.clone()}
        </ContextProvider<TaskViewContext>>
    }
}

/// The shared list view, or a page-local one when no provider is mounted.
#[hook]
pub fn use_task_view() -> TaskViewContext {
    let shared = use_context::<TaskViewContext>();
    let local = use_reducer(TaskViewState::default);
    shared.unwrap_or(local)
}
