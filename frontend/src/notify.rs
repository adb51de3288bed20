use std::{fmt::Display, rc::Rc};

use web_sys::console;
use yew::prelude::*;

use crate::components::toast::ToastStack;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationState {
    pub toasts: Vec<Toast>,
    next_id: u64,
}

pub enum NotificationAction {
    Push(ToastKind, String),
    Dismiss(u64),
}

impl Reducible for NotificationState {
    type Action = NotificationAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            NotificationAction::Push(kind, message) => {
                next.next_id += 1;
                next.toasts.push(Toast {
                    id: next.next_id,
                    kind,
                    message,
                });
            },
            NotificationAction::Dismiss(id) => {
                next.toasts.retain(|toast| toast.id != id);
            },
        }
        Rc::new(next)
    }
}

pub type NotificationContext = UseReducerHandle<NotificationState>;

#[derive(Properties, PartialEq)]
pub struct NotificationProviderProps {
    pub children: Html,
}

#[function_component(NotificationProvider)]
pub fn notification_provider(props: &NotificationProviderProps) -> Html {
    let state = use_reducer(NotificationState::default);
    html! {
        <ContextProvider<NotificationContext> context={state}>
            {props.children.clone()}
            <ToastStack />
        </ContextProvider<NotificationContext>>
    }
}

/// Handle for the success/error notifications and the shared error handler.
#[derive(Clone, PartialEq)]
pub struct Notifier {
    handle: Option<NotificationContext>,
}

impl Notifier {
    pub fn success(&self, message: impl Into<String>) {
        if let Some(handle) = &self.handle {
            handle.dispatch(NotificationAction::Push(ToastKind::Success, message.into()));
        }
    }

    pub fn error(&self, message: impl Into<String>) {
        let message = message.into();
        console::error_1(&message.clone().into());
        if let Some(handle) = &self.handle {
            handle.dispatch(NotificationAction::Push(ToastKind::Error, message));
        }
    }

    /// Report a failed request. Never panics and never rethrows.
    pub fn report_error(&self, action: &str, err: impl Display) {
        self.error(format!("{} failed: {}", action, err));
    }
}

#[hook]
pub fn use_notifier() -> Notifier {
    Notifier {
        handle: use_context::<NotificationContext>(),
    }
}
