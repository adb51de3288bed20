//! Admin console for the task queue: browse, filter, and act on tasks.

mod api;
mod components;
mod config;
#[cfg(feature = "mock")]
mod models;
mod notify;
mod pages;
mod router;
mod utils;
mod view_context;

use yew::prelude::*;

use crate::{notify::NotificationProvider, view_context::TaskViewProvider};

#[function_component(App)]
fn app() -> Html {
    html! {
        <NotificationProvider>
            <TaskViewProvider>
                <router::AppRouter />
            </TaskViewProvider>
        </NotificationProvider>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
