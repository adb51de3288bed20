use yew::prelude::*;

use crate::config::app_path;

#[function_component(NotFoundPage)]
pub fn not_found_page() -> Html {
    html! {
        <main class={classes!("mx-auto", "max-w-xl", "px-4", "py-16", "text-center", "space-y-3")}>
            <h2 class={classes!("text-xl", "font-semibold")}>{"404 - Page not found"}</h2>
            <p class={classes!("text-sm", "text-[var(--muted)]")}>{"There is nothing at this address."}</p>
            <a class={classes!("btn-fluent-secondary", "inline-block")} href={app_path("tasks")}>
                {"Back to tasks"}
            </a>
        </main>
    }
}
