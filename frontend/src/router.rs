use yew::prelude::*;
use yew_router::prelude::*;

use crate::pages;

#[derive(Routable, Clone, PartialEq, Debug)]
pub enum Route {
    #[cfg(not(feature = "mock"))]
    #[at("/")]
    Home,
    #[cfg(feature = "mock")]
    #[at("/task_admin/")]
    Home,

    #[cfg(not(feature = "mock"))]
    #[at("/tasks")]
    Tasks,
    #[cfg(feature = "mock")]
    #[at("/task_admin/tasks")]
    Tasks,

    #[not_found]
    #[cfg(not(feature = "mock"))]
    #[at("/404")]
    NotFound,
    #[not_found]
    #[cfg(feature = "mock")]
    #[at("/task_admin/404")]
    NotFound,
}

fn switch(route: Route) -> Html {
    match route {
        Route::Home | Route::Tasks => html! { <pages::TasksPage /> },
        Route::NotFound => html! { <pages::not_found::NotFoundPage /> },
    }
}

#[function_component(AppRouter)]
pub fn app_router() -> Html {
    html! {
        <BrowserRouter>
            <div class="flex flex-col bg-[var(--bg)]" style="min-height: 100vh; min-height: 100svh;">
                <header class="border-b border-[var(--border)] bg-[var(--surface)] px-4 py-3">
                    <Link<Route> to={Route::Tasks} classes="text-base font-semibold text-[var(--text)]">
                        { "Task Queue Admin" }
                    </Link<Route>>
                </header>
                <div class="flex-1 pt-[var(--space-sm)]">
                    <Switch<Route> render={switch} />
                </div>
            </div>
        </BrowserRouter>
    }
}
