use std::rc::Rc;

use task_admin_shared::{
    format::{format_duration, format_timestamp},
    row_badge, row_tone, run_best_effort, time_status, FailTaskRequest, FollowUp,
    QueueDirectory, RowTone, Selection, Task, TaskStatus, ToolNames,
};
use wasm_bindgen_futures::spawn_local;
use web_sys::console;
use yew::prelude::*;

use crate::{
    api,
    components::{
        badges::{StatusBadge, TimeBadgeView},
        loading_button::{ButtonVariant, LoadingButton},
        loading_spinner::{LoadingSpinner, SpinnerSize},
    },
    notify::use_notifier,
    pages::task_detail::TaskDetailModal,
    utils::{confirm, now_utc, select_value},
    view_context::{use_task_view, TaskViewAction},
};

#[derive(Clone, Copy, PartialEq, Eq)]
enum BulkKind {
    Fail,
    Requeue,
}

impl BulkKind {
    fn confirm_message(self, count: usize) -> String {
        match self {
            BulkKind::Fail => format!("Mark {count} selected task(s) as failed?"),
            BulkKind::Requeue => format!("Requeue {count} selected task(s)?"),
        }
    }

    fn done_label(self) -> &'static str {
        match self {
            BulkKind::Fail => "Failed",
            BulkKind::Requeue => "Requeued",
        }
    }
}

/// Modal identity. `generation` changes on every open so a follow-up
/// reopen of the same task remounts and refetches.
#[derive(Clone, PartialEq)]
struct OpenDetail {
    task_id: String,
    generation: u64,
}

fn row_tone_class(tone: RowTone) -> Classes {
    match tone {
        RowTone::Normal => classes!(),
        RowTone::Warning => classes!("bg-amber-500/5", "task-row-warning"),
        RowTone::Error => classes!("bg-red-500/5", "task-row-error"),
    }
}

#[function_component(TasksPage)]
pub fn tasks_page() -> Html {
    let view_ctx = use_task_view();
    let notifier = use_notifier();

    let queues = use_state(QueueDirectory::default);
    let tool_names = use_state(ToolNames::default);
    let tasks = use_state(Vec::<Task>::new);
    let load_error = use_state(|| None::<String>);
    let loading = use_state(|| true);
    let selection = use_state(Selection::default);
    let bulk_running = use_state(|| None::<BulkKind>);
    let open_detail = use_state(|| None::<OpenDetail>);
    let reload_seq = use_state(|| 0_u64);
    let request_seq = use_mut_ref(|| 0_u64);
    let detail_generation = use_mut_ref(|| 0_u64);

    let view = view_ctx.view.clone();

    {
        let view_ctx = view_ctx.clone();
        let notifier = notifier.clone();
        let queues = queues.clone();
        let tool_names = tool_names.clone();
        let tasks = tasks.clone();
        let load_error = load_error.clone();
        let loading = loading.clone();
        let selection = selection.clone();
        let request_seq = request_seq.clone();
        let request_view = view.clone();
        use_effect_with(
            (view.filter.clone(), view.page.offset, *reload_seq),
            move |_| {
                let request_id = {
                    let mut seq = request_seq.borrow_mut();
                    *seq += 1;
                    *seq
                };
                loading.set(true);
                spawn_local(async move {
                    let queue_list = match api::fetch_queues().await {
                        Ok(list) => list,
                        Err(err) => {
                            notifier.report_error("Loading queues", &err);
                            Vec::new()
                        },
                    };
                    let names = match api::fetch_tool_names().await {
                        Ok(names) => names,
                        Err(err) => {
                            console::warn_1(&format!("Tool names unavailable: {}", err).into());
                            ToolNames::default()
                        },
                    };
                    let result = api::fetch_tasks(&request_view).await;

                    if *request_seq.borrow() != request_id {
                        return;
                    }

                    queues.set(QueueDirectory::new(queue_list));
                    tool_names.set(names);
                    match result {
                        Ok(page) => {
                            view_ctx.dispatch(TaskViewAction::SetTotal(page.total));
                            tasks.set(page.tasks);
                            load_error.set(None);
                        },
                        Err(err) => {
                            console::error_1(&format!("Failed to load tasks: {}", err).into());
                            tasks.set(Vec::new());
                            load_error.set(Some(err));
                        },
                    }
                    selection.set(Selection::default());
                    loading.set(false);
                });
                || ()
            },
        );
    }

    let reload = {
        let reload_seq = reload_seq.clone();
        Callback::from(move |_: ()| reload_seq.set(*reload_seq + 1))
    };

    let on_queue_change = {
        let view_ctx = view_ctx.clone();
        Callback::from(move |event: Event| {
            view_ctx.dispatch(TaskViewAction::SetQueue(select_value(&event)));
        })
    };

    let on_status_change = {
        let view_ctx = view_ctx.clone();
        Callback::from(move |event: Event| {
            view_ctx.dispatch(TaskViewAction::SetStatus(select_value(&event)));
        })
    };

    let on_load_more = {
        let view_ctx = view_ctx.clone();
        Callback::from(move |_: MouseEvent| view_ctx.dispatch(TaskViewAction::LoadMore))
    };

    let on_refresh = {
        let reload = reload.clone();
        Callback::from(move |_: MouseEvent| reload.emit(()))
    };

    let on_toggle_row = {
        let selection = selection.clone();
        let queues = queues.clone();
        Callback::from(move |task: Rc<Task>| selection.set(selection.toggled(&task, &queues)))
    };

    let on_toggle_all = {
        let selection = selection.clone();
        let queues = queues.clone();
        let tasks = tasks.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*selection).clone();
            next.toggle_all(&tasks, &queues);
            selection.set(next);
        })
    };

    let on_clear_selection = {
        let selection = selection.clone();
        Callback::from(move |_: MouseEvent| selection.set(Selection::default()))
    };

    let open_task = {
        let open_detail = open_detail.clone();
        let detail_generation = detail_generation.clone();
        Callback::from(move |task_id: String| {
            let generation = {
                let mut counter = detail_generation.borrow_mut();
                *counter += 1;
                *counter
            };
            open_detail.set(Some(OpenDetail {
                task_id,
                generation,
            }));
        })
    };

    let on_close_detail = {
        let open_detail = open_detail.clone();
        Callback::from(move |_: ()| open_detail.set(None))
    };

    let on_follow_up = {
        let open_task = open_task.clone();
        let open_detail = open_detail.clone();
        let reload = reload.clone();
        Callback::from(move |follow_up: FollowUp| match follow_up {
            FollowUp::OpenDetail(task_id) => open_task.emit(task_id),
            FollowUp::ReloadList => {
                open_detail.set(None);
                reload.emit(());
            },
        })
    };

    let run_bulk = {
        let selection = selection.clone();
        let tasks = tasks.clone();
        let bulk_running = bulk_running.clone();
        let notifier = notifier.clone();
        let reload = reload.clone();
        Callback::from(move |kind: BulkKind| {
            if bulk_running.is_some() || selection.is_empty() {
                return;
            }
            let ids = selection.ordered_ids(&tasks);
            if !confirm(&kind.confirm_message(ids.len())) {
                return;
            }
            bulk_running.set(Some(kind));

            let selection = selection.clone();
            let bulk_running = bulk_running.clone();
            let notifier = notifier.clone();
            let reload = reload.clone();
            spawn_local(async move {
                let report = match kind {
                    BulkKind::Fail => {
                        let request = FailTaskRequest::bulk();
                        run_best_effort(ids, |id| {
                            let request = request.clone();
                            async move { api::fail_task(&id, &request).await }
                        })
                        .await
                    },
                    BulkKind::Requeue => {
                        run_best_effort(ids, |id| async move { api::requeue_task(&id).await }).await
                    },
                };
                for (id, reason) in report.failures() {
                    console::warn_1(&format!("Bulk action skipped task {}: {}", id, reason).into());
                }
                notifier.success(format!("{} {}", kind.done_label(), report.summary()));
                bulk_running.set(None);
                selection.set(Selection::default());
                reload.emit(());
            });
        })
    };

    let now = now_utc();
    let selectable_on_page = tasks.iter().any(|task| !queues.is_task_locked(task));
    let all_selected = selection.all_selected(&tasks, &queues);
    let status_value = view
        .filter
        .status
        .as_ref()
        .map(|status| status.as_str().to_string())
        .unwrap_or_default();
    let queue_value = view.filter.queue_id.clone().unwrap_or_default();

    let filters = html! {
        <div class={classes!("flex", "flex-wrap", "items-end", "gap-3")}>
            <label class={classes!("flex", "flex-col", "gap-1", "text-xs", "text-[var(--muted)]")}>
                { "Queue" }
                <select
                    class={classes!("rounded-lg", "border", "border-[var(--border)]", "bg-[var(--surface)]", "px-3", "py-1.5", "text-sm", "text-[var(--text)]")}
                    onchange={on_queue_change}
                >
                    <option value="" selected={queue_value.is_empty()}>{ "All queues" }</option>
                    { for queues.queues().iter().map(|queue| {
                        let suffix = if queue.is_archived() { " (archived)" } else { "" };
                        html! {
                            <option value={queue.id.clone()} selected={queue.id == queue_value}>
                                { format!("{}{}", queue.display_name(), suffix) }
                            </option>
                        }
                    }) }
                </select>
            </label>
            <label class={classes!("flex", "flex-col", "gap-1", "text-xs", "text-[var(--muted)]")}>
                { "Status" }
                <select
                    class={classes!("rounded-lg", "border", "border-[var(--border)]", "bg-[var(--surface)]", "px-3", "py-1.5", "text-sm", "text-[var(--text)]")}
                    onchange={on_status_change}
                >
                    <option value="" selected={status_value.is_empty()}>{ "All statuses" }</option>
                    { for TaskStatus::FILTERABLE.iter().map(|status| html! {
                        <option value={status.as_str().to_string()} selected={status.as_str() == status_value}>
                            { status.to_string() }
                        </option>
                    }) }
                </select>
            </label>
            <button
                type="button"
                class={classes!("btn-fluent-secondary", "!px-3", "!py-1.5", "!text-sm")}
                onclick={on_refresh.clone()}
                disabled={*loading}
            >
                { "Refresh" }
            </button>
        </div>
    };

    let bulk_bar = if selection.is_empty() {
        Html::default()
    } else {
        let running = *bulk_running;
        let on_bulk_fail = {
            let run_bulk = run_bulk.clone();
            Callback::from(move |_: MouseEvent| run_bulk.emit(BulkKind::Fail))
        };
        let on_bulk_requeue = {
            let run_bulk = run_bulk.clone();
            Callback::from(move |_: MouseEvent| run_bulk.emit(BulkKind::Requeue))
        };
        html! {
            <div class={classes!("flex", "flex-wrap", "items-center", "gap-3", "rounded-xl", "border", "border-[var(--border)]", "bg-[var(--surface-alt)]", "px-4", "py-2")}>
                <span class={classes!("text-sm", "font-semibold")}>
                    { format!("{} selected", selection.len()) }
                </span>
                <LoadingButton
                    label="Fail Selected"
                    variant={ButtonVariant::Danger}
                    loading={running == Some(BulkKind::Fail)}
                    disabled={running.is_some()}
                    onclick={on_bulk_fail}
                />
                <LoadingButton
                    label="Requeue Selected"
                    loading={running == Some(BulkKind::Requeue)}
                    disabled={running.is_some()}
                    onclick={on_bulk_requeue}
                />
                <button
                    type="button"
                    class={classes!("text-sm", "text-[var(--muted)]", "hover:text-[var(--primary)]")}
                    onclick={on_clear_selection}
                    disabled={running.is_some()}
                >
                    { "Clear" }
                </button>
            </div>
        }
    };

    let body = if let Some(err) = (*load_error).clone() {
        html! {
            <div class={classes!("rounded-xl", "border", "border-red-400/40", "bg-red-500/5", "p-6", "text-center", "space-y-3")}>
                <p class={classes!("text-sm", "text-red-700", "dark:text-red-200")}>
                    { format!("Could not load tasks: {}", err) }
                </p>
                <button type="button" class={classes!("btn-fluent-secondary", "!text-sm")} onclick={on_refresh}>
                    { "Try again" }
                </button>
            </div>
        }
    } else if *loading && tasks.is_empty() {
        html! { <LoadingSpinner size={SpinnerSize::Medium} /> }
    } else if tasks.is_empty() {
        html! {
            <p class={classes!("py-10", "text-center", "text-sm", "text-[var(--muted)]")}>
                { "No tasks match the current filters." }
            </p>
        }
    } else {
        let rows = tasks.iter().map(|task| {
            let task = Rc::new(task.clone());
            let status = time_status(&task, now);
            let badge = row_badge(&task, &status);
            let locked = queues.is_task_locked(&task);
            let selected = selection.contains(&task.id);
            let queue_label = task
                .queue_id
                .as_deref()
                .map(|queue_id| queues.name_for(queue_id).to_string())
                .unwrap_or_else(|| "-".to_string());
            let tool_label = task
                .tool_name
                .as_deref()
                .map(|name| tool_names.resolve(name).to_string())
                .unwrap_or_else(|| "-".to_string());
            let elapsed = status.elapsed.map(format_duration).unwrap_or_else(|| "-".to_string());

            let on_row_click = {
                let on_toggle_row = on_toggle_row.clone();
                let task = task.clone();
                Callback::from(move |_: MouseEvent| on_toggle_row.emit(task.clone()))
            };
            let on_checkbox_click = {
                let on_toggle_row = on_toggle_row.clone();
                let task = task.clone();
                Callback::from(move |event: MouseEvent| {
                    event.stop_propagation();
                    on_toggle_row.emit(task.clone());
                })
            };
            let on_open = {
                let open_task = open_task.clone();
                let task_id = task.id.clone();
                Callback::from(move |event: MouseEvent| {
                    event.stop_propagation();
                    open_task.emit(task_id.clone());
                })
            };

            html! {
                <tr
                    key={task.id.clone()}
                    class={classes!(
                        "border-t",
                        "border-[var(--border)]",
                        row_tone_class(row_tone(&status)),
                        if locked { classes!("opacity-50", "cursor-not-allowed") } else { classes!("cursor-pointer", "hover:bg-[var(--surface-alt)]") },
                        selected.then_some("bg-[var(--primary)]/5"),
                    )}
                    title={locked.then_some("Queue is archived")}
                    onclick={on_row_click}
                >
                    <td class={classes!("px-3", "py-2")}>
                        <input
                            type="checkbox"
                            checked={selected}
                            disabled={locked}
                            aria-label={format!("Select task {}", task.id)}
                            onclick={on_checkbox_click}
                        />
                    </td>
                    <td class={classes!("px-3", "py-2")}>
                        <button
                            type="button"
                            class={classes!("font-mono", "text-xs", "text-[var(--primary)]", "hover:underline")}
                            onclick={on_open}
                        >
                            { task.id.clone() }
                        </button>
                    </td>
                    <td class={classes!("px-3", "py-2")}>{ queue_label }</td>
                    <td class={classes!("px-3", "py-2")}>{ tool_label }</td>
                    <td class={classes!("px-3", "py-2")}>{ task.agent_role_display().unwrap_or("-").to_string() }</td>
                    <td class={classes!("px-3", "py-2")}><StatusBadge status={task.status.clone()} /></td>
                    <td class={classes!("px-3", "py-2", "whitespace-nowrap", "text-xs")}>{ format_timestamp(task.created_at) }</td>
                    <td class={classes!("px-3", "py-2", "whitespace-nowrap", "font-mono", "text-xs")}>{ elapsed }</td>
                    <td class={classes!("px-3", "py-2")}><TimeBadgeView {badge} /></td>
                </tr>
            }
        });

        html! {
            <div class={classes!("overflow-x-auto", "rounded-xl", "border", "border-[var(--border)]", "bg-[var(--surface)]")}>
                <table class={classes!("w-full", "text-left", "text-sm")}>
                    <thead class={classes!("text-xs", "uppercase", "tracking-[0.06em]", "text-[var(--muted)]")}>
                        <tr>
                            <th class={classes!("px-3", "py-2")}>
                                <input
                                    type="checkbox"
                                    checked={all_selected}
                                    disabled={!selectable_on_page}
                                    aria-label="Select all tasks on this page"
                                    onclick={on_toggle_all}
                                />
                            </th>
                            <th class={classes!("px-3", "py-2")}>{ "ID" }</th>
                            <th class={classes!("px-3", "py-2")}>{ "Queue" }</th>
                            <th class={classes!("px-3", "py-2")}>{ "Tool" }</th>
                            <th class={classes!("px-3", "py-2")}>{ "Role" }</th>
                            <th class={classes!("px-3", "py-2")}>{ "Status" }</th>
                            <th class={classes!("px-3", "py-2")}>{ "Created" }</th>
                            <th class={classes!("px-3", "py-2")}>{ "Elapsed" }</th>
                            <th class={classes!("px-3", "py-2")}></th>
                        </tr>
                    </thead>
                    <tbody>
                        { for rows }
                    </tbody>
                </table>
            </div>
        }
    };

    let footer = if load_error.is_some() {
        Html::default()
    } else {
        html! {
            <div class={classes!("flex", "items-center", "justify-between", "gap-3", "text-sm", "text-[var(--muted)]")}>
                <span>{ view.range_label(tasks.len()) }</span>
                if view.has_more(tasks.len()) {
                    <LoadingButton
                        label="Load More"
                        loading={*loading}
                        onclick={on_load_more}
                    />
                }
            </div>
        }
    };

    html! {
        <main class={classes!("mx-auto", "max-w-7xl", "px-4", "py-6", "space-y-4")}>
            <h1 class={classes!("text-2xl", "font-semibold", "text-[var(--text)]")}>{ "Tasks" }</h1>
            { filters }
            { bulk_bar }
            { body }
            { footer }
            if let Some(detail) = (*open_detail).clone() {
                <TaskDetailModal
                    key={format!("{}#{}", detail.task_id, detail.generation)}
                    task_id={detail.task_id.clone()}
                    tool_names={(*tool_names).clone()}
                    queues={(*queues).clone()}
                    on_close={on_close_detail}
                    on_follow_up={on_follow_up}
                />
            }
        </main>
    }
}
