use task_admin_shared::{
    available_actions,
    format::{format_duration, format_timestamp},
    payload_preview, row_badge, time_status, ActionResponse, FollowUp, PreparedAction,
    QueueDirectory, Task, TaskAction, ToolNames,
};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{window, KeyboardEvent};
use yew::prelude::*;

use crate::{
    api,
    components::{
        badges::{StatusBadge, TimeBadgeView},
        loading_button::{ButtonVariant, LoadingButton},
        loading_spinner::LoadingSpinner,
    },
    notify::use_notifier,
    utils::{now_utc, prompt},
};

async fn send_action(task_id: &str, prepared: PreparedAction) -> Result<ActionResponse, String> {
    match prepared {
        PreparedAction::Claim => api::claim_task(task_id).await,
        PreparedAction::Complete(request) => api::complete_task(task_id, &request).await,
        PreparedAction::Fail(request) => api::fail_task(task_id, &request).await,
        PreparedAction::Retry => api::retry_task(task_id).await,
        PreparedAction::Requeue => api::requeue_task(task_id).await,
    }
}

fn action_variant(action: TaskAction) -> ButtonVariant {
    match action {
        TaskAction::Fail => ButtonVariant::Danger,
        TaskAction::Claim | TaskAction::Complete => ButtonVariant::Primary,
        TaskAction::Retry | TaskAction::Requeue => ButtonVariant::Secondary,
    }
}

fn detail_row(label: &'static str, value: String) -> Html {
    html! {
        <>
            <dt class={classes!("text-xs", "uppercase", "tracking-[0.06em]", "text-[var(--muted)]")}>{ label }</dt>
            <dd class={classes!("text-sm", "text-[var(--text)]", "break-all")}>{ value }</dd>
        </>
    }
}

fn text_block(title: &'static str, body: String, tone: Classes) -> Html {
    html! {
        <section class={classes!("space-y-1")}>
            <h3 class={classes!("text-xs", "font-semibold", "uppercase", "tracking-[0.06em]", "text-[var(--muted)]")}>{ title }</h3>
            <pre class={classes!("max-h-64", "overflow-auto", "whitespace-pre-wrap", "rounded-lg", "p-3", "text-xs", tone)}>
                { body }
            </pre>
        </section>
    }
}

#[derive(Properties, PartialEq)]
pub struct TaskDetailModalProps {
    pub task_id: String,
    pub tool_names: ToolNames,
    pub queues: QueueDirectory,
    pub on_close: Callback<()>,
    /// Fired once an action succeeded; the page decides what to show next.
    pub on_follow_up: Callback<FollowUp>,
}

#[function_component(TaskDetailModal)]
pub fn task_detail_modal(props: &TaskDetailModalProps) -> Html {
    let notifier = use_notifier();
    let task = use_state(|| None::<Task>);
    let inflight = use_state(|| None::<TaskAction>);

    {
        let task = task.clone();
        let notifier = notifier.clone();
        let on_close = props.on_close.clone();
        use_effect_with(props.task_id.clone(), move |task_id| {
            let task_id = task_id.clone();
            spawn_local(async move {
                match api::fetch_task(&task_id).await {
                    Ok(loaded) => task.set(Some(loaded)),
                    Err(err) => {
                        notifier.report_error("Loading task", &err);
                        on_close.emit(());
                    },
                }
            });
            || ()
        });
    }

    {
        let on_close = props.on_close.clone();
        use_effect_with((), move |_| {
            let listener =
                wasm_bindgen::closure::Closure::wrap(Box::new(move |event: KeyboardEvent| {
                    if event.key() == "Escape" {
                        on_close.emit(());
                    }
                }) as Box<dyn FnMut(_)>);
            if let Some(win) = window() {
                let _ = win
                    .add_event_listener_with_callback("keydown", listener.as_ref().unchecked_ref());
            }
            move || {
                if let Some(win) = window() {
                    let _ = win.remove_event_listener_with_callback(
                        "keydown",
                        listener.as_ref().unchecked_ref(),
                    );
                }
            }
        });
    }

    let close_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    let stop_bubble = Callback::from(|event: MouseEvent| event.stop_propagation());

    let run_action = {
        let task = task.clone();
        let inflight = inflight.clone();
        let notifier = notifier.clone();
        let on_follow_up = props.on_follow_up.clone();
        Callback::from(move |action: TaskAction| {
            if inflight.is_some() {
                return;
            }
            let Some(task_id) = task.as_ref().map(|task| task.id.clone()) else {
                return;
            };
            let prepared = match PreparedAction::prepare(action, &task_id, prompt) {
                Ok(prepared) => prepared,
                Err(err) => {
                    notifier.error(err.to_string());
                    return;
                },
            };
            inflight.set(Some(action));

            let inflight = inflight.clone();
            let notifier = notifier.clone();
            let on_follow_up = on_follow_up.clone();
            spawn_local(async move {
                match send_action(&task_id, prepared).await {
                    Ok(response) => {
                        let new_task_id = response.new_task_id();
                        notifier.success(action.success_message(&task_id, new_task_id));
                        inflight.set(None);
                        on_follow_up.emit(action.follow_up(&task_id, new_task_id));
                    },
                    Err(err) => {
                        notifier.report_error(action.label(), &err);
                        inflight.set(None);
                    },
                }
            });
        })
    };

    let content = match task.as_ref() {
        None => html! { <LoadingSpinner /> },
        Some(task) => {
            let status = time_status(task, now_utc());
            let badge = row_badge(task, &status);
            let elapsed = status.elapsed.map(format_duration).unwrap_or_else(|| "-".to_string());
            let remaining = status.remaining.map(format_duration).unwrap_or_else(|| "-".to_string());
            let queue_label = task
                .queue_id
                .as_deref()
                .map(|queue_id| props.queues.name_for(queue_id).to_string())
                .unwrap_or_else(|| "-".to_string());
            let tool_label = task
                .tool_name
                .as_deref()
                .map(|name| props.tool_names.resolve(name).to_string())
                .unwrap_or_else(|| "-".to_string());
            let actions = available_actions(&task.status);
            let running = *inflight;
            let preview = payload_preview(&task.payload);
            let payload_block = if preview.is_empty() {
                Html::default()
            } else {
                text_block("Payload", preview, classes!("bg-[var(--surface-alt)]", "text-[var(--text)]"))
            };
            let result_block = task
                .result_summary
                .clone()
                .map(|summary| {
                    text_block(
                        "Result",
                        summary,
                        classes!("bg-emerald-500/10", "text-emerald-800", "dark:text-emerald-100"),
                    )
                })
                .unwrap_or_default();
            let error_block = task
                .error_message
                .clone()
                .map(|message| {
                    let title = if task.is_auto_failed() { "Error (auto-failed)" } else { "Error" };
                    let body = match task.error_type.as_deref() {
                        Some(kind) => format!("[{kind}] {message}"),
                        None => message,
                    };
                    text_block(title, body, classes!("bg-red-500/10", "text-red-800", "dark:text-red-100"))
                })
                .unwrap_or_default();

            html! {
                <>
                    <header class={classes!("flex", "flex-wrap", "items-center", "gap-2", "pr-8")}>
                        <h2 class={classes!("font-mono", "text-lg", "font-semibold")}>{ format!("Task {}", task.id) }</h2>
                        <StatusBadge status={task.status.clone()} />
                        <TimeBadgeView {badge} />
                    </header>

                    <dl class={classes!("grid", "grid-cols-[max-content_1fr]", "gap-x-4", "gap-y-2")}>
                        { detail_row("Queue", queue_label) }
                        { detail_row("Tool", tool_label) }
                        { detail_row("Agent role", task.agent_role_display().unwrap_or("-").to_string()) }
                        { detail_row("Created", format_timestamp(task.created_at)) }
                        { detail_row("Claimed", format_timestamp(task.claimed_at)) }
                        { detail_row("Completed", format_timestamp(task.completed_at)) }
                        { detail_row("Failed", format_timestamp(task.failed_at)) }
                        { detail_row("Stale warning", format_timestamp(task.stale_warned_at)) }
                        { detail_row("Timeout", format_duration(status.timeout)) }
                        { detail_row("Elapsed", elapsed) }
                        { detail_row("Remaining", remaining) }
                    </dl>

                    { payload_block }
                    { result_block }
                    { error_block }

                    if !actions.is_empty() {
                        <footer class={classes!("flex", "flex-wrap", "gap-2", "border-t", "border-[var(--border)]", "pt-4")}>
                            { for actions.into_iter().map(|action| {
                                let run_action = run_action.clone();
                                html! {
                                    <LoadingButton
                                        key={action.label()}
                                        label={action.label()}
                                        variant={action_variant(action)}
                                        loading={running == Some(action)}
                                        disabled={running.is_some()}
                                        onclick={Callback::from(move |_: MouseEvent| run_action.emit(action))}
                                    />
                                }
                            }) }
                        </footer>
                    }
                </>
            }
        },
    };

    html! {
        <div
            class={classes!(
                "fixed",
                "inset-0",
                "z-[100]",
                "flex",
                "items-center",
                "justify-center",
                "bg-black/60",
                "p-4",
                "backdrop-blur-sm"
            )}
            role="dialog"
            aria-modal="true"
            onclick={close_click.clone()}
        >
            <div
                class={classes!(
                    "relative",
                    "w-full",
                    "max-w-2xl",
                    "max-h-[90vh]",
                    "overflow-y-auto",
                    "space-y-4",
                    "rounded-2xl",
                    "border",
                    "border-[var(--border)]",
                    "bg-[var(--surface)]",
                    "p-6",
                    "shadow-xl"
                )}
                onclick={stop_bubble}
            >
                <button
                    type="button"
                    class={classes!("absolute", "right-4", "top-4", "text-lg", "leading-none", "text-[var(--muted)]", "hover:text-[var(--text)]")}
                    aria-label="Close"
                    onclick={close_click}
                >
                    { "X" }
                </button>
                { content }
            </div>
        </div>
    }
}
