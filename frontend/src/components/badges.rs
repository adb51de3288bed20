use task_admin_shared::{TaskStatus, TimeBadge};
use yew::prelude::*;

fn pill() -> Classes {
    classes!(
        "inline-flex",
        "items-center",
        "rounded-full",
        "px-2",
        "py-0.5",
        "text-xs",
        "font-semibold",
        "uppercase",
        "tracking-[0.06em]",
        "whitespace-nowrap"
    )
}

pub fn status_badge_class(status: &TaskStatus) -> Classes {
    let base = pill();
    match status {
        TaskStatus::Queued => classes!(base, "bg-amber-500/15", "text-amber-700", "dark:text-amber-200"),
        TaskStatus::Running => classes!(base, "bg-indigo-500/15", "text-indigo-700", "dark:text-indigo-200"),
        TaskStatus::Succeeded => {
            classes!(base, "bg-emerald-500/15", "text-emerald-700", "dark:text-emerald-200")
        },
        TaskStatus::Failed => classes!(base, "bg-red-500/15", "text-red-700", "dark:text-red-200"),
        TaskStatus::Other(_) => classes!(base, "bg-[var(--surface-alt)]", "text-[var(--muted)]"),
    }
}

#[derive(Properties, PartialEq)]
pub struct StatusBadgeProps {
    pub status: TaskStatus,
}

#[function_component(StatusBadge)]
pub fn status_badge(props: &StatusBadgeProps) -> Html {
    html! {
        <span class={status_badge_class(&props.status)}>{ props.status.to_string() }</span>
    }
}

#[derive(Properties, PartialEq)]
pub struct TimeBadgeViewProps {
    pub badge: Option<TimeBadge>,
}

/// The single timeout badge of a task, if it has one.
#[function_component(TimeBadgeView)]
pub fn time_badge_view(props: &TimeBadgeViewProps) -> Html {
    let Some(badge) = props.badge.as_ref() else {
        return Html::default();
    };
    let tone = match badge {
        TimeBadge::AutoFailed { .. } => classes!("bg-fuchsia-500/15", "text-fuchsia-700", "dark:text-fuchsia-200"),
        TimeBadge::OverTime { .. } => classes!("bg-red-500/15", "text-red-700", "dark:text-red-200"),
        TimeBadge::ApproachingTimeout { .. } => {
            classes!("bg-amber-500/15", "text-amber-700", "dark:text-amber-200")
        },
    };
    html! {
        <span class={classes!(pill(), tone)} title={badge.message()}>
            { badge.label() }
        </span>
    }
}
