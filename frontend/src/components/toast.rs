use yew::prelude::*;
use yew_hooks::prelude::use_timeout;

use crate::{
    config::TOAST_DISMISS_MS,
    notify::{NotificationAction, NotificationContext, Toast, ToastKind},
};

#[derive(Properties, PartialEq)]
struct ToastItemProps {
    toast: Toast,
    on_close: Callback<u64>,
}

#[function_component(ToastItem)]
fn toast_item(props: &ToastItemProps) -> Html {
    let dismiss = {
        let on_close = props.on_close.clone();
        let id = props.toast.id;
        Callback::from(move |_| on_close.emit(id))
    };

    {
        let dismiss = dismiss.clone();
        // Started on mount; a toast never changes after it is pushed.
        use_timeout(move || dismiss.emit(()), TOAST_DISMISS_MS);
    }

    let (icon, title, tone) = match props.toast.kind {
        ToastKind::Success => (
            "✓",
            "Done",
            classes!("bg-emerald-50", "text-emerald-800", "dark:bg-emerald-900/60", "dark:text-emerald-100"),
        ),
        ToastKind::Error => (
            "⚠️",
            "Error",
            classes!("bg-red-50", "text-red-800", "dark:bg-red-900/60", "dark:text-red-100"),
        ),
    };

    let role = if props.toast.kind == ToastKind::Error { "alert" } else { "status" };
    let close_button = {
        let dismiss = dismiss.clone();
        Callback::from(move |_: MouseEvent| dismiss.emit(()))
    };

    html! {
        <div
            class={classes!(
                "toast",
                "flex",
                "items-start",
                "gap-3",
                "rounded-2xl",
                "px-5",
                "py-4",
                "text-sm",
                "shadow-xl",
                "w-full",
                "max-w-md",
                "animate-[fadeIn_0.2s_ease]",
                tone
            )}
            role={role}
            aria-live="assertive"
        >
            <span class="text-xl" aria-hidden="true">{ icon }</span>
            <div class="flex-1 space-y-1">
                <p class="font-semibold">{ title }</p>
                <p class="break-words">{ props.toast.message.clone() }</p>
            </div>
            <button
                type="button"
                class={classes!(
                    "ml-2",
                    "inline-flex",
                    "h-7",
                    "w-7",
                    "items-center",
                    "justify-center",
                    "rounded-full",
                    "bg-transparent",
                    "text-lg",
                    "hover:bg-black/10",
                    "dark:hover:bg-white/15"
                )}
                aria-label="Dismiss notification"
                onclick={close_button}
            >
                {"×"}
            </button>
        </div>
    }
}

#[function_component(ToastStack)]
pub fn toast_stack() -> Html {
    let ctx = use_context::<NotificationContext>();
    let Some(ctx) = ctx else {
        return Html::default();
    };
    if ctx.toasts.is_empty() {
        return Html::default();
    }

    let on_close = {
        let ctx = ctx.clone();
        Callback::from(move |id: u64| ctx.dispatch(NotificationAction::Dismiss(id)))
    };

    html! {
        <div class={classes!("fixed", "bottom-4", "right-4", "z-50", "flex", "flex-col", "gap-2", "items-end")}>
            { for ctx.toasts.iter().map(|toast| html! {
                <ToastItem key={toast.id} toast={toast.clone()} on_close={on_close.clone()} />
            }) }
        </div>
    }
}
