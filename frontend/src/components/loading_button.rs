use yew::prelude::*;

use crate::components::loading_spinner::{LoadingSpinner, SpinnerSize};

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ButtonVariant {
    Primary,
    Secondary,
    Danger,
}

#[derive(Properties, PartialEq)]
pub struct LoadingButtonProps {
    pub label: AttrValue,
    pub onclick: Callback<MouseEvent>,
    /// Request in flight: spinner shown, clicks ignored.
    #[prop_or_default]
    pub loading: bool,
    #[prop_or_default]
    pub disabled: bool,
    #[prop_or(ButtonVariant::Secondary)]
    pub variant: ButtonVariant,
}

/// Button that disables itself and shows a spinner while its request runs.
#[function_component(LoadingButton)]
pub fn loading_button(props: &LoadingButtonProps) -> Html {
    let variant = match props.variant {
        ButtonVariant::Primary => classes!("btn-fluent-primary"),
        ButtonVariant::Secondary => classes!("btn-fluent-secondary"),
        ButtonVariant::Danger => classes!("btn-fluent-secondary", "!text-red-600", "dark:!text-red-300"),
    };
    let onclick = {
        let onclick = props.onclick.clone();
        let loading = props.loading;
        Callback::from(move |event: MouseEvent| {
            if !loading {
                onclick.emit(event);
            }
        })
    };

    html! {
        <button
            type="button"
            class={classes!(variant, "!px-3", "!py-1.5", "!text-sm", "inline-flex", "items-center", "gap-2")}
            disabled={props.loading || props.disabled}
            aria-busy={props.loading.to_string()}
            {onclick}
        >
            if props.loading {
                <LoadingSpinner size={SpinnerSize::Inline} />
            }
            { props.label.clone() }
        </button>
    }
}
