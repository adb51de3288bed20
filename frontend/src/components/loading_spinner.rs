use yew::prelude::*;

#[derive(Clone, PartialEq)]
pub enum SpinnerSize {
    /// Fits inside a button label.
    Inline,
    Medium,
}

impl SpinnerSize {
    fn dimension(&self) -> u32 {
        match self {
            SpinnerSize::Inline => 14,
            SpinnerSize::Medium => 40,
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct LoadingSpinnerProps {
    #[prop_or(SpinnerSize::Medium)]
    pub size: SpinnerSize,
}

#[function_component(LoadingSpinner)]
pub fn loading_spinner(props: &LoadingSpinnerProps) -> Html {
    let spinner_style = format!("--spinner-size:{}px;", props.size.dimension());
    let border = if props.size == SpinnerSize::Inline { "border-2" } else { "border-[3px]" };

    let ring = html! {
        <span
            style={spinner_style}
            class={classes!(
                "inline-block",
                "w-[var(--spinner-size)]",
                "h-[var(--spinner-size)]",
                "rounded-full",
                border,
                "border-current",
                "border-r-transparent",
                "animate-[spin_0.9s_linear_infinite]"
            )}
            aria-hidden="true"
        />
    };

    if props.size == SpinnerSize::Inline {
        return ring;
    }

    html! {
        <div
            class={classes!("flex", "items-center", "justify-center", "p-6", "text-[var(--primary)]")}
            role="status"
            aria-live="polite"
            aria-busy="true"
        >
            { ring }
            <span class={classes!("sr-only")}>{ "Loading..." }</span>
        </div>
    }
}
