use chrono::{DateTime, Utc};
use web_sys::{window, HtmlSelectElement};
use yew::{Event, TargetCast};

/// Current wall-clock time from the browser.
pub fn now_utc() -> DateTime<Utc> {
    DateTime::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_default()
}

/// Native confirmation dialog. Treated as declined when no window is available.
pub fn confirm(message: &str) -> bool {
    window()
        .and_then(|win| win.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// Native text prompt. `None` when dismissed.
pub fn prompt(message: &str) -> Option<String> {
    window().and_then(|win| win.prompt_with_message(message).ok().flatten())
}

/// Value of the `<select>` that fired `event`.
pub fn select_value(event: &Event) -> Option<String> {
    event
        .target_dyn_into::<HtmlSelectElement>()
        .map(|select| select.value())
}
