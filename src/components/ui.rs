//! Small presentational pieces shared by the components. Messages must be safe
//! to render; Leptos escapes them.

use leptos::prelude::*;

/// Placeholder text shown while the listing waits for its first response.
pub const LOADING_TEXT: &str = "Fetching data ...";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Supported alert styles.
pub enum AlertKind {
    Error,
    Success,
}

/// Renders an alert banner.
#[component]
pub fn Alert(kind: AlertKind, message: String) -> impl IntoView {
    let class = match kind {
        AlertKind::Error => "alert red",
        AlertKind::Success => "alert green",
    };

    view! { <span class=class role="alert">{message}</span> }
}

#[component]
pub fn Spinner() -> impl IntoView {
    view! {
        <i class="loading" role="status" aria-live="polite">{LOADING_TEXT}</i>
    }
}
