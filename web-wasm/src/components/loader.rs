//! 送信中のローディング表示

use leptos::prelude::*;
use lungvision_common::view::BUSY_LABEL;

#[component]
pub fn Loader() -> impl IntoView {
    view! {
        <div class="loader-container" aria-busy="true">
            <div class="loader" />
            <p class="loader-text">{BUSY_LABEL}</p>
        </div>
    }
}
