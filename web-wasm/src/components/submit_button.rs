//! 送信ボタン

use leptos::prelude::*;
use lungvision_common::SubmitControl;

#[component]
pub fn SubmitButton<F>(control: Signal<SubmitControl>, on_submit: F) -> impl IntoView
where
    F: Fn(()) + 'static + Clone,
{
    view! {
        <div class="action-buttons">
            <button
                class="btn btn-primary"
                disabled=move || !control.get().enabled
                on:click=move |_| on_submit(())
            >
                {move || control.get().label}
            </button>
        </div>
    }
}
