//! 分類履歴パネル

use super::tone_style;
use crate::previews::PreviewUrls;
use leptos::prelude::*;
use lungvision_common::HistoryItem;

#[component]
pub fn HistoryPanel(items: Signal<Vec<HistoryItem>>, urls: RwSignal<PreviewUrls>) -> impl IntoView {
    view! {
        <section class="history-panel">
            <h2>"分類履歴"</h2>
            <Show
                when=move || !items.with(Vec::is_empty)
                fallback=|| view! { <p class="text-muted">"まだ分類した画像はありません"</p> }
            >
                <ul class="history-list">
                    <For
                        each=move || items.get()
                        key=|item| item.sequence
                        children=move |item| view! { <HistoryRow item=item urls=urls /> }
                    />
                </ul>
            </Show>
        </section>
    }
}

#[component]
fn HistoryRow(item: HistoryItem, urls: RwSignal<PreviewUrls>) -> impl IntoView {
    let id = item.image_id;
    view! {
        <li class="history-item" style=tone_style(item.tone)>
            <img
                class="history-thumb"
                src=move || urls.with(|u| u.url(id)).unwrap_or_default()
                alt=item.name.clone()
            />
            <div class="history-meta">
                <span class="history-seq">{format!("#{}", item.sequence)}</span>
                <span class="history-name">{item.name}</span>
                <strong class="history-label">{item.label}</strong>
            </div>
        </li>
    }
}
