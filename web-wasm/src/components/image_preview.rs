//! 選択中画像のプレビュー

use crate::previews::PreviewUrls;
use leptos::prelude::*;
use lungvision_common::Preview;

#[component]
pub fn ImagePreview(preview: Signal<Option<Preview>>, urls: RwSignal<PreviewUrls>) -> impl IntoView {
    move || {
        preview.get().map(|preview| {
            let id = preview.image_id;
            view! {
                <figure class="image-preview">
                    <img
                        src=move || urls.with(|u| u.url(id)).unwrap_or_default()
                        alt=preview.name.clone()
                    />
                    <figcaption class="text-muted">
                        {format!("{} ({}, {} bytes)", preview.name, preview.content_type, preview.size)}
                    </figcaption>
                </figure>
            }
        })
    }
}
