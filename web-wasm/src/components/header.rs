//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1>"🫁 LungVision AI"</h1>
            <p class="text-muted">"胸部X線画像をアップロードして肺炎の有無を判定します"</p>
        </header>
    }
}
