//! 分類結果とエラーの表示

use super::tone_style;
use leptos::prelude::*;
use lungvision_common::{ErrorNotice, ResultBanner};

/// 分類結果バナー（正常/異常で配色が変わる）
#[component]
pub fn ResultCard(banner: Signal<Option<ResultBanner>>) -> impl IntoView {
    move || {
        banner.get().map(|banner| {
            view! {
                <div
                    class=format!("result-card {}", banner.verdict.as_str())
                    style=tone_style(banner.tone)
                >
                    <h2>{banner.headline}</h2>
                    <p class="result-label">"分類: " <strong>{banner.label}</strong></p>
                </div>
            }
        })
    }
}

/// 送信失敗の通知（結果バナーとは別枠）
#[component]
pub fn ErrorAlert(notice: Signal<Option<ErrorNotice>>) -> impl IntoView {
    move || {
        notice.get().map(|notice| {
            view! {
                <div class="error-alert" role="alert">
                    <p class="error-title">{notice.title}</p>
                    <p class="error-detail text-muted">{notice.detail}</p>
                </div>
            }
        })
    }
}
