//! メインアプリケーションコンポーネント

use crate::api::{self, DEFAULT_ENDPOINT, DEFAULT_FIELD_NAME};
use crate::components::{
    header::Header,
    history_panel::HistoryPanel,
    image_preview::ImagePreview,
    loader::Loader,
    result_card::{ErrorAlert, ResultCard},
    settings_panel::SettingsPanel,
    submit_button::SubmitButton,
    upload_area::UploadArea,
};
use crate::previews::PreviewUrls;
use leptos::prelude::*;
use leptos::task::spawn_local;
use lungvision_common::{Error, FileSelection, Session, ViewState};

#[component]
pub fn App() -> impl IntoView {
    // セッション（選択中の画像・送信状態・履歴）
    let session = RwSignal::new(Session::default());
    let previews = RwSignal::new(PreviewUrls::default());

    let (endpoint, set_endpoint) = signal(DEFAULT_ENDPOINT.to_string());
    let (field_name, set_field_name) = signal(DEFAULT_FIELD_NAME.to_string());
    // 選択を受け付けなかった理由
    let (notice, set_notice) = signal(None::<String>);

    let view_state = Memo::new(move |_| session.with(ViewState::derive));

    let sync_previews = move || {
        session.with_untracked(|s| previews.update(|p| p.sync(s)));
    };

    // 画像選択ハンドラ
    let on_selected = move |selection: FileSelection| {
        match session.try_update(|s| s.select_image(selection).cloned()) {
            Some(Ok(image)) => {
                gloo::console::log!(format!("画像を選択: {} ({})", image.name(), image.id()));
                set_notice.set(None);
            }
            Some(Err(e)) => set_notice.set(Some(e.to_string())),
            None => {}
        }
        sync_previews();
    };

    // 送信ハンドラ
    let on_submit = move |_: ()| {
        match session.try_update(|s| s.begin_submission()) {
            Some(Ok(pending)) => {
                set_notice.set(None);
                let endpoint = endpoint.get_untracked();
                let field_name = field_name.get_untracked();
                spawn_local(async move {
                    let outcome = api::classify(&endpoint, &field_name, pending.image()).await;
                    let settlement = session.try_update(move |s| s.complete_submission(pending, outcome));

                    if let Some(settlement) = settlement {
                        if let Some(error) = &settlement.error {
                            gloo::console::error!(format!("分類エラー: {}", error));
                        } else if settlement.superseded {
                            gloo::console::log!("別の画像が選ばれたため結果は履歴のみに反映");
                        }
                    }
                    sync_previews();
                });
            }
            Some(Err(Error::NoImageSelected)) => {
                gloo::dialogs::alert(&Error::NoImageSelected.to_string());
            }
            Some(Err(e)) => {
                gloo::console::warn!(format!("送信できません: {}", e));
                set_notice.set(Some(e.to_string()));
            }
            None => {}
        }
    };

    view! {
        <div class="container">
            <Header />

            <SettingsPanel
                endpoint=endpoint
                set_endpoint=set_endpoint
                field_name=field_name
                set_field_name=set_field_name
            />

            <UploadArea
                prompt=Signal::derive(move || view_state.with(|v| v.prompt.clone()))
                on_selected=on_selected
            />

            <Show when=move || notice.with(Option::is_some)>
                <p class="selection-notice">{move || notice.get().unwrap_or_default()}</p>
            </Show>

            <ImagePreview
                preview=Signal::derive(move || view_state.with(|v| v.preview.clone()))
                urls=previews
            />

            <SubmitButton
                control=Signal::derive(move || view_state.with(|v| v.submit.clone()))
                on_submit=on_submit
            />

            <Show when=move || view_state.with(|v| v.busy)>
                <Loader />
            </Show>

            <ResultCard banner=Signal::derive(move || view_state.with(|v| v.banner.clone())) />
            <ErrorAlert notice=Signal::derive(move || view_state.with(|v| v.error.clone())) />

            <HistoryPanel
                items=Signal::derive(move || view_state.with(|v| v.history.clone()))
                urls=previews
            />
        </div>
    }
}
