//! 設定パネルコンポーネント

use leptos::prelude::*;

#[component]
pub fn SettingsPanel(
    endpoint: ReadSignal<String>,
    set_endpoint: WriteSignal<String>,
    field_name: ReadSignal<String>,
    set_field_name: WriteSignal<String>,
) -> impl IntoView {
    view! {
        <div class="settings-panel">
            <div class="settings-grid">
                <div class="form-group">
                    <label for="endpoint">"分類サーバー"</label>
                    <input
                        type="url"
                        id="endpoint"
                        prop:value=move || endpoint.get()
                        on:input=move |ev| {
                            set_endpoint.set(event_target_value(&ev));
                        }
                    />
                </div>

                <div class="form-group">
                    <label for="field-name">"フィールド名"</label>
                    <input
                        type="text"
                        id="field-name"
                        prop:value=move || field_name.get()
                        on:input=move |ev| {
                            set_field_name.set(event_target_value(&ev));
                        }
                    />
                </div>
            </div>
        </div>
    }
}
