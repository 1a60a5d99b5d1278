//! アップロードエリアコンポーネント
//!
//! クリックでのファイル選択とドラッグ&ドロップの両方を受け付ける。
//! 読み込むのは先頭の1ファイルだけ。

use js_sys::Uint8Array;
use leptos::prelude::*;
use leptos::task::spawn_local;
use lungvision_common::{FileSelection, RawFile};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{DragEvent, File, HtmlInputElement};

#[component]
pub fn UploadArea<F>(prompt: Signal<String>, on_selected: F) -> impl IntoView
where
    F: Fn(FileSelection) + 'static + Clone + Send + Sync,
{
    let (is_dragover, set_is_dragover) = signal(false);

    let on_drop = {
        let on_selected = on_selected.clone();
        move |ev: DragEvent| {
            ev.prevent_default();
            set_is_dragover.set(false);

            let file = ev
                .data_transfer()
                .and_then(|dt| dt.files())
                .and_then(|files| files.get(0));
            read_selection(file, FileSelection::dropped, on_selected.clone());
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(true);
    };

    let on_dragleave = move |_: DragEvent| {
        set_is_dragover.set(false);
    };

    let on_change = {
        let on_selected = on_selected.clone();
        move |ev: web_sys::Event| {
            let Some(input) = ev
                .target()
                .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
            else {
                return;
            };
            let file = input.files().and_then(|files| files.get(0));
            // 同じファイルを選び直しても change が発火するように
            input.set_value("");
            read_selection(file, FileSelection::picked, on_selected.clone());
        }
    };

    view! {
        <div
            class="upload-area"
            class:dragover=move || is_dragover.get()
            on:drop=on_drop
            on:dragover=on_dragover
            on:dragleave=on_dragleave
        >
            <label for="file-upload" class="upload-label">
                <div class="upload-icon">"🩻"</div>
                <p>{move || prompt.get()}</p>
                <p class="text-muted">"対応形式: PNG, JPEG, GIF, BMP, TIFF, WebP"</p>
            </label>
            <input
                id="file-upload"
                type="file"
                accept="image/*"
                style="display: none"
                on:change=on_change
            />
        </div>
    }
}

/// ファイルを読み込んでからコールバックへ渡す
///
/// ファイルが無い・読めない場合も空の選択として渡し、判定は `Session` に任せる。
fn read_selection<F>(file: Option<File>, build: fn(Vec<RawFile>) -> FileSelection, on_selected: F)
where
    F: Fn(FileSelection) + 'static,
{
    spawn_local(async move {
        let files = match file {
            Some(file) => match read_file(&file).await {
                Ok(raw) => vec![raw],
                Err(e) => {
                    gloo::console::error!(format!("ファイル読み込みエラー: {:?}", e));
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
        on_selected(build(files));
    });
}

async fn read_file(file: &File) -> Result<RawFile, JsValue> {
    let buffer = JsFuture::from(file.array_buffer()).await?;
    let bytes = Uint8Array::new(&buffer).to_vec();

    let raw = RawFile::new(file.name(), bytes);
    let declared = file.type_();
    if declared.is_empty() {
        Ok(raw)
    } else {
        Ok(raw.with_declared_type(declared))
    }
}
