//! 分類サーバー呼び出し（multipart/form-data）
//!
//! 画像1枚を指定フィールドに載せてPOSTし、`{"classification": ...}` を受け取る。

use js_sys::{Array, Uint8Array};
use lungvision_common::{parse_classify_response, Classification, Error, Image, Result};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, FormData, Request, RequestInit, RequestMode, Response};

/// 既定の分類サーバー
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/predict";

/// 画像を載せるフォームフィールド名
pub const DEFAULT_FIELD_NAME: &str = "file";

/// JsValueのエラーを文字列に
fn js_message(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}

/// 画像バイト列からBlobを作る
pub(crate) fn image_blob(image: &Image) -> std::result::Result<Blob, JsValue> {
    let parts = Array::new();
    parts.push(&Uint8Array::from(image.bytes()));
    let options = BlobPropertyBag::new();
    options.set_type(image.content_type());
    Blob::new_with_u8_array_sequence_and_options(&parts, &options)
}

/// fetch呼び出し
async fn post_form(endpoint: &str, form: &FormData) -> std::result::Result<Response, JsValue> {
    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(form);

    // Content-Type はブラウザがboundary付きで設定する
    let request = Request::new_with_str_and_init(endpoint, &opts)?;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window がありません"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
    resp_value.dyn_into()
}

/// 画像を分類サーバーへ送信
pub async fn classify(endpoint: &str, field_name: &str, image: &Image) -> Result<Classification> {
    let form = FormData::new().map_err(|e| Error::NetworkFailure(js_message(&e)))?;
    let blob = image_blob(image).map_err(|e| Error::NetworkFailure(js_message(&e)))?;
    form.append_with_blob_and_filename(field_name, &blob, image.name())
        .map_err(|e| Error::NetworkFailure(js_message(&e)))?;

    let resp = post_form(endpoint, &form)
        .await
        .map_err(|e| Error::NetworkFailure(js_message(&e)))?;

    if !resp.ok() {
        return response_outcome(resp.status(), &resp.status_text(), None);
    }

    let text_promise = resp
        .text()
        .map_err(|e| Error::MalformedResponse(js_message(&e)))?;
    let text = JsFuture::from(text_promise)
        .await
        .map_err(|e| Error::NetworkFailure(js_message(&e)))?;
    response_outcome(resp.status(), &resp.status_text(), text.as_string().as_deref())
}

/// ステータスと本文から結果を決める
///
/// 2xx以外は本文を見ずに `NetworkFailure`。2xxで本文が読めなければ `MalformedResponse`。
fn response_outcome(status: u16, status_text: &str, body: Option<&str>) -> Result<Classification> {
    if !(200..300).contains(&status) {
        return Err(Error::NetworkFailure(
            format!("HTTP {} {}", status, status_text).trim_end().to_string(),
        ));
    }
    let body = body.ok_or_else(|| Error::MalformedResponse("本文が文字列ではありません".to_string()))?;
    parse_classify_response(body)
}


#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use lungvision_common::{FileSelection, ImageSource, RawFile};
    use wasm_bindgen_test::*;

    fn png_image() -> Image {
        let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        bytes.extend_from_slice(&[0u8; 16]);
        ImageSource::default()
            .select(FileSelection::picked(vec![RawFile::new("xray1.png", bytes)]))
            .unwrap()
    }

    #[wasm_bindgen_test]
    fn test_image_blob_keeps_type_and_size() {
        let image = png_image();
        let blob = image_blob(&image).unwrap();
        assert_eq!(blob.type_(), "image/png");
        assert_eq!(blob.size() as usize, image.len());
    }

    #[wasm_bindgen_test]
    async fn test_unreachable_server_is_network_failure() {
        let image = png_image();
        let err = classify("http://127.0.0.1:9/predict", DEFAULT_FIELD_NAME, &image)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NetworkFailure(_)));
    }
}
