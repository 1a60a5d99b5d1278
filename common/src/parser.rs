//! 分類サーバーのレスポンスパーサー
//!
//! 成功レスポンスは `{"classification": "<label>"}` 形式。
//! それ以外の形はすべて `MalformedResponse`。

use crate::classification::Classification;
use crate::error::{Error, Result};
use serde::Deserialize;

/// 成功レスポンス（余分なフィールドは無視）
#[derive(Debug, Deserialize)]
struct ClassifyResponse {
    classification: serde_json::Value,
}

/// レスポンス本文からラベルを取り出す
///
/// # Arguments
/// * `body` - レスポンス本文
///
/// # Returns
/// * `Ok(Classification)` - 空でない文字列の `classification` がある
/// * `Err(MalformedResponse)` - JSONでない、フィールドが無い、文字列でない、空
///
/// # Examples
/// ```
/// use lungvision_common::parse_classify_response;
///
/// let c = parse_classify_response(r#"{"classification": "NORMAL"}"#).unwrap();
/// assert_eq!(c.label(), "NORMAL");
/// assert!(parse_classify_response("<html>").is_err());
/// ```
pub fn parse_classify_response(body: &str) -> Result<Classification> {
    let response: ClassifyResponse = serde_json::from_str(body.trim())
        .map_err(|e| Error::MalformedResponse(format!("JSONパースエラー: {}", e)))?;
    classification_from_value(response.classification)
}

fn classification_from_value(value: serde_json::Value) -> Result<Classification> {
    match value {
        serde_json::Value::String(label) if !label.trim().is_empty() => {
            Ok(Classification::new(label))
        }
        serde_json::Value::String(_) => Err(Error::MalformedResponse(
            "classification が空です".into(),
        )),
        other => Err(Error::MalformedResponse(format!(
            "classification が文字列ではありません: {}",
            other
        ))),
    }
}
