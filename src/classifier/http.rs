use super::Classifier;
use crate::config::{validate_endpoint, Config};
use crate::error::Result;
use async_trait::async_trait;
use lungvision_common::{parse_classify_response, Classification, Error, Image};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Url};
use std::time::Duration;
use tracing::{debug, warn};

/// エラーメッセージに載せるレスポンス本文の最大文字数
const BODY_SNIPPET_CHARS: usize = 200;

/// multipart/form-data で画像を1枚POSTする分類クライアント
#[derive(Debug, Clone)]
pub struct HttpClassifier {
    client: Client,
    endpoint: Url,
    field_name: String,
}

impl HttpClassifier {
    pub fn new(endpoint: &str, field_name: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let endpoint = validate_endpoint(endpoint)?;
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            endpoint,
            field_name: field_name.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.endpoint, config.field_name.clone(), config.timeout())
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    fn build_form(&self, image: &Image) -> lungvision_common::Result<Form> {
        let part = Part::bytes(image.bytes().to_vec())
            .file_name(image.name().to_string())
            .mime_str(image.content_type())
            .map_err(|e| Error::NetworkFailure(format!("リクエスト作成失敗: {}", e)))?;
        Ok(Form::new().part(self.field_name.clone(), part))
    }
}

#[async_trait]
impl Classifier for HttpClassifier {
    async fn classify(&self, image: &Image) -> lungvision_common::Result<Classification> {
        let form = self.build_form(image)?;

        debug!(
            endpoint = %self.endpoint,
            field = %self.field_name,
            bytes = image.len(),
            "POST multipart"
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            warn!(%status, "分類サーバーがエラーを返しました");
            return Err(Error::NetworkFailure(format!(
                "HTTP {}: {}",
                status,
                snippet(&body)
            )));
        }

        parse_classify_response(&body)
    }
}

fn transport_error(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::NetworkFailure(format!("タイムアウト: {}", err))
    } else if err.is_connect() {
        Error::NetworkFailure(format!("接続できません: {}", err))
    } else {
        Error::NetworkFailure(err.to_string())
    }
}

fn snippet(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() > BODY_SNIPPET_CHARS {
        let cut: String = trimmed.chars().take(BODY_SNIPPET_CHARS).collect();
        format!("{}…", cut)
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_bad_endpoint() {
        assert!(HttpClassifier::new("localhost:5000", "file", None).is_err());
        assert!(HttpClassifier::new("", "file", None).is_err());
    }

    #[test]
    fn test_from_config() {
        let config = Config::default();
        let classifier = HttpClassifier::from_config(&config).unwrap();
        assert_eq!(classifier.endpoint().as_str(), "http://127.0.0.1:5000/predict");
        assert_eq!(classifier.field_name(), "file");
    }

    #[test]
    fn test_snippet_truncates() {
        let long = "x".repeat(500);
        let s = snippet(&long);
        assert_eq!(s.chars().count(), BODY_SNIPPET_CHARS + 1);
        assert!(s.ends_with('…'));
        assert_eq!(snippet("  short \n"), "short");
    }
}
