use crate::error::{LungVisionError, Result};
use lungvision_common::DEFAULT_MAX_UPLOAD_BYTES;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ENDPOINT_ENV: &str = "LUNGVISION_ENDPOINT";
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/predict";
pub const DEFAULT_FIELD_NAME: &str = "file";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 分類サーバーのURL
    pub endpoint: String,
    /// 画像を載せるフォームフィールド名（サーバー側と一致させる）
    pub field_name: String,
    /// リクエストタイムアウト（None = 無制限）
    pub timeout_seconds: Option<u64>,
    /// アップロード上限（0 = 無制限）
    pub max_upload_bytes: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            field_name: DEFAULT_FIELD_NAME.into(),
            timeout_seconds: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl Config {
    /// 既定の場所から読み込む（環境変数は適用しない）
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// 今回の実行で使う設定（環境変数の上書きを適用）
    ///
    /// 保存するのは `load()` で読んだ方。こちらを保存すると環境変数の値がファイルに残る。
    pub fn effective(&self) -> Self {
        self.with_endpoint_override(std::env::var(ENDPOINT_ENV).ok().as_deref())
    }

    pub fn with_endpoint_override(&self, endpoint: Option<&str>) -> Self {
        let mut config = self.clone();
        if let Some(endpoint) = endpoint.map(str::trim).filter(|e| !e.is_empty()) {
            config.endpoint = endpoint.to_string();
        }
        config
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| LungVisionError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("lungvision").join("config.json"))
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }

    pub fn upload_limit(&self) -> Option<u64> {
        (self.max_upload_bytes > 0).then_some(self.max_upload_bytes)
    }

    pub fn set_endpoint(&mut self, endpoint: String) -> Result<()> {
        let endpoint = endpoint.trim().to_string();
        validate_endpoint(&endpoint)?;
        self.endpoint = endpoint;
        Ok(())
    }

    pub fn set_field_name(&mut self, field_name: String) -> Result<()> {
        let field_name = field_name.trim().to_string();
        if field_name.is_empty() {
            return Err(LungVisionError::Config("フィールド名が空です".into()));
        }
        self.field_name = field_name;
        Ok(())
    }
}

/// http/https のURLだけを受け付ける
pub fn validate_endpoint(endpoint: &str) -> Result<reqwest::Url> {
    let url = reqwest::Url::parse(endpoint)
        .map_err(|e| LungVisionError::InvalidEndpoint(format!("{} ({})", endpoint, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(LungVisionError::InvalidEndpoint(format!(
            "{} (未対応のスキーム: {})",
            endpoint, other
        ))),
    }
}
