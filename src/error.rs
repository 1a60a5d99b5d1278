use thiserror::Error;

#[derive(Error, Debug)]
pub enum LungVisionError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("エンドポイントURLが不正です: {0}。`lungvision config --set-endpoint URL` で設定してください")]
    InvalidEndpoint(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("画像読み込みエラー: {0}")]
    ImageLoad(String),

    #[error("HTTPクライアントエラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("対話入力エラー: {0}")]
    Dialog(#[from] dialoguer::Error),

    #[error(transparent)]
    Session(#[from] lungvision_common::Error),
}

pub type Result<T> = std::result::Result<T, LungVisionError>;
