//! エラー型定義
//!
//! 1回の送信試行を終わらせるエラーはすべてここに集約する。
//! どのエラーもセッションを壊さず、ユーザーはすぐに画像の再選択・再送信ができる。

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// 選択イベントにファイルが無い、または画像として受け付けられない
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// 画像未選択のまま送信しようとした
    #[error("Please select an image first.")]
    NoImageSelected,

    /// 送信中にさらに送信しようとした
    #[error("A classification is already in progress.")]
    SubmissionInFlight,

    /// 分類サーバーに届かなかった、または2xx以外が返った
    #[error("Network failure: {0}")]
    NetworkFailure(String),

    /// 応答は返ったが分類ラベルが読み取れない
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl Error {
    /// 送信を試みた結果として Failed 状態に落ちるエラーか
    ///
    /// `NoImageSelected` と `SubmissionInFlight` は送信前に弾かれるので状態を変えない。
    pub fn is_submission_failure(&self) -> bool {
        matches!(self, Error::NetworkFailure(_) | Error::MalformedResponse(_))
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
