//! 分類サーバー呼び出し
//!
//! 送信処理は `Classifier` トレイト越しに呼ぶ。本番は `HttpClassifier`、
//! テストではスクリプト化した実装に差し替える。

mod http;

pub use http::HttpClassifier;

use async_trait::async_trait;
use lungvision_common::{Classification, Image};

#[async_trait]
pub trait Classifier: Send + Sync {
    /// 画像1枚を分類する
    ///
    /// 失敗は `NetworkFailure`（通信失敗・2xx以外）か
    /// `MalformedResponse`（ラベルが読めない）で返す。
    async fn classify(&self, image: &Image) -> lungvision_common::Result<Classification>;
}
