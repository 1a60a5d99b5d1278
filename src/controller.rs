//! 送信コントローラ
//!
//! セッションのロックは分類サーバーの応答待ちの間は持たない。
//! 応答待ちの間も画像の選択や履歴の参照はそのまま動く。

use crate::classifier::Classifier;
use lungvision_common::{
    Classification, Error, FileSelection, HistoryLedger, Image, Result, Session, SubmissionState,
    ViewState,
};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, warn};

pub struct SubmissionController<C> {
    session: Arc<Mutex<Session>>,
    classifier: Arc<C>,
}

impl<C> Clone for SubmissionController<C> {
    fn clone(&self) -> Self {
        Self {
            session: Arc::clone(&self.session),
            classifier: Arc::clone(&self.classifier),
        }
    }
}

impl<C: Classifier> SubmissionController<C> {
    pub fn new(session: Session, classifier: C) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            classifier: Arc::new(classifier),
        }
    }

    /// 画像を選択（送信状態は Idle に戻る）
    pub fn select(&self, selection: FileSelection) -> Result<Image> {
        let origin = selection.origin;
        let extra = selection.files.len().saturating_sub(1);
        let result = self.lock().select_image(selection).cloned();

        match &result {
            Ok(image) => {
                info!(image = %image.name(), id = %image.id(), ?origin, "画像を選択");
                if extra > 0 {
                    debug!(ignored = extra, "先頭以外のファイルは無視します");
                }
            }
            Err(e) => warn!(?origin, "画像を選択できません: {}", e),
        }
        result
    }

    /// 選択中の画像を分類サーバーへ送る
    ///
    /// 画像未選択・送信中の場合は通信せずに即エラー。
    /// 通信は1回だけ行い、失敗しても再試行しない。
    pub async fn submit(&self) -> Result<Classification> {
        let pending = self.lock().begin_submission().inspect_err(|e| {
            warn!("送信できません: {}", e);
        })?;

        info!(image = %pending.image().name(), ticket = pending.ticket(), "分類リクエスト送信");
        let outcome = self.classifier.classify(pending.image()).await;

        let settlement = self.lock().complete_submission(pending, outcome.clone());
        match (&outcome, &settlement.record) {
            (Ok(classification), Some(record)) => info!(
                label = %classification,
                history = record.sequence,
                superseded = settlement.superseded,
                "分類完了"
            ),
            (Err(e), _) => warn!(superseded = settlement.superseded, "分類失敗: {}", e),
            (Ok(_), None) => debug!("別セッションの送信結果を破棄"),
        }

        outcome
    }

    pub fn view(&self) -> ViewState {
        ViewState::derive(&self.lock())
    }

    pub fn state(&self) -> SubmissionState {
        self.lock().state().clone()
    }

    pub fn current_image(&self) -> Option<Image> {
        self.lock().current_image().cloned()
    }

    /// 履歴ハンドル（ロック無しで読める）
    pub fn history(&self) -> HistoryLedger {
        self.lock().history().clone()
    }

    pub fn is_in_flight(&self) -> bool {
        self.lock().is_in_flight()
    }

    fn lock(&self) -> MutexGuard<'_, Session> {
        // 遷移メソッドは途中でpanicしないので毒化しても中身は整合している
        self.session.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// 送信前に弾かれたエラーか（ユーザーへの促しだけで済む）
pub fn is_local_rejection(error: &Error) -> bool {
    matches!(error, Error::NoImageSelected | Error::SubmissionInFlight)
}
