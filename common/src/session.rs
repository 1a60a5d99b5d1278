//! セッション状態と遷移
//!
//! 画像選択・送信状態・履歴の3つを1か所で持ち、状態遷移はすべてここのメソッドを通す。
//! 新しい画像を選ぶと必ず送信状態が Idle に戻る（古い結果を新しい画像に出さない）。
//!
//! 非同期の送信処理そのものはフロントエンド側に置き、ここでは
//! `begin_submission` と `complete_submission` の同期部分だけを扱う。

use crate::classification::Classification;
use crate::error::{Error, Result};
use crate::history::{HistoryLedger, HistoryRecord};
use crate::image::{FileSelection, Image, ImageSource};
use std::sync::Arc;

/// 現在の画像に対する送信状態
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    InFlight,
    Succeeded(Classification),
    Failed(Error),
}

impl SubmissionState {
    pub fn classification(&self) -> Option<&Classification> {
        match self {
            SubmissionState::Succeeded(c) => Some(c),
            _ => None,
        }
    }
}

/// 送信中の1件
///
/// `begin_submission` だけが作る。`complete_submission` に渡すと消費される。
#[derive(Debug)]
pub struct PendingSubmission {
    ticket: u64,
    image: Image,
}

impl PendingSubmission {
    /// 送信する画像（送信開始時点のスナップショット）
    pub fn image(&self) -> &Image {
        &self.image
    }

    pub fn ticket(&self) -> u64 {
        self.ticket
    }
}

/// 送信完了の結果
#[derive(Debug, Clone)]
pub struct Settlement {
    /// 成功時に履歴へ追加された記録
    pub record: Option<Arc<HistoryRecord>>,
    /// 失敗時のエラー
    pub error: Option<Error>,
    /// 送信中に別の画像が選ばれていて、表示中の状態には反映しなかった
    pub superseded: bool,
}

impl Settlement {
    pub fn is_success(&self) -> bool {
        self.record.is_some()
    }
}

/// 1セッション分の状態
///
/// clone は履歴も含めて独立したセッションになる。元のセッションとは何も共有しない。
#[derive(Debug, Default)]
pub struct Session {
    source: ImageSource,
    current: Option<Image>,
    state: SubmissionState,
    history: HistoryLedger,
    in_flight: Option<u64>,
    next_ticket: u64,
}

impl Clone for Session {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            current: self.current.clone(),
            state: self.state.clone(),
            history: self.history.fork(),
            in_flight: self.in_flight,
            next_ticket: self.next_ticket,
        }
    }
}

impl Session {
    pub fn new(source: ImageSource) -> Self {
        Self {
            source,
            ..Self::default()
        }
    }

    pub fn current_image(&self) -> Option<&Image> {
        self.current.as_ref()
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn history(&self) -> &HistoryLedger {
        &self.history
    }

    /// 未完了の送信があるか（表示中の状態とは独立）
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// 画像を選択する
    ///
    /// 成功すると前の画像を置き換え、送信状態を Idle に戻す。
    /// 失敗（`InvalidInput`）した場合は何も変えない。
    pub fn select_image(&mut self, selection: FileSelection) -> Result<&Image> {
        let image = self.source.select(selection)?;
        self.state = SubmissionState::Idle;
        let image: &Image = self.current.insert(image);
        Ok(image)
    }

    /// 送信を開始する
    ///
    /// 画像未選択なら `NoImageSelected`、送信中なら `SubmissionInFlight`。
    /// どちらの場合も状態は変えない。
    pub fn begin_submission(&mut self) -> Result<PendingSubmission> {
        let image = self.current.clone().ok_or(Error::NoImageSelected)?;
        if self.in_flight.is_some() {
            return Err(Error::SubmissionInFlight);
        }

        self.next_ticket += 1;
        let ticket = self.next_ticket;
        self.in_flight = Some(ticket);
        self.state = SubmissionState::InFlight;

        Ok(PendingSubmission { ticket, image })
    }

    /// 送信結果を反映する
    ///
    /// 成功なら送信した画像で履歴に追記する。送信中に別の画像が選ばれていた場合、
    /// 履歴には追記するが表示中の状態（新しい画像の Idle）は変えない。
    pub fn complete_submission(
        &mut self,
        pending: PendingSubmission,
        outcome: Result<Classification>,
    ) -> Settlement {
        if self.in_flight != Some(pending.ticket) {
            // 他のセッションで発行されたチケット
            return Settlement {
                record: None,
                error: outcome.err(),
                superseded: true,
            };
        }
        self.in_flight = None;

        let superseded = self.current.as_ref().map(Image::id) != Some(pending.image.id())
            || self.state != SubmissionState::InFlight;

        match outcome {
            Ok(classification) => {
                let record = self.history.append(pending.image, classification.clone());
                if !superseded {
                    self.state = SubmissionState::Succeeded(classification);
                }
                Settlement {
                    record: Some(record),
                    error: None,
                    superseded,
                }
            }
            Err(error) => {
                if !superseded {
                    self.state = SubmissionState::Failed(error.clone());
                }
                Settlement {
                    record: None,
                    error: Some(error),
                    superseded,
                }
            }
        }
    }
}
