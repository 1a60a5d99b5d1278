//! 表示状態の導出（ViewState）
//!
//! `Session` から画面に出すものを純粋に計算する。独自の状態は持たないので、
//! 同じセッションから2回導出すれば同じ結果になる。

use crate::classification::{Tone, Verdict};
use crate::error::Error;
use crate::history::HistoryRecord;
use crate::image::{Image, ImageId};
use crate::session::{Session, SubmissionState};
use serde::Serialize;

pub const CHOOSE_FILE_PROMPT: &str = "Drag an image here or click to choose";
pub const SUBMIT_LABEL: &str = "Upload and Classify";
pub const BUSY_LABEL: &str = "Analyzing...";
pub const FAILURE_TITLE: &str = "Error: Could not fetch the classification.";

/// 画面全体
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    /// ドロップゾーンの文言（選択済みならファイル名）
    pub prompt: String,
    pub submit: SubmitControl,
    /// ローディング表示
    pub busy: bool,
    pub preview: Option<Preview>,
    pub banner: Option<ResultBanner>,
    pub error: Option<ErrorNotice>,
    pub history: Vec<HistoryItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitControl {
    pub label: &'static str,
    pub enabled: bool,
}

/// 選択中画像のプレビュー
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Preview {
    pub image_id: ImageId,
    pub name: String,
    pub content_type: String,
    pub size: usize,
}

impl Preview {
    fn of(image: &Image) -> Self {
        Self {
            image_id: image.id(),
            name: image.name().to_string(),
            content_type: image.content_type().to_string(),
            size: image.len(),
        }
    }
}

/// 分類結果バナー
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultBanner {
    pub verdict: Verdict,
    pub headline: &'static str,
    pub label: String,
    pub tone: Tone,
}

/// 失敗時のエラー表示（バナーとは別のアラートとして描画する）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorNotice {
    pub title: &'static str,
    pub detail: String,
}

impl ErrorNotice {
    pub fn from_error(error: &Error) -> Self {
        Self {
            title: FAILURE_TITLE,
            detail: error.to_string(),
        }
    }
}

/// 履歴パネルの1行
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    pub sequence: usize,
    pub image_id: ImageId,
    pub name: String,
    pub label: String,
    pub verdict: Verdict,
    pub tone: Tone,
}

impl HistoryItem {
    fn of(record: &HistoryRecord) -> Self {
        let verdict = record.classification.verdict();
        Self {
            sequence: record.sequence,
            image_id: record.image.id(),
            name: record.image.name().to_string(),
            label: record.classification.label().to_string(),
            verdict,
            tone: verdict.tone(),
        }
    }
}

impl ViewState {
    pub fn derive(session: &Session) -> Self {
        let image = session.current_image();
        let state = session.state();
        let busy = matches!(state, SubmissionState::InFlight);

        let prompt = image
            .map(|i| i.name().to_string())
            .unwrap_or_else(|| CHOOSE_FILE_PROMPT.to_string());

        // 別の画像を選び直しても、前の送信が終わるまでは押せない
        let in_flight = session.is_in_flight();
        let submit = SubmitControl {
            label: if in_flight { BUSY_LABEL } else { SUBMIT_LABEL },
            enabled: !in_flight,
        };

        // 送信中はプレビューを隠してローディングだけ出す
        let preview = if busy { None } else { image.map(Preview::of) };

        let banner = match state {
            SubmissionState::Succeeded(classification) if image.is_some() => {
                let verdict = classification.verdict();
                Some(ResultBanner {
                    verdict,
                    headline: verdict.headline(),
                    label: classification.label().to_string(),
                    tone: verdict.tone(),
                })
            }
            _ => None,
        };

        let error = match state {
            SubmissionState::Failed(err) => Some(ErrorNotice::from_error(err)),
            _ => None,
        };

        let history = session
            .history()
            .records()
            .iter()
            .map(|r| HistoryItem::of(r))
            .collect();

        Self {
            prompt,
            submit,
            busy,
            preview,
            banner,
            error,
            history,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::Classification;
    use crate::image::{png_bytes, FileSelection, RawFile};

    fn pick(session: &mut Session, name: &str) {
        session
            .select_image(FileSelection::picked(vec![RawFile::new(name, png_bytes())]))
            .unwrap();
    }

    fn classify(session: &mut Session, label: &str) {
        let pending = session.begin_submission().unwrap();
        session.complete_submission(pending, Ok(Classification::new(label)));
    }

    #[test]
    fn test_idle_without_image() {
        let view = ViewState::derive(&Session::default());
        assert_eq!(view.prompt, CHOOSE_FILE_PROMPT);
        assert!(!view.busy);
        assert!(view.submit.enabled);
        assert_eq!(view.submit.label, SUBMIT_LABEL);
        assert!(view.preview.is_none());
        assert!(view.banner.is_none());
        assert!(view.error.is_none());
        assert!(view.history.is_empty());
    }

    #[test]
    fn test_idle_with_image_shows_preview() {
        let mut session = Session::default();
        pick(&mut session, "xray1.png");
        let view = ViewState::derive(&session);
        assert_eq!(view.prompt, "xray1.png");
        let preview = view.preview.unwrap();
        assert_eq!(preview.name, "xray1.png");
        assert_eq!(preview.content_type, "image/png");
        assert!(view.banner.is_none());
    }

    #[test]
    fn test_in_flight() {
        let mut session = Session::default();
        pick(&mut session, "xray1.png");
        let _pending = session.begin_submission().unwrap();

        let view = ViewState::derive(&session);
        assert!(view.busy);
        assert!(!view.submit.enabled);
        assert_eq!(view.submit.label, BUSY_LABEL);
        assert!(view.preview.is_none());
    }

    #[test]
    fn test_reselect_during_flight_keeps_submit_disabled() {
        let mut session = Session::default();
        pick(&mut session, "a.png");
        let pending = session.begin_submission().unwrap();
        pick(&mut session, "b.png");

        let view = ViewState::derive(&session);
        assert!(!view.busy);
        assert_eq!(view.prompt, "b.png");
        assert!(view.preview.is_some());
        assert!(!view.submit.enabled);
        assert_eq!(view.submit.label, BUSY_LABEL);
        assert_eq!(session.begin_submission().unwrap_err(), Error::SubmissionInFlight);

        session.complete_submission(pending, Ok(Classification::new("NORMAL")));
        let view = ViewState::derive(&session);
        assert!(view.submit.enabled);
        assert_eq!(view.submit.label, SUBMIT_LABEL);
        assert!(view.banner.is_none());
        assert_eq!(view.history.len(), 1);
    }

    #[test]
    fn test_normal_and_abnormal_banners_differ() {
        let mut session = Session::default();
        pick(&mut session, "xray1.png");
        classify(&mut session, "NORMAL");
        let normal = ViewState::derive(&session).banner.unwrap();
        assert_eq!(normal.verdict, Verdict::Normal);
        assert_eq!(normal.headline, "No Pneumonia Detected 👍");
        assert_eq!(normal.tone, Tone::NORMAL);

        pick(&mut session, "xray2.png");
        classify(&mut session, "PNEUMONIA");
        let view = ViewState::derive(&session);
        let abnormal = view.banner.unwrap();
        assert_eq!(abnormal.verdict, Verdict::Abnormal);
        assert_eq!(abnormal.headline, "Pneumonia Detected 🤒");
        assert_ne!(normal.tone, abnormal.tone);

        assert_eq!(view.history.len(), 2);
        assert_eq!(view.history[0].tone, Tone::NORMAL);
        assert_eq!(view.history[1].tone, Tone::ABNORMAL);
        assert_eq!(view.history[1].label, "PNEUMONIA");
    }

    #[test]
    fn test_failed_shows_error_not_banner() {
        let mut session = Session::default();
        pick(&mut session, "xray1.png");
        let pending = session.begin_submission().unwrap();
        session.complete_submission(pending, Err(Error::NetworkFailure("refused".into())));

        let view = ViewState::derive(&session);
        assert!(view.banner.is_none());
        assert!(view.preview.is_some());
        let notice = view.error.unwrap();
        assert_eq!(notice.title, FAILURE_TITLE);
        assert!(notice.detail.contains("refused"));
    }

    #[test]
    fn test_new_selection_hides_previous_result() {
        let mut session = Session::default();
        pick(&mut session, "a.png");
        classify(&mut session, "PNEUMONIA");
        pick(&mut session, "b.png");

        let view = ViewState::derive(&session);
        assert!(view.banner.is_none());
        assert!(view.error.is_none());
        assert_eq!(view.prompt, "b.png");
        assert_eq!(view.history.len(), 1);
        assert_eq!(view.history[0].name, "a.png");
    }

    #[test]
    fn test_derive_is_idempotent() {
        let mut session = Session::default();
        pick(&mut session, "a.png");
        classify(&mut session, "NORMAL");
        pick(&mut session, "b.png");
        classify(&mut session, "PNEUMONIA");

        assert_eq!(ViewState::derive(&session), ViewState::derive(&session));
    }

    #[test]
    fn test_serialize_view() {
        let mut session = Session::default();
        pick(&mut session, "a.png");
        classify(&mut session, "NORMAL");

        let json = serde_json::to_value(ViewState::derive(&session)).unwrap();
        assert_eq!(json["banner"]["verdict"], "normal");
        assert_eq!(json["history"][0]["label"], "NORMAL");
        assert_eq!(json["submit"]["enabled"], true);
    }
}
