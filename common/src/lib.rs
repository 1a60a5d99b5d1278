//! LungVision Common Library
//!
//! CLIとWeb(WASM)で共有するセッションのコア:
//! 画像選択 → 送信状態 → 履歴 → 表示状態の導出

pub mod classification;
pub mod error;
pub mod history;
pub mod image;
pub mod parser;
pub mod session;
pub mod view;

pub use classification::{Classification, Tone, Verdict, NORMAL_LABEL};
pub use error::{Error, Result};
pub use history::{HistoryLedger, HistoryRecord};
pub use image::{
    sniff_content_type, FileSelection, Image, ImageId, ImageSource, RawFile, SelectionOrigin,
    DEFAULT_MAX_UPLOAD_BYTES,
};
pub use parser::parse_classify_response;
pub use session::{PendingSubmission, Session, Settlement, SubmissionState};
pub use view::{ErrorNotice, HistoryItem, Preview, ResultBanner, SubmitControl, ViewState};
