//! LungVision CLI
//!
//! 画像を1枚選んで分類サーバーへ送り、結果とセッション内の履歴を表示する。

pub mod classifier;
pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod interactive;
pub mod loader;
pub mod render;

pub use classifier::{Classifier, HttpClassifier};
pub use controller::SubmissionController;
