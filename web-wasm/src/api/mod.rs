//! 分類サーバーとの通信

pub mod classifier;

pub use classifier::{classify, DEFAULT_ENDPOINT, DEFAULT_FIELD_NAME};
