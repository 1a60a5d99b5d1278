//! 分類ラベル
//!
//! ラベルの集合は分類サーバー側が決める。クライアントは不透明な文字列として扱い、
//! `"NORMAL"` かそれ以外かの2値でだけ見た目を変える。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 正常を表すラベル（完全一致）
pub const NORMAL_LABEL: &str = "NORMAL";

/// 分類サーバーが返したラベル
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Classification(String);

impl Classification {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn label(&self) -> &str {
        &self.0
    }

    pub fn verdict(&self) -> Verdict {
        if self.0 == NORMAL_LABEL {
            Verdict::Normal
        } else {
            Verdict::Abnormal
        }
    }

    pub fn is_normal(&self) -> bool {
        self.verdict() == Verdict::Normal
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 2値の判定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Verdict {
    Normal,
    Abnormal,
}

impl Verdict {
    /// 結果バナーの文言
    pub fn headline(&self) -> &'static str {
        match self {
            Verdict::Normal => "No Pneumonia Detected 👍",
            Verdict::Abnormal => "Pneumonia Detected 🤒",
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            Verdict::Normal => Tone::NORMAL,
            Verdict::Abnormal => Tone::ABNORMAL,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Normal => "normal",
            Verdict::Abnormal => "abnormal",
        }
    }
}

/// 判定ごとの配色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tone {
    pub background: &'static str,
    pub text: &'static str,
    pub border: &'static str,
}

impl Tone {
    pub const NORMAL: Tone = Tone {
        background: "#d4edda",
        text: "#155724",
        border: "#28a745",
    };

    pub const ABNORMAL: Tone = Tone {
        background: "#f8d7da",
        text: "#721c24",
        border: "#dc3545",
    };
}
