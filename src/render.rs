//! ターミナル描画
//!
//! `ViewState` をそのまま文字列にする。判定の色分け（正常=緑 / それ以外=赤）は
//! 結果バナーと履歴の両方で同じ規則を使う。

use colored::{ColoredString, Colorize};
use lungvision_common::{HistoryItem, Verdict, ViewState};

/// 画面全体を描画
pub fn render_view(view: &ViewState) -> String {
    let mut lines = Vec::new();

    lines.push("🫁 LungVision AI".to_string());
    lines.push(format!("  [{}]", view.prompt));

    if view.busy {
        lines.push(format!("  ⏳ {}", view.submit.label).dimmed().to_string());
    } else if let Some(preview) = &view.preview {
        lines.push(format!(
            "  🖼  {} ({}, {})",
            preview.name,
            preview.content_type,
            format_size(preview.size)
        ));
    }

    if let Some(banner) = &view.banner {
        lines.push(format!("  {}", tinted(banner.verdict, &format!(" {} ", banner.headline)).bold()));
    }

    if let Some(notice) = &view.error {
        lines.push(format!("  {} {}", "✖".red().bold(), notice.title.red().bold()));
        lines.push(format!("    {}", notice.detail.red()));
    }

    if !view.history.is_empty() {
        lines.push(String::new());
        lines.push(render_history(&view.history));
    }

    lines.join("\n")
}

/// 履歴パネルを描画（追記順）
pub fn render_history(history: &[HistoryItem]) -> String {
    if history.is_empty() {
        return "履歴はまだありません".to_string();
    }

    let mut lines = vec![format!("履歴 ({}件)", history.len())];
    for item in history {
        lines.push(format!(
            "  {:>3}. {}  {}",
            item.sequence,
            item.name,
            tinted(item.verdict, &item.label)
        ));
    }
    lines.join("\n")
}

fn tinted(verdict: Verdict, text: &str) -> ColoredString {
    match verdict {
        Verdict::Normal => text.green(),
        Verdict::Abnormal => text.red(),
    }
}

pub fn format_size(bytes: usize) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    let b = bytes as f64;
    if b >= MB {
        format!("{:.1} MB", b / MB)
    } else if b >= KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{} B", bytes)
    }
}
