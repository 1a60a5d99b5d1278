//! UIコンポーネント

pub mod header;
pub mod history_panel;
pub mod image_preview;
pub mod loader;
pub mod result_card;
pub mod settings_panel;
pub mod submit_button;
pub mod upload_area;

use lungvision_common::Tone;

/// 判定の配色をインラインスタイルに
pub(crate) fn tone_style(tone: Tone) -> String {
    format!(
        "background-color: {}; color: {}; border: 1px solid {};",
        tone.background, tone.text, tone.border
    )
}
