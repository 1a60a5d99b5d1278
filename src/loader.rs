//! ローカルファイルの読み込み
//!
//! CLIでの「ファイル選択」にあたる。パスを読んで `RawFile` にし、
//! 拡張子から申告MIMEタイプを付ける。

use crate::error::{LungVisionError, Result};
use image::{ImageFormat, ImageReader};
use lungvision_common::RawFile;
use std::io::Cursor;
use std::path::Path;

pub fn read_image_file(path: &Path) -> Result<RawFile> {
    if !path.is_file() {
        return Err(LungVisionError::FileNotFound(path.display().to_string()));
    }

    let bytes = std::fs::read(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let mut file = RawFile::new(name, bytes);
    if let Ok(format) = ImageFormat::from_path(path) {
        file = file.with_declared_type(format.to_mime_type());
    }
    Ok(file)
}

/// 画像の縦横サイズ（デコードできなければ None）
pub fn image_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .ok()?
        .into_dimensions()
        .ok()
}

/// 文字列で入力されたパスを整える（ドラッグで入る引用符や前後の空白を除く）
pub fn normalize_input_path(input: &str) -> Option<&str> {
    let trimmed = input.trim().trim_matches(|c: char| c == '"' || c == '\'').trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}
