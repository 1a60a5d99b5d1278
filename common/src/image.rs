//! 画像の取り込み（ImageSource）
//!
//! ファイル選択ダイアログまたはドラッグ&ドロップで受け取ったファイルを、
//! 送信候補となる1枚の `Image` に正規化する。

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// アップロード上限のデフォルト（10 MiB）
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// セッション内で画像を識別するID（選択のたびに採番）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ImageId(u64);

impl ImageId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "img-{}", self.0)
    }
}

/// ファイルがどこから来たか
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SelectionOrigin {
    Picker,
    Drop,
}

/// ブラウザ/OSから受け取ったままのファイル
#[derive(Debug, Clone, Default)]
pub struct RawFile {
    pub name: String,
    /// 呼び出し側が申告したMIMEタイプ（ブラウザの `File.type` など）
    pub declared_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl RawFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            declared_type: None,
            bytes,
        }
    }

    pub fn with_declared_type(mut self, declared_type: impl Into<String>) -> Self {
        self.declared_type = Some(declared_type.into());
        self
    }
}

/// 選択イベント1回分のペイロード
#[derive(Debug, Clone)]
pub struct FileSelection {
    pub origin: SelectionOrigin,
    pub files: Vec<RawFile>,
}

impl FileSelection {
    pub fn picked(files: Vec<RawFile>) -> Self {
        Self {
            origin: SelectionOrigin::Picker,
            files,
        }
    }

    pub fn dropped(files: Vec<RawFile>) -> Self {
        Self {
            origin: SelectionOrigin::Drop,
            files,
        }
    }

    /// ファイル1つだけの選択
    pub fn single(origin: SelectionOrigin, file: RawFile) -> Self {
        Self {
            origin,
            files: vec![file],
        }
    }
}

/// 選択済み画像
///
/// 中身は共有の不変バッファなので clone はスナップショットとして安い。
#[derive(Clone, PartialEq, Eq)]
pub struct Image {
    id: ImageId,
    name: String,
    content_type: String,
    bytes: Arc<[u8]>,
}

impl Image {
    pub fn id(&self) -> ImageId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// 画像バイト列をDebugに流さない
impl fmt::Debug for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Image")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// ファイル → Image の正規化
#[derive(Debug, Clone)]
pub struct ImageSource {
    next_id: u64,
    max_upload_bytes: Option<u64>,
}

impl Default for ImageSource {
    fn default() -> Self {
        Self::new(Some(DEFAULT_MAX_UPLOAD_BYTES))
    }
}

impl ImageSource {
    /// `max_upload_bytes` が None ならサイズ制限なし
    pub fn new(max_upload_bytes: Option<u64>) -> Self {
        Self {
            next_id: 1,
            max_upload_bytes,
        }
    }

    /// 選択イベントから画像を1枚取り出す
    ///
    /// 先頭のファイルだけを使う。ファイルが無い・空・画像でない・上限超過は
    /// `InvalidInput`。
    pub fn select(&mut self, selection: FileSelection) -> Result<Image> {
        let file = selection
            .files
            .into_iter()
            .next()
            .ok_or_else(|| Error::InvalidInput("ファイルが選択されていません".into()))?;

        if file.bytes.is_empty() {
            return Err(Error::InvalidInput(format!("{} は空のファイルです", file.name)));
        }

        if let Some(limit) = self.max_upload_bytes {
            if file.bytes.len() as u64 > limit {
                return Err(Error::InvalidInput(format!(
                    "{} はサイズ上限を超えています ({} > {} bytes)",
                    file.name,
                    file.bytes.len(),
                    limit
                )));
            }
        }

        let content_type = resolve_content_type(&file)?;
        let name = if file.name.trim().is_empty() {
            "image".to_string()
        } else {
            file.name
        };

        let id = ImageId(self.next_id);
        self.next_id += 1;

        Ok(Image {
            id,
            name,
            content_type,
            bytes: Arc::from(file.bytes),
        })
    }
}

/// マジックバイトからMIMEタイプを判定
///
/// # Examples
/// ```
/// use lungvision_common::sniff_content_type;
///
/// let png = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
/// assert_eq!(sniff_content_type(&png), Some("image/png"));
/// assert_eq!(sniff_content_type(b"hello"), None);
/// ```
pub fn sniff_content_type(bytes: &[u8]) -> Option<&'static str> {
    const SIGNATURES: &[(&[u8], &str)] = &[
        (&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A], "image/png"),
        (&[0xFF, 0xD8, 0xFF], "image/jpeg"),
        (b"GIF87a", "image/gif"),
        (b"GIF89a", "image/gif"),
        (b"BM", "image/bmp"),
        (b"II*\0", "image/tiff"),
        (b"MM\0*", "image/tiff"),
    ];

    if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        return Some("image/webp");
    }

    SIGNATURES
        .iter()
        .find(|(magic, _)| bytes.starts_with(magic))
        .map(|(_, mime)| *mime)
}

fn resolve_content_type(file: &RawFile) -> Result<String> {
    if let Some(mime) = sniff_content_type(&file.bytes) {
        return Ok(mime.to_string());
    }

    // 判定できない形式でも申告が image/* なら受け付ける（最終判断はサーバー）
    match file.declared_type.as_deref().map(str::trim) {
        Some(declared) if declared.starts_with("image/") => Ok(declared.to_string()),
        _ => Err(Error::InvalidInput(format!("{} は画像ファイルではありません", file.name))),
    }
}

#[cfg(test)]
pub(crate) fn png_bytes() -> Vec<u8> {
    let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    bytes.extend_from_slice(&[0u8; 16]);
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png(name: &str) -> RawFile {
        RawFile::new(name, png_bytes())
    }

    #[test]
    fn test_select_picked_file() {
        let mut source = ImageSource::default();
        let image = source
            .select(FileSelection::picked(vec![png("xray1.png")]))
            .unwrap();
        assert_eq!(image.name(), "xray1.png");
        assert_eq!(image.content_type(), "image/png");
        assert_eq!(image.len(), 24);
    }

    #[test]
    fn test_select_without_file_is_invalid() {
        let mut source = ImageSource::default();
        let err = source.select(FileSelection::dropped(vec![])).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_select_uses_first_file_only() {
        let mut source = ImageSource::default();
        let image = source
            .select(FileSelection::dropped(vec![png("a.png"), png("b.png")]))
            .unwrap();
        assert_eq!(image.name(), "a.png");
    }

    #[test]
    fn test_ids_are_unique_per_selection() {
        let mut source = ImageSource::default();
        let first = source.select(FileSelection::picked(vec![png("a.png")])).unwrap();
        let second = source.select(FileSelection::picked(vec![png("a.png")])).unwrap();
        assert_ne!(first.id(), second.id());
        assert!(first.id() < second.id());
    }

    #[test]
    fn test_empty_file_rejected() {
        let mut source = ImageSource::default();
        let err = source
            .select(FileSelection::picked(vec![RawFile::new("empty.png", vec![])]))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_size_limit() {
        let mut source = ImageSource::new(Some(10));
        let err = source
            .select(FileSelection::picked(vec![png("big.png")]))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(msg) if msg.contains("サイズ上限")));

        let mut unlimited = ImageSource::new(None);
        assert!(unlimited.select(FileSelection::picked(vec![png("big.png")])).is_ok());
    }

    #[test]
    fn test_non_image_rejected() {
        let mut source = ImageSource::default();
        let err = source
            .select(FileSelection::picked(vec![RawFile::new("notes.txt", b"hello".to_vec())]))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_declared_image_type_accepted() {
        let mut source = ImageSource::default();
        let file = RawFile::new("scan.heic", b"....ftypheic".to_vec()).with_declared_type("image/heic");
        let image = source.select(FileSelection::picked(vec![file])).unwrap();
        assert_eq!(image.content_type(), "image/heic");
    }

    #[test]
    fn test_sniff_formats() {
        assert_eq!(sniff_content_type(&[0xFF, 0xD8, 0xFF, 0xE0]), Some("image/jpeg"));
        assert_eq!(sniff_content_type(b"GIF89a...."), Some("image/gif"));
        assert_eq!(sniff_content_type(b"RIFF\0\0\0\0WEBPVP8 "), Some("image/webp"));
        assert_eq!(sniff_content_type(b"BM\0\0"), Some("image/bmp"));
        assert_eq!(sniff_content_type(b""), None);
    }

    #[test]
    fn test_blank_name_gets_placeholder() {
        let mut source = ImageSource::default();
        let image = source.select(FileSelection::picked(vec![png("  ")])).unwrap();
        assert_eq!(image.name(), "image");
    }

    #[test]
    fn test_debug_hides_bytes() {
        let mut source = ImageSource::default();
        let image = source.select(FileSelection::picked(vec![png("a.png")])).unwrap();
        let debug = format!("{:?}", image);
        assert!(debug.contains("len: 24"));
        assert!(!debug.contains("137"));
    }
}
