//! 画像プレビュー用 Object URL の管理
//!
//! 選択中の画像と履歴に残っている画像の分だけURLを持ち、
//! 参照されなくなったものは破棄時に `URL.revokeObjectURL` で解放する。

use crate::api::classifier::image_blob;
use lungvision_common::{Image, ImageId, Session};
use std::collections::{HashMap, HashSet};
use web_sys::Url;

/// Object URL 1件
#[derive(Debug, PartialEq, Eq)]
struct ObjectUrl(String);

impl ObjectUrl {
    fn create(image: &Image) -> Option<Self> {
        let blob = image_blob(image).ok()?;
        Url::create_object_url_with_blob(&blob).ok().map(Self)
    }
}

impl Drop for ObjectUrl {
    fn drop(&mut self) {
        let _ = Url::revoke_object_url(&self.0);
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct PreviewUrls {
    urls: HashMap<ImageId, ObjectUrl>,
}

impl PreviewUrls {
    pub fn url(&self, id: ImageId) -> Option<String> {
        self.urls.get(&id).map(|url| url.0.clone())
    }

    /// セッションが参照している画像に合わせてURLを作成・解放する
    pub fn sync(&mut self, session: &Session) {
        let mut live: HashSet<ImageId> = session
            .history()
            .records()
            .iter()
            .map(|record| record.image.id())
            .collect();

        if let Some(image) = session.current_image() {
            live.insert(image.id());
            if !self.urls.contains_key(&image.id()) {
                match ObjectUrl::create(image) {
                    Some(url) => {
                        self.urls.insert(image.id(), url);
                    }
                    None => gloo::console::warn!(format!("プレビューを作成できません: {}", image.name())),
                }
            }
        }

        self.urls.retain(|id, _| live.contains(id));
    }
}
