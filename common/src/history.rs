//! セッション履歴（HistoryLedger）
//!
//! 成功した送信だけを完了順に積む追記専用の記録。
//! 削除・更新のAPIは持たない。セッション終了とともに捨てる。

use crate::classification::Classification;
use crate::image::Image;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// 履歴1件（不変）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRecord {
    /// 1始まりの追記順
    pub sequence: usize,
    /// 送信した時点の画像
    pub image: Image,
    pub classification: Classification,
}

/// 追記専用の履歴
///
/// clone はハンドルの複製で、同じ履歴を共有する。
/// `records()` は独立したスナップショットを返すので、後からの追記に影響されない。
#[derive(Debug, Clone, Default)]
pub struct HistoryLedger {
    records: Arc<RwLock<Vec<Arc<HistoryRecord>>>>,
}

impl HistoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// 1件追記して、その記録を返す
    pub fn append(&self, image: Image, classification: Classification) -> Arc<HistoryRecord> {
        let mut records = self.write();
        let record = Arc::new(HistoryRecord {
            sequence: records.len() + 1,
            image,
            classification,
        });
        records.push(Arc::clone(&record));
        record
    }

    /// 同じ記録を持つ別の履歴（以降の追記は互いに見えない）
    pub fn fork(&self) -> Self {
        Self {
            records: Arc::new(RwLock::new(self.read().clone())),
        }
    }

    /// 追記順のスナップショット
    pub fn records(&self) -> Vec<Arc<HistoryRecord>> {
        self.read().clone()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // 書き込み中にpanicしてもVecは壊れない（pushのみ）ので毒化は無視する
    fn read(&self) -> RwLockReadGuard<'_, Vec<Arc<HistoryRecord>>> {
        self.records.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Arc<HistoryRecord>>> {
        self.records.write().unwrap_or_else(|e| e.into_inner())
    }
}
