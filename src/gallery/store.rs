//! 画廊存取操作模块
//!
//! # 实现思路
//!
//! - 每次操作读出整份集合、改完整体写回；集合规模为个人画廊量级，
//!   不做增量更新。
//! - 写入失败直接返回 `GalleryError::Storage`，端口保证旧值完整。
//! - 解析失败返回 `GalleryError::Corrupt`，不静默清空（见模块文档）。

use chrono::Utc;
use uuid::Uuid;

use crate::storage::{GALLERY_KEY, KeyValueStore};

use super::{Category, GalleryError, GalleryItem};

/// 画廊存储。
///
/// 泛型于键值端口，生产环境注入 [`crate::storage::FileStore`]，
/// 测试注入 [`crate::storage::MemoryStore`]。
pub struct GalleryStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> GalleryStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// 保存一条生成结果。
    ///
    /// 生成全新 id 与当前时间戳，插入集合头部后整体持久化，返回新条目。
    /// 介质拒绝写入时返回 `Storage` 错误，已持久化的旧集合保持不变。
    pub fn save(&self, image: &str, category: Category) -> Result<GalleryItem, GalleryError> {
        let mut items = self.list()?;
        let item = GalleryItem {
            id: Uuid::new_v4().to_string(),
            image: image.to_string(),
            category,
            created_at: Utc::now().timestamp_millis(),
        };

        items.insert(0, item.clone());
        self.persist(&items)?;

        log::debug!("🖼️ 画廊新增条目 - id: {}, 类目: {}", item.id, item.category);
        Ok(item)
    }

    /// 列出全部条目，最新在前。
    ///
    /// 尚未持久化过任何内容时返回空集合。
    pub fn list(&self) -> Result<Vec<GalleryItem>, GalleryError> {
        let Some(raw) = self.store.get(GALLERY_KEY)? else {
            return Ok(Vec::new());
        };

        serde_json::from_str::<Vec<GalleryItem>>(&raw)
            .map_err(|e| GalleryError::Corrupt(format!("解析画廊集合失败: {}", e)))
    }

    /// 删除指定 id 的条目。
    ///
    /// 幂等：id 不存在时集合保持不变，也不算错误。
    pub fn remove(&self, id: &str) -> Result<(), GalleryError> {
        let items = self.list()?;
        let before = items.len();
        let filtered: Vec<GalleryItem> = items.into_iter().filter(|item| item.id != id).collect();

        if filtered.len() == before {
            return Ok(());
        }

        self.persist(&filtered)?;
        log::debug!("🗑️ 画廊删除条目 - id: {}", id);
        Ok(())
    }

    fn persist(&self, items: &[GalleryItem]) -> Result<(), GalleryError> {
        let raw = serde_json::to_string(items)
            .map_err(|e| GalleryError::Storage(format!("序列化画廊集合失败: {}", e)))?;
        self.store.set(GALLERY_KEY, &raw)?;
        Ok(())
    }
}
