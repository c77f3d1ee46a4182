//! 画廊模块（gallery）
//!
//! # 设计思路
//!
//! 生成结果的本地持久化集合：设备级、无服务端副本、不跨设备同步。
//! 数据层只做三件事——保存、列出、删除，渲染与展示完全交给上层。
//!
//! 集合整体序列化为一条 JSON 记录，通过注入的键值端口持久化，
//! 不引入 SQL 与模式迁移，符合「纯数据层」定位。
//!
//! # 实现思路
//!
//! - 条目创建后不可变，只能被显式删除。
//! - `list` 按创建时间倒序返回（最新在前），这是对展示层的契约。
//! - 单逻辑写者假设：不做并发隔离，多进程同时写时后写覆盖先写。

mod store;

use serde::{Deserialize, Serialize};

pub use store::GalleryStore;

// ============================================================================
// 数据模型
// ============================================================================

/// 服装类目。
///
/// 序列化形式与前端/持久化记录一致："tops" / "bottoms" / "one-pieces"。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "tops")]
    Tops,
    #[serde(rename = "bottoms")]
    Bottoms,
    #[serde(rename = "one-pieces")]
    OnePieces,
}

impl Default for Category {
    fn default() -> Self {
        Category::Tops
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Category::Tops => "tops",
            Category::Bottoms => "bottoms",
            Category::OnePieces => "one-pieces",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tops" => Ok(Category::Tops),
            "bottoms" => Ok(Category::Bottoms),
            "one-pieces" => Ok(Category::OnePieces),
            other => Err(format!("未知类目: {}", other)),
        }
    }
}

/// 画廊条目
///
/// 由 [`GalleryStore::save`] 创建，之后不再变更。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryItem {
    /// 创建时生成的唯一标识（UUID v4），集合内任意时刻不重复
    pub id: String,
    /// 图片引用：URL 或内嵌字节的 data URL
    pub image: String,
    pub category: Category,
    /// 创建时间，epoch 毫秒
    pub created_at: i64,
}

// ============================================================================
// 错误模型
// ============================================================================

/// 画廊持久化错误。
#[derive(Debug, thiserror::Error)]
pub enum GalleryError {
    /// 存储介质拒绝读写（如配额不足）；旧状态保证未被破坏
    #[error("画廊存储失败: {0}")]
    Storage(String),

    /// 持久化内容存在但无法解析为预期结构。
    /// 选择向上暴露而非静默清空，避免悄悄丢弃用户已保存的结果。
    #[error("画廊数据损坏: {0}")]
    Corrupt(String),
}

impl From<crate::storage::StorageError> for GalleryError {
    fn from(e: crate::storage::StorageError) -> Self {
        GalleryError::Storage(e.to_string())
    }
}
