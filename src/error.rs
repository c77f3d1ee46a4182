//! 统一错误类型模块
//!
//! # 设计思路
//!
//! 定义全局统一的 `AppError` 枚举，替代各模块中分散的
//! `.map_err(|e| e.to_string())`、`format!(...)`、`expect()` 等不一致模式。
//!
//! 库的顶层操作统一返回 `Result<T, AppError>`，
//! 嵌入方通过 `Serialize` 获得结构化的错误信息。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - 为 `GalleryError` / `TryOnError` / `MediaError` 提供 `From` 转换，无需手动 map。
//! - 实现 `Serialize` 将错误序列化为字符串，方便调用侧直接展示。

use serde::Serialize;

use crate::gallery::GalleryError;
use crate::media::MediaError;
use crate::storage::StorageError;
use crate::tryon::TryOnError;

/// 应用级统一错误类型
///
/// 嵌入方（UI 壳 / CLI）收到的所有失败均为此类型，保证一致的错误格式。
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 画廊持久化错误（写入失败 / 内容损坏）
    #[error("{0}")]
    Gallery(#[from] GalleryError),

    /// 生成服务调用错误（输入 / 凭证 / 网络 / 响应）
    #[error("{0}")]
    TryOn(#[from] TryOnError),

    /// 图片编解码错误（data URL 构造 / 解析）
    #[error("{0}")]
    Media(#[from] MediaError),

    /// 存储端口错误（初始化 / 凭证持久化）
    #[error("{0}")]
    Storage(#[from] StorageError),

    /// 文件系统 I/O 错误
    #[error("文件系统错误: {0}")]
    Io(#[from] std::io::Error),
}

/// 调用方（如 IPC 层）要求返回值实现 `Serialize`。
/// 将错误序列化为人类可读的字符串。
impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
