//! # 虚拟试衣核心 — 库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │              嵌入方（UI 壳 / CLI，渲染不在本库）           │
//! │                                                          │
//! │   上传人物图 ── 上传服装图 ── 画廊渲染 ── 结果下载         │
//! └───────┼──────────────────────────────────────────────────┘
//!         ↕ 库调用 (Result<T, AppError>)
//! ┌───────┼──────────────────────────────────────────────────┐
//! │       ↕              核心 (Rust)                         │
//! │                                                          │
//! │  ┌─ error ──────── AppError (统一错误类型)                │
//! │  │                                                       │
//! │  ├─ storage ────── 键值端口 (文件 / 内存实现)              │
//! │  │                                                       │
//! │  ├─ gallery ────── 本地画廊 保存·列出·删除                 │
//! │  │                                                       │
//! │  ├─ tryon ──────── 生成服务适配 试衣·视频·失败分类          │
//! │  │                                                       │
//! │  └─ media ──────── data URL 编解码                        │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 统一错误类型 `AppError`，库顶层操作的失败返回类型 |
//! | [`storage`] | 键值存储端口与文件/内存实现，画廊与凭证各占一键 |
//! | [`gallery`] | 生成结果的本地持久化集合（保存 / 列出 / 删除） |
//! | [`tryon`] | 外部生成服务适配：前置校验、线上契约、失败分类 |
//! | [`media`] | 图片字节与 data URL 的双向转换 |
//!
//! ## 依赖方向
//!
//! `gallery` 与 `tryon` 互不依赖，都是叶子；
//! 二者只共享 `storage` 端口（使用互不相关的键）。

pub mod error;
pub mod gallery;
pub mod media;
pub mod storage;
pub mod tryon;

pub use error::AppError;
pub use gallery::{Category, GalleryItem, GalleryStore};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use tryon::{HttpTransport, ProviderConfig, TryOnClient, TryOnResult, VideoResult};
