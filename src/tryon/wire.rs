//! # 线上契约模型模块
//!
//! ## 设计思路
//!
//! 服务方的请求/响应 schema 只在本文件出现一次，
//! 在适配边界用显式结构解码：任何形状不符都会成为
//! `InvalidProviderResponse`，而不是未经检查的字段访问。

use serde::{Deserialize, Serialize};

use crate::gallery::Category;

// ============================================================================
// 请求载荷（发往服务方）
// ============================================================================

/// 试衣请求载荷：`{ model_image, garment_image, category }`。
#[derive(Debug, Serialize)]
pub(super) struct TryOnPayload<'a> {
    pub model_image: &'a str,
    pub garment_image: &'a str,
    pub category: Category,
}

/// 图生视频请求载荷：`{ image }`。
#[derive(Debug, Serialize)]
pub(super) struct VideoPayload<'a> {
    pub image: &'a str,
}

// ============================================================================
// 响应模型（来自服务方）
// ============================================================================

/// 试衣响应：`{ "images": [ { "url": ... }, ... ] }`。
#[derive(Debug, Deserialize)]
pub(super) struct TryOnResponse {
    pub images: Vec<ImageEntry>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ImageEntry {
    pub url: String,
}

/// 图生视频响应：`{ "video": ... }`。
#[derive(Debug, Deserialize)]
pub(super) struct VideoResponse {
    pub video: String,
}

// ============================================================================
// 本地稳定结果（面向调用方）
// ============================================================================

/// 试衣结果：结果集合中首个条目的图片引用。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TryOnResult {
    pub image: String,
}

/// 图生视频结果。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoResult {
    pub video: String,
}
