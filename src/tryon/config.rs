//! # 服务配置模块
//!
//! ## 设计思路
//!
//! 端点与模型标识集中在一个配置结构里，嵌入方可整体替换；
//! 默认值对应服务方当前的线上模型。

/// 主试衣模型。
pub const TRYON_MODEL: &str = "fashn/tryon";
/// 备选试衣模型（编辑风格）。
pub const FASHION_EDIT_MODEL: &str = "fal-ai/fashion-edit";
/// 图生视频模型。
pub const VIDEO_MODEL: &str = "fal-ai/image-to-video";

/// 生成服务配置。
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// 服务端点基址，不带尾部斜杠
    pub base_url: String,
    /// 默认试衣模型标识
    pub tryon_model: String,
    /// 图生视频模型标识
    pub video_model: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://fal.run".to_string(),
            tryon_model: TRYON_MODEL.to_string(),
            video_model: VIDEO_MODEL.to_string(),
        }
    }
}

impl ProviderConfig {
    /// 拼出指定模型的完整端点地址。
    pub(super) fn endpoint_for(&self, model: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), model)
    }
}
