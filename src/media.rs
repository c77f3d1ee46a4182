//! 图片编解码辅助模块
//!
//! # 设计思路
//!
//! 调用方（UI 壳 / CLI）以 data URL 形式在内存中传递图片，
//! 这里提供字节 ↔ data URL 的双向转换，并在「尽可能早」的阶段校验输入：
//! 非图片字节直接拒绝，避免把无效载荷送到生成服务再失败。
//!
//! # 实现思路
//!
//! - 用 `infer` 按文件签名嗅探 MIME，只接受图片类型。
//! - base64 编解码统一走 `general_purpose::STANDARD` 引擎。

use base64::{Engine as _, engine::general_purpose};

/// 图片编解码错误。
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    /// 字节签名不是已知图片格式
    #[error("不支持的图片格式：{0}")]
    UnsupportedFormat(String),

    /// data URL 结构或编码无效
    #[error("data URL 无效：{0}")]
    InvalidDataUrl(String),
}

/// 把图片字节编码为 `data:<mime>;base64,...` 形式。
///
/// 按字节签名嗅探 MIME，仅接受图片类型。
pub fn to_data_url(bytes: &[u8]) -> Result<String, MediaError> {
    let kind = infer::get(bytes)
        .ok_or_else(|| MediaError::UnsupportedFormat("无法识别字节签名".to_string()))?;
    if kind.matcher_type() != infer::MatcherType::Image {
        return Err(MediaError::UnsupportedFormat(format!(
            "期望图片，实际为 {}",
            kind.mime_type()
        )));
    }

    Ok(format!(
        "data:{};base64,{}",
        kind.mime_type(),
        general_purpose::STANDARD.encode(bytes)
    ))
}

/// 把 data URL 解析回 (MIME, 字节)。
pub fn from_data_url(data_url: &str) -> Result<(String, Vec<u8>), MediaError> {
    let rest = data_url
        .strip_prefix("data:")
        .ok_or_else(|| MediaError::InvalidDataUrl("缺少 data: 前缀".to_string()))?;
    let (mime, encoded) = rest
        .split_once(";base64,")
        .ok_or_else(|| MediaError::InvalidDataUrl("缺少 base64 段".to_string()))?;

    let bytes = general_purpose::STANDARD
        .decode(encoded)
        .map_err(|e| MediaError::InvalidDataUrl(format!("base64 解码失败: {}", e)))?;

    Ok((mime.to_string(), bytes))
}
