//! # 错误模型模块
//!
//! ## 设计思路
//!
//! 使用单一错误枚举承载生成链路中的所有错误来源，避免字符串拼接式错误处理。
//! 通过 `thiserror` 保持人类可读错误，同时让调用侧可按分支匹配。
//!
//! 分类必须是确定且全覆盖的：任何到达调用方的失败都是下列成员之一，
//! 核心不自动重试任何一类。

/// 生成服务调用统一错误类型。
///
/// 该类型会在顶层被上转为 `AppError`，最终透传给调用方。
#[derive(Debug, thiserror::Error)]
pub enum TryOnError {
    /// 前置校验失败（如输入图片为空），未发起任何网络请求
    #[error("输入无效：{0}")]
    InvalidInput(String),

    /// 尚未调用过 `initialize`，未发起任何网络请求
    #[error("尚未配置生成服务凭证")]
    MissingCredential,

    /// 服务方返回未授权（凭证错误或已过期）
    #[error("生成服务凭证无效")]
    InvalidCredential,

    /// 传输层失败（DNS / 连接 / 链路中断）
    #[error("无法连接生成服务：{0}")]
    ProviderUnreachable(String),

    /// 服务方限流
    #[error("请求过于频繁，已被生成服务限流")]
    RateLimited,

    /// 响应形状不符合线上契约（含空结果集合）
    #[error("生成服务响应无法识别：{0}")]
    InvalidProviderResponse(String),

    /// 其余服务端失败，保留服务方原始消息供诊断
    #[error("生成服务错误：{0}")]
    Provider(String),
}
