//! 生成服务适配模块（tryon）
//!
//! # 设计思路
//!
//! 该模块把「本地请求形状 → 外部生成服务线上契约 → 本地稳定结果」的
//! 适配过程按职责拆分为多个子模块，上层逻辑永远不接触服务方的具体 schema。
//!
//! - `config`：服务端点与模型标识的默认配置
//! - `wire`：线上契约的序列化/反序列化模型
//! - `transport`：单次 HTTP 请求的执行端口（可注入假实现）
//! - `client`：前置校验、凭证生命周期、失败分类
//! - `error`：面向调用方的错误分类
//!
//! # 实现思路
//!
//! 调用链固定为：
//!
//! ```text
//! 调用方
//!    ↓
//! client.rs（前置校验：输入非空 + 凭证已配置）
//!    ↓
//! wire.rs（构造请求载荷）
//!    ↓
//! transport.rs（一次请求、一次响应；不重试、不超时、不可取消）
//!    ↓
//! client.rs（按状态码确定性分类 + 响应解码）
//!    ↓
//! 返回 TryOnResult / TryOnError
//! ```
//!
//! 到达调用方的每个失败必属于 [`TryOnError`] 的某一成员，
//! 绝不向外抛裸错误，也绝不把半截结果伪装成成功。

mod client;
mod config;
mod error;
mod transport;
mod wire;

pub use client::TryOnClient;
pub use config::ProviderConfig;
pub use error::TryOnError;
pub use transport::{HttpTransport, ProviderReply, ProviderRequest, ProviderTransport, TransportError};
pub use wire::{TryOnResult, VideoResult};
