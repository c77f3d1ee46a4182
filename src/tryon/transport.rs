//! # 传输端口模块
//!
//! ## 设计思路
//!
//! 把「一次 HTTP 请求、一次响应」抽象成端口，
//! 让失败分类逻辑可以用记录调用次数的假实现来测试，
//! 不需要真实网络。
//!
//! ## 实现思路
//!
//! - 端口只表达传输结果：连通时返回状态码 + 响应体，不做任何语义判断。
//! - 状态码到错误分类的映射属于 `client.rs`，保证分类逻辑集中且确定。
//! - 生产实现 `HttpTransport` 复用同一个 `reqwest::Client`，
//!   减少每次请求的初始化开销。
//! - 核心不设超时：服务方永不响应时调用会一直挂起（已知限制，非契约）。

use serde_json::Value;

/// 发往服务方的一次请求。
#[derive(Debug)]
pub struct ProviderRequest {
    /// 完整端点地址
    pub endpoint: String,
    /// 按调用附带的 Bearer 凭证
    pub credential: String,
    /// JSON 请求体
    pub body: Value,
}

/// 服务方的一次原始响应（已连通，不代表业务成功）。
#[derive(Debug)]
pub struct ProviderReply {
    pub status: u16,
    pub body: String,
}

/// 传输层失败（未能取得任何 HTTP 响应）。
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// 传输端口。
///
/// 测试中注入记录调用的假实现，验证前置校验不触网。
pub trait ProviderTransport {
    fn execute(
        &self,
        request: ProviderRequest,
    ) -> impl Future<Output = Result<ProviderReply, TransportError>> + Send;
}

/// 基于 `reqwest` 的生产实现。
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderTransport for HttpTransport {
    async fn execute(&self, request: ProviderRequest) -> Result<ProviderReply, TransportError> {
        let response = self
            .client
            .post(&request.endpoint)
            .bearer_auth(&request.credential)
            .json(&request.body)
            .send()
            .await
            .map_err(|e| TransportError(format!("请求发送失败: {}", e)))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError(format!("读取响应失败: {}", e)))?;

        Ok(ProviderReply { status, body })
    }
}
