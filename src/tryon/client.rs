//! # 客户端编排模块
//!
//! ## 设计思路
//!
//! `TryOnClient` 负责前置校验、凭证生命周期与失败分类，
//! 不直接接触 HTTP 细节（交给传输端口）也不接触服务方 schema（交给 wire）。
//!
//! 处理链路固定为：
//! 1. 校验输入非空、凭证已配置（任一不满足即失败，不触网）
//! 2. 构造线上载荷并发出单次请求
//! 3. 按状态码确定性分类，成功时解码响应取首个结果
//!
//! ## 实现思路
//!
//! - 凭证在构造时从存储端口恢复，`initialize` 更新内存并持久化，
//!   正确性校验推迟到首次调用（服务方 401 时报 `InvalidCredential`）。
//! - 单逻辑调用方假设（见存储模块），凭证字段不加锁，更新走 `&mut self`。
//! - 日志只记录引用长度与模型标识，不落盘凭证与图片内容。

use crate::storage::{CREDENTIAL_KEY, KeyValueStore, StorageError};
use crate::gallery::Category;

use super::config::ProviderConfig;
use super::error::TryOnError;
use super::transport::{ProviderRequest, ProviderTransport};
use super::wire::{TryOnPayload, TryOnResponse, TryOnResult, VideoPayload, VideoResponse, VideoResult};

/// 生成服务客户端。
///
/// 泛型于存储端口与传输端口，生产环境注入
/// [`crate::storage::FileStore`] 与 [`super::HttpTransport`]。
pub struct TryOnClient<S: KeyValueStore, T: ProviderTransport> {
    storage: S,
    transport: T,
    config: ProviderConfig,
    credential: Option<String>,
}

impl<S: KeyValueStore, T: ProviderTransport> TryOnClient<S, T> {
    /// 创建客户端并从存储端口恢复上次持久化的凭证。
    pub fn new(storage: S, transport: T, config: ProviderConfig) -> Result<Self, StorageError> {
        let credential = storage.get(CREDENTIAL_KEY)?;
        if credential.is_some() {
            log::debug!("🔑 已恢复持久化的服务凭证");
        }
        Ok(Self {
            storage,
            transport,
            config,
            credential,
        })
    }

    /// 配置服务凭证并持久化，供后续会话复用。
    ///
    /// 此处不校验凭证正确性，校验推迟到首次调用。
    pub fn initialize(&mut self, credential: &str) -> Result<(), StorageError> {
        self.storage.set(CREDENTIAL_KEY, credential)?;
        self.credential = Some(credential.to_string());
        log::info!("🔑 服务凭证已更新");
        Ok(())
    }

    /// 是否已有可用凭证（内存或上次会话持久化）。
    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    /// 生成试衣合成图。
    ///
    /// 单次请求、单次响应：不重试、不超时、发出后不可取消。
    /// `model` 为空时使用配置的默认试衣模型。
    pub async fn generate_try_on(
        &self,
        person_image: &str,
        garment_image: &str,
        category: Category,
        model: Option<&str>,
    ) -> Result<TryOnResult, TryOnError> {
        if person_image.is_empty() {
            return Err(TryOnError::InvalidInput("人物图片为空".to_string()));
        }
        if garment_image.is_empty() {
            return Err(TryOnError::InvalidInput("服装图片为空".to_string()));
        }
        let credential = self.credential.as_deref().ok_or(TryOnError::MissingCredential)?;

        let model = model.unwrap_or(&self.config.tryon_model);
        log::info!(
            "👗 发起试衣生成 - 模型: {}, 类目: {}, 人物图 {} 字节, 服装图 {} 字节",
            model,
            category,
            person_image.len(),
            garment_image.len()
        );

        let payload = TryOnPayload {
            model_image: person_image,
            garment_image,
            category,
        };
        let body = self.dispatch(&self.config.endpoint_for(model), credential, &payload).await?;

        let decoded: TryOnResponse = serde_json::from_str(&body)
            .map_err(|e| TryOnError::InvalidProviderResponse(format!("解码失败: {}", e)))?;
        let first = decoded
            .images
            .into_iter()
            .next()
            .ok_or_else(|| TryOnError::InvalidProviderResponse("结果集合为空".to_string()))?;

        log::info!("✅ 试衣生成完成 - 结果引用 {} 字节", first.url.len());
        Ok(TryOnResult { image: first.url })
    }

    /// 由试衣结果生成衍生视频。
    ///
    /// 契约形状与 [`Self::generate_try_on`] 相同：单图载荷、另一端点、
    /// 同一套失败分类。
    pub async fn generate_video(&self, source_image: &str) -> Result<VideoResult, TryOnError> {
        if source_image.is_empty() {
            return Err(TryOnError::InvalidInput("源图片为空".to_string()));
        }
        let credential = self.credential.as_deref().ok_or(TryOnError::MissingCredential)?;

        let model = &self.config.video_model;
        log::info!("🎬 发起视频生成 - 模型: {}, 源图 {} 字节", model, source_image.len());

        let payload = VideoPayload { image: source_image };
        let body = self.dispatch(&self.config.endpoint_for(model), credential, &payload).await?;

        let decoded: VideoResponse = serde_json::from_str(&body)
            .map_err(|e| TryOnError::InvalidProviderResponse(format!("解码失败: {}", e)))?;

        log::info!("✅ 视频生成完成 - 结果引用 {} 字节", decoded.video.len());
        Ok(VideoResult { video: decoded.video })
    }

    /// 执行单次请求并做确定性失败分类。
    ///
    /// 到达调用方的每个失败必属于四类之一：
    /// 传输失败 → `ProviderUnreachable`；401/403 → `InvalidCredential`；
    /// 429 → `RateLimited`；其余非成功 → `Provider`（携带服务方原始消息）。
    async fn dispatch(
        &self,
        endpoint: &str,
        credential: &str,
        payload: &impl serde::Serialize,
    ) -> Result<String, TryOnError> {
        let body = serde_json::to_value(payload)
            .map_err(|e| TryOnError::InvalidInput(format!("请求载荷构造失败: {}", e)))?;

        let reply = self
            .transport
            .execute(ProviderRequest {
                endpoint: endpoint.to_string(),
                credential: credential.to_string(),
                body,
            })
            .await
            .map_err(|e| TryOnError::ProviderUnreachable(e.to_string()))?;

        match reply.status {
            200..=299 => Ok(reply.body),
            401 | 403 => Err(TryOnError::InvalidCredential),
            429 => Err(TryOnError::RateLimited),
            status => {
                log::warn!("⚠️ 生成服务返回失败 - HTTP {}", status);
                Err(TryOnError::Provider(format!("HTTP {}: {}", status, reply.body)))
            }
        }
    }
}
