//! 生成服务适配集成测试
//!
//! 用记录调用次数的假传输端口验证：
//! - 前置校验失败绝不触网
//! - 响应解码与首条结果提取
//! - 状态码到错误分类的映射确定且全覆盖

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use tryon_studio::gallery::Category;
use tryon_studio::storage::{KeyValueStore, MemoryStore};
use tryon_studio::tryon::{
    ProviderConfig, ProviderReply, ProviderRequest, ProviderTransport, TransportError, TryOnClient,
    TryOnError,
};

// ============================================================================
// 假传输端口
// ============================================================================

enum Behavior {
    Reply(u16, &'static str),
    Unreachable(&'static str),
}

#[derive(Default)]
struct FakeState {
    calls: AtomicUsize,
    last_endpoint: Mutex<Option<String>>,
    last_body: Mutex<Option<serde_json::Value>>,
}

struct FakeTransport {
    state: Arc<FakeState>,
    behavior: Behavior,
}

impl ProviderTransport for FakeTransport {
    async fn execute(&self, request: ProviderRequest) -> Result<ProviderReply, TransportError> {
        self.state.calls.fetch_add(1, Ordering::SeqCst);
        *self.state.last_endpoint.lock().unwrap() = Some(request.endpoint);
        *self.state.last_body.lock().unwrap() = Some(request.body);

        match &self.behavior {
            Behavior::Reply(status, body) => Ok(ProviderReply {
                status: *status,
                body: body.to_string(),
            }),
            Behavior::Unreachable(msg) => Err(TransportError(msg.to_string())),
        }
    }
}

fn client_with(
    behavior: Behavior,
    credential: Option<&str>,
) -> (TryOnClient<MemoryStore, FakeTransport>, Arc<FakeState>) {
    let state = Arc::new(FakeState::default());
    let transport = FakeTransport {
        state: Arc::clone(&state),
        behavior,
    };
    let mut client =
        TryOnClient::new(MemoryStore::new(), transport, ProviderConfig::default()).unwrap();
    if let Some(key) = credential {
        client.initialize(key).unwrap();
    }
    (client, state)
}

const OK_BODY: &str = r#"{"images":[{"url":"https://cdn.example/result-1.png"},{"url":"https://cdn.example/result-2.png"}]}"#;

// ============================================================================
// 前置校验：不触网
// ============================================================================

#[tokio::test]
async fn empty_garment_image_fails_without_network() {
    let (client, state) = client_with(Behavior::Reply(200, OK_BODY), Some("k"));

    let result = client.generate_try_on("data:image/png;base64,AA", "", Category::Tops, None).await;

    assert!(matches!(result, Err(TryOnError::InvalidInput(_))));
    assert_eq!(state.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn empty_person_image_fails_without_network() {
    let (client, state) = client_with(Behavior::Reply(200, OK_BODY), Some("k"));

    let result = client.generate_try_on("", "data:image/png;base64,AA", Category::Tops, None).await;

    assert!(matches!(result, Err(TryOnError::InvalidInput(_))));
    assert_eq!(state.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn missing_credential_fails_without_network() {
    let (client, state) = client_with(Behavior::Reply(200, OK_BODY), None);

    let result = client.generate_try_on("person", "garment", Category::Tops, None).await;

    assert!(matches!(result, Err(TryOnError::MissingCredential)));
    assert_eq!(state.calls.load(Ordering::SeqCst), 0);
}

// ============================================================================
// 成功路径与响应解码
// ============================================================================

#[tokio::test]
async fn success_returns_first_image_of_collection() {
    let (client, state) = client_with(Behavior::Reply(200, OK_BODY), Some("k"));

    let result = client
        .generate_try_on("person", "garment", Category::Bottoms, None)
        .await
        .unwrap();

    assert_eq!(result.image, "https://cdn.example/result-1.png");
    assert_eq!(state.calls.load(Ordering::SeqCst), 1);

    // 线上契约：端点取默认模型，载荷为 { model_image, garment_image, category }
    let endpoint = state.last_endpoint.lock().unwrap().clone().unwrap();
    assert_eq!(endpoint, "https://fal.run/fashn/tryon");
    let body = state.last_body.lock().unwrap().clone().unwrap();
    assert_eq!(body["model_image"], "person");
    assert_eq!(body["garment_image"], "garment");
    assert_eq!(body["category"], "bottoms");
}

#[tokio::test]
async fn explicit_model_overrides_default_endpoint() {
    let (client, state) = client_with(Behavior::Reply(200, OK_BODY), Some("k"));

    client
        .generate_try_on("person", "garment", Category::Tops, Some("fal-ai/fashion-edit"))
        .await
        .unwrap();

    let endpoint = state.last_endpoint.lock().unwrap().clone().unwrap();
    assert_eq!(endpoint, "https://fal.run/fal-ai/fashion-edit");
}

#[tokio::test]
async fn empty_image_collection_is_invalid_response() {
    let (client, _) = client_with(Behavior::Reply(200, r#"{"images":[]}"#), Some("k"));

    let result = client.generate_try_on("person", "garment", Category::Tops, None).await;

    assert!(matches!(result, Err(TryOnError::InvalidProviderResponse(_))));
}

#[tokio::test]
async fn malformed_response_shape_is_invalid_response() {
    let (client, _) = client_with(Behavior::Reply(200, r#"{"unexpected":true}"#), Some("k"));

    let result = client.generate_try_on("person", "garment", Category::Tops, None).await;

    assert!(matches!(result, Err(TryOnError::InvalidProviderResponse(_))));
}

// ============================================================================
// 失败分类映射
// ============================================================================

#[tokio::test]
async fn unauthorized_maps_to_invalid_credential() {
    let (client, _) = client_with(Behavior::Reply(401, "unauthorized"), Some("bad-key"));

    let result = client.generate_try_on("person", "garment", Category::Tops, None).await;

    assert!(matches!(result, Err(TryOnError::InvalidCredential)));
}

#[tokio::test]
async fn rate_limit_maps_to_rate_limited() {
    let (client, _) = client_with(Behavior::Reply(429, "slow down"), Some("k"));

    let result = client.generate_try_on("person", "garment", Category::Tops, None).await;

    assert!(matches!(result, Err(TryOnError::RateLimited)));
}

#[tokio::test]
async fn other_failure_carries_provider_message() {
    let (client, _) = client_with(Behavior::Reply(500, "model exploded"), Some("k"));

    let result = client.generate_try_on("person", "garment", Category::Tops, None).await;

    match result {
        Err(TryOnError::Provider(msg)) => assert!(msg.contains("model exploded")),
        other => panic!("期望 Provider 错误，实际: {:?}", other),
    }
}

#[tokio::test]
async fn transport_failure_maps_to_unreachable() {
    let (client, state) = client_with(Behavior::Unreachable("dns failure"), Some("k"));

    let result = client.generate_try_on("person", "garment", Category::Tops, None).await;

    assert!(matches!(result, Err(TryOnError::ProviderUnreachable(_))));
    assert_eq!(state.calls.load(Ordering::SeqCst), 1);
}

// ============================================================================
// 图生视频：同一契约形状
// ============================================================================

#[tokio::test]
async fn video_success_decodes_video_reference() {
    let (client, state) = client_with(
        Behavior::Reply(200, r#"{"video":"https://cdn.example/clip.mp4"}"#),
        Some("k"),
    );

    let result = client.generate_video("data:image/png;base64,AA").await.unwrap();

    assert_eq!(result.video, "https://cdn.example/clip.mp4");
    let endpoint = state.last_endpoint.lock().unwrap().clone().unwrap();
    assert_eq!(endpoint, "https://fal.run/fal-ai/image-to-video");
    let body = state.last_body.lock().unwrap().clone().unwrap();
    assert_eq!(body["image"], "data:image/png;base64,AA");
}

#[tokio::test]
async fn video_empty_source_fails_without_network() {
    let (client, state) = client_with(Behavior::Reply(200, "{}"), Some("k"));

    let result = client.generate_video("").await;

    assert!(matches!(result, Err(TryOnError::InvalidInput(_))));
    assert_eq!(state.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn video_shares_failure_taxonomy() {
    let (client, _) = client_with(Behavior::Reply(429, "slow down"), Some("k"));
    assert!(matches!(client.generate_video("img").await, Err(TryOnError::RateLimited)));

    let (client, _) = client_with(Behavior::Reply(200, r#"{"frames":[]}"#), Some("k"));
    assert!(matches!(
        client.generate_video("img").await,
        Err(TryOnError::InvalidProviderResponse(_))
    ));
}

// ============================================================================
// 凭证生命周期
// ============================================================================

#[tokio::test]
async fn credential_persists_across_sessions() {
    let medium = Arc::new(MemoryStore::new());

    let state = Arc::new(FakeState::default());
    let transport = FakeTransport {
        state: Arc::clone(&state),
        behavior: Behavior::Reply(200, OK_BODY),
    };
    let mut first =
        TryOnClient::new(Arc::clone(&medium), transport, ProviderConfig::default()).unwrap();
    assert!(!first.has_credential());
    first.initialize("session-key").unwrap();
    drop(first);

    // 新会话：凭证从存储端口恢复，无需再次 initialize
    let transport = FakeTransport {
        state: Arc::clone(&state),
        behavior: Behavior::Reply(200, OK_BODY),
    };
    let second =
        TryOnClient::new(Arc::clone(&medium), transport, ProviderConfig::default()).unwrap();
    assert!(second.has_credential());

    second.generate_try_on("person", "garment", Category::Tops, None).await.unwrap();
}

#[test]
fn credential_key_is_disjoint_from_gallery_key() {
    use tryon_studio::storage::{CREDENTIAL_KEY, GALLERY_KEY};
    assert_ne!(CREDENTIAL_KEY, GALLERY_KEY);

    let medium = Arc::new(MemoryStore::new());
    medium.set(CREDENTIAL_KEY, "key").unwrap();
    assert!(medium.get(GALLERY_KEY).unwrap().is_none());
}
