//! 本地键值存储模块
//!
//! # 设计思路
//!
//! 画廊集合与服务凭证都持久化在设备本地，二者使用互不相关的键。
//! 为了让核心逻辑在没有真实存储介质的情况下也能测试，
//! 这里把存储抽象成一个极小的键值端口（get / set / remove），
//! 由上层注入具体实现，而不是在业务代码里直接调 `fs`。
//!
//! # 实现思路
//!
//! - `FileStore`：每个键对应目录下的一个文件，写入走「临时文件 + rename」，
//!   介质拒绝写入（如配额不足）时旧值保持完整，不会出现半截数据。
//! - `MemoryStore`：测试用内存实现，可开关「写入必败」来覆盖失败路径。
//! - 所有可能失败的操作均返回 `Result`，不使用 `expect()` / `unwrap()`。

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// 画廊集合的持久化键。
pub const GALLERY_KEY: &str = "gallery";
/// 生成服务凭证的持久化键，与画廊键互不相关。
pub const CREDENTIAL_KEY: &str = "provider_key";

/// 存储层错误。
///
/// 该类型会在画廊/客户端模块被上转为各自的业务错误。
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("存储写入失败: {0}")]
    Write(String),

    #[error("存储读取失败: {0}")]
    Read(String),
}

/// 键值存储端口。
///
/// 核心模块只依赖这三个操作；具体介质（文件 / 内存 / 其它）由注入方决定。
/// 没有跨进程隔离：多个写者并发时后写覆盖先写（已知限制）。
pub trait KeyValueStore {
    /// 读取键对应的文本值；键不存在返回 `Ok(None)`。
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// 写入键值，整体替换旧值。
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// 删除键；键不存在不算错误。
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// 画廊与客户端可共享同一介质：`Arc<S>` 透传到内层实现。
impl<S: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

// ============================================================================
// 文件实现
// ============================================================================

/// 文件键值存储：目录下每个键一个文件。
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// 在指定目录创建存储，目录不存在时自动创建。
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .map_err(|e| StorageError::Write(format!("创建存储目录失败: {}", e)))?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| StorageError::Read(format!("读取 '{}' 失败: {}", key, e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        let tmp = self.dir.join(format!("{}.json.tmp", key));

        // 先写临时文件再原子替换；任一步失败时旧文件原样保留
        fs::write(&tmp, value)
            .map_err(|e| StorageError::Write(format!("写入 '{}' 失败: {}", key, e)))?;
        fs::rename(&tmp, &path).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            StorageError::Write(format!("提交 '{}' 失败: {}", key, e))
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(());
        }
        fs::remove_file(&path)
            .map_err(|e| StorageError::Write(format!("删除 '{}' 失败: {}", key, e)))
    }
}

// ============================================================================
// 内存实现（测试 / 临时会话）
// ============================================================================

/// 内存键值存储。
///
/// `fail_writes` 打开后所有写入返回错误，用于验证
/// 「写入失败时旧状态保持不变」这一契约。
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 切换「写入必败」模式。
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| StorageError::Read("存储锁已中毒".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Write("存储介质拒绝写入".to_string()));
        }
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| StorageError::Write("存储锁已中毒".to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Write("存储介质拒绝写入".to_string()));
        }
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| StorageError::Write("存储锁已中毒".to_string()))?;
        entries.remove(key);
        Ok(())
    }
}
