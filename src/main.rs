//! # 虚拟试衣核心 — 演示入口
//!
//! 本文件仅负责日志初始化与模块拼装，业务逻辑分布在库模块中，
//! 详见 `lib.rs` 架构文档。
//!
//! 用法：`tryon-studio <人物图片> <服装图片> [类目]`
//! 凭证来自 `TRYON_KEY` 环境变量，或上次会话持久化的值。

use std::path::PathBuf;
use std::process::ExitCode;

use tryon_studio::error::AppError;
use tryon_studio::gallery::{Category, GalleryStore};
use tryon_studio::media;
use tryon_studio::storage::FileStore;
use tryon_studio::tryon::{HttpTransport, ProviderConfig, TryOnClient};

fn data_dir() -> PathBuf {
    std::env::var_os("TRYON_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(".tryon-studio"))
}

async fn run(person_path: &str, garment_path: &str, category: Category) -> Result<(), AppError> {
    let person = media::to_data_url(&std::fs::read(person_path)?)?;
    let garment = media::to_data_url(&std::fs::read(garment_path)?)?;

    let dir = data_dir();
    let mut client = TryOnClient::new(FileStore::new(&dir)?, HttpTransport::new(), ProviderConfig::default())?;

    // 环境变量里的凭证优先；没有就沿用上次持久化的
    if let Ok(key) = std::env::var("TRYON_KEY") {
        client.initialize(&key)?;
    }

    let result = client.generate_try_on(&person, &garment, category, None).await?;

    let gallery = GalleryStore::new(FileStore::new(&dir)?);
    let item = gallery.save(&result.image, category)?;

    println!("已保存到画廊: id={}", item.id);
    println!("结果图片引用: {}", item.image);
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let (person, garment) = match (args.get(1), args.get(2)) {
        (Some(p), Some(g)) => (p.clone(), g.clone()),
        _ => {
            eprintln!("用法: tryon-studio <人物图片> <服装图片> [tops|bottoms|one-pieces]");
            return ExitCode::FAILURE;
        }
    };
    let category = match args.get(3) {
        Some(raw) => match raw.parse::<Category>() {
            Ok(c) => c,
            Err(msg) => {
                eprintln!("{}", msg);
                return ExitCode::FAILURE;
            }
        },
        None => Category::default(),
    };

    match run(&person, &garment, category).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("❌ {}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
