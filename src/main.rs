use fashion_store::app::{images::storage::ImageStorage, AppState};
use fashion_store::build_router;
use fashion_store::infrastructure::{config::load_config, logger::Logger};
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    Logger::init(config.log_level());

    info!("启动商品目录服务...");

    let images = ImageStorage::new(
        config.storage.images_dir.clone(),
        config.storage.max_upload_bytes,
    );
    images.ensure_dir()?;

    let state = AppState::seeded(images);
    info!("✅ 已初始化 {} 个示例商品", state.product_service.len()?);

    let app = build_router(state, &config)?;

    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;

    info!("🚀 服务运行在 http://{}", addr);
    info!("📖 API 端点:");
    info!("   GET    /api/products           - 获取所有商品");
    info!("   POST   /api/products           - 创建商品");
    info!("   GET    /api/products/:id       - 获取商品");
    info!("   PATCH  /api/products/:id       - 更新商品");
    info!("   DELETE /api/products/:id       - 删除商品");
    info!("   POST   /api/upload             - 上传图片 (字段 image)");
    info!("   DELETE /api/images/:filename   - 删除图片");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("服务已停止");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("监听退出信号失败: {}", e);
    }
}
