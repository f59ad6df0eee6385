//! # 商品目录服务
//!
//! 内存中的商品目录 REST 服务，附带图片上传：
//! - `app`: 商品与图片的处理器、服务和模型
//! - `core`: 统一错误处理与中间件
//! - `infrastructure`: 配置与日志

pub mod app;
pub mod core;
pub mod infrastructure;
pub mod utils;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Router,
};
use std::{any::Any, time::Duration};
use tower_http::{
    catch_panic::CatchPanicLayer, cors::CorsLayer, services::ServeDir, timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::error;

use crate::app::{images, products, AppState};
use crate::core::{error::CoreError, error::fallback_handler, middleware::request_logging_middleware};
use crate::infrastructure::config::{Config, ConfigError};

/// multipart 边界和表头的额外余量
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// 构建完整路由
pub fn build_router(state: AppState, config: &Config) -> Result<Router, ConfigError> {
    let origin = config
        .cors
        .allowed_origin
        .parse::<HeaderValue>()
        .map_err(|e| ConfigError::Validation(format!("无效的跨域来源: {}", e)))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    let upload_limit = state.images.max_bytes().saturating_add(MULTIPART_OVERHEAD);
    let images_dir = state.images.dir().to_path_buf();

    let api = Router::new()
        .route(
            "/products",
            get(products::handler::list_products).post(products::handler::create_product),
        )
        .route(
            "/products/:id",
            get(products::handler::get_product)
                .patch(products::handler::update_product)
                .delete(products::handler::delete_product),
        )
        .route(
            "/upload",
            post(images::handler::upload_image).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/images/:filename", delete(images::handler::delete_image));

    let app = Router::new()
        .nest("/api", api)
        .nest_service("/images", ServeDir::new(images_dir))
        .fallback(fallback_handler)
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(TimeoutLayer::new(Duration::from_secs(config.http.timeout_seconds)))
        .layer(CatchPanicLayer::custom(panic_response))
        .with_state(state);

    Ok(app)
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "未知 panic".to_string()
    };
    error!("请求处理发生 panic: {}", detail);

    CoreError::internal(detail).into_response()
}
