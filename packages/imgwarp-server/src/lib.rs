pub mod config;
pub mod form;
pub mod handler;
pub mod render;
pub mod transform;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use config::AppConfig;
use imgwarp_core::{LocalStorage, OutputFormat};

/// ハンドラ間で共有する状態
#[derive(Clone)]
pub struct AppState {
    pub storage: LocalStorage,
    pub output_format: OutputFormat,
    pub quality: u8,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            storage: LocalStorage::new(&config.upload_dir, &config.processed_dir),
            output_format: config.output_format,
            quality: config.jpeg_quality,
        }
    }
}

/// ルーターを組み立てる
pub fn router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(handler::index))
        .route("/health", get(handler::health))
        .route("/process", post(handler::process))
        .route("/processed/{filename}", get(handler::serve_processed))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
