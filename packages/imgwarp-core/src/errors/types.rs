use crate::transform::TransformKind;
use thiserror::Error;

/// ストレージアクセスエラー
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("object not found: {key}")]
    NotFound { key: String },

    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 画像変換エラー
#[derive(Debug, Error)]
pub enum TransformError {
    /// 変換パラメータの欠落・解析失敗。メッセージは変換種別ごとに固定
    #[error("{}", .0.invalid_params_message())]
    InvalidParams(TransformKind),

    #[error("decode failed: {0}")]
    Decode(String),

    #[error("image resolution exceeds maximum ({width}x{height})")]
    ResolutionTooLarge { width: u32, height: u32 },

    #[error("processing failed: {0}")]
    ProcessingFailed(String),
}
