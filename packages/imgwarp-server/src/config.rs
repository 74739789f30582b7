use std::path::PathBuf;

use imgwarp_core::{DEFAULT_QUALITY, OutputFormat, validate_quality};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
const DEFAULT_UPLOAD_DIR: &str = "uploads";
const DEFAULT_PROCESSED_DIR: &str = "processed";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;
const DEFAULT_LOG_LEVEL: &str = "info";

/// サーバー設定
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub upload_dir: PathBuf,
    pub processed_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub jpeg_quality: u8,
    pub output_format: OutputFormat,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            processed_dir: PathBuf::from(DEFAULT_PROCESSED_DIR),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            jpeg_quality: DEFAULT_QUALITY,
            output_format: OutputFormat::Jpeg,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl AppConfig {
    /// 環境変数から AppConfig を作成する。
    ///
    /// すべて任意。未設定ならデフォルト値を使う:
    /// - BIND_ADDR (0.0.0.0:5000)
    /// - UPLOAD_DIR (uploads)
    /// - PROCESSED_DIR (processed)
    /// - MAX_UPLOAD_BYTES (16MiB)
    /// - JPEG_QUALITY (95)
    /// - OUTPUT_FORMAT (jpg)
    /// - LOG_LEVEL (info)
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let mut config = Self::default();

        if let Some(addr) = lookup("BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Some(dir) = lookup("UPLOAD_DIR") {
            config.upload_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup("PROCESSED_DIR") {
            config.processed_dir = PathBuf::from(dir);
        }
        if let Some(value) = lookup("MAX_UPLOAD_BYTES") {
            config.max_upload_bytes = value
                .trim()
                .parse()
                .map_err(|_| format!("MAX_UPLOAD_BYTES is not a valid size: {value}"))?;
        }
        if let Some(value) = lookup("JPEG_QUALITY") {
            let quality: u8 = value
                .trim()
                .parse()
                .map_err(|_| format!("JPEG_QUALITY is not a valid number: {value}"))?;
            validate_quality(quality).map_err(|e| format!("JPEG_QUALITY: {e}"))?;
            config.jpeg_quality = quality;
        }
        if let Some(value) = lookup("OUTPUT_FORMAT") {
            config.output_format = OutputFormat::from_str(value.trim())
                .ok_or_else(|| format!("OUTPUT_FORMAT is not supported: {value}"))?;
        }
        if let Some(level) = lookup("LOG_LEVEL") {
            config.log_level = level;
        }

        Ok(config)
    }
}
