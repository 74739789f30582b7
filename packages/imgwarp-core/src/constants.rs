/// 出力画像の最大寸法（幅・高さ）
pub const MAX_DIMENSION: u32 = 16384;

/// 画像の最大ピクセル数（100MP、デコード時のメモリ枯渇を防止）
pub const MAX_PIXELS: u64 = 100_000_000;

/// デフォルト JPEG 品質（1-100）
pub const DEFAULT_QUALITY: u8 = 95;

/// 透視変換の変換元 4 点 (x, y)
pub const PERSPECTIVE_SOURCE: [(f32, f32); 4] =
    [(50.0, 50.0), (200.0, 50.0), (50.0, 200.0), (200.0, 200.0)];

/// 透視変換の変換先 4 点 (x, y)
pub const PERSPECTIVE_TARGET: [(f32, f32); 4] =
    [(10.0, 100.0), (180.0, 50.0), (50.0, 250.0), (200.0, 220.0)];
