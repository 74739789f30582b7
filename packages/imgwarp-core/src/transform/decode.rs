use crate::constants::MAX_PIXELS;
use crate::errors::TransformError;
use crate::transform::orientation::{Orientation, apply_orientation, read_orientation};
use image::{ImageReader, RgbImage};
use std::io::Cursor;

/// 画像バイト列をデコードし、8bit RGB の画像を返す
///
/// フォーマットは拡張子ではなく内容から推測する。
/// EXIF Orientation があれば正立させてから返す。
pub fn decode_image(input: &[u8]) -> Result<RgbImage, TransformError> {
    // ピクセルを展開する前にヘッダのサイズだけで上限を検証する
    let (width, height) = guessed_reader(input)?
        .into_dimensions()
        .map_err(|e| TransformError::Decode(e.to_string()))?;
    validate_source_dimensions(width, height)?;

    let img = guessed_reader(input)?
        .decode()
        .map_err(|e| TransformError::Decode(e.to_string()))?;

    let orientation = read_orientation(input).unwrap_or(Orientation::Normal);
    Ok(apply_orientation(img.to_rgb8(), orientation))
}

/// 内容からフォーマットを推測したリーダーを作る
fn guessed_reader(input: &[u8]) -> Result<ImageReader<Cursor<&[u8]>>, TransformError> {
    let reader = ImageReader::new(Cursor::new(input))
        .with_guessed_format()
        .map_err(|e| TransformError::Decode(format!("failed to guess format: {e}")))?;

    if reader.format().is_none() {
        return Err(TransformError::Decode("unrecognized image format".to_string()));
    }
    Ok(reader)
}

/// ソース画像の総ピクセル数を検証し、メモリ枯渇を防ぐ
fn validate_source_dimensions(width: u32, height: u32) -> Result<(), TransformError> {
    let total_pixels = width as u64 * height as u64;
    if total_pixels > MAX_PIXELS {
        return Err(TransformError::ResolutionTooLarge { width, height });
    }
    Ok(())
}
