use crate::constants::{MAX_DIMENSION, MAX_PIXELS};
use crate::errors::TransformError;
use crate::transform::TransformKind;
use crate::transform::dimensions::calculate_scaled_dimensions;
use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer, images::Image};
use image::RgbImage;

/// 軸ごとの倍率で画像を拡大縮小する
pub fn scale_image(img: &RgbImage, scale_x: f32, scale_y: f32) -> Result<RgbImage, TransformError> {
    let (target_w, target_h) = calculate_scaled_dimensions(img.width(), img.height(), scale_x, scale_y);
    if target_w == 0 || target_h == 0 {
        return Err(TransformError::InvalidParams(TransformKind::Scale));
    }
    if target_w > MAX_DIMENSION || target_h > MAX_DIMENSION {
        return Err(TransformError::ResolutionTooLarge {
            width: target_w,
            height: target_h,
        });
    }

    resize_image(img, target_w, target_h)
}

/// 画像をリサイズする
///
/// fast_image_resize を使用し、Bilinear フィルタで補間する
pub fn resize_image(
    img: &RgbImage,
    target_w: u32,
    target_h: u32,
) -> Result<RgbImage, TransformError> {
    // ピクセル数チェック
    let total_pixels = target_w as u64 * target_h as u64;
    if total_pixels > MAX_PIXELS {
        return Err(TransformError::ResolutionTooLarge {
            width: target_w,
            height: target_h,
        });
    }

    if (target_w, target_h) == img.dimensions() {
        return Ok(img.clone());
    }

    let src_image = Image::from_vec_u8(
        img.width(),
        img.height(),
        img.as_raw().clone(),
        PixelType::U8x3,
    )
    .map_err(|e| TransformError::ProcessingFailed(format!("failed to create source image: {e}")))?;

    let mut dst_image = Image::new(target_w, target_h, PixelType::U8x3);

    let mut resizer = Resizer::new();
    resizer
        .resize(
            &src_image,
            &mut dst_image,
            &ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Bilinear)),
        )
        .map_err(|e| TransformError::ProcessingFailed(format!("resize failed: {e}")))?;

    RgbImage::from_raw(target_w, target_h, dst_image.into_vec()).ok_or_else(|| {
        TransformError::ProcessingFailed("failed to convert resized image".to_string())
    })
}
