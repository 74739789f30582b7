use crate::errors::TransformError;
use crate::transform::TransformKind;

/// 画像内の切り抜き矩形
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// 切り抜き座標 [y1:y2, x1:x2] を検証する
///
/// `0 <= x1 < x2 <= width` かつ `0 <= y1 < y2 <= height` であること
pub fn validate_crop_bounds(
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
    width: u32,
    height: u32,
) -> Result<CropRect, TransformError> {
    let invalid = || TransformError::InvalidParams(TransformKind::Crop);

    let (x1, y1, x2, y2) = (
        u32::try_from(x1).map_err(|_| invalid())?,
        u32::try_from(y1).map_err(|_| invalid())?,
        u32::try_from(x2).map_err(|_| invalid())?,
        u32::try_from(y2).map_err(|_| invalid())?,
    );

    if x1 >= x2 || y1 >= y2 || x2 > width || y2 > height {
        return Err(invalid());
    }

    Ok(CropRect {
        x: x1,
        y: y1,
        width: x2 - x1,
        height: y2 - y1,
    })
}

/// 拡大縮小の倍率を検証する（有限かつ正）
pub fn validate_scale_factors(scale_x: f32, scale_y: f32) -> Result<(), TransformError> {
    let valid = |s: f32| s.is_finite() && s > 0.0;
    if !valid(scale_x) || !valid(scale_y) {
        return Err(TransformError::InvalidParams(TransformKind::Scale));
    }
    Ok(())
}

/// JPEG 品質を検証する
pub fn validate_quality(quality: u8) -> Result<(), String> {
    if quality == 0 || quality > 100 {
        return Err(format!("quality must be 1-100, got {quality}"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_crop() {
        let rect = validate_crop_bounds(10, 10, 60, 40, 100, 50).unwrap();
        assert_eq!(
            rect,
            CropRect {
                x: 10,
                y: 10,
                width: 50,
                height: 30
            }
        );

        // 画像全体
        assert!(validate_crop_bounds(0, 0, 100, 50, 100, 50).is_ok());
    }

    #[test]
    fn test_invalid_crop() {
        // 逆転
        assert!(validate_crop_bounds(60, 10, 10, 40, 100, 50).is_err());
        // 面積 0
        assert!(validate_crop_bounds(10, 10, 10, 40, 100, 50).is_err());
        // 範囲外
        assert!(validate_crop_bounds(0, 0, 101, 50, 100, 50).is_err());
        assert!(validate_crop_bounds(0, 0, 100, 51, 100, 50).is_err());
        // 負の座標
        assert!(validate_crop_bounds(-1, 0, 10, 10, 100, 50).is_err());
    }

    #[test]
    fn test_scale_factors() {
        assert!(validate_scale_factors(2.0, 1.0).is_ok());
        assert!(validate_scale_factors(0.0, 1.0).is_err());
        assert!(validate_scale_factors(1.0, -0.5).is_err());
        assert!(validate_scale_factors(f32::NAN, 1.0).is_err());
    }

    #[test]
    fn test_quality() {
        assert!(validate_quality(95).is_ok());
        assert!(validate_quality(0).is_err());
        assert!(validate_quality(101).is_err());
    }
}
