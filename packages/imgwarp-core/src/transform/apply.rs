use image::imageops::{crop_imm, flip_horizontal};
use image::{Rgb, RgbImage};
use imageproc::geometric_transformations::{Interpolation, Projection, warp};

use crate::errors::TransformError;
use crate::transform::geometry;
use crate::transform::params::TransformParams;
use crate::transform::resize::scale_image;
use crate::validation::validate_crop_bounds;

/// ワープで空いた領域の塗りつぶし色
const BORDER_FILL: Rgb<u8> = Rgb([0, 0, 0]);

/// 元画像に 1 つの変換を適用し、新しい画像を返す
///
/// 元画像は変更しない。複数の変換はそれぞれ同じ元画像から独立に計算する。
pub fn apply_transform(img: &RgbImage, params: &TransformParams) -> Result<RgbImage, TransformError> {
    let (width, height) = img.dimensions();

    let output = match *params {
        TransformParams::Translate { tx, ty } => warp_same_size(img, &geometry::translation(tx, ty)),
        TransformParams::Rotate { angle } => {
            warp_same_size(img, &geometry::rotation(width, height, angle)?)
        }
        TransformParams::Scale { scale_x, scale_y } => scale_image(img, scale_x, scale_y)?,
        TransformParams::Shear { shear_x, shear_y } => {
            warp_same_size(img, &geometry::shear(shear_x, shear_y)?)
        }
        TransformParams::Flip => flip_horizontal(img),
        TransformParams::Crop { x1, y1, x2, y2 } => {
            let rect = validate_crop_bounds(x1, y1, x2, y2, width, height)?;
            crop_imm(img, rect.x, rect.y, rect.width, rect.height).to_image()
        }
        TransformParams::Perspective => warp_same_size(img, &geometry::perspective()?),
    };

    Ok(output)
}

/// 入力と同じキャンバスサイズでワープする（双線形補間、黒で塗りつぶし）
fn warp_same_size(img: &RgbImage, projection: &Projection) -> RgbImage {
    warp(img, projection, Interpolation::Bilinear, BORDER_FILL)
}
