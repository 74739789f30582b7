//! 変換行列の構築
//!
//! すべて「入力座標 → 出力座標」の順方向写像として組み立てる。
//! 逆写像によるサンプリングは `imageproc::geometric_transformations::warp` が行う。

use imageproc::geometric_transformations::Projection;

use crate::constants::{PERSPECTIVE_SOURCE, PERSPECTIVE_TARGET};
use crate::errors::TransformError;
use crate::transform::TransformKind;
use crate::transform::dimensions::rotation_center;

/// (tx, ty) だけ平行移動する
pub fn translation(tx: i32, ty: i32) -> Projection {
    Projection::translate(tx as f32, ty as f32)
}

/// 画像中心まわりに `angle` 度（反時計回り、倍率 1.0）回転する
pub fn rotation(width: u32, height: u32, angle: i32) -> Result<Projection, TransformError> {
    let (cx, cy) = rotation_center(width, height);
    let theta = (angle as f64).to_radians();
    let (a, b) = (theta.cos() as f32, theta.sin() as f32);

    affine([
        [a, b, (1.0 - a) * cx - b * cy],
        [-b, a, b * cx + (1.0 - a) * cy],
    ])
    .ok_or(TransformError::InvalidParams(TransformKind::Rotate))
}

/// 平行移動成分を持たない 2x2 のせん断
pub fn shear(shear_x: f32, shear_y: f32) -> Result<Projection, TransformError> {
    affine([[1.0, shear_x, 0.0], [shear_y, 1.0, 0.0]])
        .ok_or(TransformError::InvalidParams(TransformKind::Shear))
}

/// 固定の 4 点対応から求めた透視変換
pub fn perspective() -> Result<Projection, TransformError> {
    Projection::from_control_points(PERSPECTIVE_SOURCE, PERSPECTIVE_TARGET).ok_or_else(|| {
        TransformError::ProcessingFailed("degenerate perspective control points".to_string())
    })
}

/// 2x3 アフィン行列から Projection を作る。非正則なら None
fn affine(m: [[f32; 3]; 2]) -> Option<Projection> {
    Projection::from_matrix([
        m[0][0], m[0][1], m[0][2], //
        m[1][0], m[1][1], m[1][2], //
        0.0, 0.0, 1.0,
    ])
}
