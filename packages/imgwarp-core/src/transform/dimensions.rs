/// 倍率を軸ごとに適用して新しい寸法を計算する
///
/// 各軸 round(元の寸法 × 倍率)。0px になる場合もそのまま返すので、
/// 呼び出し側で検証すること
pub fn calculate_scaled_dimensions(
    src_w: u32,
    src_h: u32,
    scale_x: f32,
    scale_y: f32,
) -> (u32, u32) {
    (apply_scale(src_w, scale_x), apply_scale(src_h, scale_y))
}

fn apply_scale(src: u32, scale: f32) -> u32 {
    let scaled = (src as f64 * scale as f64).round();
    if scaled <= 0.0 {
        0
    } else if scaled >= u32::MAX as f64 {
        u32::MAX
    } else {
        scaled as u32
    }
}

/// 回転の中心（整数除算）
pub fn rotation_center(width: u32, height: u32) -> (f32, f32) {
    ((width / 2) as f32, (height / 2) as f32)
}
