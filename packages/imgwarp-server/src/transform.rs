use bytes::Bytes;
use image::RgbImage;

use imgwarp_core::{
    OutputFormat, TransformError, TransformKind, TransformParams, apply_transform, encode_image,
};

/// 元画像に 1 つの変換を適用し、出力フォーマットでエンコードする
pub fn render_transform(
    image: &RgbImage,
    params: &TransformParams,
    format: OutputFormat,
    quality: u8,
) -> Result<Bytes, TransformError> {
    let output = apply_transform(image, params)?;

    tracing::debug!(
        kind = params.kind().name(),
        width = output.width(),
        height = output.height(),
        "transform applied"
    );

    let encoded = encode_image(&output, format, quality)?;
    Ok(Bytes::from(encoded))
}

/// 出力ファイル名。表示名だけから決まり、リクエストをまたいで同じになる
pub fn output_file_name(kind: TransformKind, format: OutputFormat) -> String {
    format!("{}.{}", kind.display_name(), format.extension())
}
