use crate::errors::TransformError;
use crate::transform::params::OutputFormat;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::RgbImage;
use std::io::Cursor;

/// 画像をエンコードする
pub fn encode_image(
    img: &RgbImage,
    format: OutputFormat,
    quality: u8,
) -> Result<Vec<u8>, TransformError> {
    if img.width() == 0 || img.height() == 0 {
        return Err(TransformError::ProcessingFailed(
            "cannot encode an empty image".to_string(),
        ));
    }

    let mut buf = Cursor::new(Vec::new());

    match format {
        OutputFormat::Jpeg => {
            let encoder = JpegEncoder::new_with_quality(&mut buf, quality);
            img.write_with_encoder(encoder)
                .map_err(|e| TransformError::ProcessingFailed(format!("JPEG encode failed: {e}")))?;
        }
        OutputFormat::Png => {
            // PNG は可逆なので quality は無視
            let encoder = PngEncoder::new(&mut buf);
            img.write_with_encoder(encoder)
                .map_err(|e| TransformError::ProcessingFailed(format!("PNG encode failed: {e}")))?;
        }
    }

    Ok(buf.into_inner())
}
