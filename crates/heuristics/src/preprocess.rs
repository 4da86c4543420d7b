use std::path::Path;

use image::{codecs::jpeg::JpegEncoder, imageops::FilterType, DynamicImage};

use crate::PredictError;

/// Side length of the square model input.
pub const INPUT_SIZE: u32 = 224;
const JPEG_QUALITY: u8 = 90;

/// Decode, crop-resize to `INPUT_SIZE`², and re-encode as JPEG.
///
/// The output is not used for class selection; this only proves the upload is
/// a readable image.
pub fn preprocess_image(path: &Path) -> Result<Vec<u8>, PredictError> {
    let access = |reason: String| PredictError::ImageAccess {
        path: path.to_path_buf(),
        reason,
    };

    let img = image::open(path).map_err(|e| access(e.to_string()))?;
    let resized = img.resize_to_fill(INPUT_SIZE, INPUT_SIZE, FilterType::Triangle);

    let mut out = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY);
    DynamicImage::ImageRgb8(resized.to_rgb8())
        .write_with_encoder(encoder)
        .map_err(|e| access(e.to_string()))?;

    Ok(out)
}
