//! QOI to PNG re-encoding.
//!
//! Thin glue over the `qoi` decoder and the `png` encoder. The pixels are
//! passed through unchanged; only the container format changes.

use crate::{KernelError, Result, CODEC_FAILURE_LEN};

/// Decode a QOI image and re-encode it as an 8-bit PNG.
///
/// The PNG keeps the source channel count (RGB or RGBA). The returned
/// buffer is owned by the caller.
///
/// # Errors
/// - [`KernelError::Decode`] if `qoi_bytes` is not a valid QOI image
/// - [`KernelError::Encode`] if the PNG writer fails
pub fn compress(qoi_bytes: &[u8]) -> Result<Vec<u8>> {
    let (header, pixels) =
        qoi::decode_to_vec(qoi_bytes).map_err(|e| KernelError::Decode(e.to_string()))?;

    let color = match header.channels {
        qoi::Channels::Rgb => png::ColorType::Rgb,
        qoi::Channels::Rgba => png::ColorType::Rgba,
    };
    log::debug!(
        "compress: {}x{} {:?}, {} input bytes",
        header.width,
        header.height,
        color,
        qoi_bytes.len()
    );

    let mut png_bytes = Vec::new();
    let mut encoder = png::Encoder::new(&mut png_bytes, header.width, header.height);
    encoder.set_color(color);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder
        .write_header()
        .map_err(|e| KernelError::Encode(e.to_string()))?;
    writer
        .write_image_data(&pixels)
        .map_err(|e| KernelError::Encode(e.to_string()))?;
    writer
        .finish()
        .map_err(|e| KernelError::Encode(e.to_string()))?;

    Ok(png_bytes)
}

/// Length of a [`compress`] result, or [`CODEC_FAILURE_LEN`] on failure.
pub fn compressed_len(result: &Result<Vec<u8>>) -> i64 {
    match result {
        Ok(png_bytes) => png_bytes.len() as i64,
        Err(_) => CODEC_FAILURE_LEN,
    }
}
