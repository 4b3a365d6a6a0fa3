//! Conversion between raw RGBA clipboard images and PNG bytes.

use std::borrow::Cow;
use std::io::Cursor;

use arboard::ImageData;
use image::{ImageFormat, RgbaImage};
use pn_core::ports::ClipboardError;

pub fn rgba_to_png(image: &ImageData<'_>) -> Result<Vec<u8>, ClipboardError> {
    let width = u32::try_from(image.width)
        .map_err(|_| ClipboardError::Image(format!("width too large: {}", image.width)))?;
    let height = u32::try_from(image.height)
        .map_err(|_| ClipboardError::Image(format!("height too large: {}", image.height)))?;

    let buffer = RgbaImage::from_raw(width, height, image.bytes.to_vec()).ok_or_else(|| {
        ClipboardError::Image(format!(
            "{} bytes do not fit a {width}x{height} RGBA image",
            image.bytes.len()
        ))
    })?;

    let mut png = Vec::new();
    buffer
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| ClipboardError::Image(e.to_string()))?;
    Ok(png)
}

pub fn png_to_rgba(png_bytes: &[u8]) -> Result<ImageData<'static>, ClipboardError> {
    let decoded = image::load_from_memory_with_format(png_bytes, ImageFormat::Png)
        .map_err(|e| ClipboardError::Image(e.to_string()))?
        .to_rgba8();

    Ok(ImageData {
        width: decoded.width() as usize,
        height: decoded.height() as usize,
        bytes: Cow::Owned(decoded.into_raw()),
    })
}
