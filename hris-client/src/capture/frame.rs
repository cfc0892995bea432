//! Frame → JPEG

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, RgbaImage, imageops};

use super::CaptureError;
use crate::ClientResult;

/// JPEG quality for captured photos
pub const JPEG_QUALITY: u8 = 85;

pub const JPEG_MIME: &str = "image/jpeg";

/// Draw `frame` onto an RGB canvas and encode it as JPEG.
///
/// Front-camera frames are mirrored so the photo matches the preview.
pub fn encode_jpeg(frame: &super::Frame, mirror: bool) -> ClientResult<Vec<u8>> {
    if frame.width == 0 || frame.height == 0 {
        return Err(CaptureError::InvalidFrame {
            width: frame.width,
            height: frame.height,
        }
        .into());
    }
    let rgba = RgbaImage::from_raw(frame.width, frame.height, frame.rgba.clone()).ok_or(
        CaptureError::InvalidFrame {
            width: frame.width,
            height: frame.height,
        },
    )?;
    let mut canvas = DynamicImage::ImageRgba8(rgba).to_rgb8();
    if mirror {
        imageops::flip_horizontal_in_place(&mut canvas);
    }

    let mut buffer = Vec::new();
    {
        let mut cursor = Cursor::new(&mut buffer);
        let encoder = JpegEncoder::new_with_quality(&mut cursor, JPEG_QUALITY);
        canvas.write_with_encoder(encoder)?;
    }
    Ok(buffer)
}
