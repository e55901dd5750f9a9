use png::{BitDepth, ColorType, Compression, Encoder};
use quadwarp_image::Bgra8;
use serde::{Deserialize, Serialize};

use crate::error::IoError;

/// The compressed formats an image can be encoded to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodeFormat {
    /// Lossless PNG, 8-bit RGBA.
    #[default]
    Png,
    /// Baseline JPEG; the alpha channel is dropped.
    Jpeg,
    /// Lossless WEBP, 8-bit RGBA.
    Webp,
}

impl std::fmt::Display for EncodeFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            EncodeFormat::Png => "png",
            EncodeFormat::Jpeg => "jpeg",
            EncodeFormat::Webp => "webp",
        };
        f.write_str(name)
    }
}

/// Encodes the given BGRA image with the requested format.
///
/// # Arguments
///
/// - `image` - The image to encode.
/// - `format` - The target format.
/// - `quality` - The quality of the encoding, range from 0 (lowest) to 100 (highest). Only
///   JPEG is lossy; PNG uses it to pick a compression level and WEBP ignores it.
///
/// # Returns
///
/// The encoded bytes.
///
/// # Example
///
/// ```
/// use quadwarp_image::{Bgra8, ImageSize};
/// use quadwarp_io::{encode_image_bgra8, EncodeFormat};
///
/// let image = Bgra8::from_size_val(ImageSize { width: 4, height: 4 }, 255).unwrap();
/// let bytes = encode_image_bgra8(&image, EncodeFormat::Png, 100).unwrap();
///
/// assert_eq!(&bytes[..4], b"\x89PNG");
/// ```
pub fn encode_image_bgra8(
    image: &Bgra8,
    format: EncodeFormat,
    quality: u8,
) -> Result<Vec<u8>, IoError> {
    if image.size().is_empty() {
        return Err(IoError::EmptyImage(image.width(), image.height()));
    }

    match format {
        EncodeFormat::Png => encode_image_png_bgra8(image, quality),
        EncodeFormat::Jpeg => encode_image_jpeg_bgra8(image, quality),
        EncodeFormat::Webp => encode_image_webp_bgra8(image),
    }
}

/// Encodes the given BGRA image as an 8-bit RGBA PNG.
///
/// A `quality` below 50 trades size for speed.
pub fn encode_image_png_bgra8(image: &Bgra8, quality: u8) -> Result<Vec<u8>, IoError> {
    let rgba = bgra_to_rgba(image.as_slice());
    let mut buf = Vec::new();

    {
        let mut encoder = Encoder::new(&mut buf, image.width() as u32, image.height() as u32);
        encoder.set_color(ColorType::Rgba);
        encoder.set_depth(BitDepth::Eight);
        encoder.set_compression(if quality < 50 {
            Compression::Fast
        } else {
            Compression::Default
        });

        let mut writer = encoder
            .write_header()
            .map_err(|e| IoError::PngEncodingError(e.to_string()))?;
        writer
            .write_image_data(&rgba)
            .map_err(|e| IoError::PngEncodingError(e.to_string()))?;
        writer
            .finish()
            .map_err(|e| IoError::PngEncodingError(e.to_string()))?;
    }

    Ok(buf)
}

/// Encodes the given BGRA image as a JPEG, discarding alpha.
///
/// `quality` is clamped to `1..=100`.
pub fn encode_image_jpeg_bgra8(image: &Bgra8, quality: u8) -> Result<Vec<u8>, IoError> {
    let (width, height) = (image.width(), image.height());
    if width > u16::MAX as usize || height > u16::MAX as usize {
        return Err(IoError::ImageTooLarge(width, height, "jpeg"));
    }

    let mut buf = Vec::new();
    let encoder = jpeg_encoder::Encoder::new(&mut buf, quality.clamp(1, 100));
    encoder.encode(
        image.as_slice(),
        width as u16,
        height as u16,
        jpeg_encoder::ColorType::Bgra,
    )?;

    Ok(buf)
}

/// Encodes the given BGRA image as a lossless WEBP.
pub fn encode_image_webp_bgra8(image: &Bgra8) -> Result<Vec<u8>, IoError> {
    let rgba = bgra_to_rgba(image.as_slice());
    let mut buf = Vec::new();

    image_webp::WebPEncoder::new(&mut buf)
        .encode(
            &rgba,
            image.width() as u32,
            image.height() as u32,
            image_webp::ColorType::Rgba8,
        )
        .map_err(|e| IoError::WebpEncodingError(e.to_string()))?;

    Ok(buf)
}

// swaps the blue and red channel of every pixel
fn bgra_to_rgba(src: &[u8]) -> Vec<u8> {
    src.chunks_exact(4)
        .flat_map(|p| [p[2], p[1], p[0], p[3]])
        .collect()
}
