use fast_image_resize::{
    images::{Image as FrImage, ImageRef},
    FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer,
};
use quadwarp_image::{Bgra8, ImageSize};

use crate::error::ImgprocError;

/// Size of an image downscaled by `factor`, truncating each side.
///
/// Factors below one enlarge the image.
///
/// # Errors
///
/// [`ImgprocError::InvalidScalingFactor`] if `factor` is not a positive finite number or the
/// scaled pixel count overflows `usize`.
///
/// # Example
///
/// ```
/// use quadwarp_image::ImageSize;
/// use quadwarp_imgproc::resize::scaled_size;
///
/// let size = scaled_size(ImageSize { width: 11, height: 8 }, 2.0).unwrap();
/// assert_eq!(size, ImageSize { width: 5, height: 4 });
/// ```
pub fn scaled_size(size: ImageSize, factor: f64) -> Result<ImageSize, ImgprocError> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(ImgprocError::InvalidScalingFactor(factor));
    }

    let (width, height) = (size.width as f64 / factor, size.height as f64 / factor);
    // float to int casts saturate, so reject sides that do not fit first
    if width >= usize::MAX as f64 || height >= usize::MAX as f64 {
        return Err(ImgprocError::InvalidScalingFactor(factor));
    }

    let scaled = ImageSize {
        width: width as usize,
        height: height as usize,
    };
    match scaled.checked_len(1) {
        Some(_) => Ok(scaled),
        None => Err(ImgprocError::InvalidScalingFactor(factor)),
    }
}

/// Resize a BGRA image into `dst` using the [fast_image_resize](https://crates.io/crates/fast_image_resize) crate.
///
/// The image is resampled with a Lanczos3 convolution, treating the fourth channel as alpha.
///
/// # Arguments
///
/// * `src` - The input image.
/// * `dst` - The output image, its size selects the target size.
///
/// # Errors
///
/// [`ImgprocError::EmptyInput`] if either image has no pixels, [`ImgprocError::Resize`] if the
/// backend fails.
///
/// # Example
///
/// ```
/// use quadwarp_image::{Bgra8, ImageSize};
/// use quadwarp_imgproc::resize::resize_bgra8;
///
/// let image = Bgra8::from_size_val(ImageSize { width: 4, height: 6 }, 0).unwrap();
/// let mut image_resized = Bgra8::from_size_val(ImageSize { width: 2, height: 3 }, 0).unwrap();
///
/// resize_bgra8(&image, &mut image_resized).unwrap();
///
/// assert_eq!(image_resized.size().width, 2);
/// assert_eq!(image_resized.size().height, 3);
/// ```
pub fn resize_bgra8(src: &Bgra8, dst: &mut Bgra8) -> Result<(), ImgprocError> {
    if src.size().is_empty() {
        return Err(ImgprocError::EmptyInput(src.width(), src.height()));
    }
    if dst.size().is_empty() {
        return Err(ImgprocError::EmptyInput(dst.width(), dst.height()));
    }

    let src_image = ImageRef::new(
        src.width() as u32,
        src.height() as u32,
        src.as_slice(),
        PixelType::U8x4,
    )
    .map_err(|e| ImgprocError::Resize(e.to_string()))?;

    let (dst_width, dst_height) = (dst.width() as u32, dst.height() as u32);
    let mut dst_image =
        FrImage::from_slice_u8(dst_width, dst_height, dst.as_slice_mut(), PixelType::U8x4)
            .map_err(|e| ImgprocError::Resize(e.to_string()))?;

    let options =
        ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Lanczos3));

    Resizer::new()
        .resize(&src_image, &mut dst_image, &options)
        .map_err(|e| ImgprocError::Resize(e.to_string()))?;

    Ok(())
}
