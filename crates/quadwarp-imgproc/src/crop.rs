use quadwarp_image::{Image, ImageSize, Point2, Size2};

use crate::{error::ImgprocError, parallel};

/// Size of the image produced by [`crop_image_inclusive`] for a requested size.
///
/// Both sides are one pixel larger than the truncated request.
///
/// # Errors
///
/// [`ImgprocError::InvalidGeometry`] if a side is negative, not finite or too large to index.
pub fn inclusive_crop_size(size: Size2) -> Result<ImageSize, ImgprocError> {
    let side = |v: f64| -> Option<usize> {
        if !v.is_finite() || v < 0.0 || v >= usize::MAX as f64 {
            return None;
        }
        (v as usize).checked_add(1)
    };

    match (side(size.width), side(size.height)) {
        (Some(width), Some(height)) => Ok(ImageSize { width, height }),
        _ => Err(ImgprocError::InvalidGeometry(format!(
            "crop size {size:?} cannot be allocated"
        ))),
    }
}

/// Crop a region of an image, keeping the edge pixel row and column inclusive.
///
/// The output is `(trunc(width) + 1) x (trunc(height) + 1)`. For every integer `x < width` and
/// `y < height` the output pixel `(x, y)` is the source pixel at
/// `(trunc(start.x + x), trunc(start.y + y))`; the remaining pixels keep the default value.
///
/// # Arguments
///
/// * `src` - The source image to crop.
/// * `start` - The top-left corner of the region, non-negative.
/// * `size` - The size of the region, non-negative.
///
/// # Errors
///
/// * [`ImgprocError::EmptyInput`] if the source has no pixels.
/// * [`ImgprocError::InvalidGeometry`] if the start or size are negative or not finite.
/// * [`ImgprocError::OutOfBounds`] if the region reads outside the source.
///
/// # Examples
///
/// ```rust
/// use quadwarp_image::{Image, ImageSize, Point2, Size2};
/// use quadwarp_imgproc::crop::crop_image_inclusive;
///
/// let image = Image::<_, 1>::new(ImageSize { width: 4, height: 4 }, vec![
///     0u8, 1, 2, 3,
///     4u8, 5, 6, 7,
///     8u8, 9, 10, 11,
///     12u8, 13, 14, 15
/// ]).unwrap();
///
/// let cropped = crop_image_inclusive(&image, Point2::new(1.0, 1.0), Size2::new(2.0, 2.0)).unwrap();
///
/// assert_eq!(cropped.as_slice(), &[5u8, 6, 0, 9, 10, 0, 0, 0, 0]);
/// ```
pub fn crop_image_inclusive<T, const C: usize>(
    src: &Image<T, C>,
    start: Point2,
    size: Size2,
) -> Result<Image<T, C>, ImgprocError>
where
    T: Copy + Default + Send + Sync,
{
    if src.size().is_empty() {
        return Err(ImgprocError::EmptyInput(src.width(), src.height()));
    }

    if !start.is_finite() || !size.is_finite() {
        return Err(ImgprocError::InvalidGeometry(format!(
            "non finite crop region {start:?} {size:?}"
        )));
    }

    if start.x < 0.0 || start.y < 0.0 || size.width < 0.0 || size.height < 0.0 {
        return Err(ImgprocError::InvalidGeometry(format!(
            "negative crop region {start:?} {size:?}"
        )));
    }

    let mut dst = Image::from_size_val(inclusive_crop_size(size)?, T::default())?;

    // number of integer offsets strictly below the requested extent
    let (cols, rows) = (size.width.ceil() as usize, size.height.ceil() as usize);

    parallel::par_try_iter_rows(&mut dst, |y, dst_row| {
        if y >= rows {
            return Ok(());
        }

        let fy = (y as f64 + start.y).trunc();
        dst_row
            .chunks_exact_mut(C)
            .take(cols)
            .enumerate()
            .try_for_each(|(x, dst_pixel)| -> Result<(), ImgprocError> {
                let fx = (x as f64 + start.x).trunc();
                // float casts saturate, so huge offsets stay out of bounds
                let src_pixel = src.get_pixel(fx as usize, fy as usize).map_err(|_| {
                    ImgprocError::OutOfBounds {
                        x: fx as i64,
                        y: fy as i64,
                        width: src.width(),
                        height: src.height(),
                    }
                })?;
                dst_pixel.copy_from_slice(src_pixel);
                Ok(())
            })
    })?;

    Ok(dst)
}
