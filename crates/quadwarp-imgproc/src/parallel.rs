use rayon::prelude::*;

use quadwarp_image::Image;

/// Apply a fallible function to each row of the image in parallel.
///
/// The closure receives the row index and the interleaved row data. Each row is handed to
/// exactly one worker and the call returns once every row has been visited or the first
/// error was observed.
///
/// The image must not be empty.
pub fn par_try_iter_rows<T, const C: usize, E>(
    dst: &mut Image<T, C>,
    f: impl Fn(usize, &mut [T]) -> Result<(), E> + Send + Sync,
) -> Result<(), E>
where
    T: Send,
    E: Send,
{
    let row_len = dst.cols() * C;
    dst.as_slice_mut()
        .par_chunks_exact_mut(row_len)
        .enumerate()
        .try_for_each(|(y, row)| f(y, row))
}

/// Apply a function to each pixel of the image in parallel, passing its `(x, y)` position.
///
/// The image must not be empty.
pub fn par_try_iter_pixels<T, const C: usize, E>(
    dst: &mut Image<T, C>,
    f: impl Fn(usize, usize, &mut [T]) -> Result<(), E> + Send + Sync,
) -> Result<(), E>
where
    T: Send,
    E: Send,
{
    par_try_iter_rows(dst, |y, row| {
        row.chunks_exact_mut(C)
            .enumerate()
            .try_for_each(|(x, pixel)| f(x, y, pixel))
    })
}

#[cfg(test)]
mod tests {
    use quadwarp_image::{Bgra8, ImageError};

    #[test]
    fn par_pixels_visit_all() -> Result<(), ImageError> {
        let mut image = Bgra8::from_size_val([3, 2].into(), 0)?;

        super::par_try_iter_pixels(&mut image, |x, y, pixel| {
            pixel.copy_from_slice(&[x as u8, y as u8, 0, 255]);
            Ok::<(), ImageError>(())
        })?;

        assert_eq!(image.get_pixel(2, 1)?, &[2, 1, 0, 255]);
        assert_eq!(image.get_pixel(0, 1)?, &[0, 1, 0, 255]);
        Ok(())
    }

    #[test]
    fn par_rows_stop_on_error() -> Result<(), ImageError> {
        let mut image = Bgra8::from_size_val([2, 4].into(), 0)?;

        let res = super::par_try_iter_rows(&mut image, |y, _row| {
            if y == 2 {
                Err(ImageError::PixelIndexOutOfBounds(0, y, 2, 4))
            } else {
                Ok(())
            }
        });

        assert_eq!(res, Err(ImageError::PixelIndexOutOfBounds(0, 2, 2, 4)));
        Ok(())
    }
}
