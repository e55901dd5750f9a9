use quadwarp_image::{Image, ImageSize, Point2};
use serde::{Deserialize, Serialize};

use crate::{error::ImgprocError, matrix::Matrix3, parallel};

/// The four corners of a quadrilateral.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Quad {
    /// Upper-left corner.
    pub upper_left: Point2,
    /// Upper-right corner.
    pub upper_right: Point2,
    /// Lower-left corner.
    pub lower_left: Point2,
    /// Lower-right corner.
    pub lower_right: Point2,
}

impl Quad {
    /// Create a quad from its corners.
    pub const fn new(
        upper_left: Point2,
        upper_right: Point2,
        lower_left: Point2,
        lower_right: Point2,
    ) -> Self {
        Self {
            upper_left,
            upper_right,
            lower_left,
            lower_right,
        }
    }

    /// The quad covering a whole image, with the right and bottom corners on the outer edges.
    pub fn from_size(size: ImageSize) -> Self {
        let (w, h) = (size.width as f64, size.height as f64);
        Self::new(
            Point2::new(0.0, 0.0),
            Point2::new(w, 0.0),
            Point2::new(0.0, h),
            Point2::new(w, h),
        )
    }

    /// Divide every corner by `factor`.
    pub fn scaled_down(&self, factor: f64) -> Self {
        Self {
            upper_left: self.upper_left.scaled_down(factor),
            upper_right: self.upper_right.scaled_down(factor),
            lower_left: self.lower_left.scaled_down(factor),
            lower_right: self.lower_right.scaled_down(factor),
        }
    }

    /// The mapping from the unit square onto this quad.
    pub fn unit_square_matrix(&self) -> Result<Matrix3, ImgprocError> {
        Matrix3::from_unit_square(
            self.upper_left,
            self.upper_right,
            self.lower_right,
            self.lower_left,
        )
    }
}

/// How a sample that falls outside the source image is resolved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SamplingPolicy {
    /// Use the nearest edge pixel of the source.
    #[default]
    Clamp,
    /// Fail the whole warp with [`ImgprocError::OutOfBounds`].
    Strict,
}

/// Compute the matrix mapping points of the `to` quad back onto the `from` quad.
///
/// # Errors
///
/// Returns [`ImgprocError::InvalidGeometry`] if either quad is degenerate.
pub fn quad_to_quad_matrix(from: &Quad, to: &Quad) -> Result<Matrix3, ImgprocError> {
    let matrix_from = from.unit_square_matrix()?;
    let mut matrix_to = to.unit_square_matrix()?;
    matrix_to.invert()?;
    Ok(matrix_from.mul(&matrix_to))
}

fn resolve_sample(
    sample: Option<(i64, i64)>,
    (dst_x, dst_y): (usize, usize),
    size: ImageSize,
    policy: SamplingPolicy,
) -> Result<(usize, usize), ImgprocError> {
    // no edge pixel is nearest to an undefined point, whatever the policy
    let Some((x, y)) = sample else {
        return Err(ImgprocError::InvalidGeometry(format!(
            "destination pixel ({dst_x}, {dst_y}) maps to an undefined source point"
        )));
    };

    let (max_x, max_y) = (size.width as i64 - 1, size.height as i64 - 1);
    match policy {
        SamplingPolicy::Clamp => Ok((x.clamp(0, max_x) as usize, y.clamp(0, max_y) as usize)),
        SamplingPolicy::Strict => {
            if (0..=max_x).contains(&x) && (0..=max_y).contains(&y) {
                Ok((x as usize, y as usize))
            } else {
                Err(ImgprocError::OutOfBounds {
                    x,
                    y,
                    width: size.width,
                    height: size.height,
                })
            }
        }
    }
}

/// Warp an image by sampling the source through a destination-to-source matrix.
///
/// Every destination pixel `(x, y)` is filled with the nearest source pixel at
/// `m.update(x, y)`, resolved against the source bounds with `policy`.
///
/// * `src` - The input image.
/// * `dst` - The output image, its size selects the sampled region.
/// * `m` - The 3x3 matrix mapping dst -> src, see [`quad_to_quad_matrix`].
/// * `policy` - How to handle samples outside the source.
///
/// # Errors
///
/// * [`ImgprocError::EmptyInput`] if either image has no pixels.
/// * [`ImgprocError::OutOfBounds`] with [`SamplingPolicy::Strict`] when a sample misses the
///   source.
/// * [`ImgprocError::InvalidGeometry`] if `m` maps a destination pixel to an undefined point.
pub fn warp_quad<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    m: &Matrix3,
    policy: SamplingPolicy,
) -> Result<(), ImgprocError>
where
    T: Copy + Send + Sync,
{
    if src.size().is_empty() {
        return Err(ImgprocError::EmptyInput(src.width(), src.height()));
    }
    if dst.size().is_empty() {
        return Err(ImgprocError::EmptyInput(dst.width(), dst.height()));
    }

    let src_size = src.size();
    parallel::par_try_iter_pixels(dst, |x, y, dst_pixel| -> Result<(), ImgprocError> {
        let (sx, sy) = resolve_sample(m.update(x, y), (x, y), src_size, policy)?;
        dst_pixel.copy_from_slice(src.get_pixel(sx, sy)?);
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use quadwarp_image::{Bgra8, Image, ImageSize, Point2};

    use super::{Quad, SamplingPolicy};
    use crate::{error::ImgprocError, matrix::Matrix3};

    fn gradient(size: ImageSize) -> Result<Bgra8, ImgprocError> {
        let mut image = Bgra8::from_size_val(size, 0)?;
        for y in 0..size.height {
            for x in 0..size.width {
                image.set_pixel(x, y, &[x as u8, y as u8, (x * y) as u8, 255])?;
            }
        }
        Ok(image)
    }

    #[test]
    fn same_quad_is_identity() -> Result<(), ImgprocError> {
        let quad = Quad::new(
            Point2::new(1.0, 2.0),
            Point2::new(9.0, 1.0),
            Point2::new(0.0, 7.0),
            Point2::new(10.0, 9.0),
        );
        let m = super::quad_to_quad_matrix(&quad, &quad)?;

        for r in 0..3 {
            for c in 0..3 {
                assert_relative_eq!(m.get(r, c), Matrix3::IDENTITY.get(r, c), epsilon = 1e-9);
            }
        }

        Ok(())
    }

    #[test]
    fn warp_quad_identity() -> Result<(), ImgprocError> {
        let size = ImageSize {
            width: 10,
            height: 10,
        };
        let image = gradient(size)?;
        let mut warped = Bgra8::from_size_val(size, 0)?;

        let quad = Quad::from_size(size);
        let m = super::quad_to_quad_matrix(&quad, &quad)?;
        super::warp_quad(&image, &mut warped, &m, SamplingPolicy::Strict)?;

        assert_eq!(warped.as_slice(), image.as_slice());

        Ok(())
    }

    #[test]
    fn warp_quad_hflip() -> Result<(), ImgprocError> {
        #[rustfmt::skip]
        let image = Image::<_, 1>::new([4, 2].into(), vec![
            0u8, 1, 2, 3,
            4u8, 5, 6, 7,
        ])?;
        let mut warped = Image::<_, 1>::from_size_val(image.size(), 0u8)?;

        let from = Quad::new(
            Point2::new(0.0, 0.0),
            Point2::new(3.0, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(3.0, 1.0),
        );
        let to = Quad::new(
            Point2::new(3.0, 0.0),
            Point2::new(0.0, 0.0),
            Point2::new(3.0, 1.0),
            Point2::new(0.0, 1.0),
        );
        let m = super::quad_to_quad_matrix(&from, &to)?;
        super::warp_quad(&image, &mut warped, &m, SamplingPolicy::Strict)?;

        assert_eq!(warped.as_slice(), &[3u8, 2, 1, 0, 7, 6, 5, 4]);

        Ok(())
    }

    #[test]
    fn warp_quad_shift_clamps() -> Result<(), ImgprocError> {
        let image = Image::<_, 1>::new([4, 1].into(), vec![0u8, 1, 2, 3])?;
        let mut warped = Image::<_, 1>::from_size_val(image.size(), 0u8)?;

        // destination is the source moved one pixel to the right
        let from = Quad::from_size(image.size());
        let to = Quad::new(
            Point2::new(1.0, 0.0),
            Point2::new(5.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(5.0, 1.0),
        );
        let m = super::quad_to_quad_matrix(&from, &to)?;

        super::warp_quad(&image, &mut warped, &m, SamplingPolicy::Clamp)?;
        assert_eq!(warped.as_slice(), &[0u8, 0, 1, 2]);

        let res = super::warp_quad(&image, &mut warped, &m, SamplingPolicy::Strict);
        assert_eq!(
            res,
            Err(ImgprocError::OutOfBounds {
                x: -1,
                y: 0,
                width: 4,
                height: 1
            })
        );

        Ok(())
    }

    #[test]
    fn warp_quad_perspective_solid() -> Result<(), ImgprocError> {
        let size = ImageSize {
            width: 16,
            height: 12,
        };
        let image = Bgra8::from_size_pixel(size, [12, 34, 56, 255])?;
        let mut warped = Bgra8::from_size_val(size, 0)?;

        let from = Quad::from_size(size);
        let to = Quad::new(
            Point2::new(3.0, 1.0),
            Point2::new(14.0, 0.0),
            Point2::new(0.0, 12.0),
            Point2::new(16.0, 10.0),
        );
        let m = super::quad_to_quad_matrix(&from, &to)?;
        super::warp_quad(&image, &mut warped, &m, SamplingPolicy::Clamp)?;

        for pixel in warped.as_slice().chunks_exact(4) {
            assert_eq!(pixel, &[12, 34, 56, 255]);
        }

        Ok(())
    }

    #[test]
    fn warp_quad_undefined_sample() -> Result<(), ImgprocError> {
        let image = Bgra8::from_size_val([3, 2].into(), 7)?;
        let mut warped = Bgra8::from_size_val(image.size(), 0)?;

        // the destination origin maps to 0 / 0
        let m = Matrix3::from_rows([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0]]);

        for policy in [SamplingPolicy::Strict, SamplingPolicy::Clamp] {
            let res = super::warp_quad(&image, &mut warped, &m, policy);
            assert!(matches!(res, Err(ImgprocError::InvalidGeometry(_))));
        }

        Ok(())
    }

    #[test]
    fn degenerate_destination() {
        let from = Quad::from_size([4, 4].into());
        let to = Quad::new(
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(1.0, 1.0),
            Point2::new(2.0, 2.0),
        );
        let res = super::quad_to_quad_matrix(&from, &to);
        assert!(matches!(res, Err(ImgprocError::InvalidGeometry(_))));
    }

    #[test]
    fn warp_quad_empty() -> Result<(), ImgprocError> {
        let image = Bgra8::new([0, 0].into(), vec![])?;
        let mut warped = Bgra8::from_size_val([2, 2].into(), 0)?;
        let res = super::warp_quad(&image, &mut warped, &Matrix3::IDENTITY, SamplingPolicy::Clamp);
        assert_eq!(res, Err(ImgprocError::EmptyInput(0, 0)));
        Ok(())
    }
}
