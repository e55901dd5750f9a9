use quadwarp_image::Point2;

use crate::error::ImgprocError;

// determinants below this are treated as singular
const DET_EPS: f64 = 1e-12;

/// A row-major 3x3 matrix acting on homogeneous 2d points `(x, y, 1)`.
///
/// ```text
/// [ a b c ]   [x]   [x']
/// [ d e f ] * [y] = [y']      (x', y') / w' is the mapped point
/// [ g h i ]   [1]   [w']
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matrix3 {
    m: [[f64; 3]; 3],
}

impl Default for Matrix3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix3 {
    /// The identity transformation.
    pub const IDENTITY: Self = Self {
        m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
    };

    /// Returns the identity transformation.
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// Create a matrix from its rows.
    pub const fn from_rows(m: [[f64; 3]; 3]) -> Self {
        Self { m }
    }

    /// Get the entry at `(row, col)`, both zero-based.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.m[row][col]
    }

    /// The rows of the matrix.
    pub fn rows(&self) -> &[[f64; 3]; 3] {
        &self.m
    }

    /// Build the projective mapping from the unit square onto a quadrilateral.
    ///
    /// The unit square corners map as `(0,0) -> upper_left`, `(1,0) -> upper_right`,
    /// `(1,1) -> lower_right` and `(0,1) -> lower_left`.
    ///
    /// Parallelograms take the affine branch and always succeed, even when all the points are
    /// collinear; the resulting matrix is then singular and fails on [`Matrix3::inverse`].
    ///
    /// # Errors
    ///
    /// Returns [`ImgprocError::InvalidGeometry`] if a corner is not finite or if the
    /// quadrilateral admits no projective mapping.
    ///
    /// # Example
    ///
    /// ```
    /// use quadwarp_image::Point2;
    /// use quadwarp_imgproc::Matrix3;
    ///
    /// let m = Matrix3::from_unit_square(
    ///     Point2::new(0.0, 0.0),
    ///     Point2::new(4.0, 0.0),
    ///     Point2::new(4.0, 2.0),
    ///     Point2::new(0.0, 2.0),
    /// ).unwrap();
    ///
    /// assert_eq!(m.transform_point(1.0, 1.0), (4.0, 2.0));
    /// ```
    pub fn from_unit_square(
        upper_left: Point2,
        upper_right: Point2,
        lower_right: Point2,
        lower_left: Point2,
    ) -> Result<Self, ImgprocError> {
        let corners = [upper_left, upper_right, lower_right, lower_left];
        if !corners.iter().all(Point2::is_finite) {
            return Err(ImgprocError::InvalidGeometry(format!(
                "non finite corner in {corners:?}"
            )));
        }

        let [p0, p1, p2, p3] = corners;

        let sx = p0.x - p1.x + p2.x - p3.x;
        let sy = p0.y - p1.y + p2.y - p3.y;

        #[rustfmt::skip]
        let m = if sx == 0.0 && sy == 0.0 {
            // parallelogram
            [
                [p1.x - p0.x, p2.x - p1.x, p0.x],
                [p1.y - p0.y, p2.y - p1.y, p0.y],
                [0.0, 0.0, 1.0],
            ]
        } else {
            let (dx1, dx2) = (p1.x - p2.x, p3.x - p2.x);
            let (dy1, dy2) = (p1.y - p2.y, p3.y - p2.y);

            let den = dx1 * dy2 - dx2 * dy1;
            if den.abs() < DET_EPS {
                return Err(ImgprocError::InvalidGeometry(format!(
                    "no projective mapping onto {corners:?}"
                )));
            }

            let g = (sx * dy2 - dx2 * sy) / den;
            let h = (dx1 * sy - sx * dy1) / den;

            [
                [p1.x - p0.x + g * p1.x, p3.x - p0.x + h * p3.x, p0.x],
                [p1.y - p0.y + g * p1.y, p3.y - p0.y + h * p3.y, p0.y],
                [g, h, 1.0],
            ]
        };

        let m = Self { m };
        if !m.is_finite() {
            return Err(ImgprocError::InvalidGeometry(format!(
                "non finite mapping onto {corners:?}"
            )));
        }

        Ok(m)
    }

    fn is_finite(&self) -> bool {
        self.m.iter().flatten().all(|v| v.is_finite())
    }

    /// The determinant of the matrix.
    #[rustfmt::skip]
    pub fn determinant(&self) -> f64 {
        let m = &self.m;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1]) -
        m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0]) +
        m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    #[rustfmt::skip]
    fn adjugate(&self) -> [[f64; 3]; 3] {
        let m = &self.m;
        [
            [
                m[1][1] * m[2][2] - m[1][2] * m[2][1],
                m[0][2] * m[2][1] - m[0][1] * m[2][2],
                m[0][1] * m[1][2] - m[0][2] * m[1][1],
            ],
            [
                m[1][2] * m[2][0] - m[1][0] * m[2][2],
                m[0][0] * m[2][2] - m[0][2] * m[2][0],
                m[0][2] * m[1][0] - m[0][0] * m[1][2],
            ],
            [
                m[1][0] * m[2][1] - m[1][1] * m[2][0],
                m[0][1] * m[2][0] - m[0][0] * m[2][1],
                m[0][0] * m[1][1] - m[0][1] * m[1][0],
            ],
        ]
    }

    /// Compute the inverse of the matrix.
    ///
    /// # Errors
    ///
    /// Returns [`ImgprocError::InvalidGeometry`] if the matrix is singular.
    pub fn inverse(&self) -> Result<Self, ImgprocError> {
        let det = self.determinant();
        if !det.is_finite() || det.abs() < DET_EPS {
            return Err(ImgprocError::InvalidGeometry(format!(
                "cannot invert matrix with determinant {det}"
            )));
        }

        let inv_det = 1.0 / det;
        let mut inv = self.adjugate();
        inv.iter_mut()
            .flatten()
            .for_each(|v| *v *= inv_det);

        Ok(Self { m: inv })
    }

    /// Invert the matrix in place.
    ///
    /// The matrix is left untouched on error.
    pub fn invert(&mut self) -> Result<(), ImgprocError> {
        *self = self.inverse()?;
        Ok(())
    }

    /// Multiply `self * other`, i.e. apply `other` first and `self` second.
    pub fn mul(&self, other: &Matrix3) -> Matrix3 {
        let mut out = [[0.0; 3]; 3];
        for (r, row) in out.iter_mut().enumerate() {
            for (c, v) in row.iter_mut().enumerate() {
                *v = (0..3).map(|k| self.m[r][k] * other.m[k][c]).sum();
            }
        }
        Matrix3 { m: out }
    }

    /// Map a point, dividing by the homogeneous coordinate.
    pub fn transform_point(&self, x: f64, y: f64) -> (f64, f64) {
        let m = &self.m;
        let w = m[2][0] * x + m[2][1] * y + m[2][2];
        (
            (m[0][0] * x + m[0][1] * y + m[0][2]) / w,
            (m[1][0] * x + m[1][1] * y + m[1][2]) / w,
        )
    }

    /// Map a pixel coordinate to the nearest integer pixel coordinate.
    ///
    /// The result may lie outside of any image; callers decide how to resolve it. Infinite
    /// coordinates saturate. Returns `None` when the mapped point is undefined (NaN).
    pub fn update(&self, x: usize, y: usize) -> Option<(i64, i64)> {
        let (u, v) = self.transform_point(x as f64, y as f64);
        if u.is_nan() || v.is_nan() {
            return None;
        }
        Some((u.round() as i64, v.round() as i64))
    }
}

impl std::ops::Mul for Matrix3 {
    type Output = Matrix3;

    fn mul(self, rhs: Matrix3) -> Matrix3 {
        Matrix3::mul(&self, &rhs)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use quadwarp_image::Point2;

    use super::Matrix3;
    use crate::error::ImgprocError;

    fn assert_maps(m: &Matrix3, from: (f64, f64), to: Point2) {
        let (x, y) = m.transform_point(from.0, from.1);
        assert_relative_eq!(x, to.x, epsilon = 1e-9);
        assert_relative_eq!(y, to.y, epsilon = 1e-9);
    }

    #[test]
    fn identity_maps_to_itself() {
        let m = Matrix3::identity();
        assert_eq!(m, Matrix3::default());
        assert_eq!(m.update(7, 3), Some((7, 3)));
        assert_relative_eq!(m.determinant(), 1.0);
    }

    #[test]
    fn unit_square_projective() -> Result<(), ImgprocError> {
        let (ul, ur, br, bl) = (
            Point2::new(1.0, 2.0),
            Point2::new(9.0, 0.5),
            Point2::new(7.5, 8.0),
            Point2::new(0.0, 6.0),
        );
        let m = Matrix3::from_unit_square(ul, ur, br, bl)?;

        assert_maps(&m, (0.0, 0.0), ul);
        assert_maps(&m, (1.0, 0.0), ur);
        assert_maps(&m, (1.0, 1.0), br);
        assert_maps(&m, (0.0, 1.0), bl);

        Ok(())
    }

    #[test]
    fn unit_square_affine() -> Result<(), ImgprocError> {
        let m = Matrix3::from_unit_square(
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
        )?;

        #[rustfmt::skip]
        let expected = Matrix3::from_rows([
            [10.0, 0.0, 0.0],
            [0.0, 10.0, 0.0],
            [0.0, 0.0, 1.0],
        ]);
        assert_eq!(m, expected);

        Ok(())
    }

    #[test]
    fn inverse_translation() -> Result<(), ImgprocError> {
        let m = Matrix3::from_rows([[1.0, 0.0, -1.0], [0.0, 1.0, 1.0], [0.0, 0.0, 1.0]]);
        let expected = Matrix3::from_rows([[1.0, 0.0, 1.0], [0.0, 1.0, -1.0], [0.0, 0.0, 1.0]]);
        assert_eq!(m.inverse()?, expected);
        Ok(())
    }

    #[test]
    fn inverse_times_self_is_identity() -> Result<(), ImgprocError> {
        let m = Matrix3::from_unit_square(
            Point2::new(3.0, 1.0),
            Point2::new(20.0, 4.0),
            Point2::new(18.0, 15.0),
            Point2::new(1.0, 12.0),
        )?;
        let mut inv = m;
        inv.invert()?;

        let id = m * inv;
        for r in 0..3 {
            for c in 0..3 {
                let expected = Matrix3::IDENTITY.get(r, c);
                assert_relative_eq!(id.get(r, c), expected, epsilon = 1e-9);
            }
        }

        Ok(())
    }

    #[test]
    fn collinear_inverse_fails() -> Result<(), ImgprocError> {
        let mut m = Matrix3::from_unit_square(
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(2.0, 2.0),
            Point2::new(1.0, 1.0),
        )?;
        let before = m;

        assert!(matches!(m.invert(), Err(ImgprocError::InvalidGeometry(_))));
        assert_eq!(m, before);

        Ok(())
    }

    #[test]
    fn collinear_projective_fails() {
        let res = Matrix3::from_unit_square(
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(2.0, 2.0),
            Point2::new(3.0, 3.0),
        );
        assert!(matches!(res, Err(ImgprocError::InvalidGeometry(_))));
    }

    #[test]
    fn non_finite_corner_fails() {
        let res = Matrix3::from_unit_square(
            Point2::new(f64::NAN, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        );
        assert!(matches!(res, Err(ImgprocError::InvalidGeometry(_))));
    }

    #[test]
    fn mul_applies_rhs_first() {
        let scale = Matrix3::from_rows([[2.0, 0.0, 0.0], [0.0, 2.0, 0.0], [0.0, 0.0, 1.0]]);
        let shift = Matrix3::from_rows([[1.0, 0.0, 1.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);

        assert_eq!(scale.mul(&shift).transform_point(1.0, 1.0), (4.0, 2.0));
        assert_eq!(shift.mul(&scale).transform_point(1.0, 1.0), (3.0, 2.0));
    }

    #[test]
    fn update_rounds_to_nearest() {
        let m = Matrix3::from_rows([[0.5, 0.0, 0.0], [0.0, 0.5, 0.2], [0.0, 0.0, 1.0]]);
        assert_eq!(m.update(3, 5), Some((2, 3)));
        assert_eq!(m.update(0, 0), Some((0, 0)));
    }

    #[test]
    fn update_undefined_point() {
        // w = 0 and a zero numerator give 0 / 0
        let m = Matrix3::from_rows([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0]]);
        assert_eq!(m.update(0, 0), None);
        assert_eq!(m.update(2, 0), Some((1, 0)));

        // x / 0 saturates instead
        let m = Matrix3::from_rows([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 0.0]]);
        assert_eq!(m.update(1, 0), None);
        assert_eq!(m.update(1, 1), Some((i64::MAX, i64::MAX)));
    }
}
