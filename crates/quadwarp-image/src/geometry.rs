use serde::{Deserialize, Serialize};

/// A point in image space with real-valued coordinates.
///
/// # Examples
///
/// ```
/// use quadwarp_image::Point2;
///
/// let p = Point2::new(1.5, 2.0);
/// assert_eq!(p.x, 1.5);
/// assert_eq!(p.y, 2.0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point2 {
    /// Create a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Divide both coordinates by `factor`.
    pub fn scaled_down(self, factor: f64) -> Self {
        Self {
            x: self.x / factor,
            y: self.y / factor,
        }
    }

    /// Whether both coordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Point2 {
    fn from(p: [f64; 2]) -> Self {
        Self { x: p[0], y: p[1] }
    }
}

/// A real-valued extent, used for requested crop rectangles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size2 {
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl Size2 {
    /// Create a new size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether both extents are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.width.is_finite() && self.height.is_finite()
    }
}

impl From<(f64, f64)> for Size2 {
    fn from((width, height): (f64, f64)) -> Self {
        Self { width, height }
    }
}

#[cfg(test)]
mod tests {
    use super::{Point2, Size2};

    #[test]
    fn point_scaled_down() {
        let p = Point2::new(10.0, 4.0).scaled_down(2.0);
        assert_eq!(p, Point2::new(5.0, 2.0));
    }

    #[test]
    fn point_finite() {
        assert!(Point2::new(0.0, 1.0).is_finite());
        assert!(!Point2::new(f64::NAN, 1.0).is_finite());
        assert!(!Size2::new(1.0, f64::INFINITY).is_finite());
    }

    #[test]
    fn point_serde() -> Result<(), serde_json::Error> {
        let p: Point2 = serde_json::from_str(r#"{"x": 3.0, "y": -1.5}"#)?;
        assert_eq!(p, Point2::from((3.0, -1.5)));
        Ok(())
    }
}
