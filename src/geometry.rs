use crate::clamp;
use std::fmt;

pub type Scalar = f64;

/// Logical cell of the drawing grid.
///
/// Origin is at the center of the viewport and `y` grows upward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPoint {
    pub x: i32,
    pub y: i32,
}

impl GridPoint {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Same point with `x` and `y` exchanged
    #[inline]
    pub const fn transpose(self) -> Self {
        Self {
            x: self.y,
            y: self.x,
        }
    }
}

impl fmt::Display for GridPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for GridPoint {
    #[inline]
    fn from(xy: (i32, i32)) -> Self {
        Self::new(xy.0, xy.1)
    }
}

/// Size of a single grid cell in device pixels
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "Scalar", into = "Scalar"))]
pub struct Scale(Scalar);

impl Scale {
    pub const MIN: Scalar = 2.0;
    pub const MAX: Scalar = 200.0;

    /// Create scale clamped to `[Scale::MIN, Scale::MAX]`, `NaN` maps to the minimum
    pub fn new(value: Scalar) -> Self {
        if value.is_nan() {
            return Self(Self::MIN);
        }
        Self(clamp(value, Self::MIN, Self::MAX))
    }

    #[inline]
    pub fn value(self) -> Scalar {
        self.0
    }

    /// Multiply scale by `factor`, result is clamped
    pub fn zoom(self, factor: Scalar) -> Self {
        Self::new(self.0 * factor)
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self(20.0)
    }
}

impl From<Scalar> for Scale {
    fn from(value: Scalar) -> Self {
        Self::new(value)
    }
}

impl From<Scale> for Scalar {
    fn from(scale: Scale) -> Self {
        scale.0
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rectangle in device coordinates (`y` grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceRect {
    pub left: Scalar,
    pub top: Scalar,
    pub right: Scalar,
    pub bottom: Scalar,
}

impl DeviceRect {
    pub fn width(&self) -> Scalar {
        self.right - self.left
    }

    pub fn height(&self) -> Scalar {
        self.bottom - self.top
    }

    /// Check if device point is inside of the rectangle (right and bottom edges excluded)
    pub fn contains(&self, x: Scalar, y: Scalar) -> bool {
        self.left <= x && x < self.right && self.top <= y && y < self.bottom
    }
}

/// Mapping between the logical grid and device pixels
///
/// Grid cell `(x, y)` occupies square with the side `scale` whose top-left
/// corner is at `(origin_x + x * scale, origin_y - (y + 1) * scale)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scale: Scale,
    pub origin_x: Scalar,
    pub origin_y: Scalar,
}

impl Viewport {
    pub fn new(scale: Scale, origin_x: Scalar, origin_y: Scalar) -> Self {
        Self {
            scale,
            origin_x,
            origin_y,
        }
    }

    /// Device rectangle covered by the grid cell
    pub fn device_rect(&self, point: GridPoint) -> DeviceRect {
        let scale = self.scale.value();
        let left = self.origin_x + point.x as Scalar * scale;
        let top = self.origin_y - (point.y as Scalar + 1.0) * scale;
        DeviceRect {
            left,
            top,
            right: left + scale,
            bottom: top + scale,
        }
    }

    /// Grid cell containing device point, consistent with [`DeviceRect::contains`]
    pub fn grid_at(&self, x: Scalar, y: Scalar) -> GridPoint {
        let scale = self.scale.value();
        let gx = ((x - self.origin_x) / scale).floor();
        let gy = ((self.origin_y - y) / scale).ceil() - 1.0;
        GridPoint::new(gx as i32, gy as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_approx_eq;

    #[test]
    fn test_scale_clamp() {
        assert_approx_eq!(Scale::new(0.5).value(), Scale::MIN);
        assert_approx_eq!(Scale::new(1000.0).value(), Scale::MAX);
        assert_approx_eq!(Scale::new(12.5).value(), 12.5);
        assert_approx_eq!(Scale::new(Scalar::NAN).value(), Scale::MIN);
        assert_approx_eq!(Scale::new(150.0).zoom(2.0).value(), Scale::MAX);
        assert_approx_eq!(Scale::new(10.0).zoom(0.5).value(), 5.0);
    }

    #[test]
    fn test_device_rect() {
        let vp = Viewport::new(Scale::new(10.0), 100.0, 50.0);
        let rect = vp.device_rect(GridPoint::new(0, 0));
        assert_approx_eq!(rect.left, 100.0);
        assert_approx_eq!(rect.top, 40.0);
        assert_approx_eq!(rect.right, 110.0);
        assert_approx_eq!(rect.bottom, 50.0);

        // y grows upward on the grid, downward on the device
        let rect = vp.device_rect(GridPoint::new(-2, 3));
        assert_approx_eq!(rect.left, 80.0);
        assert_approx_eq!(rect.top, 10.0);
        assert_approx_eq!(rect.width(), 10.0);
        assert_approx_eq!(rect.height(), 10.0);
    }

    #[test]
    fn test_grid_at_inverts_device_rect() {
        let vp = Viewport::new(Scale::new(7.5), 31.0, 64.0);
        for x in -5..5 {
            for y in -5..5 {
                let point = GridPoint::new(x, y);
                let rect = vp.device_rect(point);
                let cx = (rect.left + rect.right) / 2.0;
                let cy = (rect.top + rect.bottom) / 2.0;
                assert!(rect.contains(cx, cy));
                assert_eq!(vp.grid_at(cx, cy), point);
                assert_eq!(vp.grid_at(rect.left + 0.1, rect.top + 0.1), point);
                assert_eq!(vp.grid_at(rect.right - 0.1, rect.bottom - 0.1), point);
            }
        }
    }

    #[test]
    fn test_grid_point_ops() {
        let p = GridPoint::new(3, -4);
        assert_eq!(p.transpose(), GridPoint::new(-4, 3));
        assert_eq!(GridPoint::from((3, -4)), p);
        assert_eq!(GridPoint::default(), GridPoint::new(0, 0));
        assert_eq!(p.to_string(), "(3, -4)");
    }
}
