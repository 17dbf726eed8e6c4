//! Pixel output of the algorithms and the device surfaces it ends up on
use crate::{DeviceRect, GridPoint, RGBA, Scalar, Scale, Viewport};
use std::collections::BTreeSet;

/// Single pixel emitted by an algorithm
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelWrite {
    /// Logical grid cell
    pub point: GridPoint,
    /// Color tag, `None` leaves the choice to the surface
    pub color: Option<RGBA>,
    /// Fraction of the cell covered by the shape, in `[0, 1]`
    pub coverage: Scalar,
}

impl PixelWrite {
    /// Fully covered pixel
    pub fn solid(point: GridPoint, color: Option<RGBA>) -> Self {
        Self {
            point,
            color,
            coverage: 1.0,
        }
    }

    /// Partially covered pixel without a color tag
    pub fn partial(point: GridPoint, coverage: Scalar) -> Self {
        Self {
            point,
            color: None,
            coverage,
        }
    }
}

/// Receiver of the pixels produced by rasterization algorithms
pub trait PixelSink {
    fn plot(&mut self, write: PixelWrite);
}

impl<S: PixelSink + ?Sized> PixelSink for &mut S {
    fn plot(&mut self, write: PixelWrite) {
        (**self).plot(write)
    }
}

/// Records all writes in the order they were emitted
#[derive(Debug, Clone, Default)]
pub struct PixelLog {
    writes: Vec<PixelWrite>,
}

impl PixelLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writes(&self) -> &[PixelWrite] {
        &self.writes
    }

    /// Emitted grid points in emission order (duplicates included)
    pub fn points(&self) -> Vec<GridPoint> {
        self.writes.iter().map(|write| write.point).collect()
    }

    /// Distinct emitted grid points
    pub fn point_set(&self) -> BTreeSet<GridPoint> {
        self.writes.iter().map(|write| write.point).collect()
    }

    pub fn len(&self) -> usize {
        self.writes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    pub fn clear(&mut self) {
        self.writes.clear()
    }
}

impl PixelSink for PixelLog {
    fn plot(&mut self, write: PixelWrite) {
        self.writes.push(write)
    }
}

/// Device target the engine draws on
pub trait Surface {
    /// Device position of the grid origin (corner shared by cells `(0, 0)` and `(-1, -1)`)
    fn origin(&self) -> (Scalar, Scalar);

    /// Remove everything drawn so far
    fn clear(&mut self);

    /// Paint device rectangle of a single grid cell
    fn fill_rect(&mut self, rect: DeviceRect, color: Option<RGBA>, coverage: Scalar);
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn origin(&self) -> (Scalar, Scalar) {
        (**self).origin()
    }

    fn clear(&mut self) {
        (**self).clear()
    }

    fn fill_rect(&mut self, rect: DeviceRect, color: Option<RGBA>, coverage: Scalar) {
        (**self).fill_rect(rect, color, coverage)
    }
}

impl<S: Surface + ?Sized> Surface for Box<S> {
    fn origin(&self) -> (Scalar, Scalar) {
        (**self).origin()
    }

    fn clear(&mut self) {
        (**self).clear()
    }

    fn fill_rect(&mut self, rect: DeviceRect, color: Option<RGBA>, coverage: Scalar) {
        (**self).fill_rect(rect, color, coverage)
    }
}

/// Pixel sink that places grid pixels on a surface with the current scale
pub struct Projector<'a, S: ?Sized> {
    viewport: Viewport,
    surface: &'a mut S,
}

impl<'a, S: Surface + ?Sized> Projector<'a, S> {
    pub fn new(surface: &'a mut S, scale: Scale) -> Self {
        let (origin_x, origin_y) = surface.origin();
        Self {
            viewport: Viewport::new(scale, origin_x, origin_y),
            surface,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }
}

impl<S: Surface + ?Sized> PixelSink for Projector<'_, S> {
    fn plot(&mut self, write: PixelWrite) {
        let rect = self.viewport.device_rect(write.point);
        self.surface.fill_rect(rect, write.color, write.coverage);
    }
}
