use crate::{DeviceRect, Image, ImageMut, ImageOwned, RGBA, Scalar, Surface};
use std::fmt;

/// In-memory RGBA framebuffer
///
/// Grid origin is placed at the center of the canvas. Fully covered cells
/// are painted with their color tag (black when there is none), partially
/// covered cells with a gray shade proportional to the coverage.
#[derive(Clone)]
pub struct Canvas {
    image: ImageOwned<RGBA>,
    background: RGBA,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_background(width, height, RGBA::WHITE)
    }

    pub fn with_background(width: usize, height: usize, background: RGBA) -> Self {
        Self {
            image: ImageOwned::new_with(height, width, |_, _| background),
            background,
        }
    }

    pub fn width(&self) -> usize {
        self.image.width()
    }

    pub fn height(&self) -> usize {
        self.image.height()
    }

    pub fn background(&self) -> RGBA {
        self.background
    }

    pub fn image(&self) -> &ImageOwned<RGBA> {
        &self.image
    }

    /// Device pixel at `(row, col)`
    pub fn get(&self, row: usize, col: usize) -> Option<RGBA> {
        self.image.get(row, col).copied()
    }

    /// Framebuffer as `r, g, b, a` bytes in row-major order
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.image.data())
    }

    /// Range of device pixels with centers inside of the `[lo, hi)` interval
    fn span(lo: Scalar, hi: Scalar, size: usize) -> std::ops::Range<usize> {
        let start = (lo - 0.5).ceil().max(0.0);
        let end = (hi - 0.5).ceil().max(0.0);
        let start = (start as usize).min(size);
        let end = (end as usize).min(size);
        start..end.max(start)
    }
}

impl Surface for Canvas {
    fn origin(&self) -> (Scalar, Scalar) {
        (
            (self.width() / 2) as Scalar,
            (self.height() / 2) as Scalar,
        )
    }

    fn clear(&mut self) {
        let background = self.background;
        self.image.fill(background);
    }

    fn fill_rect(&mut self, rect: DeviceRect, color: Option<RGBA>, coverage: Scalar) {
        if coverage <= 0.0 {
            return;
        }
        let paint = if coverage >= 1.0 {
            color.unwrap_or(RGBA::BLACK)
        } else {
            RGBA::gray(coverage)
        };
        let cols = Self::span(rect.left, rect.right, self.width());
        let rows = Self::span(rect.top, rect.bottom, self.height());
        for row in rows {
            for col in cols.clone() {
                if let Some(pixel) = self.image.get_mut(row, col) {
                    *pixel = paint;
                }
            }
        }
    }
}

impl fmt::Debug for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // one character per device pixel, `.` for the background
        for row in 0..self.height() {
            for col in 0..self.width() {
                match self.get(row, col) {
                    Some(pixel) if pixel == self.background => write!(f, ".")?,
                    Some(pixel) if pixel.luma() < 0.25 => write!(f, "#")?,
                    Some(_) => write!(f, "+")?,
                    None => {}
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
