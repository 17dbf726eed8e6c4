use crate::{
    GridPoint, PixelSink, RGBA, RasterError, TraceSink, castle::castle_pitway, circle::circle,
    line::{bresenham, dda, step},
    wu::wu,
};
use std::{fmt, str::FromStr};

/// Uniform signature shared by all algorithms
pub type DrawFn = fn(
    &DrawRequest,
    &mut dyn PixelSink,
    &mut dyn TraceSink,
    bool,
) -> Result<(), RasterError>;

/// Rasterization algorithms supported by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Algorithm {
    /// Line equation evaluated at every step of the dominant axis
    Step,
    /// Digital differential analyzer
    Dda,
    /// Bresenham's integer line algorithm
    BresenhamLine,
    /// Bresenham's midpoint circle algorithm
    BresenhamCircle,
    /// Castle–Pitway line algorithm based on Euclid's algorithm
    CastlePitway,
    /// Wu's antialiased line algorithm
    Wu,
}

impl Algorithm {
    pub const ALL: [Algorithm; 6] = [
        Algorithm::Step,
        Algorithm::Dda,
        Algorithm::BresenhamLine,
        Algorithm::BresenhamCircle,
        Algorithm::CastlePitway,
        Algorithm::Wu,
    ];

    /// Short stable name, inverse of `FromStr`
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Step => "step",
            Algorithm::Dda => "dda",
            Algorithm::BresenhamLine => "bresenham",
            Algorithm::BresenhamCircle => "circle",
            Algorithm::CastlePitway => "castle",
            Algorithm::Wu => "wu",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Algorithm::Step => "Step-by-step",
            Algorithm::Dda => "DDA",
            Algorithm::BresenhamLine => "Bresenham line",
            Algorithm::BresenhamCircle => "Bresenham circle",
            Algorithm::CastlePitway => "Castle-Pitway",
            Algorithm::Wu => "Wu",
        }
    }

    /// Color tag attached to the emitted pixels
    ///
    /// Wu has no tag, its coverage is rendered as shades of gray.
    pub fn color(self) -> Option<RGBA> {
        match self {
            Algorithm::Step => Some(RGBA::new(0x1f, 0x77, 0xb4, 0xff)),
            Algorithm::Dda => Some(RGBA::new(0x2c, 0xa0, 0x2c, 0xff)),
            Algorithm::BresenhamLine => Some(RGBA::new(0xd6, 0x27, 0x28, 0xff)),
            Algorithm::BresenhamCircle => Some(RGBA::new(0x94, 0x67, 0xbd, 0xff)),
            Algorithm::CastlePitway => Some(RGBA::new(0xff, 0x7f, 0x0e, 0xff)),
            Algorithm::Wu => None,
        }
    }

    pub fn draw_fn(self) -> DrawFn {
        match self {
            Algorithm::Step => step,
            Algorithm::Dda => dda,
            Algorithm::BresenhamLine => bresenham,
            Algorithm::BresenhamCircle => circle,
            Algorithm::CastlePitway => castle_pitway,
            Algorithm::Wu => wu,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = AlgorithmParseError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let name = name.trim();
        Algorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| AlgorithmParseError {
                name: name.to_owned(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgorithmParseError {
    pub name: String,
}

impl fmt::Display for AlgorithmParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown algorithm \"{}\", expected one of: ", self.name)?;
        for (index, algorithm) in Algorithm::ALL.iter().enumerate() {
            if index != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", algorithm)?;
        }
        Ok(())
    }
}

impl std::error::Error for AlgorithmParseError {}

/// Drawing command as issued by the user
///
/// Circles reuse the same four integers: `(x1, y1)` is the center and
/// `abs(y2)` is the radius, `x2` is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DrawRequest {
    pub algorithm: Algorithm,
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl DrawRequest {
    pub fn new(algorithm: Algorithm, x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self {
            algorithm,
            x1,
            y1,
            x2,
            y2,
        }
    }

    pub fn line(
        algorithm: Algorithm,
        start: impl Into<GridPoint>,
        end: impl Into<GridPoint>,
    ) -> Self {
        let start = start.into();
        let end = end.into();
        Self::new(algorithm, start.x, start.y, end.x, end.y)
    }

    pub fn circle(center: impl Into<GridPoint>, radius: u32) -> Self {
        let center = center.into();
        let radius = i32::try_from(radius).unwrap_or(i32::MAX);
        Self::new(Algorithm::BresenhamCircle, center.x, center.y, 0, radius)
    }

    pub fn start(&self) -> GridPoint {
        GridPoint::new(self.x1, self.y1)
    }

    pub fn end(&self) -> GridPoint {
        GridPoint::new(self.x2, self.y2)
    }

    pub fn center(&self) -> GridPoint {
        self.start()
    }

    pub fn radius(&self) -> u32 {
        self.y2.unsigned_abs()
    }
}

impl fmt::Display for DrawRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.algorithm {
            Algorithm::BresenhamCircle => {
                write!(f, "{} {} r={}", self.algorithm, self.center(), self.radius())
            }
            _ => write!(f, "{} {} -> {}", self.algorithm, self.start(), self.end()),
        }
    }
}

/// Rasterize request with the algorithm it names
pub fn draw(
    request: &DrawRequest,
    pixels: &mut dyn PixelSink,
    trace: &mut dyn TraceSink,
    verbose: bool,
) -> Result<(), RasterError> {
    (request.algorithm.draw_fn())(request, pixels, trace, verbose)
}
