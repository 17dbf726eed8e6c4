//! Demonstrator of classic discrete rasterization algorithms on an integer grid.
//!
//! Main features:
//!  - Line rasterizers: equation stepping, DDA, Bresenham, Castle–Pitway
//!  - Midpoint circle and Xiaolin Wu's antialiased line
//!  - Scale independent replay of the drawing history
//!  - Optional step by step trace of every algorithm
//!
#![deny(warnings)]

mod algorithm;
mod canvas;
mod castle;
mod circle;
mod color;
mod engine;
mod error;
mod geometry;
mod history;
mod image;
mod line;
mod surface;
mod trace;
mod utils;
mod wu;

pub use algorithm::{Algorithm, AlgorithmParseError, DrawFn, DrawRequest, draw};
pub use canvas::Canvas;
pub use castle::{CastleMoves, Move, castle_pitway, reduction_limit};
pub use circle::circle;
pub use color::{ColorError, RGBA};
pub use engine::{Engine, EngineConfig, replay};
pub use error::RasterError;
pub use geometry::{DeviceRect, GridPoint, Scalar, Scale, Viewport};
pub use history::CommandHistory;
pub use image::{Image, ImageIter, ImageMut, ImageOwned, Shape};
pub use line::{bresenham, dda, step};
pub use surface::{PixelLog, PixelSink, PixelWrite, Projector, Surface};
pub use trace::{LimitedTrace, NullTrace, TRACE_STEPS, TraceSink, TracingSink};
pub use wu::wu;
use utils::clamp;
