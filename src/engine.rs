//! Drawing engine: issues requests, records them and replays the history
//! whenever the scale changes.
use crate::{
    Algorithm, CommandHistory, DrawRequest, LimitedTrace, NullTrace, Projector, RasterError,
    Scalar, Scale, Surface, TRACE_STEPS, TraceSink, TracingSink, draw,
};

/// Engine settings
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Initial size of a grid cell in device pixels
    pub scale: Scale,
    /// Number of loop iterations reported by verbose draws
    pub trace_steps: usize,
    /// Scale multiplier of a single zoom in step
    pub zoom_step: Scalar,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            scale: Scale::default(),
            trace_steps: TRACE_STEPS,
            zoom_step: 1.25,
        }
    }
}

/// Draw all requests of the history in order on a cleared surface
///
/// Draws are silent. A failing request does not stop the replay, the first
/// error is returned once all requests have been drawn.
pub fn replay<S: Surface + ?Sized>(
    history: &CommandHistory,
    surface: &mut S,
    scale: Scale,
) -> Result<(), RasterError> {
    surface.clear();
    let mut pixels = Projector::new(surface, scale);
    let mut first_error = None;
    for request in history {
        if let Err(error) = draw(request, &mut pixels, &mut NullTrace, false) {
            tracing::error!("[replay] {}: {}", request, error);
            first_error.get_or_insert(error);
        }
    }
    match first_error {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

/// Owns the surface, the current scale and the history of requests
pub struct Engine<S, T = TracingSink> {
    config: EngineConfig,
    scale: Scale,
    history: CommandHistory,
    surface: S,
    trace: T,
}

impl<S: Surface> Engine<S> {
    pub fn new(surface: S) -> Self {
        Self::with_trace(surface, TracingSink, EngineConfig::default())
    }
}

impl<S: Surface, T: TraceSink> Engine<S, T> {
    pub fn with_trace(surface: S, trace: T, config: EngineConfig) -> Self {
        Self {
            scale: config.scale,
            config,
            history: CommandHistory::new(),
            surface,
            trace,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current size of a grid cell in device pixels
    pub fn scale(&self) -> Scale {
        self.scale
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn trace(&self) -> &T {
        &self.trace
    }

    pub fn trace_mut(&mut self) -> &mut T {
        &mut self.trace
    }

    pub fn into_parts(self) -> (S, T) {
        (self.surface, self.trace)
    }

    /// Record and draw a request
    pub fn run(
        &mut self,
        algorithm: Algorithm,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        verbose: bool,
    ) -> Result<(), RasterError> {
        self.run_request(DrawRequest::new(algorithm, x1, y1, x2, y2), verbose)
    }

    /// Record and draw a request
    ///
    /// Request is recorded even if drawing fails, so replaying the history
    /// reproduces the failure instead of silently skipping it.
    pub fn run_request(&mut self, request: DrawRequest, verbose: bool) -> Result<(), RasterError> {
        let span = tracing::debug_span!("[run]", request = %request, scale = %self.scale);
        let _guard = span.enter();
        self.history.record(request);
        let mut pixels = Projector::new(&mut self.surface, self.scale);
        let mut trace = LimitedTrace::new(&mut self.trace, self.config.trace_steps);
        draw(&request, &mut pixels, &mut trace, verbose).inspect_err(|error| {
            tracing::error!("[run] {}: {}", request, error);
        })
    }

    /// Switch to the new scale and redraw the whole history
    pub fn replay_all(&mut self, scale: impl Into<Scale>) -> Result<(), RasterError> {
        self.scale = scale.into();
        let span = tracing::debug_span!("[replay]", scale = %self.scale);
        let _guard = span.enter();
        tracing::debug!("[replay:requests] {}", self.history.len());
        replay(&self.history, &mut self.surface, self.scale)
    }

    /// Multiply scale by `factor` (clamped) and redraw
    pub fn zoom(&mut self, factor: Scalar) -> Result<(), RasterError> {
        self.replay_all(self.scale.zoom(factor))
    }

    pub fn zoom_in(&mut self) -> Result<(), RasterError> {
        self.zoom(self.config.zoom_step)
    }

    pub fn zoom_out(&mut self) -> Result<(), RasterError> {
        self.zoom(self.config.zoom_step.recip())
    }

    /// Forget all requests and clear the surface
    pub fn reset(&mut self) {
        tracing::debug!("[reset] {} requests dropped", self.history.len());
        self.history.clear();
        self.surface.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DeviceRect, GridPoint, PixelLog, RGBA, Viewport, assert_approx_eq};

    #[derive(Default)]
    struct Recorder {
        rects: Vec<(DeviceRect, Option<RGBA>, Scalar)>,
        clears: usize,
    }

    impl Surface for Recorder {
        fn origin(&self) -> (Scalar, Scalar) {
            (320.0, 240.0)
        }

        fn clear(&mut self) {
            self.clears += 1;
            self.rects.clear();
        }

        fn fill_rect(&mut self, rect: DeviceRect, color: Option<RGBA>, coverage: Scalar) {
            self.rects.push((rect, color, coverage))
        }
    }

    impl Recorder {
        /// Recover logical grid points from the device rectangles
        fn grid_points(&self, scale: Scale) -> Vec<GridPoint> {
            let (origin_x, origin_y) = self.origin();
            let viewport = Viewport::new(scale, origin_x, origin_y);
            self.rects
                .iter()
                .map(|(rect, _, _)| {
                    assert_approx_eq!(rect.width(), scale.value(), 1e-6);
                    viewport.grid_at(
                        (rect.left + rect.right) / 2.0,
                        (rect.top + rect.bottom) / 2.0,
                    )
                })
                .collect()
        }
    }

    fn engine() -> Engine<Recorder, Vec<String>> {
        Engine::with_trace(Recorder::default(), Vec::new(), EngineConfig::default())
    }

    fn requests() -> Vec<DrawRequest> {
        vec![
            DrawRequest::new(Algorithm::Step, -10, -3, 12, 7),
            DrawRequest::new(Algorithm::Dda, 4, 9, -6, -11),
            DrawRequest::new(Algorithm::BresenhamLine, 0, 0, 8, 5),
            DrawRequest::circle((2, -1), 6),
            DrawRequest::new(Algorithm::CastlePitway, 13, 2, -7, -4),
            DrawRequest::new(Algorithm::Wu, -9, 8, 3, -2),
        ]
    }

    #[test]
    fn test_replay_empty() -> Result<(), RasterError> {
        let mut engine = engine();
        engine.replay_all(35.0)?;
        assert_eq!(engine.surface().clears, 1);
        assert!(engine.surface().rects.is_empty());
        assert_approx_eq!(engine.scale().value(), 35.0);
        Ok(())
    }

    #[test]
    fn test_run_matches_direct_draw() -> Result<(), RasterError> {
        let mut engine = engine();
        let mut expected = Vec::new();
        for request in requests() {
            engine.run_request(request, false)?;
            let mut log = PixelLog::new();
            draw(&request, &mut log, &mut NullTrace, false)?;
            expected.extend(log.points());
        }
        assert_eq!(engine.history().as_slice(), requests().as_slice());
        assert_eq!(engine.surface().grid_points(engine.scale()), expected);
        Ok(())
    }

    #[test]
    fn test_replay_is_scale_independent() -> Result<(), RasterError> {
        let mut engine = engine();
        for request in requests() {
            engine.run_request(request, true)?;
        }
        let original = engine.surface().grid_points(engine.scale());
        let coverages: Vec<_> = engine.surface().rects.iter().map(|r| (r.1, r.2)).collect();

        for scale in [2.0, 7.5, 20.0, 113.25, 200.0] {
            engine.replay_all(scale)?;
            assert_eq!(engine.surface().grid_points(Scale::new(scale)), original);
            let replayed: Vec<_> = engine.surface().rects.iter().map(|r| (r.1, r.2)).collect();
            assert_eq!(replayed, coverages);
        }
        // replay at unchanged scale is idempotent
        let rects = engine.surface().rects.clone();
        engine.replay_all(engine.scale())?;
        assert_eq!(engine.surface().rects, rects);
        Ok(())
    }

    #[test]
    fn test_trace_only_for_verbose_runs() -> Result<(), RasterError> {
        let mut engine = Engine::with_trace(
            Recorder::default(),
            Vec::<String>::new(),
            EngineConfig {
                trace_steps: 2,
                ..EngineConfig::default()
            },
        );
        engine.run(Algorithm::Dda, 0, 0, 0, 0, false)?;
        assert!(engine.trace().is_empty());
        engine.run(Algorithm::BresenhamLine, 0, 0, 8, 5, true)?;
        assert_eq!(engine.trace().len(), 1 + 2 + 1);
        assert!(engine.trace()[0].starts_with("bresenham:"));
        engine.trace_mut().clear();
        engine.zoom_in()?;
        assert!(engine.trace().is_empty());
        assert_eq!(engine.history().len(), 2);
        Ok(())
    }

    #[test]
    fn test_zoom_clamp() -> Result<(), RasterError> {
        let mut engine = engine();
        for _ in 0..100 {
            engine.zoom_in()?;
        }
        assert_approx_eq!(engine.scale().value(), Scale::MAX);
        for _ in 0..100 {
            engine.zoom_out()?;
        }
        assert_approx_eq!(engine.scale().value(), Scale::MIN);
        engine.replay_all(-3.0)?;
        assert_approx_eq!(engine.scale().value(), Scale::MIN);
        assert_eq!(engine.surface().clears, 201);
        Ok(())
    }

    #[test]
    fn test_reset() -> Result<(), RasterError> {
        let mut engine = engine();
        for request in requests() {
            engine.run_request(request, false)?;
        }
        assert!(!engine.surface().rects.is_empty());
        engine.reset();
        assert!(engine.history().is_empty());
        assert!(engine.surface().rects.is_empty());
        engine.replay_all(10.0)?;
        assert!(engine.surface().rects.is_empty());
        Ok(())
    }

    #[test]
    fn test_replay_order() -> Result<(), RasterError> {
        // later requests are drawn over earlier ones
        let mut engine = engine();
        engine.run(Algorithm::Dda, 0, 0, 4, 0, false)?;
        engine.run(Algorithm::Wu, 0, 0, 4, 0, false)?;
        engine.replay_all(12.0)?;
        let last = engine.surface().rects.last().map(|r| r.1);
        assert_eq!(last, Some(None));
        let first = engine.surface().rects.first().map(|r| r.1);
        assert_eq!(first, Some(Algorithm::Dda.color()));
        Ok(())
    }
}
