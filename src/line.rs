//! Classic line rasterizers: line equation stepping, DDA and Bresenham
use crate::{
    Algorithm, DrawRequest, GridPoint, PixelSink, PixelWrite, RasterError, Scalar, TraceSink,
    trace::Tracer, utils::step_sign,
};

/// All integers from `from` to `to` inclusive, in that order
pub(crate) fn axis_walk(from: i32, to: i32) -> impl Iterator<Item = i32> {
    let sign = step_sign(from, to) as i64;
    let count = (to as i64 - from as i64).unsigned_abs();
    (0..=count).map(move |index| (from as i64 + sign * index as i64) as i32)
}

/// Rasterize line by evaluating its equation at every cell of the dominant axis
pub fn step(
    request: &DrawRequest,
    pixels: &mut dyn PixelSink,
    trace: &mut dyn TraceSink,
    verbose: bool,
) -> Result<(), RasterError> {
    let color = Algorithm::Step.color();
    let mut tracer = Tracer::new(trace, verbose);
    let mut plot = |x: i32, y: i32| pixels.plot(PixelWrite::solid(GridPoint::new(x, y), color));
    let DrawRequest { x1, y1, x2, y2, .. } = *request;

    if x1 == x2 && y1 == y2 {
        tracer.line(format_args!("step: degenerate line, single pixel ({}, {})", x1, y1));
        plot(x1, y1);
        return Ok(());
    }
    if x1 == x2 {
        tracer.line(format_args!("step: vertical line x = {}", x1));
        for y in axis_walk(y1, y2) {
            tracer.step(format_args!("  ({}, {})", x1, y));
            plot(x1, y);
        }
        return Ok(());
    }

    let dx = (x2 as i64 - x1 as i64) as Scalar;
    let dy = (y2 as i64 - y1 as i64) as Scalar;
    let k = dy / dx;
    let b = y1 as Scalar - k * x1 as Scalar;
    tracer.line(format_args!("step: y = {:.4} * x + {:.4}", k, b));
    if dx.abs() >= dy.abs() {
        for x in axis_walk(x1, x2) {
            let y_exact = k * x as Scalar + b;
            let y = y_exact.round() as i32;
            tracer.step(format_args!("  x = {}, y = {:.4} -> {}", x, y_exact, y));
            plot(x, y);
        }
    } else {
        for y in axis_walk(y1, y2) {
            let x_exact = (y as Scalar - b) / k;
            let x = x_exact.round() as i32;
            tracer.step(format_args!("  y = {}, x = {:.4} -> {}", y, x_exact, x));
            plot(x, y);
        }
    }
    Ok(())
}

/// Digital differential analyzer
///
/// Advances both coordinates by a constant real increment and rounds them
/// at every step, no correction is made for the accumulated error.
pub fn dda(
    request: &DrawRequest,
    pixels: &mut dyn PixelSink,
    trace: &mut dyn TraceSink,
    verbose: bool,
) -> Result<(), RasterError> {
    let color = Algorithm::Dda.color();
    let mut tracer = Tracer::new(trace, verbose);
    let DrawRequest { x1, y1, x2, y2, .. } = *request;

    let dx = x2 as i64 - x1 as i64;
    let dy = y2 as i64 - y1 as i64;
    let length = dx.abs().max(dy.abs());
    if length == 0 {
        tracer.line(format_args!("dda: degenerate line, single pixel ({}, {})", x1, y1));
        pixels.plot(PixelWrite::solid(GridPoint::new(x1, y1), color));
        return Ok(());
    }

    let sx = dx as Scalar / length as Scalar;
    let sy = dy as Scalar / length as Scalar;
    tracer.line(format_args!(
        "dda: length = {}, dx = {:.4}, dy = {:.4}",
        length, sx, sy
    ));
    let mut cx = x1 as Scalar;
    let mut cy = y1 as Scalar;
    for _ in 0..=length {
        let point = GridPoint::new(cx.round() as i32, cy.round() as i32);
        tracer.step(format_args!("  ({:.4}, {:.4}) -> {}", cx, cy, point));
        pixels.plot(PixelWrite::solid(point, color));
        cx += sx;
        cy += sy;
    }
    Ok(())
}

/// Bresenham's integer line algorithm
///
/// Steep lines are transposed so the loop always walks the dominant axis.
/// Ties of the decision variable are resolved toward the end with the
/// larger dominant coordinate, which makes the pixel set independent of
/// the endpoints order.
pub fn bresenham(
    request: &DrawRequest,
    pixels: &mut dyn PixelSink,
    trace: &mut dyn TraceSink,
    verbose: bool,
) -> Result<(), RasterError> {
    let color = Algorithm::BresenhamLine.color();
    let mut tracer = Tracer::new(trace, verbose);

    let (mut from, mut to) = (request.start(), request.end());
    let steep = (to.y as i64 - from.y as i64).abs() > (to.x as i64 - from.x as i64).abs();
    if steep {
        from = from.transpose();
        to = to.transpose();
    }
    let dx = (to.x as i64 - from.x as i64).abs();
    let dy = (to.y as i64 - from.y as i64).abs();
    let sx = step_sign(from.x, to.x);
    let sy = step_sign(from.y, to.y);
    let backward = sx < 0;

    let mut err = 2 * dy - dx;
    tracer.line(format_args!(
        "bresenham: dx = {}, dy = {}, steep = {}, err = {}",
        dx, dy, steep, err
    ));
    let (mut x, mut y) = (from.x, from.y);
    for index in 0..=dx {
        let point = GridPoint::new(x, y);
        let point = if steep { point.transpose() } else { point };
        tracer.step(format_args!("  {} err = {}", point, err));
        pixels.plot(PixelWrite::solid(point, color));
        if index == dx {
            break;
        }
        let advance = if backward { err > 0 } else { err >= 0 };
        if advance {
            y += sy;
            err -= 2 * dx;
        }
        x += sx;
        err += 2 * dy;
    }
    Ok(())
}
