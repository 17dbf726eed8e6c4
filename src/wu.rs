use crate::{
    DrawRequest, GridPoint, PixelSink, PixelWrite, RasterError, Scalar, TraceSink,
    trace::Tracer,
    utils::{fpart, ipart, rfpart},
};
use std::mem::swap;

/// Xiaolin Wu's antialiased line algorithm
///
/// Every column of the dominant axis gets two pixels straddling the ideal
/// line, with complementary coverage. Endpoint columns are additionally
/// weighted by the horizontal gap of the endpoint within its pixel. Pixels
/// carry no color tag, the surface decides how coverage is rendered.
pub fn wu(
    request: &DrawRequest,
    pixels: &mut dyn PixelSink,
    trace: &mut dyn TraceSink,
    verbose: bool,
) -> Result<(), RasterError> {
    let mut tracer = Tracer::new(trace, verbose);
    let mut x1 = request.x1 as Scalar;
    let mut y1 = request.y1 as Scalar;
    let mut x2 = request.x2 as Scalar;
    let mut y2 = request.y2 as Scalar;

    let steep = (y2 - y1).abs() > (x2 - x1).abs();
    if steep {
        swap(&mut x1, &mut y1);
        swap(&mut x2, &mut y2);
    }
    if x1 > x2 {
        swap(&mut x1, &mut x2);
        swap(&mut y1, &mut y2);
    }
    let dx = x2 - x1;
    let dy = y2 - y1;
    let grad = if dx == 0.0 { 1.0 } else { dy / dx };
    tracer.line(format_args!(
        "wu: steep = {}, gradient = {:.4}",
        steep, grad
    ));

    let mut plot = |x: Scalar, y: Scalar, coverage: Scalar| {
        let (x, y) = if steep { (y, x) } else { (x, y) };
        let point = GridPoint::new(x as i32, y as i32);
        pixels.plot(PixelWrite::partial(point, coverage));
    };

    // first endpoint
    let xend = ipart(x1 + 0.5);
    let yend = y1 + grad * (xend - x1);
    let xgap = rfpart(x1 + 0.5);
    let xpxl1 = xend;
    let ypxl1 = ipart(yend);
    plot(xpxl1, ypxl1, rfpart(yend) * xgap);
    plot(xpxl1, ypxl1 + 1.0, fpart(yend) * xgap);
    let mut intery = yend + grad;

    // second endpoint
    let xend = ipart(x2 + 0.5);
    let yend = y2 + grad * (xend - x2);
    let xgap = fpart(x2 + 0.5);
    let xpxl2 = xend;
    let ypxl2 = ipart(yend);
    plot(xpxl2, ypxl2, rfpart(yend) * xgap);
    plot(xpxl2, ypxl2 + 1.0, fpart(yend) * xgap);

    for x in (xpxl1 as i64 + 1)..(xpxl2 as i64) {
        let x = x as Scalar;
        tracer.step(format_args!(
            "  x = {}, intery = {:.4}, coverage = {:.4}/{:.4}",
            x,
            intery,
            rfpart(intery),
            fpart(intery)
        ));
        plot(x, ipart(intery), rfpart(intery));
        plot(x, ipart(intery) + 1.0, fpart(intery));
        intery += grad;
    }
    Ok(())
}
