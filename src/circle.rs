use crate::{
    Algorithm, DrawRequest, GridPoint, PixelSink, PixelWrite, RasterError, TraceSink,
    trace::Tracer,
};

/// Eight reflections of the first octant point `(x, y)` around the center
///
/// Reflections that do not fit into the `i32` grid are skipped.
fn octants(center: GridPoint, x: i64, y: i64) -> impl Iterator<Item = GridPoint> {
    [
        (x, y),
        (-x, y),
        (x, -y),
        (-x, -y),
        (y, x),
        (-y, x),
        (y, -x),
        (-y, -x),
    ]
    .into_iter()
    .filter_map(move |(dx, dy)| {
        let x = i32::try_from(center.x as i64 + dx).ok()?;
        let y = i32::try_from(center.y as i64 + dy).ok()?;
        Some(GridPoint::new(x, y))
    })
}

/// Bresenham's midpoint circle algorithm
///
/// Center is `(x1, y1)` of the request and the radius is `abs(y2)`. Only the
/// arc from the top of the circle to the 45° diagonal is computed, every
/// point is then plotted in all eight octants (points on the axes and on the
/// diagonals are plotted more than once).
pub fn circle(
    request: &DrawRequest,
    pixels: &mut dyn PixelSink,
    trace: &mut dyn TraceSink,
    verbose: bool,
) -> Result<(), RasterError> {
    let color = Algorithm::BresenhamCircle.color();
    let mut tracer = Tracer::new(trace, verbose);
    let center = request.center();
    let radius = request.radius().min(i32::MAX as u32) as i64;

    if radius == 0 {
        tracer.line(format_args!("circle: zero radius, single pixel {}", center));
        pixels.plot(PixelWrite::solid(center, color));
        return Ok(());
    }

    let (mut x, mut y) = (0i64, radius);
    let mut d = 3 - 2 * radius;
    tracer.line(format_args!("circle: center = {}, r = {}, d = {}", center, radius, d));
    let mut emit = |x: i64, y: i64| {
        for point in octants(center, x, y) {
            pixels.plot(PixelWrite::solid(point, color));
        }
    };
    emit(x, y);
    while y >= x {
        if d > 0 {
            d += 4 * (x - y) + 10;
            y -= 1;
        } else {
            d += 4 * x + 6;
        }
        x += 1;
        tracer.step(format_args!("  x = {}, y = {}, d = {}", x, y, d));
        emit(x, y);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NullTrace, PixelLog};
    use std::collections::BTreeSet;

    fn circle_points(cx: i32, cy: i32, r: i32) -> (Vec<GridPoint>, BTreeSet<GridPoint>) {
        let request = DrawRequest::new(Algorithm::BresenhamCircle, cx, cy, 0, r);
        let mut log = PixelLog::new();
        circle(&request, &mut log, &mut NullTrace, false).unwrap();
        (log.points(), log.point_set())
    }

    #[test]
    fn test_zero_radius() {
        let (points, _) = circle_points(3, -4, 0);
        assert_eq!(points, vec![GridPoint::new(3, -4)]);
    }

    #[test]
    fn test_radius_five() {
        let (points, set) = circle_points(0, 0, 5);
        // first octant of the classic midpoint circle
        assert_eq!(
            points.iter().step_by(8).copied().collect::<Vec<_>>(),
            vec![
                GridPoint::new(0, 5),
                GridPoint::new(1, 5),
                GridPoint::new(2, 5),
                GridPoint::new(3, 4),
                GridPoint::new(4, 3),
            ]
        );
        for (x, y) in [(0, 5), (3, 4), (4, 3), (5, 0)] {
            for point in octants(GridPoint::new(0, 0), x, y) {
                assert!(set.contains(&point), "missing {}", point);
            }
        }
        assert_eq!(set.len(), 28);
    }

    #[test]
    fn test_negative_radius_field() {
        assert_eq!(circle_points(1, 1, -6).1, circle_points(1, 1, 6).1);
    }

    #[test]
    fn test_symmetry() {
        for r in 0..60 {
            let center = GridPoint::new(7, -3);
            let (_, set) = circle_points(center.x, center.y, r);
            for point in set.iter() {
                let x = (point.x - center.x) as i64;
                let y = (point.y - center.y) as i64;
                for mirror in octants(center, x, y) {
                    assert!(set.contains(&mirror), "r = {}: {} missing", r, mirror);
                }
            }
        }
    }

    #[test]
    fn test_center_near_grid_bounds() {
        // reflections beyond the i32 grid are dropped instead of overflowing
        let (points, set) = circle_points(i32::MAX - 2, 0, 5);
        assert!(!points.is_empty());
        assert!(set.contains(&GridPoint::new(i32::MAX, 5)));
        assert!(set.contains(&GridPoint::new(i32::MAX - 7, 0)));
        assert!(set.iter().all(|p| p.x >= i32::MAX - 7));
        let (_, full) = circle_points(0, 0, 5);
        let inside = full.iter().filter(|p| p.x <= 2).count();
        assert_eq!(set.len(), inside);

        // only the quadrant with non-negative offsets fits at the minimum corner
        let (_, set) = circle_points(i32::MIN, i32::MIN, 3);
        assert!(set.contains(&GridPoint::new(i32::MIN, i32::MIN + 3)));
        let (_, full) = circle_points(0, 0, 3);
        let quadrant = full.iter().filter(|p| p.x >= 0 && p.y >= 0).count();
        assert_eq!(set.len(), quadrant);
    }

    #[test]
    fn test_points_near_radius() {
        for r in 1..100 {
            let (_, set) = circle_points(0, 0, r);
            for point in set {
                let dist = ((point.x * point.x + point.y * point.y) as f64).sqrt();
                assert!((dist - r as f64).abs() < 1.0, "r = {}: {}", r, point);
            }
        }
    }
}
