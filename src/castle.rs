//! Castle–Pitway line algorithm
//!
//! The line from `(0, 0)` to `(a, b)` with `a >= b` is a word over two moves:
//! straight (advance the dominant axis) and diagonal (advance both axes). The
//! word is derived from the subtractive Euclidean algorithm on `(a - b, b)`,
//! which mirrors the continued fraction expansion of the slope:
//!
//! ```text
//! m1 = S, m2 = D
//! while x != y:
//!     if x > y: x -= y, m2 = m1 ++ reverse(m2)
//!     else:     y -= x, m1 = m2 ++ reverse(m1)
//! word = (m2 ++ reverse(m1)) repeated x times
//! ```
//!
//! Words are never materialized: each reduction adds a single join node to an
//! arena and [`CastleMoves`] walks the resulting tree lazily.
use crate::{
    Algorithm, DrawRequest, GridPoint, PixelSink, PixelWrite, RasterError, TraceSink,
    trace::Tracer, utils::step_sign,
};
use std::fmt;

/// Single move of the Castle–Pitway word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    /// Advance only the dominant axis
    Straight,
    /// Advance both axes
    Diagonal,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Straight => f.write_str("S"),
            Move::Diagonal => f.write_str("D"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Word {
    Move(Move),
    /// `words[left] ++ reverse(words[right])`
    Join(usize, usize),
}

/// Maximum number of reductions allowed for the dominant delta `a`
///
/// Subtractive reduction of `(a - b, b)` never takes more than `a` steps.
pub fn reduction_limit(a: u32) -> usize {
    2 * a as usize + 64
}

/// Lazy sequence of moves of a Castle–Pitway line
///
/// Cloning produces an independent iterator from the same position, and
/// [`CastleMoves::restart`] rewinds it to the first move.
#[derive(Debug, Clone)]
pub struct CastleMoves {
    words: Vec<Word>,
    root: usize,
    count: u32,
    total: usize,
    reversed: bool,
    reductions: usize,
    // iteration state
    repeat: u32,
    remaining: usize,
    stack: Vec<(usize, bool)>,
}

impl CastleMoves {
    /// Moves of the line with dominant delta `a` and secondary delta `b`
    ///
    /// Deltas are ordered on entry, so `(b, a)` yields the same word as
    /// `(a, b)`. When `reversed` is set moves are produced from the far end,
    /// which is how a line walking the dominant axis backward is drawn.
    pub fn new(a: u32, b: u32, reversed: bool) -> Result<Self, RasterError> {
        Self::with_limit(a, b, reversed, reduction_limit(a))
    }

    pub(crate) fn with_limit(
        a: u32,
        b: u32,
        reversed: bool,
        limit: usize,
    ) -> Result<Self, RasterError> {
        let (a, b) = if a >= b { (a, b) } else { (b, a) };
        let mut words = vec![Word::Move(Move::Straight), Word::Move(Move::Diagonal)];
        let mut reductions = 0;
        let (root, count) = if a == 0 {
            (0, 0)
        } else if b == 0 {
            (0, a)
        } else if a == b {
            (1, a)
        } else {
            let (mut x, mut y) = (a - b, b);
            let (mut m1, mut m2) = (0, 1);
            while x != y {
                if reductions >= limit {
                    return Err(RasterError::ReductionLimit { a, b, limit });
                }
                reductions += 1;
                if x > y {
                    x -= y;
                    words.push(Word::Join(m1, m2));
                    m2 = words.len() - 1;
                } else {
                    y -= x;
                    words.push(Word::Join(m2, m1));
                    m1 = words.len() - 1;
                }
            }
            words.push(Word::Join(m2, m1));
            (words.len() - 1, x)
        };
        Ok(Self {
            words,
            root,
            count,
            total: a as usize,
            reversed,
            reductions,
            repeat: count,
            remaining: a as usize,
            stack: Vec::new(),
        })
    }

    /// Number of subtractive reductions it took to build the word
    pub fn reductions(&self) -> usize {
        self.reductions
    }

    /// How many times the base word is repeated
    pub fn repeat_count(&self) -> u32 {
        self.count
    }

    /// Rewind to the first move
    pub fn restart(&mut self) {
        self.repeat = self.count;
        self.remaining = self.total;
        self.stack.clear();
    }
}

impl Iterator for CastleMoves {
    type Item = Move;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (index, reversed) = match self.stack.pop() {
                Some(frame) => frame,
                None => {
                    if self.repeat == 0 {
                        return None;
                    }
                    self.repeat -= 1;
                    (self.root, self.reversed)
                }
            };
            match self.words[index] {
                Word::Move(step) => {
                    self.remaining -= 1;
                    return Some(step);
                }
                // left ++ reverse(right), reversed: right ++ reverse(left)
                Word::Join(left, right) => {
                    if reversed {
                        self.stack.push((left, true));
                        self.stack.push((right, false));
                    } else {
                        self.stack.push((right, true));
                        self.stack.push((left, false));
                    }
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for CastleMoves {}

/// Castle–Pitway line rasterizer
///
/// Produces the same pixels as Bresenham's algorithm, but derives them from
/// the structure of the slope instead of an error term.
pub fn castle_pitway(
    request: &DrawRequest,
    pixels: &mut dyn PixelSink,
    trace: &mut dyn TraceSink,
    verbose: bool,
) -> Result<(), RasterError> {
    let color = Algorithm::CastlePitway.color();
    let mut tracer = Tracer::new(trace, verbose);
    let (from, to) = (request.start(), request.end());

    let dx = (to.x as i64 - from.x as i64).unsigned_abs() as u32;
    let dy = (to.y as i64 - from.y as i64).unsigned_abs() as u32;
    let sx = step_sign(from.x, to.x);
    let sy = step_sign(from.y, to.y);
    let steep = dy > dx;
    let (a, b) = if steep { (dy, dx) } else { (dx, dy) };
    let backward = if steep { sy < 0 } else { sx < 0 };

    let moves = CastleMoves::new(a, b, backward)?;
    if verbose {
        let word: String = moves.clone().take(32).map(|step| step.to_string()).collect();
        tracer.line(format_args!(
            "castle: a = {}, b = {}, steep = {}, reductions = {}, moves = {}{}",
            a,
            b,
            steep,
            moves.reductions(),
            word,
            if a > 32 { "..." } else { "" },
        ));
    }

    let (mut x, mut y) = (from.x, from.y);
    pixels.plot(PixelWrite::solid(from, color));
    for step in moves {
        let diagonal = step == Move::Diagonal;
        if steep {
            y += sy;
            if diagonal {
                x += sx;
            }
        } else {
            x += sx;
            if diagonal {
                y += sy;
            }
        }
        let point = GridPoint::new(x, y);
        tracer.step(format_args!("  {} -> {}", step, point));
        pixels.plot(PixelWrite::solid(point, color));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NullTrace, PixelLog, line::bresenham};

    fn word(a: u32, b: u32, reversed: bool) -> String {
        CastleMoves::new(a, b, reversed)
            .unwrap()
            .map(|step| step.to_string())
            .collect()
    }

    fn line(draw: crate::DrawFn, x1: i32, y1: i32, x2: i32, y2: i32) -> PixelLog {
        let request = DrawRequest::new(Algorithm::CastlePitway, x1, y1, x2, y2);
        let mut log = PixelLog::new();
        draw(&request, &mut log, &mut NullTrace, false).unwrap();
        log
    }

    #[test]
    fn test_words() {
        assert_eq!(word(8, 5, false), "DSDDSDSD");
        assert_eq!(word(5, 2, false), "SDSDS");
        assert_eq!(word(7, 3, false), "SDSDSDS");
        assert_eq!(word(2, 1, false), "DS");
        assert_eq!(word(2, 1, true), "SD");
        assert_eq!(word(4, 0, false), "SSSS");
        assert_eq!(word(3, 3, true), "DDD");
        assert_eq!(word(0, 0, false), "");
    }

    #[test]
    fn test_moves_counts() {
        for a in 0..80 {
            for b in 0..=a {
                let moves = CastleMoves::new(a, b, false).unwrap();
                assert_eq!(moves.len(), a as usize);
                assert!(moves.reductions() <= a as usize);
                let word: Vec<_> = moves.collect();
                assert_eq!(word.len(), a as usize);
                let diagonals = word.iter().filter(|m| **m == Move::Diagonal).count();
                assert_eq!(diagonals, b as usize);

                let mut reversed: Vec<_> = CastleMoves::new(a, b, true).unwrap().collect();
                reversed.reverse();
                assert_eq!(word, reversed);
            }
        }
    }

    #[test]
    fn test_deltas_are_ordered() {
        assert_eq!(word(2, 5, false), word(5, 2, false));
        assert_eq!(word(5, 8, true), word(8, 5, true));
        let moves = CastleMoves::new(2, 5, false).unwrap();
        assert_eq!(moves.len(), 5);
        assert_eq!(moves.filter(|m| *m == Move::Diagonal).count(), 2);
        assert_eq!(
            CastleMoves::with_limit(5, 8, false, 1).unwrap_err(),
            RasterError::ReductionLimit {
                a: 8,
                b: 5,
                limit: 1
            }
        );
    }

    #[test]
    fn test_restart() {
        let mut moves = CastleMoves::new(13, 5, false).unwrap();
        let snapshot = moves.clone();
        let first: Vec<_> = moves.by_ref().take(4).collect();
        assert_eq!(moves.len(), 9);
        let rest: Vec<_> = moves.by_ref().collect();
        assert_eq!(moves.len(), 0);
        moves.restart();
        assert_eq!(moves.len(), 13);
        let again: Vec<_> = moves.collect();
        assert_eq!([first, rest].concat(), again);
        assert_eq!(snapshot.collect::<Vec<_>>(), again);
    }

    #[test]
    fn test_reduction_limit() {
        let error = CastleMoves::with_limit(8, 5, false, 1).unwrap_err();
        assert_eq!(
            error,
            RasterError::ReductionLimit {
                a: 8,
                b: 5,
                limit: 1
            }
        );
        // trivial words do not reduce at all
        assert!(CastleMoves::with_limit(8, 0, false, 0).is_ok());
        assert!(CastleMoves::with_limit(8, 8, false, 0).is_ok());
        assert!(CastleMoves::with_limit(8, 4, false, 0).is_ok());
    }

    #[test]
    fn test_scenario() {
        let log = line(castle_pitway, 0, 0, 8, 5);
        let points: Vec<_> = log.points().into_iter().map(|p| (p.x, p.y)).collect();
        assert_eq!(
            points,
            vec![
                (0, 0),
                (1, 1),
                (2, 1),
                (3, 2),
                (4, 3),
                (5, 3),
                (6, 4),
                (7, 4),
                (8, 5)
            ]
        );
    }

    #[test]
    fn test_matches_bresenham() {
        for (x1, y1) in [(0, 0), (-7, 11)] {
            for dx in -50..=50 {
                for dy in -50..=50 {
                    let castle = line(castle_pitway, x1, y1, x1 + dx, y1 + dy);
                    let reference = line(bresenham, x1, y1, x1 + dx, y1 + dy);
                    assert_eq!(castle.len(), reference.len());
                    assert_eq!(
                        castle.point_set(),
                        reference.point_set(),
                        "delta ({}, {})",
                        dx,
                        dy
                    );
                }
            }
        }
    }

    #[test]
    fn test_verbose_trace() {
        let request = DrawRequest::new(Algorithm::CastlePitway, 0, 0, 8, 5);
        let mut lines: Vec<String> = Vec::new();
        castle_pitway(&request, &mut PixelLog::new(), &mut lines, true).unwrap();
        assert_eq!(
            lines[0],
            "castle: a = 8, b = 5, steep = false, reductions = 3, moves = DSDDSDSD"
        );
        assert_eq!(lines.len(), 1 + 8);
    }
}
