use std::fmt;

/// Failure of a single draw
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RasterError {
    /// Castle–Pitway reduction did not converge within its ceiling, this
    /// can only be caused by a defect in the reduction itself.
    ReductionLimit { a: u32, b: u32, limit: usize },
}

impl fmt::Display for RasterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RasterError::ReductionLimit { a, b, limit } => write!(
                f,
                "Castle-Pitway reduction of ({}, {}) exceeded {} iterations",
                a, b, limit
            ),
        }
    }
}

impl std::error::Error for RasterError {}
