use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Contract violations reported by matrix and network operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("{op}: shape mismatch, expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        op: &'static str,
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("{op}: index {index} out of range for length {len}")]
    IndexOutOfRange {
        op: &'static str,
        index: usize,
        len: usize,
    },

    #[error("dataset row width {input_cols} + {target_cols} is zero or overflows")]
    InvalidWidth {
        input_cols: usize,
        target_cols: usize,
    },

    #[error("cannot allocate a {rows}x{cols} matrix")]
    AllocationFailure { rows: usize, cols: usize },

    #[error("a network needs at least 2 layer sizes, got {0}")]
    TooFewLayers(usize),

    #[error("layer {index} has size zero")]
    EmptyLayer { index: usize },
}

impl Error {
    pub(crate) fn shape(
        op: &'static str,
        expected: (usize, usize),
        actual: (usize, usize),
    ) -> Self {
        Error::ShapeMismatch {
            op,
            expected,
            actual,
        }
    }
}
