/// Error returned from cell sequence construction, optimization and reconstruction
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BlocksError {
    #[error("input length {actual} is smaller than the minimum required length {minimum}")]
    InsufficientData { actual: usize, minimum: usize },

    #[error("parallel inputs must have the same length, expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("cell {index} has non-positive size")]
    NonPositiveSize { index: usize },

    #[error("measurement {index} has non-positive error")]
    NonPositiveError { index: usize },

    #[error("arrival coordinates must be sorted in ascending order")]
    UnsortedInput,

    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}

impl From<SortedArrayError> for BlocksError {
    fn from(_: SortedArrayError) -> Self {
        Self::UnsortedInput
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SortedArrayError {
    #[error("SortedArray constructors accept sorted arrays only")]
    Unsorted,

    #[error("SortedArray constructors accept contiguous arrays only")]
    NonContiguous,
}
