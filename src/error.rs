/// Error taxonomy for grid construction, site access and trial aggregation
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PercolationError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PercolationError {
    /// A size, trial count or aggregate input was not acceptable
    #[error("{message}")]
    InvalidArgument { message: String },

    /// A 1-indexed site coordinate fell outside `[1, n]`
    #[error("row/column ({row}/{col}) out of bounds [1, {n}]")]
    OutOfRange { row: usize, col: usize, n: usize },

    /// A flat disjoint-set index fell outside `[0, len)`
    #[error("index {index} out of bounds [0, {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

impl PercolationError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        PercolationError::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn is_out_of_range(&self) -> bool {
        matches!(
            self,
            PercolationError::OutOfRange { .. } | PercolationError::IndexOutOfRange { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_message() {
        let err = PercolationError::OutOfRange { row: 0, col: 1, n: 2 };
        assert_eq!(err.to_string(), "row/column (0/1) out of bounds [1, 2]");
        assert!(err.is_out_of_range());
    }

    #[test]
    fn test_invalid_argument_message() {
        let err = PercolationError::invalid_argument("Must enter a value greater than 0. You entered n = 0.");
        assert_eq!(
            err.to_string(),
            "Must enter a value greater than 0. You entered n = 0."
        );
        assert!(!err.is_out_of_range());
    }
}
