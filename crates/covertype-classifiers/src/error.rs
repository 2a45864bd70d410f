use std::error::Error;
use std::fmt;

/// Error type for scoring failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetricsError {
    LengthMismatch { actual: usize, predicted: usize },
    EmptyInput,
}

impl fmt::Display for MetricsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MetricsError::LengthMismatch { actual, predicted } => write!(
                f,
                "Actual and predicted labels must have equal length ({} vs {})",
                actual, predicted
            ),
            MetricsError::EmptyInput => write!(f, "Cannot score an empty set of labels"),
        }
    }
}

impl Error for MetricsError {}
