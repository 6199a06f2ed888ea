//! Error types for construction and prediction

use std::fmt;

use crate::activation::activation::ActivationFunction;

/// Result type for network operations
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong when building a network or asking it for a
/// prediction. One tagged enum, no hierarchy; callers match on the kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// `predict` was called before `train` completed
    NotTrained,
    /// A sample could not be read as a sequence of numbers
    InvalidInput(String),
    /// Sample length differs from the configured input count
    InputLength { expected: usize, actual: usize },
    /// A sample entry is NaN where a value is required
    MissingValue { index: usize },
    /// The requested activation has no forward/backward implementation
    UnsupportedActivation(ActivationFunction),
    /// A configuration field failed range or shape validation
    InvalidConfig(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotTrained => {
                write!(f, "network has not been trained yet; call train() first")
            }
            Self::InvalidInput(msg) => write!(f, "invalid input: {}", msg),
            Self::InputLength { expected, actual } => write!(
                f,
                "sample has {} values but the network takes {} inputs",
                actual, expected
            ),
            Self::MissingValue { index } => write!(
                f,
                "sample entry {} is missing (NaN); fill it in before predicting",
                index
            ),
            Self::UnsupportedActivation(activation) => write!(
                f,
                "activation {:?} is not implemented; only Sigmoid is",
                activation
            ),
            Self::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for Error {}
