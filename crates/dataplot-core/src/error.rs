//! Error types for dataplot
//!
//! Provides a unified error type for all dataplot crates. Every error is a
//! rejection of the call that produced it; nothing is retried internally.

use thiserror::Error;

/// Core error type for dataset, broadcast and plotting operations
#[derive(Error, Debug)]
pub enum Error {
    /// Binary arithmetic attempted against a value that cannot be combined
    #[error("Unsupported operand: {0}")]
    UnsupportedOperand(String),

    /// Attempt to group zero datasets
    #[error("Empty group: number of datasets is 0")]
    EmptyGroup,

    /// Plot rendering attempted before data, label and target are established
    #[error("Unset prerequisite: '{0}' not set yet")]
    UnsetPrerequisite(&'static str),

    /// Non-positive batch size
    #[error("Invalid batch size: batch size should be greater than 0, but got {0}")]
    InvalidBatchSize(usize),

    /// Reference distribution name not recognised
    #[error("Unknown distribution: '{0}' (expected 'normal' or 'exponential')")]
    UnknownDistribution(String),

    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The drawing backend failed
    #[error("Render error: {0}")]
    Render(String),

    /// Settings could not be (de)serialized
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    /// IO error (for file output)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error for arrays whose lengths cannot be broadcast together
    pub fn length_mismatch(left: usize, right: usize) -> Self {
        Self::UnsupportedOperand(format!(
            "operands could not be broadcast together with lengths {left} and {right}"
        ))
    }

    /// Create an error for a probability outside `[0, 1]`
    pub fn invalid_probability(p: f64) -> Self {
        Self::InvalidParameter(format!("probability {p} must be in [0, 1]"))
    }

    /// Create an error for a failed drawing call
    pub fn render<E: std::fmt::Display>(err: E) -> Self {
        Self::Render(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnsupportedOperand("strings are not numbers".to_string());
        assert_eq!(err.to_string(), "Unsupported operand: strings are not numbers");

        let err = Error::EmptyGroup;
        assert_eq!(err.to_string(), "Empty group: number of datasets is 0");

        let err = Error::UnsetPrerequisite("label");
        assert_eq!(err.to_string(), "Unset prerequisite: 'label' not set yet");

        let err = Error::InvalidBatchSize(0);
        assert_eq!(
            err.to_string(),
            "Invalid batch size: batch size should be greater than 0, but got 0"
        );

        let err = Error::UnknownDistribution("cauchy".to_string());
        assert!(err.to_string().contains("'cauchy'"));
    }

    #[test]
    fn test_error_helper_functions() {
        let err = Error::length_mismatch(3, 4);
        match &err {
            Error::UnsupportedOperand(msg) => {
                assert!(msg.contains("3"));
                assert!(msg.contains("4"));
            }
            _ => panic!("Wrong error type"),
        }

        let err = Error::invalid_probability(1.5);
        assert_eq!(err.to_string(), "Invalid parameter: probability 1.5 must be in [0, 1]");

        let err = Error::render("backend gone");
        assert_eq!(err.to_string(), "Render error: backend gone");
    }

    #[test]
    fn test_error_from_io_error() {
        use std::io;

        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        match err {
            Error::Io(_) => assert!(err.to_string().contains("file not found")),
            _ => panic!("Wrong error type"),
        }
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_error_from_anyhow() {
        let err: Error = anyhow::anyhow!("custom error message").into();
        match err {
            Error::Other(_) => assert!(err.to_string().contains("custom error message")),
            _ => panic!("Wrong error type"),
        }
    }
}
