// Copyright 2025 N. Dornseif
//
// Dual-licensed under Apache 2.0 and MIT terms.

//! Error type shared by the evaluators and the self-test.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum KeymixError {
    /// Paired batches of different length.
    #[error("batch lengths differ: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },
    /// Bias threshold that is negative or not finite.
    #[error("invalid bias threshold: {0}")]
    InvalidThreshold(f64),
    #[error("number of timing trials must be at least 1")]
    ZeroTrials,
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("could not write report: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, KeymixError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(
            KeymixError::LengthMismatch { left: 3, right: 4 }.to_string(),
            "batch lengths differ: 3 vs 4"
        );
        assert_eq!(
            KeymixError::InvalidThreshold(-1.0).to_string(),
            "invalid bias threshold: -1"
        );
        assert_eq!(
            KeymixError::ZeroTrials.to_string(),
            "number of timing trials must be at least 1"
        );
        assert_eq!(
            KeymixError::InvalidConfig("batch size must be at least 1".to_owned()).to_string(),
            "invalid configuration: batch size must be at least 1"
        );
    }

    #[test]
    fn from_io() {
        let err: KeymixError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, KeymixError::Io(_)));
        assert_eq!(err.to_string(), "could not write report: gone");
    }
}
