//! # Measurement Error Types Module
//!
//! This module defines the error types used throughout the extraction pipeline.
//! Only lookup and configuration errors are meant to stop the process; conversion
//! errors are recovered per item by the converter.

/// Custom error types for measurement extraction
#[derive(Debug, Clone, PartialEq)]
pub enum MeasurementError {
    /// A root concept could not be resolved by the lexical hierarchy
    Lookup(String),
    /// A value or unit could not be converted to the standard unit
    Conversion(String),
    /// Parser output could not be read into sentences
    Parse(String),
    /// Invalid configuration values
    Config(String),
}

impl std::fmt::Display for MeasurementError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MeasurementError::Lookup(msg) => write!(f, "Lookup error: {msg}"),
            MeasurementError::Conversion(msg) => write!(f, "Conversion error: {msg}"),
            MeasurementError::Parse(msg) => write!(f, "Parse error: {msg}"),
            MeasurementError::Config(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for MeasurementError {}

impl From<anyhow::Error> for MeasurementError {
    fn from(err: anyhow::Error) -> Self {
        MeasurementError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MeasurementError::Lookup("unknown.n.01".to_string());
        assert_eq!(err.to_string(), "Lookup error: unknown.n.01");
        let err = MeasurementError::Conversion("'two' is not numeric".to_string());
        assert_eq!(err.to_string(), "Conversion error: 'two' is not numeric");
    }

    #[test]
    fn test_from_anyhow() {
        let err: MeasurementError = anyhow::anyhow!("bad params").into();
        assert_eq!(err, MeasurementError::Config("bad params".to_string()));
    }
}
