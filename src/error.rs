//! Error types and handling for the `AvgWeather` application

use thiserror::Error;

/// Main error type for the `AvgWeather` application
#[derive(Error, Debug)]
pub enum AvgWeatherError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Provider API communication errors
    #[error("Provider API error: {message}")]
    Api { message: String },

    /// Document or field parsing errors
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// A frequency-resolution key carried no observations. Indicates an
    /// adapter bug upstream, not a data-quality issue.
    #[error("No observations recorded for key: {key}")]
    EmptyObservationSet { key: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl AvgWeatherError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new provider API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new parse error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for AvgWeatherError {
    fn from(err: reqwest::Error) -> Self {
        AvgWeatherError::api(err.to_string())
    }
}

impl From<reqwest_middleware::Error> for AvgWeatherError {
    fn from(err: reqwest_middleware::Error) -> Self {
        AvgWeatherError::api(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = AvgWeatherError::config("missing section");
        assert!(matches!(config_err, AvgWeatherError::Config { .. }));

        let api_err = AvgWeatherError::api("connection failed");
        assert!(matches!(api_err, AvgWeatherError::Api { .. }));

        let parse_err = AvgWeatherError::parse("bad date");
        assert!(matches!(parse_err, AvgWeatherError::Parse { .. }));
    }

    #[test]
    fn test_empty_observation_set_names_key() {
        let err = AvgWeatherError::EmptyObservationSet {
            key: "2012-07-14".to_string(),
        };
        assert!(err.to_string().contains("2012-07-14"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: AvgWeatherError = io_err.into();
        assert!(matches!(err, AvgWeatherError::Io { .. }));
    }
}
