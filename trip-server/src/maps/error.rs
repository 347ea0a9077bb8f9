//! Maps client error types.

use std::fmt;

/// Errors from the maps HTTP client.
#[derive(Debug)]
pub enum MapsError {
    /// HTTP request failed (network error, timeout, etc.)
    Http(reqwest::Error),

    /// JSON deserialization failed
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    Api { status: u16, message: String },

    /// Request reached the API but the response `status` field reports failure
    Status {
        status: String,
        message: Option<String>,
    },

    /// Rate limited or over quota
    RateLimited,

    /// Invalid API key or request denied
    Unauthorized,
}

impl fmt::Display for MapsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapsError::Http(e) => write!(f, "HTTP error: {e}"),
            MapsError::Json { message, body } => {
                write!(f, "JSON parse error: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
            MapsError::Api { status, message } => {
                write!(f, "API error {status}: {message}")
            }
            MapsError::Status { status, message } => {
                write!(f, "maps request failed with status {status}")?;
                if let Some(message) = message {
                    write!(f, ": {message}")?;
                }
                Ok(())
            }
            MapsError::RateLimited => write!(f, "rate limited by maps API"),
            MapsError::Unauthorized => write!(f, "unauthorized (invalid API key)"),
        }
    }
}

impl std::error::Error for MapsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MapsError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for MapsError {
    fn from(err: reqwest::Error) -> Self {
        MapsError::Http(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = MapsError::Api {
            status: 500,
            message: "Internal Server Error".into(),
        };
        assert_eq!(err.to_string(), "API error 500: Internal Server Error");

        let err = MapsError::Status {
            status: "INVALID_REQUEST".into(),
            message: Some("missing origin".into()),
        };
        assert_eq!(
            err.to_string(),
            "maps request failed with status INVALID_REQUEST: missing origin"
        );

        let err = MapsError::Json {
            message: "expected string".into(),
            body: Some("{}".into()),
        };
        assert!(err.to_string().contains("JSON parse error"));
        assert!(err.to_string().contains("(body: {})"));

        assert_eq!(
            MapsError::Unauthorized.to_string(),
            "unauthorized (invalid API key)"
        );
    }
}
