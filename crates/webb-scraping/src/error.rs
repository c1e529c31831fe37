//! Error types for target scraping.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.
//! Tolerated misses ("no observations", "name not resolved") are outcome values, not
//! errors; everything here halts the operation that produced it.

use std::fmt;

/// Errors from the HTTP client layer.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// HTTP transport error (connection, DNS, TLS, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Middleware error
    #[error("Middleware error: {0}")]
    Middleware(#[from] reqwest_middleware::Error),

    /// Resource not found (404 response)
    #[error("Resource not found: {resource}")]
    NotFound {
        /// Description of the missing resource
        resource: String,
    },

    /// Invalid request parameters (400 response)
    #[error("Bad request: {message}")]
    BadRequest {
        /// Error message from the service
        message: String,
    },

    /// JSON parsing error
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// A service URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Server error (5xx response)
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Unexpected HTTP status
    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Response body or message
        message: String,
    },
}

impl ClientError {
    /// Create a not found error.
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound { resource: resource.into() }
    }

    /// Create a bad request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest { message: message.into() }
    }

    /// Create a server error.
    #[must_use]
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server { status, message: message.into() }
    }

    /// Returns true if the service answered that the resource does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}

/// Errors from the TSM/ESM calculations.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum MetricError {
    /// A property the formula needs is absent from the planet record.
    #[error("Missing planet property '{0}'")]
    MissingProperty(&'static str),

    /// A property is present but physically meaningless (zero or negative).
    #[error("Invalid planet property '{key}': {value}")]
    InvalidProperty {
        /// Property key
        key: &'static str,
        /// Offending value
        value: f64,
    },
}

/// Scrape pipeline stages, in the order `scrape_all` runs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// SIMBAD alias lookup (with ExoFOP fallback).
    Aliases,
    /// arXiv literature search.
    Arxiv,
    /// MAST lookup for JWST observations.
    WebbMast,
    /// MAST lookup for HST observations.
    Hst,
    /// exo.MAST planet properties.
    PlanetProperties,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Aliases => "aliases",
            Self::Arxiv => "arxiv",
            Self::WebbMast => "webb_mast",
            Self::Hst => "hst",
            Self::PlanetProperties => "planet_properties",
        };
        f.write_str(name)
    }
}

/// Errors from scrape operations on a target.
#[derive(thiserror::Error, Debug)]
pub enum ScrapeError {
    /// Error from the HTTP client
    #[error("Request failed: {0}")]
    Client(#[from] ClientError),

    /// The service answered but had nothing for this name
    #[error("Not found: {0}")]
    NotFound(String),

    /// A page did not have the expected structure
    #[error("Unexpected markup: {0}")]
    Markup(String),

    /// Text could not be extracted from a program PDF
    #[error("PDF extraction failed for {url}: {message}")]
    Pdf {
        /// PDF location
        url: String,
        /// Extractor message
        message: String,
    },

    /// Metric calculation failed
    #[error("Metric error: {0}")]
    Metric(#[from] MetricError),

    /// A pipeline stage failed; later stages did not run
    #[error("Stage '{stage}' failed: {source}")]
    Stage {
        /// Stage that failed
        stage: Stage,
        /// Underlying error
        #[source]
        source: Box<ScrapeError>,
    },
}

impl ScrapeError {
    /// Create a not found error.
    #[must_use]
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    /// Create a markup error.
    #[must_use]
    pub fn markup(message: impl Into<String>) -> Self {
        Self::Markup(message.into())
    }

    /// Wrap this error as the failure of a pipeline stage.
    #[must_use]
    pub fn at_stage(self, stage: Stage) -> Self {
        Self::Stage { stage, source: Box::new(self) }
    }

    /// The stage that failed, if this error came out of `scrape_all`.
    #[must_use]
    pub const fn stage(&self) -> Option<Stage> {
        match self {
            Self::Stage { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type alias for scrape operations.
pub type ScrapeResult<T> = Result<T, ScrapeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_not_found() {
        assert!(ClientError::not_found("exoplanets/x").is_not_found());
        assert!(!ClientError::server(500, "boom").is_not_found());
        assert!(!ClientError::bad_request("bad").is_not_found());
    }

    #[test]
    fn test_stage_wrapping() {
        let err = ScrapeError::not_found("WASP-999 b").at_stage(Stage::PlanetProperties);
        assert_eq!(err.stage(), Some(Stage::PlanetProperties));
        let msg = err.to_string();
        assert!(msg.contains("planet_properties"));
        assert!(msg.contains("WASP-999 b"));
    }

    #[test]
    fn test_metric_error_message() {
        let err = ScrapeError::from(MetricError::MissingProperty("Jmag"));
        assert!(err.to_string().contains("Jmag"));
        assert_eq!(err.stage(), None);
    }

    #[test]
    fn test_url_parse_error_conversion() {
        let err: ClientError = url::Url::parse("not a url").unwrap_err().into();
        assert!(matches!(err, ClientError::InvalidUrl(_)));
    }
}
