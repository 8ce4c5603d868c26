//! Common error types used throughout facetprep.
//!
//! The darkener reports per-file failures through these variants instead of
//! aborting, so the kind of failure stays inspectable after the batch ends.

/// Common error type for facetprep.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON document could not be parsed or serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A source image could not be opened or decoded.
    #[error("Decode error: {0}")]
    Decode(String),

    /// An image could not be encoded or written.
    #[error("Encode error: {0}")]
    Encode(String),

    /// Invalid input was provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The configuration is incomplete or inconsistent.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new Decode error.
    pub fn decode<S: Into<String>>(msg: S) -> Self {
        Self::Decode(msg.into())
    }

    /// Create a new Encode error.
    pub fn encode<S: Into<String>>(msg: S) -> Self {
        Self::Encode(msg.into())
    }

    /// Create a new InvalidInput error.
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a new Config error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Whether this error came from decoding a source image.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_))
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::decode("bad.png: unexpected EOF");
        assert_eq!(err.to_string(), "Decode error: bad.png: unexpected EOF");

        let err = Error::encode("out.jpg: unsupported color type");
        assert_eq!(err.to_string(), "Encode error: out.jpg: unsupported color type");

        let err = Error::invalid_input("level 1.5 out of range");
        assert_eq!(err.to_string(), "Invalid input: level 1.5 out of range");

        let err = Error::config("missing partition.input");
        assert_eq!(err.to_string(), "Configuration error: missing partition.input");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = Error::from(io_err);
        assert!(matches!(err, Error::Io(_)));
        assert!(!err.is_decode());
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{ not json").unwrap_err();
        let err = Error::from(json_err);
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_is_decode() {
        assert!(Error::decode("x").is_decode());
        assert!(!Error::encode("x").is_decode());
    }
}
