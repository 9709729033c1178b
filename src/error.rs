/// Error types for the viewer
///
/// Errors travel inside iced messages, so every variant owns plain strings
/// and the whole enum is `Clone`.
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViewerError {
    /// A target key that is not part of the catalog
    #[error("unknown target: {0}")]
    UnknownTarget(String),

    /// The image bytes could not be retrieved
    #[error("failed to fetch {uri}: {reason}")]
    Fetch { uri: String, reason: String },

    /// The image is bigger than the viewer accepts
    #[error("{uri} is {size} bytes, limit is {limit}")]
    TooLarge { uri: String, size: u64, limit: u64 },

    /// The HTTP client could not be built
    #[error("HTTP client setup failed: {0}")]
    Client(String),

    /// The bytes were retrieved but are not a decodable image
    #[error("failed to decode {uri}: {reason}")]
    Decode { uri: String, reason: String },

    /// A background task panicked or was cancelled
    #[error("background task failed: {0}")]
    Task(String),
}

pub type Result<T> = std::result::Result<T, ViewerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_uri() {
        let err = ViewerError::Fetch {
            uri: "https://example.invalid/m31.jpg".to_string(),
            reason: "connection refused".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("m31.jpg"));
        assert!(text.contains("connection refused"));
    }

    #[test]
    fn test_too_large_names_limit() {
        let err = ViewerError::TooLarge {
            uri: "/tmp/huge.png".to_string(),
            size: 2048,
            limit: 1024,
        };
        assert_eq!(err.to_string(), "/tmp/huge.png is 2048 bytes, limit is 1024");
    }
}
