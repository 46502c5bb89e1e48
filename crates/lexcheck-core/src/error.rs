//! Error types for lexcheck

/// Result type alias using lexcheck's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for lexcheck operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Classifier construction or execution errors
    #[error("classifier error: {0}")]
    Classifier(String),

    /// Compliance catalogue errors
    #[error("compliance error: {0}")]
    Compliance(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Filesystem errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Create a new classifier error
    pub fn classifier(msg: impl Into<String>) -> Self {
        Self::Classifier(msg.into())
    }

    /// Create a new compliance error
    pub fn compliance(msg: impl Into<String>) -> Self {
        Self::Compliance(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("min_text_length must be positive");
        assert_eq!(
            err.to_string(),
            "configuration error: min_text_length must be positive"
        );

        let err = Error::compliance("rule 'x' has no pattern");
        assert!(err.to_string().starts_with("compliance error"));
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
