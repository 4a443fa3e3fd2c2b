/// Shared error type used across all Strategos crates.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP: {0}")]
    Http(String),

    #[error("timeout: {0}")]
    Timeout(String),

    #[error("provider {provider}: {message}")]
    Provider { provider: String, message: String },

    #[error("config: {0}")]
    Config(String),

    #[error("auth: {0}")]
    Auth(String),

    /// User input rejected by a local rule (e.g. password requirements).
    #[error("{0}")]
    Validation(String),

    /// An imported progress document is not a keyed JSON object.
    #[error("import format: {0}")]
    ImportFormat(String),

    #[error("storage: {0}")]
    Storage(String),

    /// An operation was attempted from an access state that does not allow it.
    #[error("access: {0}")]
    Access(String),

    /// The report could not be produced. The message carries the underlying
    /// cause for logs; user-facing surfaces show a fixed message instead.
    #[error("generation failed: {0}")]
    Generation(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_is_shown_verbatim() {
        let err = Error::Validation("Passwords do not match.".into());
        assert_eq!(err.to_string(), "Passwords do not match.");
    }

    #[test]
    fn json_errors_convert() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = parse.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
