//! Error types for the plugin SDK.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for protocol and dispatch operations.
#[derive(Debug, Error)]
pub enum PluginError {
    /// I/O error on the underlying byte stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream ended after a message started but before it was complete.
    #[error("Incomplete message: expected {expected} bytes, received {received}")]
    IncompleteMessage {
        /// Bytes the current field required.
        expected: usize,
        /// Bytes actually available before end-of-stream.
        received: usize,
    },

    /// Type tag has no entry in the message registry.
    #[error("Unknown message type: {0}")]
    UnknownMessageType(u32),

    /// Type tag was registered twice.
    #[error("Message type {0} is already registered")]
    DuplicateMessageType(u32),

    /// Payload bytes are not valid for the schema selected by the tag.
    #[error("Decode error: {0}")]
    Decode(#[from] prost::DecodeError),

    /// Declared or encoded payload exceeds the configured limit.
    #[error("Message too large: {size} bytes (max {max})")]
    MessageTooLarge {
        /// Payload size in bytes.
        size: u64,
        /// Maximum allowed payload size.
        max: u32,
    },

    /// JSON error while encoding or decoding an opaque blob.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// MsgPack serialization error.
    #[error("MsgPack encode error: {0}")]
    MsgPackEncode(#[from] rmp_serde::encode::Error),

    /// MsgPack deserialization error.
    #[error("MsgPack decode error: {0}")]
    MsgPackDecode(#[from] rmp_serde::decode::Error),

    /// A handler operation failed.
    #[error("Handler error: {0}")]
    Handler(String),
}

impl PluginError {
    /// Create a handler error from any message.
    pub fn handler(message: impl Into<String>) -> Self {
        Self::Handler(message.into())
    }

    /// Whether this error leaves the input stream unusable.
    ///
    /// Only raw I/O failures are fatal; everything else concerns a single
    /// message and the dispatch loop moves on to the next one.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}

/// Errors raised while setting up a [`RateLimitedLogger`](crate::logger::RateLimitedLogger).
#[derive(Debug, Error)]
pub enum LoggerError {
    /// The user's home directory could not be resolved.
    #[error("failed to get user home directory")]
    HomeDirUnavailable,

    /// The log directory (or one of its parents) could not be created.
    #[error("failed to create log directory {}: {source}", path.display())]
    DirectoryCreate {
        /// Directory that was being created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The log file could not be created for a reason other than pre-existence.
    #[error("failed to create log file {}: {source}", path.display())]
    LogFileCreate {
        /// Candidate file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias using PluginError.
pub type Result<T> = std::result::Result<T, PluginError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            PluginError::IncompleteMessage {
                expected: 10,
                received: 3
            }
            .to_string(),
            "Incomplete message: expected 10 bytes, received 3"
        );
        assert_eq!(
            PluginError::UnknownMessageType(9).to_string(),
            "Unknown message type: 9"
        );
        assert_eq!(
            PluginError::handler("boom").to_string(),
            "Handler error: boom"
        );
    }

    #[test]
    fn test_only_io_is_fatal() {
        let io = PluginError::Io(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "gone",
        ));
        assert!(io.is_fatal());
        assert!(!PluginError::UnknownMessageType(7).is_fatal());
        assert!(!PluginError::IncompleteMessage {
            expected: 4,
            received: 0
        }
        .is_fatal());
    }

    #[test]
    fn test_logger_error_mentions_path() {
        let err = LoggerError::LogFileCreate {
            path: PathBuf::from("/tmp/x.log"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("/tmp/x.log"));
    }
}
