//! Error types for the transcoding engine.

use fieldjson_model::Kind;
use thiserror::Error;

/// Result type for transcoding operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while marshaling or unmarshaling a document.
///
/// None of these are retried internally and there is no partial
/// recovery: a failing field aborts the whole call.
#[derive(Debug, Error)]
pub enum Error {
    /// A field definition is structurally invalid. Indicates a
    /// programming or schema mistake, not a data problem.
    #[error("configuration error for field \"{field}\" on type \"{record}\": {message}")]
    Configuration {
        record: String,
        field: String,
        message: String,
    },

    /// A marshal/unmarshal override explicitly signaled failure.
    #[error("error calling {op} callback {callback} for field \"{field}\" on type \"{record}\"")]
    Callback {
        op: &'static str,
        record: String,
        field: String,
        callback: String,
    },

    /// A decoded wire value's runtime shape disagrees with the declared
    /// field kind.
    #[error("field \"{field}\" on type \"{record}\" is declared {expected:?} but wire value is {actual:?}")]
    TypeMismatch {
        record: String,
        field: String,
        expected: Kind,
        actual: Kind,
    },

    /// The underlying JSON text is not parseable. Reported before any
    /// field processing begins.
    #[error("json decode error: {0}")]
    Codec(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn configuration(
        record: &str,
        field: &str,
        message: impl Into<String>,
    ) -> Self {
        Error::Configuration {
            record: record.to_string(),
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn callback(op: &'static str, record: &str, field: &str, callback: String) -> Self {
        Error::Callback {
            op,
            record: record.to_string(),
            field: field.to_string(),
            callback,
        }
    }

    pub(crate) fn mismatch(record: &str, field: &str, expected: Kind, actual: Kind) -> Self {
        Error::TypeMismatch {
            record: record.to_string(),
            field: field.to_string(),
            expected,
            actual,
        }
    }
}
