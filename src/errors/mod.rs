//! Error types for the adapter.
//!
//! Two kinds of failure surface from this crate:
//! - [`AdapterError::BadResponse`]: the terminal answered, but the response
//!   failed the uniform error-code/has-data check
//! - Inherited faults: anything the terminal library itself raises passes
//!   through transparently, with no wrapping or added context

use thiserror::Error;

use crate::terminal::TerminalError;

/// Errors that can occur during adapter operations.
#[derive(Error, Debug)]
pub enum AdapterError {
    /// The terminal returned a non-zero error code, or a payload with no
    /// usable data. Carries the terminal's error code (zero when the
    /// response was rejected for emptiness alone).
    #[error("terminal returned no usable data (error code {code})")]
    BadResponse { code: i64 },

    /// The session state was queried before `connect()` was ever called.
    #[error("not connected: call connect() before querying session state")]
    NotConnected,

    /// The terminal response does not match its documented shape, for
    /// example ragged column series or a summary-form response to a query
    /// that is specified to return the field form.
    #[error("malformed terminal response: {0}")]
    MalformedResponse(String),

    /// A column name was requested that the frame does not carry.
    #[error("unknown column: {0}")]
    UnknownColumn(String),

    /// A fault raised by the terminal library itself, propagated unchanged.
    #[error(transparent)]
    Terminal(#[from] TerminalError),

    /// Failed to set up the scoped stdout redirection during connect.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_response_carries_code() {
        let error = AdapterError::BadResponse { code: -40520007 };
        assert_eq!(
            format!("{}", error),
            "terminal returned no usable data (error code -40520007)"
        );
    }

    #[test]
    fn test_terminal_fault_is_transparent() {
        let fault = TerminalError::CallFailed("socket dropped".to_string());
        let wrapped = AdapterError::from(fault);
        assert_eq!(format!("{}", wrapped), "terminal call failed: socket dropped");
    }

    #[test]
    fn test_unknown_column_display() {
        let error = AdapterError::UnknownColumn("i_weight".to_string());
        assert_eq!(format!("{}", error), "unknown column: i_weight");
    }
}
