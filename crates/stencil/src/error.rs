//! Error types for Stencil operations.
//!
//! This module provides the main error type [`Error`] which covers every
//! failure a diagram can report, from invalid declarations through to
//! file export.

use std::io;

use thiserror::Error;

use stencil_core::catalog::UnknownCategory;

/// The main error type for Stencil operations.
///
/// Declaration errors ([`Error::UnknownCategory`],
/// [`Error::UnbalancedGroup`], [`Error::DanglingReference`]) are reported
/// by the call that makes the declaration invalid, not deferred to
/// finalization.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error(transparent)]
    UnknownCategory(#[from] UnknownCategory),

    #[error("Unbalanced group: {0}")]
    UnbalancedGroup(String),

    #[error("Dangling reference: {0}")]
    DanglingReference(String),

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_category_converts() {
        let err: Error = UnknownCategory("teapot".to_string()).into();
        let message = err.to_string();

        assert!(message.contains("teapot"));
    }

    #[test]
    fn test_io_error_converts() {
        let err: Error = io::Error::new(io::ErrorKind::PermissionDenied, "denied").into();
        assert!(matches!(err, Error::Io(_)));
    }
}
