//! Error types for capture and statistics processing.
//!
//! All errors implement `std::error::Error` and carry structured context.
//! Note the deliberate asymmetry with the statistics engine itself: the
//! engine never fails (malformed frames are absorbed per-frame), so every
//! variant here belongs to the capture setup and delivery layer.
//!
//! ## Recovery and Retry
//!
//! Errors can be classified for retry handling:
//!
//! ```rust
//! use netgauge::CaptureError;
//!
//! let error = CaptureError::capture_failed("interface briefly unavailable");
//! if error.is_retryable() {
//!     for suggestion in error.recovery_suggestions() {
//!         println!("  - {}", suggestion);
//!     }
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for capture operations.
pub type Result<T, E = CaptureError> = std::result::Result<T, E>;

/// Main error type for capture operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CaptureError {
    #[error("Failed to open capture: {reason}")]
    Capture {
        reason: String,
        #[source]
        source: Option<pcap::Error>,
    },

    #[error("Savefile error: {path}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to install filter '{expression}'")]
    Filter {
        expression: String,
        #[source]
        source: pcap::Error,
    },

    #[error("Unsupported datalink type {datalink}")]
    UnsupportedLinkType { datalink: i32 },

    #[error("Invalid configuration: {reason}")]
    Config {
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl CaptureError {
    /// Returns whether this error is potentially recoverable through retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            CaptureError::Capture { .. } => true,
            CaptureError::File { .. } => false,
            CaptureError::Filter { .. } => false,
            CaptureError::UnsupportedLinkType { .. } => false,
            CaptureError::Config { .. } => false,
        }
    }

    /// Returns suggested recovery actions for this error.
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            CaptureError::Capture { .. } => vec![
                "Run with CAP_NET_RAW/CAP_NET_ADMIN or as root",
                "Check the interface exists and is up",
                "Verify libpcap is installed",
            ],
            CaptureError::File { .. } => vec![
                "Check the savefile exists and is readable",
                "Verify the file is a valid pcap capture",
            ],
            CaptureError::Filter { .. } => vec![
                "Check the BPF filter syntax",
                "Verify the filter matches the interface's link layer",
            ],
            CaptureError::UnsupportedLinkType { .. } => vec![
                "Capture on an Ethernet, loopback, cooked, or raw-IP interface",
            ],
            CaptureError::Config { .. } => vec![
                "Check the configuration file syntax",
                "Verify field names against CaptureConfig",
            ],
        }
    }

    /// Helper constructor for capture errors.
    pub fn capture_failed(reason: impl Into<String>) -> Self {
        CaptureError::Capture { reason: reason.into(), source: None }
    }

    /// Helper constructor for capture errors with a libpcap source.
    pub fn capture_failed_with_source(reason: impl Into<String>, source: pcap::Error) -> Self {
        CaptureError::Capture { reason: reason.into(), source: Some(source) }
    }

    /// Helper constructor for savefile errors with path context.
    pub fn file_error(path: PathBuf, source: std::io::Error) -> Self {
        CaptureError::File { path, source }
    }

    /// Helper constructor for filter installation errors.
    pub fn filter_error(expression: impl Into<String>, source: pcap::Error) -> Self {
        CaptureError::Filter { expression: expression.into(), source }
    }

    /// Helper constructor for configuration errors.
    pub fn config_error(reason: impl Into<String>) -> Self {
        CaptureError::Config { reason: reason.into(), source: None }
    }

    /// Helper constructor for configuration errors with a source.
    pub fn config_error_with_source(
        reason: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        CaptureError::Config { reason: reason.into(), source: Some(source) }
    }
}

impl From<pcap::Error> for CaptureError {
    fn from(err: pcap::Error) -> Self {
        CaptureError::Capture { reason: "libpcap operation failed".to_string(), source: Some(err) }
    }
}

impl From<std::io::Error> for CaptureError {
    fn from(err: std::io::Error) -> Self {
        CaptureError::File { path: PathBuf::from("<unknown>"), source: err }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[cfg(test)]
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn error_messages_contain_their_context(
                reason in ".*",
                expression in "[a-z0-9 .]*",
                datalink in any::<i32>(),
            ) {
                let capture = CaptureError::capture_failed(reason.clone());
                prop_assert!(capture.to_string().contains(&reason));

                let filter = CaptureError::filter_error(
                    expression.clone(),
                    pcap::Error::PcapError("compile failed".to_string()),
                );
                prop_assert!(filter.to_string().contains(&expression));

                let link = CaptureError::UnsupportedLinkType { datalink };
                prop_assert!(link.to_string().contains(&datalink.to_string()));

                let config = CaptureError::config_error(reason.clone());
                prop_assert!(config.to_string().contains(&reason));
            }

            #[test]
            fn io_conversions_preserve_the_source_message(reason in "[a-zA-Z0-9 ]+") {
                let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, reason.clone());
                let converted: CaptureError = io_err.into();
                match converted {
                    CaptureError::File { source, .. } => {
                        prop_assert_eq!(source.to_string(), reason);
                    }
                    _ => prop_assert!(false, "expected File error from io::Error conversion"),
                }
            }
        }
    }

    #[test]
    fn error_constructors_validation() {
        let file_error = CaptureError::file_error(
            PathBuf::from("/test.pcap"),
            std::io::Error::new(std::io::ErrorKind::NotFound, "test"),
        );
        assert!(matches!(file_error, CaptureError::File { .. }));

        let capture_error = CaptureError::capture_failed("test");
        assert!(matches!(capture_error, CaptureError::Capture { .. }));
        assert!(capture_error.is_retryable());

        let config_error = CaptureError::config_error("test");
        assert!(matches!(config_error, CaptureError::Config { .. }));
        assert!(!config_error.is_retryable());
    }

    #[test]
    fn error_traits_validation() {
        // Compile-time check: CaptureError must be Send + Sync + 'static
        fn assert_send_sync_static<T: Send + Sync + 'static>() {}
        assert_send_sync_static::<CaptureError>();

        let error = CaptureError::capture_failed("test");
        let _: &dyn std::error::Error = &error;
    }

    #[test]
    fn recovery_suggestions_are_actionable() {
        let errors = [
            CaptureError::capture_failed("x"),
            CaptureError::UnsupportedLinkType { datalink: 147 },
            CaptureError::config_error("x"),
        ];
        for error in &errors {
            let suggestions = error.recovery_suggestions();
            assert!(!suggestions.is_empty());
            for suggestion in suggestions {
                assert!(suggestion.len() > 5);
            }
        }
    }

    #[test]
    fn pcap_conversion_chains_the_source() {
        let err: CaptureError = pcap::Error::PcapError("no such device".to_string()).into();
        let source = std::error::Error::source(&err).expect("source should be chained");
        assert!(source.to_string().contains("no such device"));
    }
}
