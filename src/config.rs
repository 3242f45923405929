//! Capture configuration
//!
//! Everything the capture layer needs to open a source: interface
//! selection, filtering, snapshot length, and the reporting window. Loads
//! from YAML so deployments can ship a config file next to the binary.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{CaptureError, Result};

/// Configuration for live capture sessions.
///
/// `Default` matches the standalone-tool behavior: default device, UDP
/// traffic minus DNS responses, full-size snapshots, one-second windows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CaptureConfig {
    /// Interface name; `None` selects the platform's default device
    pub interface: Option<String>,

    /// BPF filter override; `None` uses [`CaptureConfig::DEFAULT_FILTER`],
    /// scoped to the device's IPv4 address when one is known
    pub filter: Option<String>,

    /// Snapshot length in bytes; frames longer than this arrive truncated
    pub snaplen: i32,

    /// Put the interface into promiscuous mode
    pub promiscuous: bool,

    /// Window length in milliseconds
    pub window_ms: u64,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            interface: None,
            filter: None,
            snaplen: 65_535,
            promiscuous: false,
            window_ms: 1_000,
        }
    }
}

impl CaptureConfig {
    /// Filter applied when none is configured: UDP, without DNS replies.
    pub const DEFAULT_FILTER: &'static str = "udp and not src port 53";

    /// Load a configuration from a YAML file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(&path)
            .map_err(|e| CaptureError::file_error(path.as_ref().to_path_buf(), e))?;
        Self::from_yaml(&text)
    }

    /// Parse a configuration from a YAML string.
    pub fn from_yaml(text: &str) -> Result<Self> {
        let config: Self = serde_yaml_ng::from_str(text).map_err(|e| {
            CaptureError::config_error_with_source("failed to parse YAML", Box::new(e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reporting window as a [`Duration`].
    pub fn window(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }

    fn validate(&self) -> Result<()> {
        if self.window_ms == 0 {
            return Err(CaptureError::config_error("window_ms must be greater than 0"));
        }
        if self.snaplen <= 0 {
            return Err(CaptureError::config_error("snaplen must be greater than 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_tool_behavior() {
        let config = CaptureConfig::default();
        assert_eq!(config.interface, None);
        assert_eq!(config.filter, None);
        assert_eq!(config.snaplen, 65_535);
        assert!(!config.promiscuous);
        assert_eq!(config.window(), Duration::from_secs(1));
    }

    #[test]
    fn yaml_roundtrip_with_overrides() {
        let yaml = r#"
interface: eth0
filter: "udp and dst port 5004"
snaplen: 2048
promiscuous: true
window_ms: 500
"#;
        let config = CaptureConfig::from_yaml(yaml).expect("config should parse");
        assert_eq!(config.interface.as_deref(), Some("eth0"));
        assert_eq!(config.filter.as_deref(), Some("udp and dst port 5004"));
        assert_eq!(config.snaplen, 2048);
        assert!(config.promiscuous);
        assert_eq!(config.window(), Duration::from_millis(500));
    }

    #[test]
    fn partial_yaml_falls_back_to_defaults() {
        let config = CaptureConfig::from_yaml("interface: wlan0\n").expect("config should parse");
        assert_eq!(config.interface.as_deref(), Some("wlan0"));
        assert_eq!(config.snaplen, 65_535);
        assert_eq!(config.window_ms, 1_000);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = CaptureConfig::from_yaml("windw_ms: 500\n").unwrap_err();
        assert!(matches!(err, CaptureError::Config { .. }));
    }

    #[test]
    fn zero_window_is_rejected() {
        let err = CaptureConfig::from_yaml("window_ms: 0\n").unwrap_err();
        assert!(matches!(err, CaptureError::Config { .. }));
        assert!(err.to_string().contains("window_ms"));
    }

    #[test]
    fn missing_file_reports_the_path() {
        let err = CaptureConfig::from_yaml_file("/nonexistent/netgauge.yaml").unwrap_err();
        assert!(matches!(err, CaptureError::File { .. }));
        assert!(err.to_string().contains("/nonexistent/netgauge.yaml"));
    }
}
