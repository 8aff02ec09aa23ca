//! Report Client Configuration
//!
//! Settings normally found under the UPF's `gtp5g:` YAML section.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::GTP5G_GENL_VERSION;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Report client settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportClientConfig {
    /// genlmsghdr version sent with every request
    pub genl_version: u8,
    /// Log ignored trailing replies at warn instead of debug
    pub warn_on_extra_responses: bool,
}

impl Default for ReportClientConfig {
    fn default() -> Self {
        Self {
            genl_version: GTP5G_GENL_VERSION,
            warn_on_extra_responses: false,
        }
    }
}

impl ReportClientConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = ReportClientConfig::default();
        assert_eq!(config.genl_version, 0);
        assert!(!config.warn_on_extra_responses);
    }

    #[test]
    fn test_from_yaml() {
        let config = ReportClientConfig::from_yaml("warn_on_extra_responses: true\n").unwrap();
        assert_eq!(config.genl_version, 0);
        assert!(config.warn_on_extra_responses);
    }

    #[test]
    fn test_from_yaml_invalid() {
        let err = ReportClientConfig::from_yaml("genl_version: nope\n").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }
}
