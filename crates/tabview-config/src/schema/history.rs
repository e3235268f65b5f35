//! History persistence configuration.

use serde::{Deserialize, Serialize};

/// On-disk encoding of a tab's navigation history.
///
/// Both encodings carry the same fields and are mutually convertible; the
/// choice follows the rendering backend in use.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum HistoryEncoding {
    /// Structured key/value document (JSON).
    #[default]
    Keyed,
    /// Flat, length-prefixed binary stream.
    Stream,
}

/// History settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct HistoryConfig {
    pub encoding: HistoryEncoding,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoding_names() {
        let config: HistoryConfig = toml::from_str("encoding = \"keyed\"").unwrap();
        assert_eq!(config.encoding, HistoryEncoding::Keyed);
        let config: HistoryConfig = toml::from_str("encoding = \"stream\"").unwrap();
        assert_eq!(config.encoding, HistoryEncoding::Stream);
    }

    #[test]
    fn unknown_encoding_is_rejected() {
        assert!(toml::from_str::<HistoryConfig>("encoding = \"xml\"").is_err());
    }
}
