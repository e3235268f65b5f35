//! Search engine configuration types.

use serde::{Deserialize, Serialize};

/// Placeholder substituted with the url-encoded query.
pub const SEARCH_TERMS_PLACEHOLDER: &str = "{searchTerms}";

/// HTTP method used to submit a search.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum SearchMethod {
    #[default]
    Get,
    Post,
}

/// A single search engine definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchEngineConfig {
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// Result page URL. For GET engines this holds the `{searchTerms}` placeholder.
    pub url_template: String,
    #[serde(default)]
    pub method: SearchMethod,
    /// Form body for POST engines, holding the `{searchTerms}` placeholder.
    #[serde(default)]
    pub post_template: Option<String>,
}

impl SearchEngineConfig {
    fn get(id: &str, title: &str, url_template: &str) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            url_template: url_template.into(),
            method: SearchMethod::Get,
            post_template: None,
        }
    }
}

/// Search settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub default_engine: String,
    pub engines: Vec<SearchEngineConfig>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_engine: "duckduckgo".into(),
            engines: vec![
                SearchEngineConfig::get(
                    "duckduckgo",
                    "DuckDuckGo",
                    "https://duckduckgo.com/?q={searchTerms}",
                ),
                SearchEngineConfig::get(
                    "wikipedia",
                    "Wikipedia",
                    "https://en.wikipedia.org/w/index.php?search={searchTerms}",
                ),
                SearchEngineConfig::get(
                    "github",
                    "GitHub",
                    "https://github.com/search?q={searchTerms}",
                ),
            ],
        }
    }
}

impl SearchConfig {
    /// Find an engine by id.
    pub fn engine(&self, id: &str) -> Option<&SearchEngineConfig> {
        self.engines.iter().find(|engine| engine.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_engine_is_defined() {
        let config = SearchConfig::default();
        assert!(config.engine(&config.default_engine).is_some());
    }

    #[test]
    fn engines_from_toml() {
        let toml_str = r#"
default_engine = "startpage"

[[engines]]
id = "startpage"
url_template = "https://www.startpage.com/do/search"
method = "post"
post_template = "query={searchTerms}"
"#;
        let config: SearchConfig = toml::from_str(toml_str).unwrap();
        let engine = config.engine("startpage").unwrap();
        assert_eq!(engine.method, SearchMethod::Post);
        assert_eq!(engine.post_template.as_deref(), Some("query={searchTerms}"));
        assert!(engine.title.is_empty());
        assert!(config.engine("duckduckgo").is_none());
    }
}
