// Runtime settings. Everything comes from environment variables (optionally
// loaded from a `.env` file) with defaults that work from the repo root.

use crate::error::{MovieError, Result};
use std::path::PathBuf;

pub const DEFAULT_API_URL: &str = "https://www.omdbapi.com/";
pub const DEFAULT_DB_PATH: &str = "data/movies.db";
pub const DEFAULT_TEMPLATE_PATH: &str = "templates/index_template.html";
pub const DEFAULT_SITE_OUTPUT: &str = "templates/index.html";
pub const DEFAULT_SITE_TITLE: &str = "Movie App";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub api_url: String,
    pub db_path: PathBuf,
    pub template_path: PathBuf,
    pub site_output: PathBuf,
    pub site_title: String,
}

impl Config {
    /// Build the config from the process environment after loading `.env`
    /// if one is present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup. Empty values count as
    /// unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Config {
            api_key: get("OMDB_API_KEY"),
            api_url: get("OMDB_API_URL").unwrap_or_else(|| DEFAULT_API_URL.into()),
            db_path: get("MOVIES_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH)),
            template_path: get("MOVIES_TEMPLATE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_TEMPLATE_PATH)),
            site_output: get("MOVIES_SITE_OUTPUT")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SITE_OUTPUT)),
            site_title: get("MOVIES_SITE_TITLE").unwrap_or_else(|| DEFAULT_SITE_TITLE.into()),
        }
    }

    /// Startup checks. A missing template is fatal; a missing API key only
    /// disables adding movies.
    pub fn validate(&self) -> Result<()> {
        if !self.template_path.is_file() {
            return Err(MovieError::Config(format!(
                "website template not readable at {}",
                self.template_path.display()
            )));
        }
        if self.api_key.is_none() {
            tracing::warn!("OMDB_API_KEY is not set; adding movies will fail");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = Config::from_lookup(lookup(&[]));
        assert_eq!(config.api_key, None);
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.db_path, PathBuf::from("data/movies.db"));
        assert_eq!(config.site_title, "Movie App");
    }

    #[test]
    fn overrides_and_blank_values() {
        let config = Config::from_lookup(lookup(&[
            ("OMDB_API_KEY", "abc123"),
            ("MOVIES_DB_PATH", "/tmp/m.db"),
            ("MOVIES_SITE_TITLE", "  "),
        ]));
        assert_eq!(config.api_key.as_deref(), Some("abc123"));
        assert_eq!(config.db_path, PathBuf::from("/tmp/m.db"));
        assert_eq!(config.site_title, DEFAULT_SITE_TITLE);
    }

    #[test]
    fn validate_requires_template() {
        let config = Config::from_lookup(lookup(&[(
            "MOVIES_TEMPLATE_PATH",
            "/definitely/not/here.html",
        )]));
        assert!(matches!(config.validate(), Err(MovieError::Config(_))));
    }
}
