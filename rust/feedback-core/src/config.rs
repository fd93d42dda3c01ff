//! Store configuration
//!
//! Values come from the build environment (`FEEDBACK_STORE_URL`,
//! `FEEDBACK_STORE_ANON_KEY`) or from the object a host passes to `mount`.
//! Placeholders mean "unconfigured", which puts the store client into
//! degraded mode instead of failing.

use serde::{Deserialize, Serialize};

pub const PLACEHOLDER_URL: &str = "YOUR_SUPABASE_URL";
pub const PLACEHOLDER_ANON_KEY: &str = "YOUR_SUPABASE_ANON_KEY";
pub const DEFAULT_TABLE: &str = "feedback_comments";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfig {
    #[serde(default = "default_store_url")]
    pub store_url: String,
    #[serde(default = "default_anon_key")]
    pub anon_key: String,
    #[serde(default = "default_table")]
    pub table: String,
}

fn default_store_url() -> String {
    option_env!("FEEDBACK_STORE_URL").unwrap_or(PLACEHOLDER_URL).to_string()
}

fn default_anon_key() -> String {
    option_env!("FEEDBACK_STORE_ANON_KEY").unwrap_or(PLACEHOLDER_ANON_KEY).to_string()
}

fn default_table() -> String {
    DEFAULT_TABLE.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::from_build_env()
    }
}

impl StoreConfig {
    /// Configuration baked in at compile time
    pub fn from_build_env() -> Self {
        Self {
            store_url: default_store_url(),
            anon_key: default_anon_key(),
            table: default_table(),
        }
    }

    /// Both values present and not the documented placeholders
    pub fn is_configured(&self) -> bool {
        let url = self.store_url.trim();
        let key = self.anon_key.trim();
        !url.is_empty() && !key.is_empty() && url != PLACEHOLDER_URL && key != PLACEHOLDER_ANON_KEY
    }

    /// `{url}/rest/v1/{table}`
    pub fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.store_url.trim().trim_end_matches('/'), self.table)
    }

    /// All comments whose `page_url` equals `page_url` exactly.
    pub fn list_url(&self, page_url: &str) -> String {
        format!(
            "{}?select=*&page_url=eq.{}",
            self.table_url(),
            urlencoding::encode(page_url)
        )
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.anon_key.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> StoreConfig {
        StoreConfig {
            store_url: "https://abc.supabase.co/".to_string(),
            anon_key: "anon-123".to_string(),
            table: DEFAULT_TABLE.to_string(),
        }
    }

    #[test]
    fn test_placeholders_are_unconfigured() {
        let config = StoreConfig {
            store_url: PLACEHOLDER_URL.to_string(),
            anon_key: PLACEHOLDER_ANON_KEY.to_string(),
            table: DEFAULT_TABLE.to_string(),
        };
        assert!(!config.is_configured());

        let half = StoreConfig { anon_key: PLACEHOLDER_ANON_KEY.to_string(), ..configured() };
        assert!(!half.is_configured());

        let blank = StoreConfig { store_url: "  ".to_string(), ..configured() };
        assert!(!blank.is_configured());
    }

    #[test]
    fn test_real_values_are_configured() {
        assert!(configured().is_configured());
    }

    #[test]
    fn test_list_url_encodes_page_url_exactly() {
        let url = configured().list_url("https://docs.example.com/guide/?q=a b#top");
        assert_eq!(
            url,
            "https://abc.supabase.co/rest/v1/feedback_comments?select=*&page_url=eq.\
             https%3A%2F%2Fdocs.example.com%2Fguide%2F%3Fq%3Da%20b%23top"
        );
    }

    #[test]
    fn test_trailing_slash_is_a_different_partition() {
        let config = configured();
        assert_ne!(
            config.list_url("https://docs.example.com/guide"),
            config.list_url("https://docs.example.com/guide/")
        );
    }

    #[test]
    fn test_host_config_fills_missing_fields() {
        let config: StoreConfig =
            serde_json::from_str(r#"{ "storeUrl": "https://x.supabase.co", "anonKey": "k" }"#).unwrap();
        assert_eq!(config.table, DEFAULT_TABLE);
        assert_eq!(config.bearer(), "Bearer k");
        assert_eq!(config.table_url(), "https://x.supabase.co/rest/v1/feedback_comments");
    }
}
