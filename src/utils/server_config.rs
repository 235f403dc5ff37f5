use crate::error::{Result, UploadError};
use derivative::Derivative;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::env;
use std::str::FromStr;

pub const DEFAULT_BASE_URL: &str = "http://localhost:9621";
const URL_ENV: &str = "DOCUMENT_UPLOADER_URL";
const API_KEY_ENV: &str = "DOCUMENT_UPLOADER_API_KEY";

/// Where the ingestion server lives and how to authenticate against it.
#[derive(Clone, Derivative)]
#[derivative(Debug)]
pub struct ServerConfig {
    pub base_url: String,
    #[derivative(Debug = "ignore")]
    pub api_key: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
        }
    }
}

impl ServerConfig {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        let api_key = api_key.trim();
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            api_key: (!api_key.is_empty()).then(|| api_key.to_string()),
        }
    }

    pub fn from_env() -> Self {
        let base_url = env::var(URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let api_key = env::var(API_KEY_ENV).unwrap_or_default();
        Self::new(&base_url, &api_key)
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("accept"),
            HeaderValue::from_static("application/json"),
        );

        if let Some(api_key) = &self.api_key {
            let name = HeaderName::from_str("x-api-key")
                .map_err(|_| UploadError::InvalidHeader("x-api-key".to_string()))?;
            let mut value = HeaderValue::from_str(api_key)
                .map_err(|_| UploadError::InvalidHeader("x-api-key".to_string()))?;
            value.set_sensitive(true);
            headers.insert(name, value);
        }

        Ok(headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_dropped() {
        let config = ServerConfig::new(" http://rag.local:9621/ ", "");
        assert_eq!(config.endpoint("/documents/upload"), "http://rag.local:9621/documents/upload");
        assert!(config.api_key.is_none());
    }

    #[test]
    fn api_key_becomes_header() {
        let config = ServerConfig::new("http://rag.local", "secret");
        let headers = config.headers().unwrap();
        assert_eq!(headers.get("x-api-key").unwrap(), "secret");
        assert_eq!(headers.get("accept").unwrap(), "application/json");
    }

    #[test]
    fn invalid_api_key_is_rejected() {
        let config = ServerConfig::new("http://rag.local", "bad\nkey");
        assert!(matches!(config.headers(), Err(UploadError::InvalidHeader(_))));
    }

    #[test]
    fn debug_hides_api_key() {
        let config = ServerConfig::new("http://rag.local", "secret");
        assert!(!format!("{:?}", config).contains("secret"));
    }
}
