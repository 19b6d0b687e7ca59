use std::collections::HashMap;
use std::time::Duration;

use serde::Deserialize;

use crate::utils;

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct HttpClientConfig {
    pub base_url: String,
    pub headers: HashMap<String, String>,
    pub params: HashMap<String, String>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: utils::default_base_url(),
            headers: HashMap::new(),
            params: HashMap::new(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct ScribeConfig {
    #[serde(default)]
    pub backend: HttpClientConfig,
    /// Bearer token sent with every backend call.
    #[serde(default, deserialize_with = "utils::deserialize_optional_with_envsubst")]
    pub token: Option<String>,
    /// How long the save notice stays up, in milliseconds.
    #[serde(default = "utils::default_notice_millis")]
    pub notice_millis: u64,
}

impl Default for ScribeConfig {
    fn default() -> Self {
        Self {
            backend: HttpClientConfig::default(),
            token: None,
            notice_millis: utils::default_notice_millis(),
        }
    }
}

impl ScribeConfig {
    pub fn notice_duration(&self) -> Duration {
        Duration::from_millis(self.notice_millis)
    }
}
