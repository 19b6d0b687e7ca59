use std::collections::HashMap;

use serde::{Deserialize, Deserializer};

pub fn default_base_url() -> String {
    "http://127.0.0.1:6969".to_string()
}

pub fn default_notice_millis() -> u64 {
    3000
}

/// Replace `${VAR}` references in a string with values from `variables`.
/// Only referenced variables are used, so unrelated values containing `$`,
/// `{` or `}` can't fail the substitution.
pub fn substitute<I>(value: &str, variables: I) -> Result<String, envsubst::Error>
where
    I: IntoIterator<Item = (String, String)>,
{
    if !envsubst::is_templated(value) {
        return Ok(value.to_string());
    }
    let referenced: HashMap<String, String> = variables
        .into_iter()
        .filter(|(name, _)| value.contains(&format!("${{{name}}}")))
        .collect();
    envsubst::substitute(value, &referenced)
}

/// Deserialize an optional string, expanding environment variable
/// references so secrets can stay out of config files.
pub fn deserialize_optional_with_envsubst<'de, D>(
    deserializer: D,
) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    value
        .map(|value| substitute(&value, std::env::vars()).map_err(serde::de::Error::custom))
        .transpose()
}
