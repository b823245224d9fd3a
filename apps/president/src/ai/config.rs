//! AI configuration handling.
//!
//! Provides a typed interface over a JSON config, extracting standard fields
//! while preserving strategy-specific custom fields.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Standard configuration for AI players.
///
/// # Example JSON Config
///
/// ```json
/// {"seed": 12345, "allow_split": false, "aggression": 0.7}
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    /// Optional RNG seed. Seeds the generated name and any random choices.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Whether a larger group may be broken up to match the required count.
    ///
    /// Defaults to true.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_split: Option<bool>,

    /// Display name; generated when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Strategy-specific configuration.
    #[serde(flatten)]
    pub custom: JsonValue,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            seed: None,
            allow_split: None,
            name: None,
            custom: JsonValue::Object(serde_json::Map::new()),
        }
    }
}

impl AiConfig {
    /// Create an AiConfig from an optional JSON value, falling back to the
    /// default on anything unreadable.
    pub fn from_json(config: Option<&JsonValue>) -> Self {
        match config {
            Some(json) => serde_json::from_value(json.clone()).unwrap_or_else(|err| {
                tracing::warn!(error = %err, "unreadable AI config, using defaults");
                Self::default()
            }),
            None => Self::default(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn allow_split(&self) -> bool {
        self.allow_split.unwrap_or(true)
    }

    /// Get a custom configuration field by key.
    pub fn get_custom(&self, key: &str) -> Option<&JsonValue> {
        self.custom.get(key)
    }
}
