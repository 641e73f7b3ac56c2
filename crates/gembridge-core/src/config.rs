//! Credential configuration.
//!
//! Mirrors the layout of `secret.json`:
//!
//! ```json
//! { "gemini": { "api_key": "...", "model_name": "gemini-1.5-flash" } }
//! ```

use serde::{Deserialize, Serialize};

/// Root structure of `secret.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretConfig {
    #[serde(default)]
    pub gemini: Option<GeminiSecret>,
}

/// Gemini API credentials.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeminiSecret {
    pub api_key: String,
    #[serde(default)]
    pub model_name: Option<String>,
}

// Keep the key out of logs and panic messages.
impl std::fmt::Debug for GeminiSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiSecret")
            .field("api_key", &"<redacted>")
            .field("model_name", &self.model_name)
            .finish()
    }
}

impl SecretConfig {
    /// Returns the Gemini API key if one is configured and non-blank.
    pub fn gemini_api_key(&self) -> Option<&str> {
        self.gemini
            .as_ref()
            .map(|gemini| gemini.api_key.trim())
            .filter(|key| !key.is_empty())
    }

    pub fn gemini_model(&self) -> Option<&str> {
        self.gemini
            .as_ref()
            .and_then(|gemini| gemini.model_name.as_deref())
    }
}
