//! Secret service implementation.
//!
//! Reads API credentials from `secret.json` and lets the `GEMINI_API_KEY`
//! environment variable take precedence over the file's key.

use crate::paths::GemBridgePaths;
use anyhow::Result;
use gembridge_core::config::{GeminiSecret, SecretConfig};
use gembridge_core::error::GemBridgeError;
use gembridge_core::secret::SecretService;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Environment variable that overrides the file's Gemini key.
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// File-backed [`SecretService`].
///
/// The loaded configuration is cached after the first successful read.
#[derive(Clone)]
pub struct SecretServiceImpl {
    file_path: PathBuf,
    env_api_key: Option<String>,
    secrets: Arc<RwLock<Option<SecretConfig>>>,
}

impl SecretServiceImpl {
    /// Creates a service reading `secret.json` under `base_path`, or under the
    /// platform config directory when `None`. No environment override is set.
    pub fn new(base_path: Option<&Path>) -> Result<Self> {
        let file_path = GemBridgePaths::new(base_path)
            .secret_file()
            .map_err(|e| anyhow::anyhow!("Failed to get secret path: {}", e))?;
        Ok(Self::with_path(file_path))
    }

    /// Creates a service for an explicit file path.
    pub fn with_path(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            env_api_key: None,
            secrets: Arc::new(RwLock::new(None)),
        }
    }

    /// Sets the key that overrides the file's Gemini key. Blank values are ignored.
    pub fn with_env_api_key(mut self, api_key: Option<String>) -> Self {
        self.env_api_key = api_key.filter(|key| !key.trim().is_empty());
        self
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    async fn read_file(&self) -> gembridge_core::error::Result<SecretConfig> {
        let content = match tokio::fs::read_to_string(&self.file_path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.file_path.display(), "secret file not found, using empty config");
                return Ok(SecretConfig::default());
            }
            Err(err) => return Err(err.into()),
        };

        if content.trim().is_empty() {
            return Ok(SecretConfig::default());
        }

        serde_json::from_str(&content).map_err(|err| GemBridgeError::Serialization {
            format: "JSON".to_string(),
            message: format!("{} ({})", err, self.file_path.display()),
        })
    }

    fn apply_env_override(&self, mut config: SecretConfig) -> SecretConfig {
        if let Some(api_key) = &self.env_api_key {
            let model_name = config
                .gemini
                .take()
                .and_then(|gemini| gemini.model_name);
            config.gemini = Some(GeminiSecret {
                api_key: api_key.clone(),
                model_name,
            });
        }
        config
    }
}

#[async_trait::async_trait]
impl SecretService for SecretServiceImpl {
    async fn load_secrets(&self) -> gembridge_core::error::Result<SecretConfig> {
        {
            let cached = self.secrets.read().await;
            if let Some(config) = cached.as_ref() {
                return Ok(config.clone());
            }
        }

        let loaded = self.apply_env_override(self.read_file().await?);
        tracing::info!(
            path = %self.file_path.display(),
            gemini_configured = loaded.gemini_api_key().is_some(),
            "loaded secret configuration"
        );

        *self.secrets.write().await = Some(loaded.clone());
        Ok(loaded)
    }

    async fn secret_file_exists(&self) -> bool {
        tokio::fs::try_exists(&self.file_path).await.unwrap_or(false)
    }
}
