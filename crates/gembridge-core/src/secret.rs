//! Secret management service trait.
//!
//! Defines the interface for loading API credentials supplied at process start.

use crate::config::SecretConfig;
use crate::error::Result;

/// Service for loading secret configuration.
///
/// # Security Note
///
/// Implementations must never log key material or include it in error
/// messages.
#[async_trait::async_trait]
pub trait SecretService: Send + Sync {
    /// Loads the secret configuration.
    ///
    /// A missing source is not an error and yields an empty configuration.
    async fn load_secrets(&self) -> Result<SecretConfig>;

    /// Checks if the backing secret file exists.
    async fn secret_file_exists(&self) -> bool;
}
