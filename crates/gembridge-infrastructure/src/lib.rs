//! Infrastructure layer for GemBridge: file locations and credential loading.

pub mod paths;
pub mod secret_service;

pub use crate::paths::GemBridgePaths;
pub use crate::secret_service::{GEMINI_API_KEY_ENV, SecretServiceImpl};
