use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_TOP_P: f32 = 0.95;
pub const DEFAULT_TOP_K: i32 = 40;
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful AI assistant.";

// Ranges offered by the settings controls. They are UI hints only; nothing
// clamps or rejects values outside them before a request is sent.
pub const TEMPERATURE_RANGE: RangeInclusive<f32> = 0.0..=2.0;
pub const TOP_P_RANGE: RangeInclusive<f32> = 0.0..=1.0;
pub const TOP_K_RANGE: RangeInclusive<i32> = 1..=100;

/// Sampling parameters for a single generation request.
///
/// # Fields
///
/// * `temperature` - Randomness; 0.0 is deterministic, higher is more creative.
/// * `top_p` - Nucleus sampling threshold.
/// * `top_k` - Size of the candidate token pool.
/// * `system_prompt` - Persona and operating constraints for the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: i32,
    pub system_prompt: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            top_p: DEFAULT_TOP_P,
            top_k: DEFAULT_TOP_K,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }
}

impl GenerationConfig {
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = top_p;
        self
    }

    pub fn with_top_k(mut self, top_k: i32) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }

    /// Whether every numeric field sits inside the range the settings controls offer.
    pub fn is_within_ui_ranges(&self) -> bool {
        TEMPERATURE_RANGE.contains(&self.temperature)
            && TOP_P_RANGE.contains(&self.top_p)
            && TOP_K_RANGE.contains(&self.top_k)
    }
}
