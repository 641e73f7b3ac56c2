//! Generation seam.
//!
//! - `config`: per-request sampling parameters (`GenerationConfig`)
//! - `service`: the backend contract (`GenerationService`) and its single
//!   failure type (`GenerationError`)

mod config;
mod service;

pub use config::{
    DEFAULT_SYSTEM_PROMPT, DEFAULT_TEMPERATURE, DEFAULT_TOP_K, DEFAULT_TOP_P, GenerationConfig,
    TEMPERATURE_RANGE, TOP_K_RANGE, TOP_P_RANGE,
};
pub use service::{FailureCause, GenerationError, GenerationResult, GenerationService};
