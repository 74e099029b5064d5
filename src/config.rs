// ai-processor/src/config.rs

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";
pub const DEFAULT_MAX_TOKENS: u32 = 1000;
pub const DEFAULT_TEMPERATURE: f64 = 0.3;

/// Upper bound accepted for `temperature`; the endpoint rejects anything above.
pub const MAX_TEMPERATURE: f64 = 2.0;

/// Static settings read once from the JSON side file. Every key is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessorConfig {
    pub model: String,
    pub system_prompt: String,
    pub max_tokens: u32,
    pub temperature: f64,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl ProcessorConfig {
    /// Rejects values the endpoint would refuse anyway.
    pub fn validate(&self) -> Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("model must not be empty".to_string());
        }
        if self.max_tokens == 0 {
            return Err("max_tokens must be a positive integer".to_string());
        }
        if !(0.0..=MAX_TEMPERATURE).contains(&self.temperature) {
            return Err(format!(
                "temperature must be between 0.0 and {MAX_TEMPERATURE}, got {}",
                self.temperature
            ));
        }
        Ok(())
    }

    pub fn trace_loaded(&self) {
        info!(
            model = %self.model,
            max_tokens = self.max_tokens,
            temperature = self.temperature,
            "Loaded ProcessorConfig"
        );
        debug!(system_prompt = %self.system_prompt, "ProcessorConfig loaded (full debug)");
    }
}
