use crate::FitplanError;
use secrecy::SecretString;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

#[derive(Clone, Debug)]
pub struct Config {
    pub api_key: SecretString,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub apple_health_latency: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, FitplanError> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Testable helper that reads configuration values using the provided
    /// function, so tests never touch the process environment.
    pub fn from_env_with<F>(mut get: F) -> Result<Self, FitplanError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let api = get("OPENAI_API_KEY")
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| FitplanError::Config("OPENAI_API_KEY missing".into()))?;
        let base_url = get("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let model = get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.into());
        let temperature = match get("OPENAI_TEMPERATURE") {
            Some(raw) => raw.parse::<f32>().map_err(|_| {
                FitplanError::Config(format!("OPENAI_TEMPERATURE is not a number: {raw}"))
            })?,
            None => DEFAULT_TEMPERATURE,
        };
        let latency_ms = match get("FITPLAN_APPLE_HEALTH_LATENCY_MS") {
            Some(raw) => raw.parse::<u64>().map_err(|_| {
                FitplanError::Config(format!(
                    "FITPLAN_APPLE_HEALTH_LATENCY_MS is not a whole number: {raw}"
                ))
            })?,
            None => crate::apple_health::DEFAULT_LATENCY.as_millis() as u64,
        };
        Ok(Self {
            api_key: SecretString::new(api.into()),
            base_url,
            model,
            temperature,
            apple_health_latency: Duration::from_millis(latency_ms),
        })
    }
}
