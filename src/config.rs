//! API credential and remote-call settings loaded at startup.

use std::env;
use std::time::Duration;

/// Environment variable holding the Anthropic API key.
pub const API_KEY_VAR: &str = "ANTHROPIC_API_KEY";

/// Bounded timeout applied to every remote completion call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Credential and transport settings for the live model client.
///
/// Constructed once at startup and injected into the service context;
/// read-only afterwards.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Anthropic API key.
    pub api_key: String,
    /// Timeout applied to each remote call.
    pub timeout: Duration,
}

impl ApiConfig {
    /// Loads the configuration from the environment, honoring a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error when the API key is missing or empty. Callers treat
    /// this as fatal and stop before any remote call is attempted.
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();
        Self::from_key(env::var(API_KEY_VAR).ok())
    }

    fn from_key(key: Option<String>) -> Result<Self, String> {
        let api_key = key.filter(|k| !k.trim().is_empty()).ok_or_else(|| {
            format!("Anthropic API key not found. Set {API_KEY_VAR} in the environment or a .env file.")
        })?;
        Ok(Self { api_key, timeout: REQUEST_TIMEOUT })
    }
}

#[cfg(test)]
mod tests {
    use super::ApiConfig;

    #[test]
    fn missing_key_is_an_error() {
        let result = ApiConfig::from_key(None);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("ANTHROPIC_API_KEY"));
    }

    #[test]
    fn empty_key_is_an_error() {
        assert!(ApiConfig::from_key(Some(String::new())).is_err());
        assert!(ApiConfig::from_key(Some("   ".into())).is_err());
    }

    #[test]
    fn present_key_is_accepted() {
        let config = ApiConfig::from_key(Some("sk-ant-test".into())).unwrap();
        assert_eq!(config.api_key, "sk-ant-test");
        assert_eq!(config.timeout.as_secs(), 30);
    }
}
