use std::env;
use std::time::Duration;

/// Pipeline configuration loaded from environment variables.
///
/// Everything has a default; the assist credential is genuinely optional —
/// leaving it unset routes every generate action down the heuristic path.
#[derive(Debug, Clone)]
pub struct Config {
    // Generative text service
    pub assist_base_url: String,
    pub assist_api_key: String,

    // Metadata cache
    pub cache_ttl: Duration,

    // Container wait
    pub wait_interval: Duration,
    pub wait_max_attempts: u32,
    pub wait_timeout: Duration,

    // Whole-sequence injection retries after the container wait fails
    pub injection_max_retries: u32,

    // Delay before re-injecting after a navigation, so the host page can
    // finish its own re-render
    pub settle_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            assist_base_url: "https://assist.metalift.dev".to_string(),
            assist_api_key: String::new(),
            cache_ttl: Duration::from_secs(5),
            wait_interval: Duration::from_millis(500),
            wait_max_attempts: 20,
            wait_timeout: Duration::from_secs(15),
            injection_max_retries: 2,
            settle_delay: Duration::from_millis(750),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    /// Panics with a clear message if a set variable fails to parse.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            assist_base_url: env::var("ASSIST_BASE_URL").unwrap_or(defaults.assist_base_url),
            assist_api_key: env::var("ASSIST_API_KEY").unwrap_or_default(),
            cache_ttl: Duration::from_secs(parsed_env("CACHE_TTL_SECS", 5)),
            wait_interval: Duration::from_millis(parsed_env("WAIT_INTERVAL_MS", 500)),
            wait_max_attempts: parsed_env("WAIT_MAX_ATTEMPTS", 20),
            wait_timeout: Duration::from_secs(parsed_env("WAIT_TIMEOUT_SECS", 15)),
            injection_max_retries: parsed_env("INJECTION_MAX_RETRIES", 2),
            settle_delay: Duration::from_millis(parsed_env("SETTLE_DELAY_MS", 750)),
        }
    }

    /// Whether a generative-service credential is configured.
    pub fn assist_configured(&self) -> bool {
        !self.assist_api_key.is_empty()
    }
}

fn parsed_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|_| panic!("{key} must be a number, got: {raw}")),
        Err(_) => default,
    }
}
