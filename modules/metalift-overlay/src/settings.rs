use metalift_common::Config;

/// Persisted-configuration boundary. Queried once per panel action to
/// decide whether the generative path is attempted at all.
pub trait SettingsStore: Send + Sync {
    /// Whether a generative-service credential is configured.
    fn assist_configured(&self) -> bool;
}

/// Settings backed by the loaded environment configuration.
pub struct EnvSettings {
    config: Config,
}

impl EnvSettings {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

impl SettingsStore for EnvSettings {
    fn assist_configured(&self) -> bool {
        self.config.assist_configured()
    }
}

/// Fixed-answer settings for tests and dry runs.
pub struct StaticSettings {
    pub assist: bool,
}

impl SettingsStore for StaticSettings {
    fn assist_configured(&self) -> bool {
        self.assist
    }
}
