use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

/// Root application configuration. Loaded from environment variables
/// with the prefix `CAMPAIGN_DASHBOARD__` and an optional TOML file.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_simulate_latency")]
    pub simulate_latency: bool,
    #[serde(default = "default_list_ms")]
    pub list_ms: u64,
    #[serde(default = "default_get_ms")]
    pub get_ms: u64,
    #[serde(default = "default_create_ms")]
    pub create_ms: u64,
    #[serde(default = "default_update_ms")]
    pub update_ms: u64,
    #[serde(default = "default_delete_ms")]
    pub delete_ms: u64,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_seed_demo_data")]
    pub seed_demo_data: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_login_ms")]
    pub login_ms: u64,
    #[serde(default = "default_logout_ms")]
    pub logout_ms: u64,
    /// Must be positive.
    #[serde(default = "default_session_ttl_hours")]
    pub session_ttl_hours: i64,
    /// User id stamped onto `created_by` when no session is supplied.
    #[serde(default = "default_current_user_fallback")]
    pub current_user_fallback: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_filter")]
    pub filter: String,
    #[serde(default = "default_log_json")]
    pub json: bool,
}

// Default functions
fn default_simulate_latency() -> bool {
    true
}
fn default_list_ms() -> u64 {
    800
}
fn default_get_ms() -> u64 {
    500
}
fn default_create_ms() -> u64 {
    1000
}
fn default_update_ms() -> u64 {
    800
}
fn default_delete_ms() -> u64 {
    500
}
fn default_timeout_ms() -> u64 {
    5000
}
fn default_seed_demo_data() -> bool {
    true
}
fn default_login_ms() -> u64 {
    1000
}
fn default_logout_ms() -> u64 {
    500
}
fn default_session_ttl_hours() -> i64 {
    24
}
fn default_current_user_fallback() -> String {
    "1".to_string()
}
fn default_log_filter() -> String {
    "campaign_dashboard=info,campaign_management=info".to_string()
}
fn default_log_json() -> bool {
    true
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            simulate_latency: default_simulate_latency(),
            list_ms: default_list_ms(),
            get_ms: default_get_ms(),
            create_ms: default_create_ms(),
            update_ms: default_update_ms(),
            delete_ms: default_delete_ms(),
            timeout_ms: default_timeout_ms(),
            seed_demo_data: default_seed_demo_data(),
        }
    }
}

impl StoreConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            login_ms: default_login_ms(),
            logout_ms: default_logout_ms(),
            session_ttl_hours: default_session_ttl_hours(),
            current_user_fallback: default_current_user_fallback(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: default_log_json(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            auth: AuthConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from an optional TOML file overlaid with environment variables.
    pub fn load(file: Option<&Path>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        let builder = builder.add_source(
            config::Environment::with_prefix("CAMPAIGN_DASHBOARD")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
