use config::{ConfigBuilder, ConfigError, Environment, File, builder::DefaultState};
use secrecy::SecretString;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

const CONFIG_FILE: &str = "useradmin";
const ENV_PREFIX: &str = "USERADMIN";

#[derive(Clone, Deserialize)]
pub struct Config {
    /// Base URL of the user management API. Endpoints such as `api/users`
    /// resolve below its path, so `http://gw/users-svc` serves
    /// `http://gw/users-svc/api/users`.
    pub api_url: Url,
    /// Key for signing session cookies.
    pub session_secret: SecretString,
    #[serde(default)]
    pub secure_cookies: bool,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_request_timeout_secs() -> u64 {
    10
}

impl Config {
    /// Read `useradmin.toml` if present, then `USERADMIN_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_builder(
            config::Config::builder()
                .add_source(File::with_name(CONFIG_FILE).required(false))
                .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true)),
        )
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        builder.build()?.try_deserialize()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
