use crate::{domain::Brand, subscriber_store::RestSubscriberStore};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;
use std::time::Duration;

#[derive(Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub subscriber_store: SubscriberStoreSettings,
}

#[derive(Deserialize)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub brand: Brand,
}

#[derive(Deserialize)]
pub struct SubscriberStoreSettings {
    pub base_url: Option<String>,
    pub api_key: Option<Secret<String>>,
    pub timeout_milliseconds: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Missing subscriber store url. Set `subscriber_store.base_url`.")]
    MissingStoreUrl,
    #[error("Missing subscriber store api key. Set `subscriber_store.api_key`.")]
    MissingStoreApiKey,
    #[error("Failed to build the subscriber store http client")]
    HttpClient(#[source] reqwest::Error),
}

impl SubscriberStoreSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_milliseconds)
    }

    pub fn client(&self) -> Result<RestSubscriberStore, ConfigurationError> {
        let base_url = self
            .base_url
            .as_ref()
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigurationError::MissingStoreUrl)?;
        let api_key = self
            .api_key
            .as_ref()
            .filter(|key| !key.expose_secret().trim().is_empty())
            .ok_or(ConfigurationError::MissingStoreApiKey)?;

        RestSubscriberStore::new(base_url.clone(), api_key.clone(), self.timeout())
            .map_err(ConfigurationError::HttpClient)
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let config_dir = std::env::current_dir()
        .map(|dir| dir.join("configuration"))
        .map_err(|e| {
            config::ConfigError::Message(format!("Failed to determine the current directory: {e}"))
        })?;

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;

    let env_config = format!("{}.yaml", environment.as_str());

    let settings = config::Config::builder()
        .add_source(config::File::from(config_dir.join("base.yaml")))
        .add_source(config::File::from(config_dir.join(env_config)))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize()
}

pub enum Environment {
    Local,
    Production,
}

impl Environment {
    fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Environment::Local),
            "production" => Ok(Environment::Production),
            other => Err(format!(
                "`{other}` is not a supported environment. Use either `local` or `production`."
            )),
        }
    }
}
