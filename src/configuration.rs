use config::{Config, ConfigError, Environment, File};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct Settings{
    pub application: ApplicationSettings,
    pub database: DatabaseSettings
}

#[derive(Deserialize, Debug, Clone)]
pub struct ApplicationSettings{
    pub host: String,
    pub port: u16
}

#[derive(Deserialize, Debug)]
pub struct DatabaseSettings{
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: SecretString,
    pub name: String,
    // Full connection string supplied by the environment, wins over the parts above
    pub url: Option<SecretString>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32
}

fn default_max_connections() -> u32 {
    10
}

impl DatabaseSettings {
    // Connection string for the server itself, used to create databases
    pub fn get_server_url(&self) -> SecretString {
        SecretString::from(format!(
            "postgres://{}:{}@{}:{}",
            self.username,
            self.password.expose_secret(),
            self.host,
            self.port
        ))
    }

    pub fn get_database_url(&self) -> SecretString {
        if let Some(url) = &self.url {
            return SecretString::from(url.expose_secret().to_string());
        }

        SecretString::from(format!(
            "{}/{}",
            self.get_server_url().expose_secret(),
            self.name
        ))
    }
}

impl Settings{
    pub fn get() -> Result<Self, ConfigError>{
        Config::builder()
            .add_source(File::with_name("configuration/base.yaml"))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
            )
            .build()?
            .try_deserialize::<Settings>()
    }
}
