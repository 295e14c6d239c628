use once_cell::sync::Lazy;
use serde_derive::Deserialize;

pub static CONFIG: Lazy<Config> = Lazy::new(|| Config::new().expect("Config could not be loaded."));

#[derive(Debug, Deserialize)]
pub struct General {
    pub log_level: log::Level,
    pub data_root: String,
}

#[derive(Debug, Deserialize)]
pub struct Geocoding {
    pub endpoint: String,
    pub user_agent: String,
}

#[derive(Debug, Deserialize)]
pub struct Countries {
    pub endpoint: String,
}

#[derive(Debug, Deserialize)]
pub struct Images {
    pub endpoint: String,
    pub access_key: String,
}

#[derive(Debug, Deserialize)]
pub struct Login {
    pub auth_delay_ms: u64,
    pub redirect_delay_ms: u64,
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub general: General,
    pub geocoding: Geocoding,
    pub countries: Countries,
    pub images: Images,
    pub login: Login,
}

impl Config {
    pub fn new() -> Result<Self, config::ConfigError> {
        let mut s = config::Config::new();

        s.merge(config::File::with_name("config/default"))?;

        // Not checked in. Holds the image access key and any endpoint overrides.
        s.merge(config::File::with_name("config/local").required(false))?;

        s.try_into()
    }
}
