use std::env;
use std::num::ParseIntError;
use thiserror::Error;

const DEFAULT_API_URL: &str = "http://localhost:4000";
const DEFAULT_CALLBACK_PORT: u16 = 3456;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid callback port: {0}")]
    InvalidPort(#[from] ParseIntError),
    #[error("Port {0} is out of valid range (1-65535)")]
    PortOutOfRange(u16),
}

#[derive(Debug)]
pub struct Config {
    pub api_url: String,
    pub callback_port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(
            env::var("BONFIRE_API_URL").ok(),
            env::var("BONFIRE_CALLBACK_PORT").ok(),
        )
    }

    fn from_vars(api_url: Option<String>, port: Option<String>) -> Result<Self, ConfigError> {
        let api_url = api_url.unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let callback_port = match port {
            Some(port_str) => {
                let port = port_str.parse::<u16>()?;
                if port == 0 {
                    return Err(ConfigError::PortOutOfRange(port));
                }
                port
            }
            None => DEFAULT_CALLBACK_PORT,
        };

        Ok(Self {
            api_url,
            callback_port,
        })
    }
}
