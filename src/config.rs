use std::env;

use reqwest::Url;

use crate::utils::validation::validate_base_url;

const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";
const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8080";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: Url,
    pub bind_address: String,
}

impl Config {
    /// Reads `API_BASE_URL` and `BIND_ADDRESS`, falling back to local defaults.
    pub fn from_env() -> Result<Self, String> {
        let api_base_url = env::var("API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
        let api_base_url = validate_base_url(&api_base_url)?;

        let bind_address = env::var("BIND_ADDRESS").unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_string());

        Ok(Config {
            api_base_url,
            bind_address,
        })
    }
}
