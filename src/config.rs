// src/config.rs

use serde::Deserialize;
use std::time::Duration;

use crate::variance::GRACE_PERIOD_MINUTES;

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    3000
}

fn default_grace_period_minutes() -> i64 {
    GRACE_PERIOD_MINUTES
}

fn default_timezone() -> String {
    "America/Los_Angeles".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    // HR API
    pub hr_api_url: String,
    #[serde(default)]
    pub hr_api_token: Option<String>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    // Server
    #[serde(default = "default_server_host")]
    pub server_host: String,
    #[serde(default = "default_server_port")]
    pub server_port: u16,

    // Reconciliation
    #[serde(default = "default_grace_period_minutes")]
    pub grace_period_minutes: i64,
    /// Zone used to pick "today" when no date is supplied.
    #[serde(default = "default_timezone")]
    pub default_timezone: String,
}

impl Config {
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenv::dotenv().ok();
        Self::from_iter(std::env::vars())
    }

    pub fn from_iter<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter(vars)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
