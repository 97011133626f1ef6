//!  Farelight Flight Search
//!
//!  Copyright (C) 2026  Farelight Developers
//!
//!  This program is free software: you can redistribute it and/or modify
//!  it under the terms of the GNU Affero General Public License as published by
//!  the Free Software Foundation, either version 3 of the License, or
//!  (at your option) any later version.
//!
//!  This program is distributed in the hope that it will be useful,
//!  but WITHOUT ANY WARRANTY; without even the implied warranty of
//!  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//!  GNU Affero General Public License for more details.
//!
//!  You should have received a copy of the GNU Affero General Public License
//!  along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! # API Configuration
//!
//! Credential and host for the Sky-Scrapper API, supplied by the
//! hosting environment.

use anyhow::{Context, Result, ensure};

pub const ENV_API_KEY: &str = "SKY_SCRAPPER_API_KEY";
pub const ENV_API_HOST: &str = "SKY_SCRAPPER_HOST";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    api_key: String,
    api_host: String,
}

impl ApiConfig {
    pub fn new(api_key: impl Into<String>, api_host: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        let api_host = api_host.into();
        ensure!(!api_key.is_empty(), "API key must not be empty");
        ensure!(!api_host.is_empty(), "API host must not be empty");
        Ok(Self { api_key, api_host })
    }

    /// Read the credential and host from the environment.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(ENV_API_KEY)
            .with_context(|| format!("{} is not set", ENV_API_KEY))?;
        let api_host = std::env::var(ENV_API_HOST)
            .with_context(|| format!("{} is not set", ENV_API_HOST))?;
        Self::new(api_key, api_host)
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn api_host(&self) -> &str {
        &self.api_host
    }

    pub fn base_url(&self) -> String {
        format!("https://{}/api/v1/", self.api_host)
    }

    /// Full URL for an endpoint path (query string included, if any).
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url(), endpoint)
    }
}
