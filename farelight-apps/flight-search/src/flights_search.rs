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

//! # Sky Flights Search Client
//!
//! Effectful (time, network) operations against the Sky-Scrapper API.
//! All endpoints are read-only GET requests wrapped in a
//! `status: boolean` envelope; `status: false` is treated exactly like
//! a transport failure.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::airport_lookup::{AirportSuggestion, SearchAirportResponse, dedupe_suggestions};
use crate::config::ApiConfig;
use crate::flights_query_builder::{SearchFlightsDraft, SearchFlightsParams};
use crate::flights_results::{FlightSearchResult, SearchFlightsResponse};

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Response of the `checkServer` health endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckServerResponse {
    pub status: bool,
    #[serde(default)]
    pub message: String,
}

#[derive(Clone)]
pub struct SkyFlightsClient {
    client: Arc<wreq::Client>,
    config: ApiConfig,
}

impl SkyFlightsClient {
    pub fn new(config: ApiConfig) -> Result<Self> {
        Self::with_timeout(config, DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_timeout(config: ApiConfig, timeout_secs: u64) -> Result<Self> {
        let client = wreq::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client: Arc::new(client),
            config,
        })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// GET an endpoint and decode its JSON body.
    ///
    /// The endpoint string carries its own query parameters; the
    /// credential headers are attached here.
    async fn get_json<T>(&self, endpoint: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = self.config.endpoint_url(endpoint);
        let http_start = std::time::Instant::now();
        tracing::trace!("[get_json] Starting HTTP request to: {}", url);

        let response = self
            .client
            .get(&url)
            .header("x-rapidapi-key", self.config.api_key())
            .header("x-rapidapi-host", self.config.api_host())
            .header("Content-Type", "application/json")
            .send()
            .await
            .context("Request failed")?;

        let status = response.status();
        tracing::debug!(
            "[get_json] HTTP {} {} in {:?}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown"),
            http_start.elapsed()
        );

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body_preview = body.chars().take(500).collect::<String>();
            bail!("HTTP error {}: {}", status, body_preview);
        }

        response.json::<T>().await.context("Decode JSON body")
    }

    /// Health check against the `checkServer` endpoint.
    pub async fn check_server(&self) -> Result<CheckServerResponse> {
        self.get_json("checkServer").await
    }

    /// Free-text airport/city search, deduplicated, in remote
    /// relevance order. Length guards and debouncing live in
    /// [`crate::AirportLookup`]; this is the raw endpoint call.
    pub async fn search_airports(&self, query: &str) -> Result<Vec<AirportSuggestion>> {
        let endpoint = format!("flights/searchAirport?query={}", urlencoding::encode(query));
        let response: SearchAirportResponse = self.get_json(&endpoint).await?;
        if !response.status {
            bail!("Airport search reported status=false");
        }
        Ok(dedupe_suggestions(response.data.unwrap_or_default()))
    }

    /// Execute exactly one flight search.
    pub async fn search_flights(&self, params: &SearchFlightsParams) -> Result<FlightSearchResult> {
        let overall_start = std::time::Instant::now();
        params.validate().context("Invalid search parameters")?;

        let endpoint = params.search_endpoint();
        tracing::info!(
            "Searching flights {} → {} on {}",
            params.origin.sky_id,
            params.destination.sky_id,
            params.date
        );

        let response: SearchFlightsResponse = self.get_json(&endpoint).await?;
        let result = FlightSearchResult::from_response(response, params.clone())?;

        tracing::info!(
            "Search returned {} itineraries in {:?}",
            result.len(),
            overall_start.elapsed()
        );
        Ok(result)
    }

    /// Search from in-progress form state. Issues no request while any
    /// required field is unset.
    pub async fn search_flights_draft(
        &self,
        draft: &SearchFlightsDraft,
    ) -> Result<Option<FlightSearchResult>> {
        match draft.to_params() {
            None => {
                tracing::debug!("Flight search skipped - required fields missing");
                Ok(None)
            }
            Some(params) => {
                let params = params?;
                self.search_flights(&params).await.map(Some)
            }
        }
    }
}
