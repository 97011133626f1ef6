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

//! # Airport Lookup Adapter
//!
//! Debounced, cached facade over the `flights/searchAirport` endpoint,
//! for feeding free-text input to an autocomplete widget. Queries under
//! two characters never reach the network; superseded queries have
//! their results discarded rather than applied out of order.

use std::collections::HashSet;
use std::time::Duration;

use anyhow::Result;
use farelight_query_cache::{Debouncer, TtlCache, normalize_key};
use serde::{Deserialize, Serialize};

use crate::flights_search::SkyFlightsClient;

/// Queries shorter than this (after trimming) never hit the network.
pub const MIN_QUERY_CHARS: usize = 2;
/// Quiet period before a query becomes effective.
pub const DEBOUNCE_QUIET: Duration = Duration::from_millis(300);
/// How long a resolved candidate list stays fresh.
pub const AIRPORT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Envelope of the airport search endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchAirportResponse {
    pub status: bool,
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub data: Option<Vec<AirportSuggestion>>,
}

/// One candidate airport/city entity, in remote relevance order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirportSuggestion {
    pub presentation: Presentation,
    #[serde(default)]
    pub navigation: Option<Navigation>,
}

impl AirportSuggestion {
    /// Remote flight identity, when the entity is searchable.
    pub fn flight_params(&self) -> Option<&RelevantFlights> {
        self.navigation.as_ref()?.relevant_flights.as_ref()
    }

    fn identity(&self) -> String {
        self.flight_params()
            .map(|f| f.entity_id.clone())
            .unwrap_or_else(|| self.presentation.suggestion_title.clone())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Presentation {
    pub title: String,
    pub suggestion_title: String,
    pub subtitle: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Navigation {
    #[serde(default)]
    pub relevant_flights: Option<RelevantFlights>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelevantFlights {
    pub sky_id: String,
    pub entity_id: String,
    #[serde(default)]
    pub flight_place_type: Option<EntityType>,
    #[serde(default)]
    pub localized_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityType {
    City,
    Airport,
    Country,
}

/// Drop duplicate entities, keeping the first (most relevant) entry.
pub(crate) fn dedupe_suggestions(suggestions: Vec<AirportSuggestion>) -> Vec<AirportSuggestion> {
    let mut seen = HashSet::new();
    suggestions
        .into_iter()
        .filter(|s| seen.insert(s.identity()))
        .collect()
}

/// What became of one submitted input.
#[derive(Debug, Clone)]
pub enum LookupOutcome {
    /// Input below the minimum length; no request was made.
    Skipped,
    /// A newer input arrived before this one resolved; its result was
    /// discarded.
    Superseded,
    /// Candidate list in remote relevance order, deduplicated.
    Matches(Vec<AirportSuggestion>),
}

impl LookupOutcome {
    pub fn matches(&self) -> Option<&[AirportSuggestion]> {
        match self {
            LookupOutcome::Matches(list) => Some(list.as_slice()),
            _ => None,
        }
    }
}

#[derive(Clone)]
pub struct AirportLookup {
    client: SkyFlightsClient,
    cache: TtlCache<Vec<AirportSuggestion>>,
    debouncer: Debouncer,
}

impl AirportLookup {
    pub fn new(client: SkyFlightsClient) -> Self {
        Self::with_tuning(client, DEBOUNCE_QUIET, AIRPORT_CACHE_TTL)
    }

    pub fn with_tuning(client: SkyFlightsClient, quiet: Duration, ttl: Duration) -> Self {
        Self {
            client,
            cache: TtlCache::new(ttl),
            debouncer: Debouncer::new(quiet),
        }
    }

    /// Submit one keystroke's worth of input.
    ///
    /// A remote failure is returned as `Err` for the caller to surface
    /// as a transient notice; it never produces fabricated matches.
    pub async fn query(&self, text: &str) -> Result<LookupOutcome> {
        let trimmed = text.trim();
        if trimmed.chars().count() < MIN_QUERY_CHARS {
            tracing::trace!("Airport lookup skipped for short input: {:?}", trimmed);
            return Ok(LookupOutcome::Skipped);
        }

        let Some(ticket) = self.debouncer.acquire().await else {
            tracing::trace!("Airport lookup superseded during quiet period: {:?}", trimmed);
            return Ok(LookupOutcome::Superseded);
        };

        let key = normalize_key(trimmed);
        if let Some(cached) = self.cache.get(&key).await {
            tracing::debug!("Airport lookup cache hit for {:?}", key);
            return Ok(if ticket.is_current() {
                LookupOutcome::Matches(cached)
            } else {
                LookupOutcome::Superseded
            });
        }

        let suggestions = self.client.search_airports(trimmed).await?;
        if !ticket.is_current() {
            tracing::debug!("Airport lookup superseded while in flight: {:?}", trimmed);
            return Ok(LookupOutcome::Superseded);
        }

        self.cache.insert(&key, suggestions.clone()).await;
        Ok(LookupOutcome::Matches(suggestions))
    }

    /// Seed the cache, e.g. with results carried over from a previous
    /// session.
    pub async fn prime(&self, text: &str, suggestions: Vec<AirportSuggestion>) {
        self.cache
            .insert(&normalize_key(text.trim()), suggestions)
            .await;
    }

    /// Manually drop a cached candidate list.
    pub async fn invalidate(&self, text: &str) -> bool {
        self.cache.invalidate(&normalize_key(text.trim())).await
    }
}
