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

//! # Flights Results
//!
//! Side-effect free decoding of the `v2/flights/searchFlights` JSON
//! response. Itineraries are immutable once received; everything
//! display-related is derived later in [`crate::itinerary_display`].

use anyhow::Result;
use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

use crate::SearchFlightsParams;

/// Envelope of the flight search endpoint. `status: false` means a
/// logical failure independent of the HTTP status.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFlightsResponse {
    pub status: bool,
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub data: Option<ItineraryData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryData {
    #[serde(default)]
    pub itineraries: Vec<Itinerary>,
}

/// One priced travel option.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    pub id: String,
    pub price: Price,
    #[serde(default)]
    pub legs: Vec<Leg>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub score: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    #[serde(default)]
    pub raw: f64,
    pub formatted: String,
}

/// One directional trip: an ordered, non-empty sequence of segments.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leg {
    #[serde(default)]
    pub id: Option<String>,
    pub duration_in_minutes: u32,
    #[serde(default)]
    pub segments: Vec<Segment>,
    #[serde(default)]
    pub carriers: Carriers,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Carriers {
    #[serde(default)]
    pub marketing: Vec<Carrier>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Carrier {
    pub name: String,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub alternate_id: Option<String>,
}

/// One non-stop flight hop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub origin: FlightPlace,
    pub destination: FlightPlace,
    #[serde(deserialize_with = "de_local_timestamp")]
    pub departure: NaiveDateTime,
    #[serde(deserialize_with = "de_local_timestamp")]
    pub arrival: NaiveDateTime,
    pub duration_in_minutes: u32,
    #[serde(default)]
    pub flight_number: Option<String>,
    #[serde(default)]
    pub marketing_carrier: Option<Carrier>,
    #[serde(default)]
    pub operating_carrier: Option<Carrier>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightPlace {
    pub display_code: String,
    pub name: String,
    #[serde(default)]
    pub parent: Option<ParentPlace>,
}

/// Parent city/region of an airport.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentPlace {
    pub name: String,
    #[serde(default)]
    pub display_code: Option<String>,
}

/// Segment timestamps are local wall-clock datetimes. The upstream API
/// emits them without a zone designator, but a trailing `Z` is
/// tolerated and stripped.
pub(crate) fn parse_local_timestamp(raw: &str) -> chrono::ParseResult<NaiveDateTime> {
    let trimmed = raw.trim().trim_end_matches('Z');
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M"))
}

fn de_local_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_local_timestamp(&raw).map_err(serde::de::Error::custom)
}

/// Decoded search result, paired with the parameters that produced it.
#[derive(Debug, Clone)]
pub struct FlightSearchResult {
    pub search_params: SearchFlightsParams,
    pub itineraries: Vec<Itinerary>,
}

impl FlightSearchResult {
    pub fn from_response(
        response: SearchFlightsResponse,
        search_params: SearchFlightsParams,
    ) -> Result<Self> {
        anyhow::ensure!(response.status, "Flight search reported status=false");
        let itineraries = response.data.map(|d| d.itineraries).unwrap_or_default();
        Ok(Self {
            search_params,
            itineraries,
        })
    }

    pub fn len(&self) -> usize {
        self.itineraries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.itineraries.is_empty()
    }
}
