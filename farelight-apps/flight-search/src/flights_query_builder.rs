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

//! # Flights Query Builder
//!
//! Side-effect free encoding of search input into the
//! `v2/flights/searchFlights` query string.

use anyhow::{Context, Result, ensure};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Fare category. Encodes as the API's `cabinClass` parameter value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CabinClass {
    #[default]
    Economy,
    PremiumEconomy,
    Business,
    First,
}

impl CabinClass {
    pub fn as_query_value(&self) -> &'static str {
        match self {
            CabinClass::Economy => "economy",
            CabinClass::PremiumEconomy => "premium_economy",
            CabinClass::Business => "business",
            CabinClass::First => "first",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "economy" | "e" => Ok(CabinClass::Economy),
            "premium_economy" | "premium" | "pe" => Ok(CabinClass::PremiumEconomy),
            "business" | "b" => Ok(CabinClass::Business),
            "first" | "f" => Ok(CabinClass::First),
            _ => anyhow::bail!(
                "Invalid cabin class: {}. Use: economy, premium_economy, business, first",
                s
            ),
        }
    }
}

/// Passenger counters as captured by the search form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassengerCount {
    pub adults: u32,
    pub children: u32,
    pub infants_seat: u32,
    pub infants_lap: u32,
}

impl Default for PassengerCount {
    fn default() -> Self {
        Self {
            adults: 1,
            children: 0,
            infants_seat: 0,
            infants_lap: 0,
        }
    }
}

impl PassengerCount {
    /// The API takes a single `infants` parameter: seat + lap combined.
    pub fn infants(&self) -> u32 {
        self.infants_seat + self.infants_lap
    }

    pub fn total(&self) -> u32 {
        self.adults + self.children + self.infants()
    }

    fn validate(&self) -> Result<()> {
        ensure!(self.adults >= 1, "At least one adult is required");
        ensure!(
            self.infants_lap <= self.adults,
            "Cannot have more infants on lap ({}) than adults ({})",
            self.infants_lap,
            self.adults
        );
        Ok(())
    }
}

/// Remote identity of an origin/destination place, as returned by the
/// airport search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceRef {
    pub sky_id: String,
    pub entity_id: String,
}

impl PlaceRef {
    pub fn new(sky_id: impl Into<String>, entity_id: impl Into<String>) -> Self {
        Self {
            sky_id: sky_id.into(),
            entity_id: entity_id.into(),
        }
    }
}

/// Validated input for exactly one flight search request.
#[derive(Debug, Clone)]
pub struct SearchFlightsParams {
    pub origin: PlaceRef,
    pub destination: PlaceRef,
    pub date: NaiveDate,
    pub cabin_class: CabinClass,
    pub passengers: PassengerCount,
}

impl SearchFlightsParams {
    pub(crate) fn validate(&self) -> Result<()> {
        ensure!(!self.origin.sky_id.is_empty(), "Origin is required");
        ensure!(!self.destination.sky_id.is_empty(), "Destination is required");
        ensure!(
            !self.origin.entity_id.is_empty(),
            "Origin entity id is required"
        );
        ensure!(
            !self.destination.entity_id.is_empty(),
            "Destination entity id is required"
        );
        self.passengers.validate()
    }

    /// Query pairs in the order the upstream endpoint documents them.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("originSkyId", self.origin.sky_id.clone()),
            ("originEntityId", self.origin.entity_id.clone()),
            ("destinationSkyId", self.destination.sky_id.clone()),
            ("destinationEntityId", self.destination.entity_id.clone()),
            ("date", self.date.format("%Y-%m-%d").to_string()),
            ("cabinClass", self.cabin_class.as_query_value().to_string()),
            ("adults", self.passengers.adults.to_string()),
            ("children", self.passengers.children.to_string()),
            ("infants", self.passengers.infants().to_string()),
        ]
    }

    /// Endpoint path with the percent-encoded query string attached.
    pub fn search_endpoint(&self) -> String {
        let query: Vec<String> = self
            .query_pairs()
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect();
        format!("v2/flights/searchFlights?{}", query.join("&"))
    }

    pub fn builder(
        origin: PlaceRef,
        destination: PlaceRef,
        date: NaiveDate,
    ) -> SearchFlightsParamsBuilder {
        SearchFlightsParamsBuilder {
            origin,
            destination,
            date,
            cabin_class: CabinClass::Economy,
            passengers: PassengerCount::default(),
        }
    }
}

#[derive(Clone)]
pub struct SearchFlightsParamsBuilder {
    origin: PlaceRef,
    destination: PlaceRef,
    date: NaiveDate,
    cabin_class: CabinClass,
    passengers: PassengerCount,
}

impl SearchFlightsParamsBuilder {
    pub fn cabin_class(mut self, cabin_class: CabinClass) -> Self {
        self.cabin_class = cabin_class;
        self
    }

    pub fn passengers(mut self, passengers: PassengerCount) -> Self {
        self.passengers = passengers;
        self
    }

    pub fn build(self) -> Result<SearchFlightsParams> {
        let params = SearchFlightsParams {
            origin: self.origin,
            destination: self.destination,
            date: self.date,
            cabin_class: self.cabin_class,
            passengers: self.passengers,
        };
        params.validate()?;
        Ok(params)
    }
}

/// In-progress form state: the optional-field mirror of
/// [`SearchFlightsParams`]. No request may be issued until every
/// required field (origin, destination, date) is set.
#[derive(Debug, Clone, Default)]
pub struct SearchFlightsDraft {
    pub origin: Option<PlaceRef>,
    pub destination: Option<PlaceRef>,
    pub date: Option<NaiveDate>,
    pub cabin_class: Option<CabinClass>,
    pub passengers: PassengerCount,
}

impl SearchFlightsDraft {
    pub fn is_ready(&self) -> bool {
        self.origin.is_some() && self.destination.is_some() && self.date.is_some()
    }

    /// `None` while any required field is unset. Cabin class defaults
    /// to economy.
    pub fn to_params(&self) -> Option<Result<SearchFlightsParams>> {
        let origin = self.origin.clone()?;
        let destination = self.destination.clone()?;
        let date = self.date?;
        Some(
            SearchFlightsParams::builder(origin, destination, date)
                .cabin_class(self.cabin_class.unwrap_or_default())
                .passengers(self.passengers)
                .build()
                .context("Invalid search form state"),
        )
    }
}
