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

// Library for farelight-flight-search
// Flight search client over the Sky-Scrapper API: query building,
// response decoding, itinerary display derivation, and a debounced
// airport lookup adapter.

mod airport_lookup;
mod config;
mod flights_query_builder;
mod flights_results;
mod flights_search;
mod itinerary_display;

pub use airport_lookup::{
    AIRPORT_CACHE_TTL, AirportLookup, AirportSuggestion, DEBOUNCE_QUIET, EntityType,
    LookupOutcome, MIN_QUERY_CHARS, Navigation, Presentation, RelevantFlights,
    SearchAirportResponse,
};

pub use config::ApiConfig;

pub use flights_query_builder::{
    CabinClass, PassengerCount, PlaceRef, SearchFlightsDraft, SearchFlightsParams,
    SearchFlightsParamsBuilder,
};

// Re-export the wire data model alongside the result wrapper
pub use flights_results::{
    Carrier, Carriers, FlightPlace, FlightSearchResult, Itinerary, ItineraryData, Leg,
    ParentPlace, Price, SearchFlightsResponse, Segment,
};

pub use flights_search::{CheckServerResponse, SkyFlightsClient};

pub use itinerary_display::{
    FlightSummary, HoursMinutes, LayoverInfo, derive_flight_summary, derive_layovers, pluralize,
    summarize_stops,
};
