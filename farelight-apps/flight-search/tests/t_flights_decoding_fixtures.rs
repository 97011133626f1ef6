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

//! Decoding tests against a captured `v2/flights/searchFlights` JSON
//! response, plus end-to-end display derivation from the decoded data.
//! This catches regressions when the wire model drifts from what the
//! API actually returns.

use std::path::Path;

use farelight_flight_search::{
    SearchFlightsResponse, derive_flight_summary, derive_layovers, summarize_stops,
};

fn load_fixture(name: &str) -> String {
    let fixtures_dir =
        Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures-flights-decoding");
    let fixture_path = fixtures_dir.join(format!("{}.json", name));
    std::fs::read_to_string(&fixture_path)
        .unwrap_or_else(|e| panic!("Failed to read fixture at {:?}: {}", fixture_path, e))
}

#[test]
fn test_decode_search_response() {
    let raw = load_fixture("lax_jfk_economy");
    let response: SearchFlightsResponse =
        serde_json::from_str(&raw).expect("decode searchFlights response");

    assert!(response.status);
    let itineraries = response.data.expect("data present").itineraries;
    assert_eq!(itineraries.len(), 2);

    let nonstop = &itineraries[0];
    assert_eq!(nonstop.price.formatted, "$249");
    assert_eq!(nonstop.tags, vec!["cheapest", "shortest"]);
    let leg = &nonstop.legs[0];
    assert_eq!(leg.carriers.marketing[0].name, "Delta");
    assert_eq!(leg.segments[0].flight_number.as_deref(), Some("806"));
    assert_eq!(
        leg.segments[0].origin.parent.as_ref().unwrap().name,
        "Los Angeles"
    );
}

#[test]
fn test_derive_nonstop_itinerary() {
    let raw = load_fixture("lax_jfk_economy");
    let response: SearchFlightsResponse = serde_json::from_str(&raw).unwrap();
    let itineraries = response.data.unwrap().itineraries;

    let leg = &itineraries[0].legs[0];
    let summary = derive_flight_summary(leg).expect("non-empty leg");

    assert_eq!(summary.stop_count, 0);
    assert_eq!(summary.day_offset, 0);
    assert_eq!(summary.origin_code, "LAX");
    assert_eq!(summary.destination_code, "JFK");
    assert_eq!((summary.duration.hours, summary.duration.minutes), (5, 25));
    assert!(derive_layovers(leg).is_empty());
    assert_eq!(summarize_stops(leg), "Non-stop");
}

#[test]
fn test_derive_overnight_one_stop_itinerary() {
    let raw = load_fixture("lax_jfk_economy");
    let response: SearchFlightsResponse = serde_json::from_str(&raw).unwrap();
    let itineraries = response.data.unwrap().itineraries;

    let leg = &itineraries[1].legs[0];
    let summary = derive_flight_summary(leg).expect("non-empty leg");
    assert_eq!(summary.stop_count, 1);
    // Departs 21:40, lands 13:55 the next calendar day
    assert_eq!(summary.day_offset, 1);
    assert_eq!((summary.duration.hours, summary.duration.minutes), (16, 15));

    let layovers = derive_layovers(leg);
    assert_eq!(layovers.len(), 1);
    assert_eq!(layovers[0].airport_code, "SEA");
    assert_eq!(layovers[0].city, "Seattle");
    // 23:55 arrival to 06:35 departure crosses midnight
    assert!(layovers[0].is_overnight);
    assert_eq!(
        (layovers[0].duration.hours, layovers[0].duration.minutes),
        (6, 40)
    );
    assert_eq!(summarize_stops(leg), "1 stop: 6h 40m in SEA");

    // Second segment has no operating carrier in the fixture; decoding
    // substitutes None rather than failing
    assert!(leg.segments[1].operating_carrier.is_none());
}
