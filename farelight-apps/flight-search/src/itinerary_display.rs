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

//! # Itinerary Display Derivation
//!
//! Pure, deterministic derivation of display fields from a raw leg:
//! times, day offset, duration decomposition, stop count, and per-stop
//! layover descriptors. No I/O, no mutation of input.
//!
//! Calendar comparisons (day offset, overnight layovers) use each
//! timestamp's local calendar date as-is. Segment timestamps carry no
//! zone information, so no normalization is attempted.

use std::fmt;

use chrono::NaiveDateTime;

use crate::flights_results::Leg;

/// A minute count decomposed into whole hours and remaining minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoursMinutes {
    pub hours: u32,
    pub minutes: u32,
}

impl HoursMinutes {
    pub fn from_minutes(total: u32) -> Self {
        Self {
            hours: total / 60,
            minutes: total % 60,
        }
    }

    pub fn total_minutes(&self) -> u32 {
        self.hours * 60 + self.minutes
    }
}

impl fmt::Display for HoursMinutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.minutes == 0 {
            write!(f, "{}h", self.hours)
        } else if self.hours == 0 {
            write!(f, "{}m", self.minutes)
        } else {
            write!(f, "{}h {:02}m", self.hours, self.minutes)
        }
    }
}

/// Display-ready summary of one leg.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightSummary {
    pub departure: NaiveDateTime,
    pub arrival: NaiveDateTime,
    /// Calendar days between arrival date and departure date. A
    /// negative difference signals malformed upstream data and is
    /// surfaced as 0.
    pub day_offset: u32,
    pub duration: HoursMinutes,
    pub stop_count: usize,
    pub origin_code: String,
    pub destination_code: String,
}

/// One intermediate stop between two segments of the same leg.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoverInfo {
    pub airport_code: String,
    /// Parent city/region name of the layover airport, falling back to
    /// the airport's own name.
    pub city: String,
    pub duration: HoursMinutes,
    /// The next departure falls on a different calendar date than the
    /// previous arrival.
    pub is_overnight: bool,
}

pub fn derive_flight_summary(leg: &Leg) -> Option<FlightSummary> {
    let first = leg.segments.first()?;
    let last = leg.segments.last()?;

    Some(FlightSummary {
        departure: first.departure,
        arrival: last.arrival,
        day_offset: day_offset(first.departure, last.arrival),
        duration: HoursMinutes::from_minutes(leg.duration_in_minutes),
        stop_count: leg.segments.len().saturating_sub(1),
        origin_code: first.origin.display_code.clone(),
        destination_code: last.destination.display_code.clone(),
    })
}

/// One entry per adjacent segment pair, in order. A leg with n segments
/// yields exactly n-1 entries.
pub fn derive_layovers(leg: &Leg) -> Vec<LayoverInfo> {
    leg.segments
        .windows(2)
        .map(|pair| {
            let (inbound, outbound) = (&pair[0], &pair[1]);
            // Negative gaps signal malformed upstream data; surface 0
            let minutes = (outbound.departure - inbound.arrival).num_minutes().max(0) as u32;
            let city = inbound
                .destination
                .parent
                .as_ref()
                .map(|p| p.name.clone())
                .unwrap_or_else(|| inbound.destination.name.clone());

            LayoverInfo {
                airport_code: inbound.destination.display_code.clone(),
                city,
                duration: HoursMinutes::from_minutes(minutes),
                is_overnight: outbound.departure.date() != inbound.arrival.date(),
            }
        })
        .collect()
}

/// Stop-count label: "Non-stop", "1 stop: 2h 30m in ORD", or
/// "2 stops: ORD, DEN" (ordered intermediate airport codes).
pub fn summarize_stops(leg: &Leg) -> String {
    let stops = leg.segments.len().saturating_sub(1);
    match stops {
        0 => "Non-stop".to_string(),
        1 => match derive_layovers(leg).first() {
            Some(layover) => {
                format!("1 stop: {} in {}", layover.duration, layover.airport_code)
            }
            None => "1 stop".to_string(),
        },
        n => {
            let codes: Vec<&str> = leg
                .segments
                .iter()
                .skip(1)
                .map(|s| s.origin.display_code.as_str())
                .collect();
            format!("{} stops: {}", n, codes.join(", "))
        }
    }
}

pub fn pluralize<'a>(count: u32, singular: &'a str, plural: &'a str) -> &'a str {
    if count == 1 { singular } else { plural }
}

fn day_offset(departure: NaiveDateTime, arrival: NaiveDateTime) -> u32 {
    (arrival.date() - departure.date()).num_days().max(0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flights_results::{FlightPlace, ParentPlace, Segment};
    use chrono::NaiveDate;

    fn dt(y: i32, m: u32, d: u32, hh: u32, mm: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(hh, mm, 0)
            .unwrap()
    }

    fn place(code: &str, name: &str, parent: Option<&str>) -> FlightPlace {
        FlightPlace {
            display_code: code.to_string(),
            name: name.to_string(),
            parent: parent.map(|p| ParentPlace {
                name: p.to_string(),
                display_code: None,
            }),
        }
    }

    fn segment(
        from: FlightPlace,
        to: FlightPlace,
        departure: NaiveDateTime,
        arrival: NaiveDateTime,
    ) -> Segment {
        let duration_in_minutes = (arrival - departure).num_minutes().max(0) as u32;
        Segment {
            origin: from,
            destination: to,
            departure,
            arrival,
            duration_in_minutes,
            flight_number: None,
            marketing_carrier: None,
            operating_carrier: None,
        }
    }

    fn leg(segments: Vec<Segment>) -> Leg {
        let duration_in_minutes = match (segments.first(), segments.last()) {
            (Some(first), Some(last)) => {
                (last.arrival - first.departure).num_minutes().max(0) as u32
            }
            _ => 0,
        };
        Leg {
            id: None,
            duration_in_minutes,
            segments,
            carriers: Default::default(),
        }
    }

    #[test]
    fn test_hours_minutes_decomposition() {
        let hm = HoursMinutes::from_minutes(390);
        assert_eq!((hm.hours, hm.minutes), (6, 30));
        assert_eq!(hm.to_string(), "6h 30m");
        assert_eq!(HoursMinutes::from_minutes(45).to_string(), "45m");
        assert_eq!(HoursMinutes::from_minutes(120).to_string(), "2h");
    }

    #[test]
    fn test_decomposition_reassembles_total() {
        for total in 0..=1440 {
            assert_eq!(HoursMinutes::from_minutes(total).total_minutes(), total);
        }
    }

    #[test]
    fn test_nonstop_summary() {
        let leg = leg(vec![segment(
            place("SFO", "San Francisco International", Some("San Francisco")),
            place("JFK", "New York John F. Kennedy", Some("New York")),
            dt(2024, 6, 1, 8, 0),
            dt(2024, 6, 1, 16, 30),
        )]);

        let summary = derive_flight_summary(&leg).unwrap();
        assert_eq!(summary.stop_count, 0);
        assert_eq!(summary.day_offset, 0);
        assert_eq!(summary.origin_code, "SFO");
        assert_eq!(summary.destination_code, "JFK");
        assert_eq!((summary.duration.hours, summary.duration.minutes), (8, 30));
        assert!(derive_layovers(&leg).is_empty());
        assert_eq!(summarize_stops(&leg), "Non-stop");
    }

    #[test]
    fn test_single_layover() {
        let leg = leg(vec![
            segment(
                place("SFO", "San Francisco International", Some("San Francisco")),
                place("ORD", "Chicago O'Hare International", Some("Chicago")),
                dt(2024, 6, 1, 6, 0),
                dt(2024, 6, 1, 10, 0),
            ),
            segment(
                place("ORD", "Chicago O'Hare International", Some("Chicago")),
                place("JFK", "New York John F. Kennedy", Some("New York")),
                dt(2024, 6, 1, 12, 30),
                dt(2024, 6, 1, 15, 45),
            ),
        ]);

        let layovers = derive_layovers(&leg);
        assert_eq!(layovers.len(), 1);
        assert_eq!(layovers[0].airport_code, "ORD");
        assert_eq!(layovers[0].city, "Chicago");
        assert_eq!(
            (layovers[0].duration.hours, layovers[0].duration.minutes),
            (2, 30)
        );
        assert!(!layovers[0].is_overnight);
        assert_eq!(summarize_stops(&leg), "1 stop: 2h 30m in ORD");
    }

    #[test]
    fn test_overnight_layover_and_day_offset() {
        let leg = leg(vec![
            segment(
                place("LAX", "Los Angeles International", Some("Los Angeles")),
                place("NAN", "Nadi International", Some("Nadi")),
                dt(2024, 6, 1, 18, 0),
                dt(2024, 6, 1, 23, 50),
            ),
            segment(
                place("NAN", "Nadi International", Some("Nadi")),
                place("SYD", "Sydney Kingsford Smith", Some("Sydney")),
                dt(2024, 6, 2, 1, 10),
                dt(2024, 6, 2, 5, 0),
            ),
        ]);

        let layovers = derive_layovers(&leg);
        assert_eq!(layovers.len(), 1);
        assert!(layovers[0].is_overnight);
        assert_eq!(
            (layovers[0].duration.hours, layovers[0].duration.minutes),
            (1, 20)
        );

        let summary = derive_flight_summary(&leg).unwrap();
        assert_eq!(summary.day_offset, 1);
        assert_eq!(summary.stop_count, 1);
    }

    #[test]
    fn test_multi_stop_label_lists_intermediate_codes() {
        let leg = leg(vec![
            segment(
                place("MAD", "Madrid Barajas", Some("Madrid")),
                place("LHR", "London Heathrow", Some("London")),
                dt(2024, 6, 1, 7, 0),
                dt(2024, 6, 1, 9, 0),
            ),
            segment(
                place("LHR", "London Heathrow", Some("London")),
                place("DXB", "Dubai International", Some("Dubai")),
                dt(2024, 6, 1, 11, 0),
                dt(2024, 6, 1, 19, 0),
            ),
            segment(
                place("DXB", "Dubai International", Some("Dubai")),
                place("NRT", "Tokyo Narita", Some("Tokyo")),
                dt(2024, 6, 1, 21, 0),
                dt(2024, 6, 2, 8, 0),
            ),
        ]);

        assert_eq!(derive_layovers(&leg).len(), 2);
        assert_eq!(summarize_stops(&leg), "2 stops: LHR, DXB");
    }

    #[test]
    fn test_layover_city_falls_back_to_airport_name() {
        let leg = leg(vec![
            segment(
                place("AAA", "Alpha", None),
                place("BBB", "Beta Airport", None),
                dt(2024, 6, 1, 8, 0),
                dt(2024, 6, 1, 9, 0),
            ),
            segment(
                place("BBB", "Beta Airport", None),
                place("CCC", "Gamma", None),
                dt(2024, 6, 1, 10, 0),
                dt(2024, 6, 1, 11, 0),
            ),
        ]);

        assert_eq!(derive_layovers(&leg)[0].city, "Beta Airport");
    }

    #[test]
    fn test_malformed_negative_gaps_surface_as_zero() {
        // Second departure before first arrival, arrival before departure
        let leg = leg(vec![
            segment(
                place("AAA", "Alpha", None),
                place("BBB", "Beta", None),
                dt(2024, 6, 2, 8, 0),
                dt(2024, 6, 2, 12, 0),
            ),
            segment(
                place("BBB", "Beta", None),
                place("CCC", "Gamma", None),
                dt(2024, 6, 1, 10, 0),
                dt(2024, 6, 1, 11, 0),
            ),
        ]);

        let layovers = derive_layovers(&leg);
        assert_eq!(layovers[0].duration.total_minutes(), 0);

        let summary = derive_flight_summary(&leg).unwrap();
        assert_eq!(summary.day_offset, 0);
    }

    #[test]
    fn test_empty_leg_yields_no_summary() {
        let empty = leg(vec![]);
        assert!(derive_flight_summary(&empty).is_none());
        assert!(derive_layovers(&empty).is_empty());
        assert_eq!(summarize_stops(&empty), "Non-stop");
    }

    #[test]
    fn test_derivation_is_idempotent() {
        let leg = leg(vec![
            segment(
                place("SFO", "San Francisco International", Some("San Francisco")),
                place("ORD", "Chicago O'Hare International", Some("Chicago")),
                dt(2024, 6, 1, 6, 0),
                dt(2024, 6, 1, 10, 0),
            ),
            segment(
                place("ORD", "Chicago O'Hare International", Some("Chicago")),
                place("JFK", "New York John F. Kennedy", Some("New York")),
                dt(2024, 6, 1, 12, 30),
                dt(2024, 6, 1, 15, 45),
            ),
        ]);

        assert_eq!(derive_flight_summary(&leg), derive_flight_summary(&leg));
        assert_eq!(derive_layovers(&leg), derive_layovers(&leg));
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize(1, "adult", "adults"), "adult");
        assert_eq!(pluralize(2, "adult", "adults"), "adults");
        assert_eq!(pluralize(0, "child", "children"), "children");
    }
}
