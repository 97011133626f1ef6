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

//! CLI for Sky-Scrapper flight search.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use farelight_flight_search::{
    ApiConfig, CabinClass, FlightSummary, Itinerary, PassengerCount, PlaceRef,
    SearchFlightsParams, SkyFlightsClient, derive_flight_summary, pluralize, summarize_stops,
};
use std::cmp::max;

/// CLI arguments
#[derive(Parser, Debug)]
#[command(name = "farelight-flights")]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Origin airport or city (free text, e.g. "LAX" or "los angeles")
    #[arg(short, long)]
    from: Option<String>,

    /// Destination airport or city (free text)
    #[arg(short, long)]
    to: Option<String>,

    /// Departure date (YYYY-MM-DD or YYYY/MM/DD)
    #[arg(short, long)]
    date: Option<String>,

    /// Cabin class: economy, premium_economy, business, first
    #[arg(short, long, default_value = "economy")]
    cabin: String,

    /// Number of adult passengers
    #[arg(short, long, default_value = "1")]
    adults: u32,

    /// Number of child passengers
    #[arg(long, default_value = "0")]
    children: u32,

    /// Infants with their own seat
    #[arg(long, default_value = "0")]
    infants_seat: u32,

    /// Infants on an adult's lap
    #[arg(long, default_value = "0")]
    infants_lap: u32,

    /// Check server health and exit
    #[arg(long)]
    ping: bool,

    /// Print raw itineraries as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long, default_value = "false")]
    verbose: bool,
}

/// Configure logging based on verbosity level
fn setup_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();
}

/// Parse date string to NaiveDate
fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y/%m/%d"))
        .context(format!(
            "Invalid date format: {}. Use YYYY-MM-DD or YYYY/MM/DD",
            s
        ))
}

/// Resolve free text to a searchable place via airport search,
/// keeping the most relevant match.
async fn resolve_place(client: &SkyFlightsClient, text: &str) -> Result<(PlaceRef, String)> {
    let suggestions = client
        .search_airports(text)
        .await
        .with_context(|| format!("Airport search failed for {:?}", text))?;

    let best = suggestions
        .iter()
        .find_map(|s| {
            s.flight_params().map(|f| {
                (
                    PlaceRef::new(&f.sky_id, &f.entity_id),
                    s.presentation.suggestion_title.clone(),
                )
            })
        })
        .with_context(|| format!("No airport found for {:?}", text))?;
    Ok(best)
}

/// Get terminal width for responsive tables
fn get_terminal_width() -> usize {
    term_size::dimensions().map(|(w, _)| w).unwrap_or(100)
}

fn dash_bar() -> String {
    "-".repeat(get_terminal_width().min(100))
}

/// Marketing carriers joined the way the results table shows them.
fn fmt_carriers(itin: &Itinerary) -> String {
    let names: Vec<&str> = itin
        .legs
        .first()
        .map(|leg| leg.carriers.marketing.iter().map(|c| c.name.as_str()).collect())
        .unwrap_or_default();
    if names.is_empty() {
        "??".to_string()
    } else {
        names.join(" • ")
    }
}

/// Format departure/arrival with an arrival-day marker: "08:05 → 16:30 +1"
fn fmt_times(summary: &FlightSummary) -> String {
    let base = format!(
        "{} → {}",
        summary.departure.format("%H:%M"),
        summary.arrival.format("%H:%M")
    );
    if summary.day_offset > 0 {
        format!("{} +{}", base, summary.day_offset)
    } else {
        base
    }
}

/// Passenger note under the results header, e.g.
/// "Prices include required taxes + fees for 2 adults, 1 child, and 1 infant."
fn fmt_passenger_note(passengers: &PassengerCount) -> String {
    let mut note = format!(
        "Prices include required taxes + fees for {} {}",
        passengers.adults,
        pluralize(passengers.adults, "adult", "adults")
    );
    if passengers.children > 0 {
        note.push_str(&format!(
            ", {} {}",
            passengers.children,
            pluralize(passengers.children, "child", "children")
        ));
    }
    let infants = passengers.infants();
    if infants > 0 {
        note.push_str(&format!(
            ", and {} {}",
            infants,
            pluralize(infants, "infant", "infants")
        ));
    }
    note.push_str(". Optional charges and bag fees may apply.");
    note
}

/// Row data derived once per itinerary.
struct DisplayRow {
    carriers: String,
    times: String,
    duration: String,
    stops: String,
    price: String,
}

fn derive_rows(itineraries: &[Itinerary]) -> Vec<DisplayRow> {
    itineraries
        .iter()
        .filter_map(|itin| {
            let leg = itin.legs.first()?;
            let summary = derive_flight_summary(leg)?;
            Some(DisplayRow {
                carriers: fmt_carriers(itin),
                times: fmt_times(&summary),
                duration: summary.duration.to_string(),
                stops: summarize_stops(leg),
                price: itin.price.formatted.clone(),
            })
        })
        .collect()
}

/// Calculate terminal-aware column widths
fn calc_column_widths(rows: &[DisplayRow]) -> (usize, usize, usize, usize, usize) {
    let mut max_carriers = 8;
    let mut max_times = 15;
    let mut max_duration = 8;
    let mut max_stops = 20;

    for row in rows {
        max_carriers = max(max_carriers, row.carriers.len());
        max_times = max(max_times, row.times.len());
        max_duration = max(max_duration, row.duration.len());
        max_stops = max(max_stops, row.stops.len());
    }

    let terminal_width = get_terminal_width();
    let available_width = terminal_width.saturating_sub(20);
    let total_content = max_carriers + max_times + max_duration + max_stops;

    if total_content > available_width && available_width > 50 {
        let ratio = available_width as f64 / total_content as f64;
        max_carriers = max((max_carriers as f64 * ratio).floor() as usize, 6);
        max_times = max((max_times as f64 * ratio).floor() as usize, 10);
        max_duration = max((max_duration as f64 * ratio).floor() as usize, 5);
        max_stops = max((max_stops as f64 * ratio).floor() as usize, 10);
    }

    let rank_width = 4;
    (rank_width, max_carriers, max_times, max_duration, max_stops)
}

/// Render results to stdout
fn render_results(
    params: &SearchFlightsParams,
    itineraries: &[Itinerary],
    origin_label: &str,
    destination_label: &str,
) {
    println!(
        "\n  🛫  {} → {} on {}\n",
        origin_label, destination_label, params.date
    );
    println!("Top departing flights");
    println!("Ranked based on price and convenience.");
    println!("{}", fmt_passenger_note(&params.passengers));
    println!("{}\n", dash_bar());

    let rows = derive_rows(itineraries);
    let (rw, cw, tw, dw, sw) = calc_column_widths(&rows);

    let h1 = format!("  {:>w$}", "#", w = rw);
    let h2 = format!("{:<w$}", "CARRIERS", w = cw);
    let h3 = format!("{:<w$}", "DEP → ARR", w = tw);
    let h4 = format!("{:<w$}", "DURATION", w = dw);
    let h5 = format!("{:<w$}", "STOPS", w = sw);
    println!("{}  {}  {}  {}  {}   PRICE", h1, h2, h3, h4, h5);
    println!("{}", dash_bar());

    for (i, row) in rows.iter().enumerate() {
        let c1 = format!("  {:>w$}", i + 1, w = rw);
        let c2 = format!("{:<w$}", row.carriers, w = cw);
        let c3 = format!("{:<w$}", row.times, w = tw);
        let c4 = format!("{:<w$}", row.duration, w = dw);
        let c5 = format!("{:<w$}", row.stops, w = sw);
        println!("{}  {}  {}  {}  {}   {}", c1, c2, c3, c4, c5, row.price);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();
    setup_logging(args.verbose);

    tracing::info!("Starting farelight-flights CLI");
    tracing::debug!("Args: {:?}", args);

    let config = ApiConfig::from_env().context("Missing API configuration")?;
    let client = SkyFlightsClient::new(config)?;

    if args.ping {
        let health = client.check_server().await.context("Health check failed")?;
        println!(
            "Server status: {} ({})",
            if health.status { "up" } else { "down" },
            health.message
        );
        return Ok(());
    }

    let from = args.from.context("--from is required")?;
    let to = args.to.context("--to is required")?;
    let date = parse_date(&args.date.context("--date is required")?)?;
    let cabin = CabinClass::parse(&args.cabin)?;

    let (origin, origin_label) = resolve_place(&client, &from).await?;
    let (destination, destination_label) = resolve_place(&client, &to).await?;
    tracing::info!(
        "Resolved places: {} ({}) → {} ({})",
        origin_label,
        origin.sky_id,
        destination_label,
        destination.sky_id
    );

    let params = SearchFlightsParams::builder(origin, destination, date)
        .cabin_class(cabin)
        .passengers(PassengerCount {
            adults: args.adults,
            children: args.children,
            infants_seat: args.infants_seat,
            infants_lap: args.infants_lap,
        })
        .build()
        .context("Failed to build search parameters")?;

    let result = client
        .search_flights(&params)
        .await
        .context("Search failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result.itineraries)?);
    } else {
        render_results(
            &result.search_params,
            &result.itineraries,
            &origin_label,
            &destination_label,
        );
    }

    Ok(())
}
