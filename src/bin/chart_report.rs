//! Birth chart report.
//!
//! Fetches a natal chart from a running Astrology API and prints planets,
//! points, angles, houses and aspects as a table. The raw JSON response is
//! written next to it.
//!
//! ```bash
//! chart-report 1991-12-10 04:59 -37.8136 144.9631 placidus
//! ```
//!
//! Environment:
//! - `API_BASE_URL` (default `http://localhost:8080`)
//! - `API_KEY`
//! - `REPORT_OUTPUT` (default `chart.json`)

use anyhow::{Context, bail};
use astrology_api::zodiac::format_sign_degree;
use astrology_client::{AstrologyClient, BirthRequest, ChartObject, ClientConfig, NatalChart};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_OUTPUT: &str = "chart.json";
const USAGE: &str = "usage: chart-report [DATE TIME LATITUDE LONGITUDE [HOUSE_SYSTEM]]";

/// Birth data from the command line, or the Melbourne sample chart.
fn birth_from_args(args: &[String]) -> anyhow::Result<BirthRequest> {
    match args {
        [] => Ok(BirthRequest::new(
            "1991-12-10",
            "04:59",
            "Melbourne, Australia",
            -37.8136,
            144.9631,
        )
        .with_house_system("placidus")),
        [date, time, latitude, longitude, rest @ ..] if rest.len() <= 1 => {
            let latitude: f64 = latitude
                .parse()
                .with_context(|| format!("latitude {:?} is not a number", latitude))?;
            let longitude: f64 = longitude
                .parse()
                .with_context(|| format!("longitude {:?} is not a number", longitude))?;
            let mut request = BirthRequest::new(date, time, "", latitude, longitude);
            if let Some(system) = rest.first() {
                request = request.with_house_system(system);
            }
            Ok(request)
        }
        _ => bail!(USAGE),
    }
}

fn object_row(object: &ChartObject) -> String {
    let motion = match &object.movement {
        Some(movement) if movement.retrograde => "R",
        Some(movement) if movement.stationary => "S",
        _ => "",
    };
    format!(
        "{:<16} {:>7} {:<12} {:<2} {:<10}",
        object.name,
        format_sign_degree(object.longitude.raw, &object.sign.name),
        object.sign.name,
        motion,
        object.house.name,
    )
}

fn print_report(chart: &NatalChart) {
    println!(
        "Chart for {} ({}, UTC{})",
        chart.native.date_time, chart.native.timezone, chart.native.utc_offset
    );
    println!(
        "Latitude {:.4}, longitude {:.4}, JD {:.5}",
        chart.native.latitude, chart.native.longitude, chart.native.julian_date
    );
    println!(
        "House system: {}  |  {} chart  |  Moon phase: {}",
        chart.house_system,
        if chart.diurnal { "Day" } else { "Night" },
        chart.moon_phase
    );

    println!();
    println!("Planets, points and angles");
    println!("{}", "-".repeat(52));
    for object in chart.objects.values().filter(|o| o.kind.name != "House") {
        println!("{}", object_row(object));
    }

    println!();
    println!("Houses");
    println!("{}", "-".repeat(52));
    for house in chart.houses() {
        println!(
            "{:<16} {:>7} {}",
            house.name,
            format_sign_degree(house.longitude.raw, &house.sign.name),
            house.sign.name
        );
    }

    println!();
    println!("Aspects");
    println!("{}", "-".repeat(52));
    for aspect in chart.unique_aspects() {
        println!(
            "{:<16} {:<12} {:<16} {:>6.2}° {}",
            aspect.active.name,
            aspect.kind,
            aspect.passive.name,
            aspect.difference.abs(),
            aspect.movement
        );
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,chart_report=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let request = birth_from_args(&args)?;

    let mut config = ClientConfig::default();
    if let Ok(base_url) = std::env::var("API_BASE_URL") {
        config.base_url = base_url;
    }
    config.api_key = std::env::var("API_KEY").ok();
    let client = AstrologyClient::new(config)?;

    info!("Requesting birth chart from {}", client.base_url());
    let chart = client
        .birth_chart(&request)
        .await
        .context("birth chart request failed")?;

    print_report(&chart);

    let output = std::env::var("REPORT_OUTPUT").unwrap_or_else(|_| DEFAULT_OUTPUT.to_string());
    let json = serde_json::to_string_pretty(&chart)?;
    std::fs::write(&output, json).with_context(|| format!("cannot write {}", output))?;
    info!("Chart JSON written to {}", output);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_default_birth_is_melbourne() {
        let request = birth_from_args(&[]).unwrap();
        assert_eq!(request.date, "1991-12-10");
        assert_eq!(request.house_system.as_deref(), Some("placidus"));
    }

    #[test]
    fn test_birth_from_args() {
        let request =
            birth_from_args(&args(&["2000-01-01", "12:00", "51.5", "-0.12", "whole_sign"])).unwrap();
        assert_eq!(request.time, "12:00");
        assert_eq!(request.latitude, 51.5);
        assert_eq!(request.longitude, -0.12);
        assert_eq!(request.house_system.as_deref(), Some("whole_sign"));

        let request = birth_from_args(&args(&["2000-01-01", "12:00", "51.5", "-0.12"])).unwrap();
        assert!(request.house_system.is_none());
    }

    #[test]
    fn test_birth_from_args_rejects_bad_input() {
        assert!(birth_from_args(&args(&["2000-01-01"])).is_err());
        assert!(birth_from_args(&args(&["2000-01-01", "12:00", "north", "0"])).is_err());
        assert!(
            birth_from_args(&args(&["2000-01-01", "12:00", "1", "2", "placidus", "extra"])).is_err()
        );
    }
}
