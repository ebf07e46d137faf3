use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use shelterscope::config::FileConfig;
use shelterscope::domain::{
    Alert, AlertFeed, Amenity, Shelter, ShelterStatus, alerts_for_shelter, warning_summary,
};
use shelterscope::filter::{AlertFilter, ShelterFilter};
use shelterscope::geometry::{Coordinate, Polygon, distance_km, format_distance_km};
use shelterscope::logging::init_cli_logger;

/// Find nearby disaster-relief shelters and hazard alerts
///
/// Examples:
///   # Distance between two points (lat,lon)
///   shelterscope distance 35.6762,139.6503 34.6937,135.5023
///
///   # Open shelters with Wi-Fi within 10 km, nearest first
///   shelterscope shelters shelters.json --near 36.3659,140.4714 --max-km 10 --status open --amenity wifi
///
///   # Alerts within 30 km of a location
///   shelterscope alerts warning.json --near 36.3659,140.4714
#[derive(Parser, Debug)]
#[command(name = "shelterscope")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches shelterscope.toml if not provided)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Great-circle distance in km between two "lat,lon" points
    Distance {
        #[arg(allow_hyphen_values = true)]
        from: Coordinate,
        #[arg(allow_hyphen_values = true)]
        to: Coordinate,
    },

    /// Area centroid of a polygon given as a JSON array of [lat, lon] pairs
    Centroid { file: PathBuf },

    /// List shelters from a JSON file, filtered and ranked by distance
    Shelters {
        file: PathBuf,

        /// Measure distances from this "lat,lon" point
        #[arg(long, allow_hyphen_values = true)]
        near: Option<Coordinate>,

        /// Maximum distance in km (0 = no limit)
        #[arg(long)]
        max_km: Option<f64>,

        #[arg(long)]
        status: Option<ShelterStatus>,

        /// Case-insensitive text to look for in name or address
        #[arg(long)]
        search: Option<String>,

        /// Required amenity (repeatable)
        #[arg(long = "amenity")]
        amenities: Vec<Amenity>,

        /// Alert feed JSON used to annotate shelters with active warnings
        #[arg(long)]
        alerts: Option<PathBuf>,
    },

    /// List alerts from an alert feed JSON file that are near a point
    Alerts {
        file: PathBuf,

        #[arg(long, allow_hyphen_values = true)]
        near: Option<Coordinate>,

        /// Radius in km (defaults to 30)
        #[arg(long)]
        max_km: Option<f64>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_cli_logger(args.verbose);

    let file_config = match args.config {
        Some(ref path) => FileConfig::from_path(path)?,
        None => FileConfig::load().unwrap_or_default(),
    };
    debug!(?file_config, "Resolved configuration");

    match args.command {
        Command::Distance { from, to } => {
            let km = distance_km(from, to)?;
            println!("{} -> {}: {}", from, to, format_distance_km(km));
        }
        Command::Centroid { file } => {
            let pairs: Vec<[f64; 2]> = read_json(&file)?;
            let polygon = Polygon::from_pairs(&pairs);
            let centroid = polygon
                .centroid()
                .with_context(|| format!("Cannot compute centroid of {:?}", file))?;
            println!("Centroid of {} points: {}", pairs.len(), centroid);
            println!("  lat: {:.6}", centroid.lat);
            println!("  lon: {:.6}", centroid.lon);
        }
        Command::Shelters {
            file,
            near,
            max_km,
            status,
            search,
            amenities,
            alerts,
        } => {
            let shelters: Vec<Shelter> = read_json(&file)?;
            let alerts = match alerts {
                Some(path) => read_alerts(&path)?,
                None => Vec::new(),
            };
            let filter = ShelterFilter {
                search,
                status,
                amenities,
                origin: resolve_origin(near, &file_config)?,
                max_distance_km: max_km.or(Some(file_config.shelter_radius_km)),
            };
            list_shelters(&filter, &shelters, &alerts)?;
        }
        Command::Alerts { file, near, max_km } => {
            let alerts = read_alerts(&file)?;
            let Some(origin) = resolve_origin(near, &file_config)? else {
                bail!("Must provide --near or set origin_lat/origin_lon in the config file");
            };
            let filter =
                AlertFilter::new(origin).with_radius(max_km.unwrap_or(file_config.alert_radius_km));
            list_alerts(&filter, &alerts)?;
        }
    }

    Ok(())
}

fn resolve_origin(near: Option<Coordinate>, config: &FileConfig) -> Result<Option<Coordinate>> {
    match near {
        Some(c) => Ok(Some(c)),
        None => config.origin(),
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    serde_json::from_str(&contents).with_context(|| format!("Failed to parse JSON in {:?}", path))
}

fn read_alerts(path: &Path) -> Result<Vec<Alert>> {
    let feed: AlertFeed = read_json(path)?;
    Ok(feed.into_alerts())
}

fn list_shelters(filter: &ShelterFilter, shelters: &[Shelter], alerts: &[Alert]) -> Result<()> {
    let outcome = filter
        .apply(shelters)
        .context("Failed to filter shelters")?;
    info!(
        total = shelters.len(),
        matched = outcome.matches.len(),
        rejected = outcome.rejected.len(),
        "Filtered shelters"
    );

    println!("{} shelter(s)", outcome.matches.len());
    for ranked in &outcome.matches {
        let s = ranked.shelter;
        let distance = ranked
            .distance_km
            .map(format_distance_km)
            .unwrap_or_else(|| "unknown".to_string());
        let state = match s.status {
            ShelterStatus::Open => "open",
            ShelterStatus::Closed => "closed",
        };
        let full = if s.is_full() { " FULL" } else { "" };

        println!();
        println!("  [{}] {}", s.id, s.name);
        println!("    Address:   {}", s.address);
        println!("    Distance:  {}", distance);
        println!(
            "    Occupancy: {}/{} ({} free){}",
            s.current_occupancy,
            s.capacity,
            s.available_spaces(),
            full
        );
        println!("    Status:    {}", state);

        let matched = alerts_for_shelter(s, alerts);
        if let Some(summary) = warning_summary(&matched) {
            println!("    Warnings:  {}", summary);
        }
    }

    if !outcome.rejected.is_empty() {
        println!();
        println!("Skipped {} shelter(s) with unusable locations:", outcome.rejected.len());
        for r in &outcome.rejected {
            println!("  [{}] {}: {}", r.record.id, r.record.name, r.error);
        }
    }

    Ok(())
}

fn list_alerts(filter: &AlertFilter, alerts: &[Alert]) -> Result<()> {
    let outcome = filter.apply(alerts).context("Failed to filter alerts")?;
    info!(
        total = alerts.len(),
        matched = outcome.matches.len(),
        rejected = outcome.rejected.len(),
        "Filtered alerts"
    );

    println!(
        "{} alert(s) within {} of {}",
        outcome.matches.len(),
        format_distance_km(filter.max_distance_km),
        filter.origin
    );
    for nearby in &outcome.matches {
        let a = nearby.alert;
        print!("  {}: {}", a.area, a.warning_type);
        match (nearby.marker, nearby.distance_km) {
            (Some(marker), Some(km)) => println!(" at {} ({})", marker, format_distance_km(km)),
            (Some(marker), None) => println!(" at {}", marker),
            _ => println!(),
        }
    }

    if !outcome.rejected.is_empty() {
        println!();
        println!("Skipped {} alert(s) with unusable geometry:", outcome.rejected.len());
        for r in &outcome.rejected {
            println!("  {}: {}", r.record.area, r.error);
        }
    }

    Ok(())
}
