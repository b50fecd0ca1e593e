use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args as ClapArgs, Parser, Subcommand};
use fleet_replay::prelude::*;
use serde::Serialize;

mod catalogue;
mod config;

use catalogue::load_catalogue;
use config::{load_config, ConfigOverrides};

#[derive(Parser, Debug)]
#[command(
    name = "fleet-replay",
    author,
    version,
    about = "Query recorded fleet trips and build replay payloads",
    long_about = "Loads a JSON trip catalogue and answers previous-route playback queries.\n\n\
                  `services` and `vehicles` list what can be replayed; `replay-service` and \
                  `replay-vehicle` emit the render-ready payload (decimated trajectory, stop \
                  visits and scan clusters) as JSON on stdout."
)]
struct Args {
    /// Trip catalogue (JSON array of trips, or an object with `trips` and `referenceStops`)
    #[arg(short = 'i', long)]
    catalogue: PathBuf,

    /// Engine configuration JSON; missing fields keep their defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    overrides: ConfigOverrides,

    /// Verbose output (show debug messages)
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List trips re-timed into a playback window
    Services {
        #[command(flatten)]
        window: WindowArgs,
        #[command(flatten)]
        filters: FilterArgs,
        /// Exact service (trip) id
        #[arg(long)]
        service: Option<String>,
    },
    /// List vehicles active during a window
    Vehicles {
        #[command(flatten)]
        window: WindowArgs,
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Run a query described by a JSON filter document
    Query {
        /// QueryFilter JSON (`mode`, `windowStartUtc`, `windowEndUtc`, ...)
        #[arg(short, long)]
        filter: PathBuf,
    },
    /// List catalogue stops within a per-axis degree tolerance of a position
    StopsNear {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
        /// Tolerance in degrees; defaults to the configured stop tolerance
        #[arg(long)]
        tolerance: Option<f64>,
    },
    /// Build the replay payload for one trip
    ReplayService {
        /// Service (trip) id
        #[arg(long)]
        id: String,
        #[command(flatten)]
        window: WindowArgs,
    },
    /// Build the replay payload for a vehicle over a window
    ReplayVehicle {
        /// Vehicle id or plate
        #[arg(long)]
        vehicle: String,
        #[command(flatten)]
        window: WindowArgs,
    },
}

#[derive(ClapArgs, Debug)]
struct WindowArgs {
    /// Window start (RFC 3339)
    #[arg(long, value_parser = parse_utc)]
    from: DateTime<Utc>,

    /// Window end (RFC 3339)
    #[arg(long, value_parser = parse_utc)]
    to: DateTime<Utc>,
}

#[derive(ClapArgs, Debug)]
struct FilterArgs {
    /// Vehicle id or plate (repeatable)
    #[arg(long = "vehicle")]
    vehicles: Vec<String>,

    /// Transport company (repeatable)
    #[arg(long = "transport")]
    transport_companies: Vec<String>,

    /// Client company (repeatable)
    #[arg(long = "client")]
    client_companies: Vec<String>,

    /// Route kind: open-access, private or special (repeatable)
    #[arg(long = "route-kind", value_parser = parse_route_kind)]
    route_kinds: Vec<RouteKind>,
}

impl FilterArgs {
    fn apply(self, mut filter: QueryFilter) -> QueryFilter {
        if !self.vehicles.is_empty() {
            filter = filter.with_vehicles(self.vehicles);
        }
        if !self.transport_companies.is_empty() {
            filter = filter.with_transport_companies(self.transport_companies);
        }
        if !self.client_companies.is_empty() {
            filter = filter.with_client_companies(self.client_companies);
        }
        if !self.route_kinds.is_empty() {
            filter = filter.with_route_kinds(self.route_kinds);
        }
        filter
    }
}

fn parse_utc(value: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("expected an RFC 3339 timestamp: {}", e))
}

fn parse_route_kind(value: &str) -> Result<RouteKind, String> {
    RouteKind::parse(value)
        .ok_or_else(|| format!("unknown route kind '{}' (open-access, private, special)", value))
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => EngineConfig::default(),
    };
    args.overrides.apply(&mut config);
    config.validate().context("Invalid engine configuration")?;
    tracing::debug!(?config, "engine configuration");

    let catalogue = load_catalogue(&args.catalogue)?;
    tracing::info!(
        trips = catalogue.len(),
        path = %args.catalogue.display(),
        "loaded catalogue"
    );

    match args.command {
        Command::Services {
            window,
            filters,
            service,
        } => {
            let mut filter = filters.apply(QueryFilter::by_service(window.from, window.to));
            if let Some(id) = service {
                filter = filter.with_service_id(id);
            }
            let rows = query_services(&catalogue, &filter, &config)?;
            tracing::info!("{} services", rows.len());
            print_json(&rows)
        }
        Command::Vehicles { window, filters } => {
            let filter = filters.apply(QueryFilter::by_range(window.from, window.to));
            let rows = query_vehicles(&catalogue, &filter, &config)?;
            tracing::info!("{} vehicles", rows.len());
            print_json(&rows)
        }
        Command::Query { filter } => {
            let text = std::fs::read_to_string(&filter)
                .with_context(|| format!("Failed to read filter {}", filter.display()))?;
            let filter: QueryFilter =
                serde_json::from_str(&text).context("Failed to parse filter JSON")?;
            match filter.mode {
                QueryMode::ByService => print_json(&query_services(&catalogue, &filter, &config)?),
                QueryMode::ByRange => print_json(&query_vehicles(&catalogue, &filter, &config)?),
            }
        }
        Command::StopsNear {
            lat,
            lng,
            tolerance,
        } => {
            let tolerance = tolerance.unwrap_or(config.stop_tolerance_deg);
            if !tolerance.is_finite() || tolerance < 0.0 {
                bail!("--tolerance must be a finite, non-negative number of degrees");
            }
            let stops = catalogue.stops_near(lat, lng, tolerance);
            tracing::info!("{} stops within {}°", stops.len(), tolerance);
            print_json(&stops)
        }
        Command::ReplayService { id, window } => {
            let window = TimeWindow::new(window.from, window.to)?;
            let payload =
                build_service_replay(&catalogue, &TripIdentifier::new(id), &window, &config)?;
            report_payload(&payload);
            print_json(&payload)
        }
        Command::ReplayVehicle { vehicle, window } => {
            if vehicle.trim().is_empty() {
                bail!("--vehicle must not be empty");
            }
            let window = TimeWindow::new(window.from, window.to)?;
            let payload = build_range_replay(&catalogue, &vehicle, &window, &config)?;
            report_payload(&payload);
            print_json(&payload)
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing::Level;
    use tracing_subscriber::{filter::FilterFn, layer::SubscriberExt, util::SubscriberInitExt};

    let max_level = if verbose { Level::DEBUG } else { Level::INFO };
    let filter = FilterFn::new(move |meta| {
        meta.module_path().unwrap_or_default().starts_with("fleet_replay")
            && *meta.level() <= max_level
    });
    let layer = tracing_subscriber::fmt::layer()
        .without_time()
        .with_writer(std::io::stderr);

    tracing_subscriber::registry().with(layer).with(filter).init();
}

fn report_payload(payload: &ReplayPayload) {
    if payload.is_empty() {
        tracing::warn!("no recorded trajectory for this request");
        return;
    }
    tracing::info!(
        points = payload.trajectory.len(),
        stops = payload.stops.len(),
        visited = payload.stops.iter().filter(|s| s.visited).count(),
        clusters = payload.scan_clusters.len(),
        "replay ready"
    );
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}
