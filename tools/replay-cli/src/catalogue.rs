use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use fleet_replay::prelude::*;
use serde::Deserialize;

/// Accepted catalogue layouts
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogueFile {
    Trips(Vec<TripRecord>),
    #[serde(rename_all = "camelCase")]
    Bundle {
        trips: Vec<TripRecord>,
        #[serde(default)]
        reference_stops: Option<Vec<StopDefinition>>,
    },
}

/// Read and validate a trip catalogue snapshot
pub fn load_catalogue(path: &Path) -> Result<StaticTripCatalogue> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open catalogue {}", path.display()))?;
    read_catalogue(BufReader::new(file))
        .with_context(|| format!("Failed to load catalogue {}", path.display()))
}

fn read_catalogue<R: Read>(reader: R) -> Result<StaticTripCatalogue> {
    let parsed: CatalogueFile = serde_json::from_reader(reader).context("Malformed catalogue JSON")?;

    let (trips, reference_stops) = match parsed {
        CatalogueFile::Trips(trips) => (trips, None),
        CatalogueFile::Bundle {
            trips,
            reference_stops,
        } => (trips, reference_stops),
    };

    let catalogue = StaticTripCatalogue::from_trips(trips).context("Invalid catalogue")?;
    Ok(match reference_stops {
        Some(stops) => {
            tracing::debug!("using {} reference stops", stops.len());
            catalogue.with_reference_stops(stops)
        }
        None => catalogue,
    })
}
