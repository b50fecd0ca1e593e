//! Core data types and enums for recorded trips and replay output.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use geo::Point;

use crate::identifiers::*;

// ============================================================================
// Enums
// ============================================================================

/// Access model of the route a trip ran on
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum RouteKind {
    OpenAccess,
    Private,
    Special,
}

impl RouteKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAccess => "open-access",
            Self::Private => "private",
            Self::Special => "special",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "open-access" => Some(Self::OpenAccess),
            "private" => Some(Self::Private),
            "special" => Some(Self::Special),
            _ => None,
        }
    }
}

impl fmt::Display for RouteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which kind of playback a query or payload belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum QueryMode {
    /// Specific trips, re-timed into the requested window
    ByService,
    /// Vehicles active during the requested window
    ByRange,
}

impl fmt::Display for QueryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ByService => f.write_str("by-service"),
            Self::ByRange => f.write_str("by-range"),
        }
    }
}

// ============================================================================
// Recorded series
// ============================================================================

/// A single GPS fix on a recorded trajectory
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TrajectoryPoint {
    pub lat: f64,
    pub lng: f64,
    #[cfg_attr(feature = "serde", serde(rename = "speedKmH"))]
    pub speed_kmh: f64,
    /// Degrees in [0, 360), bearing to the next point
    pub course: f64,
    #[cfg_attr(feature = "serde", serde(rename = "timestampUtc"))]
    pub timestamp: DateTime<Utc>,
}

impl TrajectoryPoint {
    pub fn location(&self) -> Point {
        Point::new(self.lng, self.lat)
    }

    /// Same fix, moved in time
    pub fn shifted(&self, offset: TimeDelta) -> Self {
        Self {
            timestamp: self.timestamp + offset,
            ..self.clone()
        }
    }
}

/// Static reference point along a route
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StopDefinition {
    pub id: StopIdentifier,
    pub code: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

impl StopDefinition {
    pub fn location(&self) -> Point {
        Point::new(self.lng, self.lat)
    }
}

/// A stop definition annotated with whether the replayed trajectory reached it
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct StopVisit {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub stop: StopDefinition,
    pub visited: bool,
    #[cfg_attr(feature = "serde", serde(rename = "arrivalUtc"))]
    pub arrival: Option<DateTime<Utc>>,
}

impl StopVisit {
    pub fn unvisited(stop: StopDefinition) -> Self {
        Self {
            stop,
            visited: false,
            arrival: None,
        }
    }
}

/// A passenger identity scan recorded near the trajectory
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ScanEvent {
    pub subject_id: SubjectIdentifier,
    pub lat: f64,
    pub lng: f64,
    #[cfg_attr(feature = "serde", serde(rename = "timestampUtc"))]
    pub timestamp: DateTime<Utc>,
}

impl ScanEvent {
    pub fn shifted(&self, offset: TimeDelta) -> Self {
        Self {
            timestamp: self.timestamp + offset,
            ..self.clone()
        }
    }
}

/// Aggregate of a contiguous run of scan events
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScanCluster {
    pub lat: f64,
    pub lng: f64,
    pub count: usize,
}

// ============================================================================
// Trip records
// ============================================================================

/// One completed vehicle run, as supplied by ingestion.
///
/// Records are never mutated once they enter a catalogue.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TripRecord {
    pub id: TripIdentifier,
    pub vehicle_id: VehicleIdentifier,
    pub plate: String,
    pub driver_code: String,
    pub driver_name: String,
    pub route_name: String,
    pub route_kind: RouteKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub client_company: Option<String>,
    pub transport_company: String,
    #[cfg_attr(feature = "serde", serde(rename = "nominalStartUtc"))]
    pub nominal_start: DateTime<Utc>,
    #[cfg_attr(feature = "serde", serde(rename = "nominalEndUtc"))]
    pub nominal_end: DateTime<Utc>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub trajectory: Vec<TrajectoryPoint>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stops: Vec<StopDefinition>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub scans: Vec<ScanEvent>,
}

impl TripRecord {
    pub fn duration(&self) -> TimeDelta {
        self.nominal_end - self.nominal_start
    }

    /// True when `handle` names this trip's vehicle by id or plate
    pub fn is_vehicle(&self, handle: &str) -> bool {
        self.vehicle_id.as_str() == handle || self.plate == handle
    }

    /// Check the record invariants ingestion is expected to uphold
    pub fn validate(&self) -> Result<()> {
        if self.nominal_end <= self.nominal_start {
            return Err(ReplayError::InvalidData(format!(
                "trip {}: nominal end {} is not after start {}",
                self.id, self.nominal_end, self.nominal_start
            )));
        }

        if let Some(i) = self
            .trajectory
            .windows(2)
            .position(|pair| pair[1].timestamp < pair[0].timestamp)
        {
            return Err(ReplayError::InvalidData(format!(
                "trip {}: trajectory point {} is earlier than its predecessor",
                self.id,
                i + 1
            )));
        }

        let mut seen = HashSet::with_capacity(self.stops.len());
        for stop in &self.stops {
            if !seen.insert(&stop.id) {
                return Err(ReplayError::InvalidData(format!(
                    "trip {}: duplicate stop id {}",
                    self.id, stop.id
                )));
            }
        }

        Ok(())
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("Invalid window: end {end} is not after start {start}")]
    InvalidWindow {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("Window too wide: {requested} exceeds the maximum of {maximum}")]
    WindowTooWide {
        requested: TimeDelta,
        maximum: TimeDelta,
    },

    #[error("Query mode mismatch: expected {expected}, got {actual}")]
    ModeMismatch {
        expected: QueryMode,
        actual: QueryMode,
    },

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, ReplayError>;
