//! Fixture builders shared by unit tests.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};

use crate::identifiers::*;
use crate::models::types::*;

pub const ORIGIN_LAT: f64 = 19.40;
pub const ORIGIN_LNG: f64 = -99.13;
/// Northward spacing between generated trajectory points (~55 m)
pub const POINT_SPACING_DEG: f64 = 0.0005;

/// 2024-01-01 at the given UTC wall-clock time
pub fn at(hour: u32, minute: u32, second: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, hour, minute, second).unwrap()
}

pub fn point_at(lat: f64, lng: f64, timestamp: DateTime<Utc>) -> TrajectoryPoint {
    TrajectoryPoint {
        lat,
        lng,
        speed_kmh: 30.0,
        course: 0.0,
        timestamp,
    }
}

pub fn stop(id: &str, lat: f64, lng: f64) -> StopDefinition {
    StopDefinition {
        id: StopIdentifier::new(id),
        code: id.to_uppercase(),
        name: format!("Stop {}", id),
        lat,
        lng,
    }
}

pub fn scan(subject: &str, lat: f64, lng: f64, timestamp: DateTime<Utc>) -> ScanEvent {
    ScanEvent {
        subject_id: SubjectIdentifier::new(subject),
        lat,
        lng,
        timestamp,
    }
}

/// Builds trips driving due north from a fixed origin at a constant pace
pub struct TripBuilder {
    trip: TripRecord,
    points: usize,
    scans: usize,
}

impl TripBuilder {
    pub fn new(id: &str, vehicle: &str) -> Self {
        Self {
            trip: TripRecord {
                id: TripIdentifier::new(id),
                vehicle_id: VehicleIdentifier::new(vehicle),
                plate: format!("PL-{}", vehicle),
                driver_code: format!("DRV-{}", id),
                driver_name: "Test Driver".into(),
                route_name: "Ruta Centro".into(),
                route_kind: RouteKind::OpenAccess,
                client_company: None,
                transport_company: "Transportes Norte".into(),
                nominal_start: at(10, 0, 0),
                nominal_end: at(11, 0, 0),
                trajectory: Vec::new(),
                stops: Vec::new(),
                scans: Vec::new(),
            },
            points: 0,
            scans: 0,
        }
    }

    pub fn plate(mut self, plate: &str) -> Self {
        self.trip.plate = plate.into();
        self
    }

    pub fn window(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.trip.nominal_start = start;
        self.trip.nominal_end = end;
        self
    }

    pub fn starting(mut self, start: DateTime<Utc>, minutes: i64) -> Self {
        self.trip.nominal_start = start;
        self.trip.nominal_end = start + TimeDelta::minutes(minutes);
        self
    }

    pub fn transport(mut self, company: &str) -> Self {
        self.trip.transport_company = company.into();
        self
    }

    pub fn client(mut self, company: &str) -> Self {
        self.trip.client_company = Some(company.into());
        self
    }

    pub fn route_kind(mut self, kind: RouteKind) -> Self {
        self.trip.route_kind = kind;
        self
    }

    pub fn points(mut self, n: usize) -> Self {
        self.points = n;
        self
    }

    pub fn scans(mut self, n: usize) -> Self {
        self.scans = n;
        self
    }

    pub fn stops(mut self, stops: Vec<StopDefinition>) -> Self {
        self.trip.stops = stops;
        self
    }

    pub fn build(mut self) -> TripRecord {
        let start = self.trip.nominal_start;
        let span_ms = self.trip.duration().num_milliseconds();
        let n = self.points;

        self.trip.trajectory = (0..n)
            .map(|i| {
                let offset_ms = if n > 1 {
                    span_ms * i as i64 / (n as i64 - 1)
                } else {
                    0
                };
                point_at(
                    ORIGIN_LAT + i as f64 * POINT_SPACING_DEG,
                    ORIGIN_LNG,
                    start + TimeDelta::milliseconds(offset_ms),
                )
            })
            .collect();

        if n > 0 {
            self.trip.scans = (0..self.scans)
                .map(|i| {
                    let anchor = &self.trip.trajectory[i % n];
                    scan(&format!("subject-{}", i), anchor.lat, anchor.lng, anchor.timestamp)
                })
                .collect();
        }

        self.trip
    }
}
