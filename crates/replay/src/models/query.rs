//! Query inputs: time windows and filters.

use std::collections::HashSet;

use chrono::{DateTime, TimeDelta, Utc};

use crate::identifiers::TripIdentifier;
use crate::models::types::*;

/// A closed UTC interval requested by the caller
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimeWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeWindow {
    /// Returns `InvalidWindow` unless `end > start`
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if end <= start {
            return Err(ReplayError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    /// Inclusive interval overlap with `[start, end]`
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        end >= self.start && start <= self.end
    }

    /// Fails with `WindowTooWide` if longer than `maximum`
    pub fn ensure_within(&self, maximum: TimeDelta) -> Result<()> {
        let requested = self.duration();
        if requested > maximum {
            return Err(ReplayError::WindowTooWide { requested, maximum });
        }
        Ok(())
    }
}

/// Caller-supplied query: mode, window and optional narrowing predicates.
///
/// Absent or empty sets impose no constraint.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct QueryFilter {
    pub mode: QueryMode,
    #[cfg_attr(feature = "serde", serde(rename = "windowStartUtc"))]
    pub window_start: DateTime<Utc>,
    #[cfg_attr(feature = "serde", serde(rename = "windowEndUtc"))]
    pub window_end: DateTime<Utc>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub exact_service_id: Option<TripIdentifier>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub vehicle_ids: Option<HashSet<String>>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub transport_companies: Option<HashSet<String>>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub client_companies: Option<HashSet<String>>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub route_kinds: Option<HashSet<RouteKind>>,
}

impl QueryFilter {
    pub fn new(mode: QueryMode, window_start: DateTime<Utc>, window_end: DateTime<Utc>) -> Self {
        Self {
            mode,
            window_start,
            window_end,
            exact_service_id: None,
            vehicle_ids: None,
            transport_companies: None,
            client_companies: None,
            route_kinds: None,
        }
    }

    pub fn by_service(window_start: DateTime<Utc>, window_end: DateTime<Utc>) -> Self {
        Self::new(QueryMode::ByService, window_start, window_end)
    }

    pub fn by_range(window_start: DateTime<Utc>, window_end: DateTime<Utc>) -> Self {
        Self::new(QueryMode::ByRange, window_start, window_end)
    }

    pub fn with_service_id(mut self, id: impl Into<TripIdentifier>) -> Self {
        self.exact_service_id = Some(id.into());
        self
    }

    pub fn with_vehicles<I, S>(mut self, handles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.vehicle_ids = Some(handles.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_transport_companies<I, S>(mut self, companies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.transport_companies = Some(companies.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_client_companies<I, S>(mut self, companies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.client_companies = Some(companies.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_route_kinds(mut self, kinds: impl IntoIterator<Item = RouteKind>) -> Self {
        self.route_kinds = Some(kinds.into_iter().collect());
        self
    }

    /// Validated window of this filter
    pub fn window(&self) -> Result<TimeWindow> {
        TimeWindow::new(self.window_start, self.window_end)
    }

    pub(crate) fn expect_mode(&self, expected: QueryMode) -> Result<()> {
        if self.mode != expected {
            return Err(ReplayError::ModeMismatch {
                expected,
                actual: self.mode,
            });
        }
        Ok(())
    }
}
