//! Re-temporization: moving a recorded trip into a caller's window.
//!
//! Only a constant offset is ever applied, so the internal ordering and
//! spacing of every timestamp in the trip survive exactly.

use chrono::{DateTime, TimeDelta, Utc};

use crate::models::{TimeWindow, TripRecord};

/// Where a trip lands inside a playback window
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Retiming {
    /// Constant shift applied to every timestamp of the trip
    pub offset: TimeDelta,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Retiming {
    /// Fit a nominal `[start, end]` interval into `window`.
    ///
    /// The trip starts at the window start when it fits. Otherwise it is
    /// right-aligned to the window end, clamped so it never starts before
    /// the window does. The end is cut at the window end.
    pub fn fit(
        nominal_start: DateTime<Utc>,
        nominal_end: DateTime<Utc>,
        window: &TimeWindow,
    ) -> Self {
        let duration = nominal_end - nominal_start;
        let (ws, we) = (window.start(), window.end());

        let start = if ws + duration <= we {
            ws
        } else {
            ws.max(we - duration)
        };
        let end = we.min(start + duration);

        Self {
            offset: start - nominal_start,
            start,
            end,
        }
    }

    pub fn for_trip(trip: &TripRecord, window: &TimeWindow) -> Self {
        Self::fit(trip.nominal_start, trip.nominal_end, window)
    }

    pub fn shift(&self, timestamp: DateTime<Utc>) -> DateTime<Utc> {
        timestamp + self.offset
    }

    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }
}
