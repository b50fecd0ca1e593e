//! Engine tuning knobs.

use chrono::TimeDelta;

use crate::models::types::{ReplayError, Result};

/// Largest accepted per-axis scan jitter, in degrees
pub const MAX_SCAN_JITTER_DEG: f64 = 1.0;

/// Limits and tolerances applied by queries and replay builds.
///
/// Every field has a default, so a partial JSON document (with the `serde`
/// feature) only needs to name the knobs it changes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct EngineConfig {
    /// Maximum rows returned by a by-service query
    pub page_cap: usize,
    /// Trajectory point budget for the decimator
    pub point_budget: usize,
    /// Target number of scan clusters
    pub cluster_count: usize,
    /// Upper bound on synthesized scans in range replays
    pub max_synthetic_scans: usize,
    /// Per-axis stop matching tolerance in degrees.
    ///
    /// Not a calibrated distance: 0.001° is roughly 100 m of latitude, and
    /// less of longitude away from the equator.
    pub stop_tolerance_deg: f64,
    /// Per-axis jitter applied to synthesized scan positions, in degrees
    pub scan_jitter_deg: f64,
    /// Longest window a by-range request may ask for, in seconds
    pub max_range_window_secs: i64,
}

impl EngineConfig {
    /// Saturates at `TimeDelta::MAX` for values chrono cannot represent
    pub fn max_range_window(&self) -> TimeDelta {
        TimeDelta::try_seconds(self.max_range_window_secs).unwrap_or(TimeDelta::MAX)
    }

    /// Reject tolerances and limits the replay builders cannot work with
    pub fn validate(&self) -> Result<()> {
        if !self.stop_tolerance_deg.is_finite() || self.stop_tolerance_deg < 0.0 {
            return Err(ReplayError::InvalidConfig(format!(
                "stopToleranceDeg must be a finite, non-negative number, got {}",
                self.stop_tolerance_deg
            )));
        }
        if !(0.0..=MAX_SCAN_JITTER_DEG).contains(&self.scan_jitter_deg) {
            return Err(ReplayError::InvalidConfig(format!(
                "scanJitterDeg must be between 0 and {}, got {}",
                MAX_SCAN_JITTER_DEG, self.scan_jitter_deg
            )));
        }
        if self.max_range_window_secs <= 0 {
            return Err(ReplayError::InvalidConfig(format!(
                "maxRangeWindowSecs must be positive, got {}",
                self.max_range_window_secs
            )));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            page_cap: 20,
            point_budget: 300,
            cluster_count: 6,
            max_synthetic_scans: 40,
            stop_tolerance_deg: 0.001,
            scan_jitter_deg: 0.0002,
            max_range_window_secs: 24 * 60 * 60,
        }
    }
}
