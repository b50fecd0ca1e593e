use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use fleet_replay::EngineConfig;

/// Command-line overrides applied on top of the loaded configuration
#[derive(Args, Debug, Default)]
pub struct ConfigOverrides {
    /// Maximum rows returned by `services`
    #[arg(long, global = true)]
    page_cap: Option<usize>,

    /// Trajectory point budget
    #[arg(long, global = true)]
    point_budget: Option<usize>,

    /// Number of scan clusters
    #[arg(long = "clusters", global = true)]
    cluster_count: Option<usize>,
}

impl ConfigOverrides {
    pub fn apply(&self, config: &mut EngineConfig) {
        if let Some(page_cap) = self.page_cap {
            config.page_cap = page_cap;
        }
        if let Some(point_budget) = self.point_budget {
            config.point_budget = point_budget;
        }
        if let Some(cluster_count) = self.cluster_count {
            config.cluster_count = cluster_count;
        }
    }
}

pub fn load_config(path: &Path) -> Result<EngineConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse config {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{ "pageCap": 5 }"#).unwrap();
        assert_eq!(config.page_cap, 5);
        assert_eq!(config.point_budget, EngineConfig::default().point_budget);
    }

    #[test]
    fn test_out_of_range_values_fail_validation() {
        let config: EngineConfig =
            serde_json::from_str(r#"{ "scanJitterDeg": 1e308, "maxRangeWindowSecs": 9223372036854775807 }"#)
                .unwrap();
        assert_eq!(config.max_range_window(), chrono::TimeDelta::MAX);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides() {
        let mut config = EngineConfig::default();
        let overrides = ConfigOverrides {
            point_budget: Some(50),
            ..ConfigOverrides::default()
        };
        overrides.apply(&mut config);
        assert_eq!(config.point_budget, 50);
        assert_eq!(config.cluster_count, 6);
    }
}
