//! Dashboard configuration
//!
//! Everything tunable lives in one JSON-loadable tree. Missing fields take
//! their defaults, so an empty `{}` file is a valid configuration.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{DashError, DashResult, DataMode, ExpiryTenor};
use crate::data::{SnapshotConfig, DEFAULT_UNDERLYING};
use crate::detect::DislocationConfig;
use crate::surface::{HighlightMode, SurfaceParams, SurfaceStyle, MAX_GRID_DIVISIONS};

/// Toast timings, all in milliseconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Toasts visible at once; older ones are dismissed
    pub max_visible: usize,
    pub welcome_ms: u64,
    /// Show the sample anomaly alert after startup
    pub startup_alert: bool,
    pub alert_delay_ms: u64,
    pub alert_ms: u64,
    pub mode_switch_ms: u64,
    pub selection_ms: u64,
    pub error_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            max_visible: 3,
            welcome_ms: 5_000,
            startup_alert: true,
            alert_delay_ms: 10_000,
            alert_ms: 8_000,
            mode_switch_ms: 3_000,
            selection_ms: 3_000,
            error_ms: 5_000,
        }
    }
}

impl NotificationConfig {
    pub fn welcome(&self) -> Duration {
        Duration::from_millis(self.welcome_ms)
    }

    pub fn alert_delay(&self) -> Duration {
        Duration::from_millis(self.alert_delay_ms)
    }

    pub fn alert(&self) -> Duration {
        Duration::from_millis(self.alert_ms)
    }

    pub fn mode_switch(&self) -> Duration {
        Duration::from_millis(self.mode_switch_ms)
    }

    pub fn selection(&self) -> Duration {
        Duration::from_millis(self.selection_ms)
    }

    pub fn error(&self) -> Duration {
        Duration::from_millis(self.error_ms)
    }
}

/// Top-level dashboard configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub surface: SurfaceParams,
    pub style: SurfaceStyle,
    pub detection: DislocationConfig,
    pub highlight: HighlightMode,
    pub notifications: NotificationConfig,
    pub snapshots: SnapshotConfig,
    pub default_mode: DataMode,
    pub default_underlying: String,
    pub default_tenor: ExpiryTenor,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            surface: SurfaceParams::default(),
            style: SurfaceStyle::default(),
            detection: DislocationConfig::default(),
            highlight: HighlightMode::default(),
            notifications: NotificationConfig::default(),
            snapshots: SnapshotConfig::default(),
            default_mode: DataMode::default(),
            default_underlying: DEFAULT_UNDERLYING.to_string(),
            default_tenor: ExpiryTenor::default(),
        }
    }
}

impl DashboardConfig {
    /// Lower detector threshold, highlights smaller dislocations
    pub fn sensitive() -> Self {
        Self {
            detection: DislocationConfig::sensitive(),
            highlight: HighlightMode::Detector,
            ..Default::default()
        }
    }

    /// No highlights, no startup alert, one toast at a time
    pub fn quiet() -> Self {
        Self {
            detection: DislocationConfig::strict(),
            highlight: HighlightMode::Off,
            notifications: NotificationConfig {
                max_visible: 1,
                startup_alert: false,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn from_json(json: &str) -> DashResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> DashResult<Self> {
        let json = fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn validate(&self) -> DashResult<()> {
        self.surface.validate()?;
        self.detection.validate()?;

        let style = &self.style;
        if !(style.margin >= 0.0 && style.margin.is_finite()) {
            return Err(DashError::invalid_input("surface margin must be non-negative"));
        }
        if !(style.vol_ceiling > 0.0 && style.vol_ceiling.is_finite()) {
            return Err(DashError::invalid_input("vol ceiling must be positive"));
        }
        if style.grid_divisions == 0 {
            return Err(DashError::invalid_input("grid needs at least one division"));
        }
        if style.grid_divisions > MAX_GRID_DIVISIONS {
            return Err(DashError::invalid_input(format!(
                "grid divisions must be at most {}, got {}",
                MAX_GRID_DIVISIONS, style.grid_divisions
            )));
        }
        if self.notifications.max_visible == 0 {
            return Err(DashError::invalid_input("at least one toast must be visible"));
        }
        if self.default_underlying.trim().is_empty() {
            return Err(DashError::invalid_input("default underlying is empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_json_is_default() {
        let config = DashboardConfig::from_json("{}").unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.default_underlying, "SPY");
        assert_eq!(config.notifications.alert_delay(), Duration::from_secs(10));
    }

    #[test]
    fn test_partial_override() {
        let json = r#"{
            "highlight": "always",
            "detection": { "threshold": 3.0 },
            "style": { "margin": 20.0 },
            "default_tenor": "60d"
        }"#;
        let config = DashboardConfig::from_json(json).unwrap();

        assert_eq!(config.highlight, HighlightMode::Always);
        assert_eq!(config.detection.threshold, 3.0);
        assert_eq!(config.detection.window, 2);
        assert_eq!(config.style.margin, 20.0);
        assert_eq!(config.style.grid_divisions, 5);
        assert_eq!(config.default_tenor, ExpiryTenor::D60);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(DashboardConfig::from_json(r#"{ "style": { "vol_ceiling": 0.0 } }"#).is_err());
        assert!(DashboardConfig::from_json(r#"{ "surface": { "steps": 0 } }"#).is_err());
        assert!(DashboardConfig::from_json(r#"{ "highlight": "sometimes" }"#).is_err());
    }

    #[test]
    fn test_oversized_values_rejected() {
        let huge = usize::MAX;
        for json in [
            format!(r#"{{ "surface": {{ "steps": {} }} }}"#, huge),
            r#"{ "surface": { "steps": 100000 } }"#.to_string(),
            format!(r#"{{ "detection": {{ "window": {} }} }}"#, huge),
            format!(r#"{{ "style": {{ "grid_divisions": {} }} }}"#, huge),
            r#"{ "style": { "grid_divisions": 101 } }"#.to_string(),
        ] {
            assert!(DashboardConfig::from_json(&json).is_err(), "accepted {}", json);
        }
        assert!(DashboardConfig::from_json(r#"{ "style": { "grid_divisions": 100 } }"#).is_ok());
    }

    #[test]
    fn test_presets() {
        assert_eq!(DashboardConfig::sensitive().detection.threshold, 2.0);
        let quiet = DashboardConfig::quiet();
        assert_eq!(quiet.highlight, HighlightMode::Off);
        assert!(!quiet.notifications.startup_alert);
        assert!(quiet.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "default_mode": "simulated" }}"#).unwrap();

        let config = DashboardConfig::load(file.path()).unwrap();
        assert_eq!(config.default_mode, DataMode::Simulated);
    }
}
