//! Dashboard records
//!
//! Typed rows consumed by the leaf panels: metric cards, anomaly alerts,
//! trade recommendations, risk figures, performance history and the
//! underlying picker.

use serde::{Deserialize, Serialize};

use super::option::OptionType;

/// Data source the metrics panel is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataMode {
    Live,
    Historical,
    Simulated,
}

impl DataMode {
    pub const ALL: [DataMode; 3] = [DataMode::Live, DataMode::Historical, DataMode::Simulated];

    /// Tab label
    pub fn label(&self) -> &'static str {
        match self {
            DataMode::Live => "Live",
            DataMode::Historical => "Historical",
            DataMode::Simulated => "Simulated",
        }
    }

    /// Notification title shown after switching to this mode
    pub fn switch_title(&self) -> &'static str {
        match self {
            DataMode::Live => "Switched to Live Data Mode",
            DataMode::Historical => "Switched to Historical Data Mode",
            DataMode::Simulated => "Switched to Simulated Data Mode",
        }
    }

    /// Notification body shown after switching to this mode
    pub fn switch_description(&self) -> &'static str {
        match self {
            DataMode::Live => "Connected to real-time data feed.",
            DataMode::Historical => "Historical data from Jan 1 - Mar 31, 2024 loaded.",
            DataMode::Simulated => "Running Monte Carlo simulation with parameters from settings.",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "live" => Some(DataMode::Live),
            "historical" => Some(DataMode::Historical),
            "simulated" => Some(DataMode::Simulated),
            _ => None,
        }
    }
}

impl Default for DataMode {
    fn default() -> Self {
        DataMode::Live
    }
}

/// Value of a metric card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    /// Pre-formatted text such as a range ("32-54")
    Text(String),
}

/// How a numeric metric value is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricUnit {
    #[default]
    Plain,
    Percent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricIcon {
    BarChart,
    TrendingUp,
    Layers,
    Brain,
}

/// Summary metric card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub name: String,
    pub value: MetricValue,
    #[serde(default)]
    pub unit: MetricUnit,
    pub change: f64,
    pub change_percent: f64,
    pub icon: MetricIcon,
}

/// Metric sets per data mode
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModeMetrics {
    pub live: Vec<Metric>,
    pub historical: Vec<Metric>,
    pub simulated: Vec<Metric>,
}

impl ModeMetrics {
    pub fn get(&self, mode: DataMode) -> &[Metric] {
        match mode {
            DataMode::Live => &self.live,
            DataMode::Historical => &self.historical,
            DataMode::Simulated => &self.simulated,
        }
    }

    pub fn set(&mut self, mode: DataMode, metrics: Vec<Metric>) {
        match mode {
            DataMode::Live => self.live = metrics,
            DataMode::Historical => self.historical = metrics,
            DataMode::Simulated => self.simulated = metrics,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
        }
    }
}

/// Volatility anomaly alert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    pub id: u32,
    /// Anomaly family, e.g. "Put Skew"
    pub kind: String,
    pub ticker: String,
    pub strike: f64,
    pub maturity_days: u32,
    pub severity: Severity,
    /// Percent units
    pub implied_vol: f64,
    /// Percent units
    pub expected_vol: f64,
    /// implied - expected, percent units
    pub difference: f64,
    pub trade_action: String,
    /// Minutes since detection
    pub age_minutes: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TradeStatus {
    HighConfidence,
    PendingAnalysis,
}

impl TradeStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TradeStatus::HighConfidence => "High Confidence",
            TradeStatus::PendingAnalysis => "Pending Analysis",
        }
    }
}

/// One option leg of a recommended trade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeLeg {
    pub ticker: String,
    pub strike: f64,
    pub expiry_days: u32,
    pub option_type: OptionType,
    pub quantity: u32,
}

/// Recommended multi-leg trade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecommendation {
    pub id: u32,
    pub strategy: String,
    pub description: String,
    /// Net premium in dollars
    pub premium: f64,
    /// Percent units
    pub expected_return: f64,
    /// Percent units
    pub probability: f64,
    pub status: TradeStatus,
    pub buy: Vec<TradeLeg>,
    pub sell: Vec<TradeLeg>,
}

/// Bounded risk figure shown as a progress bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskMetric {
    pub name: String,
    pub value: f64,
    pub max: f64,
    pub description: String,
}

/// Factor exposure in [-1, 1]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorExposure {
    pub factor: String,
    pub value: f64,
    /// Bar colour as 0xRRGGBB
    pub color: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskProfile {
    pub metrics: Vec<RiskMetric>,
    pub exposures: Vec<FactorExposure>,
}

/// Monthly strategy vs benchmark return (percent units)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformancePoint {
    pub period: String,
    pub strategy: f64,
    pub benchmark: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceHistory {
    pub points: Vec<PerformancePoint>,
    /// Year-to-date strategy return, percent units
    pub ytd_strategy: f64,
    /// Year-to-date benchmark return, percent units
    pub ytd_benchmark: f64,
}

/// Entry of the underlying picker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Underlying {
    pub symbol: String,
    pub market_cap: String,
    pub sector: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parse_and_labels() {
        assert_eq!(DataMode::parse("Historical"), Some(DataMode::Historical));
        assert_eq!(DataMode::parse(" live "), Some(DataMode::Live));
        assert_eq!(DataMode::parse("paper"), None);
        assert_eq!(DataMode::Simulated.label(), "Simulated");
        assert!(DataMode::Historical.switch_description().contains("Jan 1"));
    }

    #[test]
    fn test_metric_value_untagged_json() {
        let number: MetricValue = serde_json::from_str("16.42").unwrap();
        let text: MetricValue = serde_json::from_str("\"32-54\"").unwrap();
        assert_eq!(number, MetricValue::Number(16.42));
        assert_eq!(text, MetricValue::Text("32-54".to_string()));
    }

    #[test]
    fn test_mode_metrics_get_set() {
        let mut metrics = ModeMetrics::default();
        metrics.set(
            DataMode::Historical,
            vec![Metric {
                name: "VIX Average".into(),
                value: MetricValue::Number(18.72),
                unit: MetricUnit::Plain,
                change: 2.3,
                change_percent: 12.29,
                icon: MetricIcon::BarChart,
            }],
        );
        assert!(metrics.get(DataMode::Live).is_empty());
        assert_eq!(metrics.get(DataMode::Historical)[0].name, "VIX Average");
    }

    #[test]
    fn test_trade_status_serde_names() {
        let json = serde_json::to_string(&TradeStatus::PendingAnalysis).unwrap();
        assert_eq!(json, "\"pending-analysis\"");
        assert_eq!(TradeStatus::HighConfidence.label(), "High Confidence");
    }
}
