use chrono::NaiveDateTime;

use crate::config::DashboardConfig;
use crate::core::{
    Anomaly, DataMode, ExpiryTenor, Metric, OptionChainSnapshot, PerformanceHistory, RiskProfile,
    TradeRecommendation, Underlying,
};
use crate::detect::DislocationConfig;
use crate::surface::HighlightMode;

/// Selections plus the records each panel currently shows
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub mode: DataMode,
    pub underlying: String,
    /// Selection used when the current one is cleared
    pub default_underlying: String,
    pub tenor: ExpiryTenor,
    pub strike_query: String,
    pub highlight: HighlightMode,
    pub detection: DislocationConfig,

    pub metrics: Vec<Metric>,
    pub chain: Option<OptionChainSnapshot>,
    pub anomalies: Vec<Anomaly>,
    pub trades: Vec<TradeRecommendation>,
    pub risk: RiskProfile,
    pub performance: PerformanceHistory,
    pub underlyings: Vec<Underlying>,

    pub last_update: Option<NaiveDateTime>,
    pub last_error: Option<String>,
}

impl DashboardState {
    pub fn from_config(config: &DashboardConfig) -> Self {
        Self {
            mode: config.default_mode,
            underlying: config.default_underlying.to_ascii_uppercase(),
            default_underlying: config.default_underlying.to_ascii_uppercase(),
            tenor: config.default_tenor,
            highlight: config.highlight,
            detection: config.detection.clone(),
            ..Default::default()
        }
    }

    pub fn is_listed(&self, symbol: &str) -> bool {
        self.underlyings
            .iter()
            .any(|u| u.symbol.eq_ignore_ascii_case(symbol))
    }

    pub fn current_underlying(&self) -> Option<&Underlying> {
        self.underlyings
            .iter()
            .find(|u| u.symbol.eq_ignore_ascii_case(&self.underlying))
    }
}
