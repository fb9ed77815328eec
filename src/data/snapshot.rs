//! Full dashboard dataset as one serializable value.

use std::fs;
use std::path::Path;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::provider::DataProvider;
use crate::core::{
    Anomaly, DashError, DashResult, DataMode, ExpiryTenor, Metric, ModeMetrics,
    OptionChainSnapshot, PerformanceHistory, RiskProfile, TradeRecommendation, Underlying,
};

/// Every record the panels display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    /// Trading date the data refers to; empty chains expire `tenor` days later
    pub as_of: NaiveDate,
    pub metrics: ModeMetrics,
    #[serde(default)]
    pub chains: Vec<OptionChainSnapshot>,
    #[serde(default)]
    pub anomalies: Vec<Anomaly>,
    #[serde(default)]
    pub trades: Vec<TradeRecommendation>,
    #[serde(default)]
    pub risk: RiskProfile,
    #[serde(default)]
    pub performance: PerformanceHistory,
    pub underlyings: Vec<Underlying>,
}

impl DashboardSnapshot {
    pub fn from_json(json: &str) -> DashResult<Self> {
        let snapshot: Self = serde_json::from_str(json)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn to_json(&self) -> DashResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> DashResult<Self> {
        let json = fs::read_to_string(path)?;
        let snapshot = Self::from_json(&json)?;
        tracing::info!("Loaded snapshot as of {} from {:?}", snapshot.as_of, path);
        Ok(snapshot)
    }

    pub fn save(&self, path: &Path) -> DashResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_json()?)?;
        tracing::info!("Saved snapshot to {:?}", path);
        Ok(())
    }

    /// Every chain must belong to a listed underlying
    pub fn validate(&self) -> DashResult<()> {
        if self.underlyings.is_empty() {
            return Err(DashError::data("snapshot lists no underlyings"));
        }
        for chain in &self.chains {
            if !self.is_listed(&chain.underlying) {
                return Err(DashError::data(format!(
                    "chain for {} has no matching underlying",
                    chain.underlying
                )));
            }
        }
        Ok(())
    }

    fn is_listed(&self, symbol: &str) -> bool {
        self.underlyings
            .iter()
            .any(|u| u.symbol.eq_ignore_ascii_case(symbol))
    }

    /// Expiry date of a tenor counted from `as_of`
    pub fn expiry_for(&self, tenor: ExpiryTenor) -> NaiveDate {
        self.as_of + Duration::days(i64::from(tenor.days()))
    }
}

impl DataProvider for DashboardSnapshot {
    fn fetch_metrics(&self, mode: DataMode) -> DashResult<Vec<Metric>> {
        Ok(self.metrics.get(mode).to_vec())
    }

    fn fetch_option_chain(
        &self,
        underlying: &str,
        tenor: ExpiryTenor,
    ) -> DashResult<OptionChainSnapshot> {
        if !self.is_listed(underlying) {
            return Err(DashError::unknown_underlying(underlying));
        }

        let chain = self
            .chains
            .iter()
            .find(|c| c.underlying.eq_ignore_ascii_case(underlying) && c.tenor == tenor)
            .cloned()
            .unwrap_or_else(|| {
                OptionChainSnapshot::empty(underlying.to_ascii_uppercase(), tenor, self.expiry_for(tenor))
            });
        Ok(chain)
    }

    fn fetch_anomalies(&self) -> DashResult<Vec<Anomaly>> {
        Ok(self.anomalies.clone())
    }

    fn fetch_trades(&self) -> DashResult<Vec<TradeRecommendation>> {
        Ok(self.trades.clone())
    }

    fn fetch_risk(&self) -> DashResult<RiskProfile> {
        Ok(self.risk.clone())
    }

    fn fetch_performance(&self) -> DashResult<PerformanceHistory> {
        Ok(self.performance.clone())
    }

    fn underlyings(&self) -> DashResult<Vec<Underlying>> {
        Ok(self.underlyings.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sample_snapshot;
    use tempfile::tempdir;

    #[test]
    fn test_chain_lookup() {
        let snapshot = sample_snapshot();

        let spy = snapshot.fetch_option_chain("spy", ExpiryTenor::D30).unwrap();
        assert_eq!(spy.rows.len(), 5);
        assert_eq!(spy.expiry, NaiveDate::from_ymd_opt(2024, 6, 21).unwrap());

        let aapl = snapshot.fetch_option_chain("AAPL", ExpiryTenor::D60).unwrap();
        assert!(aapl.is_empty());
        assert_eq!(aapl.underlying, "AAPL");
        assert_eq!(aapl.expiry, snapshot.expiry_for(ExpiryTenor::D60));

        let err = snapshot.fetch_option_chain("XYZ", ExpiryTenor::D30).unwrap_err();
        assert!(matches!(err, DashError::UnknownUnderlying(_)));
    }

    #[test]
    fn test_underlying_lookup() {
        let snapshot = sample_snapshot();
        let aapl = snapshot.underlying("aapl").unwrap();
        assert_eq!(aapl.market_cap, "$2.87T");
        assert!(snapshot.underlying("NOPE").is_err());
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("snapshot.json");

        let snapshot = sample_snapshot();
        snapshot.save(&path).unwrap();
        let loaded = DashboardSnapshot::load(&path).unwrap();

        assert_eq!(loaded, snapshot);
    }

    #[test]
    fn test_rejects_orphan_chain() {
        let mut snapshot = sample_snapshot();
        snapshot.underlyings.retain(|u| u.symbol != "SPY");
        let json = serde_json::to_string(&snapshot).unwrap();

        assert!(matches!(
            DashboardSnapshot::from_json(&json),
            Err(DashError::Data(_))
        ));
    }

    #[test]
    fn test_malformed_json_is_serialization_error() {
        assert!(matches!(
            DashboardSnapshot::from_json("{ not json"),
            Err(DashError::Serialization(_))
        ));
    }
}
