//! Data provider abstraction
//!
//! Every panel pulls its records through [`DataProvider`], so the dashboard
//! does not care whether they come from the bundled sample, a JSON snapshot on
//! disk or a future live feed.

use crate::core::{
    Anomaly, DashResult, DataMode, ExpiryTenor, Metric, OptionChainSnapshot, PerformanceHistory,
    RiskProfile, TradeRecommendation, Underlying,
};

pub trait DataProvider {
    /// Metric cards for a data mode
    fn fetch_metrics(&self, mode: DataMode) -> DashResult<Vec<Metric>>;

    /// Chain for an underlying and expiry tenor
    ///
    /// Unknown symbols are an error; known symbols without quotes yield an
    /// empty chain.
    fn fetch_option_chain(&self, underlying: &str, tenor: ExpiryTenor)
        -> DashResult<OptionChainSnapshot>;

    fn fetch_anomalies(&self) -> DashResult<Vec<Anomaly>>;

    fn fetch_trades(&self) -> DashResult<Vec<TradeRecommendation>>;

    fn fetch_risk(&self) -> DashResult<RiskProfile>;

    fn fetch_performance(&self) -> DashResult<PerformanceHistory>;

    /// Symbols offered by the underlying picker
    fn underlyings(&self) -> DashResult<Vec<Underlying>>;

    /// Look up one underlying by symbol (case-insensitive)
    fn underlying(&self, symbol: &str) -> DashResult<Underlying> {
        self.underlyings()?
            .into_iter()
            .find(|u| u.symbol.eq_ignore_ascii_case(symbol))
            .ok_or_else(|| crate::core::DashError::unknown_underlying(symbol))
    }
}

impl<P: DataProvider + ?Sized> DataProvider for Box<P> {
    fn fetch_metrics(&self, mode: DataMode) -> DashResult<Vec<Metric>> {
        (**self).fetch_metrics(mode)
    }

    fn fetch_option_chain(
        &self,
        underlying: &str,
        tenor: ExpiryTenor,
    ) -> DashResult<OptionChainSnapshot> {
        (**self).fetch_option_chain(underlying, tenor)
    }

    fn fetch_anomalies(&self) -> DashResult<Vec<Anomaly>> {
        (**self).fetch_anomalies()
    }

    fn fetch_trades(&self) -> DashResult<Vec<TradeRecommendation>> {
        (**self).fetch_trades()
    }

    fn fetch_risk(&self) -> DashResult<RiskProfile> {
        (**self).fetch_risk()
    }

    fn fetch_performance(&self) -> DashResult<PerformanceHistory> {
        (**self).fetch_performance()
    }

    fn underlyings(&self) -> DashResult<Vec<Underlying>> {
        (**self).underlyings()
    }
}
