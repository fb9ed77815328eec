//! Historical performance chart data

use serde::Serialize;

use crate::core::PerformanceHistory;

pub const STRATEGY_SERIES: &str = "Strategy Return";
pub const BENCHMARK_SERIES: &str = "S&P 500 Return";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceView {
    pub periods: Vec<String>,
    /// `[x, y]` pairs, x is the period index
    pub strategy: Vec<[f64; 2]>,
    pub benchmark: Vec<[f64; 2]>,
    /// "Strategy: +18.4% YTD"
    pub strategy_summary: String,
    /// "Benchmark: +9.1% YTD"
    pub benchmark_summary: String,
}

/// Percent axis tick, e.g. "2.5%"
pub fn percent_tick(value: f64) -> String {
    format!("{}%", value)
}

pub fn performance_view(history: &PerformanceHistory) -> PerformanceView {
    let indexed = || history.points.iter().enumerate().map(|(i, p)| (i as f64, p));

    PerformanceView {
        periods: history.points.iter().map(|p| p.period.clone()).collect(),
        strategy: indexed().map(|(x, p)| [x, p.strategy]).collect(),
        benchmark: indexed().map(|(x, p)| [x, p.benchmark]).collect(),
        strategy_summary: format!("Strategy: {:+}% YTD", history.ytd_strategy),
        benchmark_summary: format!("Benchmark: {:+}% YTD", history.ytd_benchmark),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{sample_snapshot, DataProvider};

    #[test]
    fn test_sample_performance() {
        let view = performance_view(&sample_snapshot().fetch_performance().unwrap());

        assert_eq!(view.periods.len(), 12);
        assert_eq!(view.periods[0], "Jan");
        assert_eq!(view.strategy[1], [1.0, -1.3]);
        assert_eq!(view.benchmark[11], [11.0, 1.8]);
        assert_eq!(view.strategy_summary, "Strategy: +18.4% YTD");
        assert_eq!(view.benchmark_summary, "Benchmark: +9.1% YTD");
    }

    #[test]
    fn test_percent_tick() {
        assert_eq!(percent_tick(2.5), "2.5%");
        assert_eq!(percent_tick(-1.0), "-1%");
    }
}
