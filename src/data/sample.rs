//! Bundled sample dataset
//!
//! Static figures shown when no snapshot file is supplied.

use chrono::NaiveDate;

use super::snapshot::DashboardSnapshot;
use crate::core::{
    Anomaly, ChainRow, ExpiryTenor, FactorExposure, Greeks, Metric, MetricIcon, MetricUnit,
    MetricValue, ModeMetrics, OptionChainSnapshot, OptionType, PerformanceHistory,
    PerformancePoint, PricingStatus, QuoteSide, RiskMetric, RiskProfile, Severity, TradeLeg,
    TradeRecommendation, TradeStatus, Underlying,
};

/// Symbol selected when nothing else is
pub const DEFAULT_UNDERLYING: &str = "SPY";

pub fn sample_snapshot() -> DashboardSnapshot {
    DashboardSnapshot {
        as_of: date(2024, 5, 22),
        metrics: sample_metrics(),
        chains: vec![sample_chain()],
        anomalies: sample_anomalies(),
        trades: sample_trades(),
        risk: sample_risk(),
        performance: sample_performance(),
        underlyings: sample_underlyings(),
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn number(name: &str, value: f64, change: f64, change_percent: f64, icon: MetricIcon) -> Metric {
    Metric {
        name: name.to_string(),
        value: MetricValue::Number(value),
        unit: MetricUnit::Plain,
        change,
        change_percent,
        icon,
    }
}

fn percent(name: &str, value: f64, change: f64, change_percent: f64, icon: MetricIcon) -> Metric {
    Metric {
        unit: MetricUnit::Percent,
        ..number(name, value, change, change_percent, icon)
    }
}

fn text(name: &str, value: &str, icon: MetricIcon) -> Metric {
    Metric {
        name: name.to_string(),
        value: MetricValue::Text(value.to_string()),
        unit: MetricUnit::Plain,
        change: 0.0,
        change_percent: 0.0,
        icon,
    }
}

fn sample_metrics() -> ModeMetrics {
    use MetricIcon::*;

    ModeMetrics {
        live: vec![
            number("VIX Index", 16.42, -0.78, -4.53, BarChart),
            percent("IV Rank", 38.0, 3.0, 8.57, TrendingUp),
            number("IV Term Slope", 0.82, 0.03, 3.80, Layers),
            number("ML Prediction", 22.4, 1.2, 5.66, Brain),
        ],
        historical: vec![
            number("VIX Average", 18.72, 2.3, 12.29, BarChart),
            text("IV Range", "32-54", TrendingUp),
            number("Term Curve", 0.94, 0.12, 12.77, Layers),
            number("Hist. Edge", 15.2, -3.5, -23.03, Brain),
        ],
        simulated: vec![
            number("Sim VIX Peak", 24.37, 7.95, 48.42, BarChart),
            text("Sim IV Range", "28-65", TrendingUp),
            number("Stress Test", 1.42, 0.6, 73.17, Layers),
            percent("Win Probability", 68.5, -3.9, -5.39, Brain),
        ],
    }
}

fn quote(bid: f64, ask: f64, volume: u64, open_interest: u64, iv: f64) -> QuoteSide {
    QuoteSide {
        bid,
        ask,
        volume,
        open_interest,
        iv,
    }
}

fn sample_chain() -> OptionChainSnapshot {
    let mut chain = OptionChainSnapshot::empty(DEFAULT_UNDERLYING, ExpiryTenor::D30, date(2024, 6, 21));

    let rows = [
        (420.0, quote(10.45, 10.65, 3245, 12543, 28.4), quote(8.25, 8.45, 2156, 8762, 29.2), Greeks::new(0.52, 0.04, 0.32, -0.15), PricingStatus::Mispriced),
        (422.0, quote(9.15, 9.35, 1876, 8654, 27.8), quote(9.10, 9.30, 1543, 7652, 28.5), Greeks::new(0.48, 0.043, 0.33, -0.16), PricingStatus::Fair),
        (424.0, quote(7.85, 8.05, 2134, 9876, 27.3), quote(10.25, 10.45, 1987, 8945, 28.1), Greeks::new(0.44, 0.044, 0.34, -0.17), PricingStatus::Fair),
        (426.0, quote(6.65, 6.85, 1543, 7845, 26.9), quote(11.45, 11.65, 2345, 10234, 27.8), Greeks::new(0.40, 0.045, 0.35, -0.18), PricingStatus::Fair),
        (428.0, quote(5.55, 5.75, 1234, 6543, 26.5), quote(12.75, 12.95, 2654, 11543, 27.6), Greeks::new(0.36, 0.046, 0.36, -0.19), PricingStatus::Fair),
    ];

    for (strike, call, put, greeks, status) in rows {
        chain.add_row(ChainRow {
            strike,
            call,
            put,
            greeks,
            status,
        });
    }
    chain
}

#[allow(clippy::too_many_arguments)]
fn anomaly(
    id: u32,
    kind: &str,
    ticker: &str,
    strike: f64,
    maturity_days: u32,
    severity: Severity,
    implied_vol: f64,
    expected_vol: f64,
    difference: f64,
    trade_action: &str,
    age_minutes: u32,
) -> Anomaly {
    Anomaly {
        id,
        kind: kind.to_string(),
        ticker: ticker.to_string(),
        strike,
        maturity_days,
        severity,
        implied_vol,
        expected_vol,
        difference,
        trade_action: trade_action.to_string(),
        age_minutes,
    }
}

fn sample_anomalies() -> Vec<Anomaly> {
    vec![
        anomaly(1, "Put Skew", "SPY", 420.0, 30, Severity::High, 28.4, 22.1, 6.3, "Sell Puts", 2),
        anomaly(2, "Term Structure", "AAPL", 180.0, 60, Severity::Medium, 19.7, 22.3, -2.6, "Calendar Spread", 5),
        anomaly(3, "Volatility Spike", "TSLA", 250.0, 14, Severity::Medium, 54.2, 48.9, 5.3, "Iron Condor", 18),
    ]
}

fn leg(ticker: &str, strike: f64, expiry_days: u32, option_type: OptionType, quantity: u32) -> TradeLeg {
    TradeLeg {
        ticker: ticker.to_string(),
        strike,
        expiry_days,
        option_type,
        quantity,
    }
}

fn sample_trades() -> Vec<TradeRecommendation> {
    use OptionType::{Call, Put};

    vec![
        TradeRecommendation {
            id: 1,
            strategy: "Volatility Dispersion".to_string(),
            description: "Buy SPY volatility, sell sector volatility".to_string(),
            premium: 1250.0,
            expected_return: 18.4,
            probability: 72.0,
            status: TradeStatus::HighConfidence,
            buy: vec![leg("SPY", 420.0, 30, Put, 10)],
            sell: vec![leg("XLF", 36.0, 30, Put, 25), leg("XLK", 170.0, 30, Put, 15)],
        },
        TradeRecommendation {
            id: 2,
            strategy: "Calendar Spread".to_string(),
            description: "SPY term structure anomaly exploitation".to_string(),
            premium: 850.0,
            expected_return: 12.7,
            probability: 68.0,
            status: TradeStatus::PendingAnalysis,
            buy: vec![leg("SPY", 422.0, 60, Call, 5)],
            sell: vec![leg("SPY", 422.0, 30, Call, 5)],
        },
        TradeRecommendation {
            id: 3,
            strategy: "Volatility Skew Arbitrage".to_string(),
            description: "Exploit TSLA put skew mispricing".to_string(),
            premium: 1875.0,
            expected_return: 22.1,
            probability: 64.0,
            status: TradeStatus::HighConfidence,
            buy: vec![leg("TSLA", 240.0, 45, Call, 3)],
            sell: vec![leg("TSLA", 210.0, 45, Put, 3)],
        },
    ]
}

fn sample_risk() -> RiskProfile {
    let metric = |name: &str, value: f64, max: f64, description: &str| RiskMetric {
        name: name.to_string(),
        value,
        max,
        description: description.to_string(),
    };
    let exposure = |factor: &str, value: f64, color: u32| FactorExposure {
        factor: factor.to_string(),
        value,
        color,
    };

    RiskProfile {
        metrics: vec![
            metric("Sharpe Ratio", 1.82, 3.0, "Excess return per unit of risk"),
            metric("Max Drawdown", 12.5, 50.0, "Largest peak-to-trough decline (%)"),
            metric("Sortino Ratio", 2.14, 4.0, "Downside risk adjustment"),
            metric("VaR (95%)", 1.85, 5.0, "Daily value at risk (%)"),
        ],
        exposures: vec![
            exposure("Market Beta", 0.45, 0x3b82f6),
            exposure("Volatility", 0.78, 0xa855f7),
            exposure("Size", 0.12, 0x22c55e),
            exposure("Value", -0.23, 0xf97316),
            exposure("Momentum", 0.62, 0xec4899),
        ],
    }
}

fn sample_performance() -> PerformanceHistory {
    let monthly = [
        ("Jan", 2.4, 1.2),
        ("Feb", -1.3, -0.8),
        ("Mar", 3.7, 2.1),
        ("Apr", 2.9, 1.5),
        ("May", -2.1, -1.7),
        ("Jun", 4.2, 2.4),
        ("Jul", 3.8, 1.9),
        ("Aug", 1.2, 0.7),
        ("Sep", -0.5, -0.2),
        ("Oct", 5.1, 2.8),
        ("Nov", 2.7, 1.4),
        ("Dec", 3.3, 1.8),
    ];

    PerformanceHistory {
        points: monthly
            .into_iter()
            .map(|(period, strategy, benchmark)| PerformancePoint {
                period: period.to_string(),
                strategy,
                benchmark,
            })
            .collect(),
        ytd_strategy: 18.4,
        ytd_benchmark: 9.1,
    }
}

fn sample_underlyings() -> Vec<Underlying> {
    [
        ("SPY", "$456.2B", "Index"),
        ("AAPL", "$2.87T", "Technology"),
        ("MSFT", "$2.74T", "Technology"),
        ("AMZN", "$1.84T", "Consumer Cyclical"),
        ("GOOGL", "$1.82T", "Communication Services"),
        ("META", "$1.19T", "Communication Services"),
        ("TSLA", "$678.7B", "Automotive"),
        ("NVDA", "$2.18T", "Technology"),
        ("JPM", "$506.1B", "Financial Services"),
        ("V", "$512.8B", "Financial Services"),
    ]
    .into_iter()
    .map(|(symbol, market_cap, sector)| Underlying {
        symbol: symbol.to_string(),
        market_cap: market_cap.to_string(),
        sector: sector.to_string(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DataMode;

    #[test]
    fn test_sample_is_valid() {
        let snapshot = sample_snapshot();
        assert!(snapshot.validate().is_ok());
        assert_eq!(snapshot.underlyings.len(), 10);
        assert_eq!(snapshot.anomalies.len(), 3);
        assert_eq!(snapshot.trades.len(), 3);
        assert_eq!(snapshot.performance.points.len(), 12);
        assert_eq!(snapshot.expiry_for(ExpiryTenor::D30), date(2024, 6, 21));
    }

    #[test]
    fn test_mode_metric_sets_differ() {
        let metrics = sample_metrics();
        assert_eq!(metrics.get(DataMode::Live)[0].name, "VIX Index");
        assert_eq!(metrics.get(DataMode::Historical)[0].name, "VIX Average");
        assert_eq!(metrics.get(DataMode::Simulated)[0].name, "Sim VIX Peak");
        for mode in DataMode::ALL {
            assert_eq!(metrics.get(mode).len(), 4);
        }
    }

    #[test]
    fn test_only_lowest_strike_mispriced() {
        let chain = sample_chain();
        let flagged: Vec<f64> = chain.mispriced().iter().map(|r| r.strike).collect();
        assert_eq!(flagged, vec![420.0]);
        assert_eq!(chain.strikes(), vec![420.0, 422.0, 424.0, 426.0, 428.0]);
    }
}
