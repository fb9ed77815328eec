//! Option chain table

use serde::Serialize;

use super::{plain_number, Tone};
use crate::core::{ChainRow, ExpiryTenor, OptionChainSnapshot};

pub const CHAIN_COLUMNS: [&str; 9] = [
    "Strike", "Call Bid", "Call Ask", "Call IV", "Put Bid", "Put Ask", "Put IV", "Delta", "Status",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChainTableRow {
    pub strike: String,
    pub call_bid: String,
    pub call_ask: String,
    pub call_iv: String,
    pub put_bid: String,
    pub put_ask: String,
    pub put_iv: String,
    pub delta: String,
    pub status: &'static str,
    pub status_tone: Tone,
    /// Row background is emphasised
    pub highlighted: bool,
}

impl ChainTableRow {
    /// Cells in column order
    pub fn cells(&self) -> [&str; 9] {
        [
            &self.strike,
            &self.call_bid,
            &self.call_ask,
            &self.call_iv,
            &self.put_bid,
            &self.put_ask,
            &self.put_iv,
            &self.delta,
            self.status,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChainView {
    /// "SPY Jun 21, 2024"
    pub badge: String,
    pub tenor: ExpiryTenor,
    pub rows: Vec<ChainTableRow>,
}

/// Picker entries as (code, label)
pub fn tenor_options() -> Vec<(String, String)> {
    ExpiryTenor::ALL
        .iter()
        .map(|t| (t.code(), t.label()))
        .collect()
}

pub fn expiry_badge(chain: &OptionChainSnapshot) -> String {
    format!("{} {}", chain.underlying, chain.expiry.format("%b %-d, %Y"))
}

/// Strike text starts with the trimmed query; an empty query matches all
pub fn strike_matches(strike: f64, query: &str) -> bool {
    let query = query.trim();
    query.is_empty() || plain_number(strike).starts_with(query)
}

pub fn chain_row(row: &ChainRow) -> ChainTableRow {
    let mispriced = row.status.is_abnormal();
    ChainTableRow {
        strike: plain_number(row.strike),
        call_bid: format!("{:.2}", row.call.bid),
        call_ask: format!("{:.2}", row.call.ask),
        call_iv: format!("{:.1}%", row.call.iv),
        put_bid: format!("{:.2}", row.put.bid),
        put_ask: format!("{:.2}", row.put.ask),
        put_iv: format!("{:.1}%", row.put.iv),
        delta: format!("{:.2}", row.greeks.delta),
        status: if mispriced { "Mispriced" } else { "Fair" },
        status_tone: if mispriced { Tone::Destructive } else { Tone::Neutral },
        highlighted: mispriced,
    }
}

pub fn chain_view(chain: &OptionChainSnapshot, strike_query: &str) -> ChainView {
    ChainView {
        badge: expiry_badge(chain),
        tenor: chain.tenor,
        rows: chain
            .rows
            .iter()
            .filter(|r| strike_matches(r.strike, strike_query))
            .map(chain_row)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{sample_snapshot, DataProvider};

    fn spy() -> OptionChainSnapshot {
        sample_snapshot()
            .fetch_option_chain("SPY", ExpiryTenor::D30)
            .unwrap()
    }

    #[test]
    fn test_badge_and_first_row() {
        let view = chain_view(&spy(), "");
        assert_eq!(view.badge, "SPY Jun 21, 2024");
        assert_eq!(view.rows.len(), 5);

        let first = &view.rows[0];
        assert_eq!(
            first.cells(),
            ["420", "10.45", "10.65", "28.4%", "8.25", "8.45", "29.2%", "0.52", "Mispriced"]
        );
        assert!(first.highlighted);
        assert_eq!(first.status_tone, Tone::Destructive);
        assert_eq!(view.rows[1].status, "Fair");
        assert!(!view.rows[1].highlighted);
    }

    #[test]
    fn test_strike_search_is_prefix() {
        let chain = spy();
        let strikes = |q: &str| -> Vec<String> {
            chain_view(&chain, q).rows.into_iter().map(|r| r.strike).collect()
        };

        assert_eq!(strikes("42"), vec!["420", "422", "424", "426", "428"]);
        assert_eq!(strikes(" 424 "), vec!["424"]);
        assert_eq!(strikes("24"), Vec::<String>::new());
    }

    #[test]
    fn test_tenor_options() {
        let options = tenor_options();
        assert_eq!(options.len(), 5);
        assert_eq!(options[2], ("30d".to_string(), "30 Days".to_string()));
    }
}
