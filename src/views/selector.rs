//! Underlying picker

use serde::Serialize;

use crate::core::Underlying;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectorItem {
    pub symbol: String,
    pub market_cap: String,
    pub sector: String,
    pub selected: bool,
}

/// Case-insensitive match on symbol or sector
pub fn search_underlyings<'a>(underlyings: &'a [Underlying], query: &str) -> Vec<&'a Underlying> {
    let query = query.trim().to_ascii_lowercase();
    underlyings
        .iter()
        .filter(|u| {
            query.is_empty()
                || u.symbol.to_ascii_lowercase().contains(&query)
                || u.sector.to_ascii_lowercase().contains(&query)
        })
        .collect()
}

pub fn selector_items(underlyings: &[Underlying], current: &str, query: &str) -> Vec<SelectorItem> {
    search_underlyings(underlyings, query)
        .into_iter()
        .map(|u| SelectorItem {
            symbol: u.symbol.clone(),
            market_cap: u.market_cap.clone(),
            sector: u.sector.clone(),
            selected: u.symbol.eq_ignore_ascii_case(current),
        })
        .collect()
}

/// Picking the current symbol again clears the choice, which falls back to `default`
pub fn next_selection(current: &str, picked: &str, default: &str) -> String {
    if picked.eq_ignore_ascii_case(current) || picked.trim().is_empty() {
        default.trim().to_ascii_uppercase()
    } else {
        picked.trim().to_ascii_uppercase()
    }
}

/// Toast body for a selection, "Market Cap: $2.87T | Sector: Technology"
pub fn selection_summary(underlying: &Underlying) -> String {
    format!(
        "Market Cap: {} | Sector: {}",
        underlying.market_cap, underlying.sector
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{sample_snapshot, DataProvider};

    #[test]
    fn test_search_case_insensitive() {
        let all = sample_snapshot().underlyings().unwrap();

        let hits: Vec<&str> = search_underlyings(&all, "ms")
            .iter()
            .map(|u| u.symbol.as_str())
            .collect();
        assert_eq!(hits, vec!["MSFT"]);

        assert_eq!(search_underlyings(&all, "technology").len(), 3);
        assert_eq!(search_underlyings(&all, "").len(), 10);
    }

    #[test]
    fn test_reselect_falls_back_to_default() {
        assert_eq!(next_selection("SPY", "aapl", "SPY"), "AAPL");
        assert_eq!(next_selection("AAPL", "AAPL", "SPY"), "SPY");
        assert_eq!(next_selection("SPY", "spy", "SPY"), "SPY");
        assert_eq!(next_selection("MSFT", "msft", "aapl"), "AAPL");
        assert_eq!(next_selection("MSFT", " ", "QQQ"), "QQQ");
    }

    #[test]
    fn test_items_mark_selection() {
        let all = sample_snapshot().underlyings().unwrap();
        let items = selector_items(&all, "tsla", "");
        let selected: Vec<&str> = items
            .iter()
            .filter(|i| i.selected)
            .map(|i| i.symbol.as_str())
            .collect();
        assert_eq!(selected, vec!["TSLA"]);

        let aapl = all.iter().find(|u| u.symbol == "AAPL").unwrap();
        assert_eq!(selection_summary(aapl), "Market Cap: $2.87T | Sector: Technology");
    }
}
