//! Header and footer lines

use chrono::{Datelike, NaiveDateTime};
use serde::Serialize;

use crate::core::DataMode;

pub const APP_TITLE: &str = "Volatility Surface Arbitrage";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusBar {
    pub title: &'static str,
    /// "LIVE", "HISTORICAL", "SIMULATED"
    pub mode_badge: String,
    pub data_note: &'static str,
    pub last_update: String,
    pub system: &'static str,
    pub copyright: String,
}

pub fn status_bar(mode: DataMode, last_update: NaiveDateTime) -> StatusBar {
    StatusBar {
        title: APP_TITLE,
        mode_badge: mode.label().to_ascii_uppercase(),
        data_note: "Data: Delayed 15 min",
        last_update: format!("Last Update: {}", last_update.format("%H:%M:%S")),
        system: "System: Normal",
        copyright: format!("{} Platform © {}", APP_TITLE, last_update.year()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_status_lines() {
        let at = NaiveDate::from_ymd_opt(2024, 5, 22)
            .unwrap()
            .and_hms_opt(9, 5, 7)
            .unwrap();
        let bar = status_bar(DataMode::Historical, at);

        assert_eq!(bar.mode_badge, "HISTORICAL");
        assert_eq!(bar.last_update, "Last Update: 09:05:07");
        assert_eq!(bar.copyright, "Volatility Surface Arbitrage Platform © 2024");
    }
}
