//! Anomaly alert cards

use serde::Serialize;

use super::{plain_number, Arrow, Tone};
use crate::core::{Anomaly, Severity};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnomalyCard {
    /// "Put Skew (SPY 420 30d)"
    pub title: String,
    /// "2 mins ago"
    pub age: String,
    pub severity: &'static str,
    pub severity_tone: Tone,
    pub implied_vol: String,
    pub expected_vol: String,
    pub difference: String,
    pub difference_arrow: Arrow,
    pub difference_tone: Tone,
    pub action: String,
}

pub fn severity_tone(severity: Severity) -> Tone {
    match severity {
        Severity::High => Tone::Destructive,
        Severity::Medium => Tone::Warning,
        Severity::Low => Tone::Neutral,
    }
}

pub fn format_age(minutes: u32) -> String {
    match minutes {
        0 => "just now".to_string(),
        1 => "1 min ago".to_string(),
        n => format!("{} mins ago", n),
    }
}

pub fn anomaly_card(anomaly: &Anomaly) -> AnomalyCard {
    let rich = anomaly.difference > 0.0;
    AnomalyCard {
        title: format!(
            "{} ({} {} {}d)",
            anomaly.kind,
            anomaly.ticker,
            plain_number(anomaly.strike),
            anomaly.maturity_days
        ),
        age: format_age(anomaly.age_minutes),
        severity: anomaly.severity.label(),
        severity_tone: severity_tone(anomaly.severity),
        implied_vol: format!("{}%", plain_number(anomaly.implied_vol)),
        expected_vol: format!("{}%", plain_number(anomaly.expected_vol)),
        difference: format!("{}%", plain_number(anomaly.difference.abs())),
        difference_arrow: if rich { Arrow::Up } else { Arrow::Down },
        difference_tone: if rich { Tone::Positive } else { Tone::Negative },
        action: anomaly.trade_action.clone(),
    }
}

pub fn anomaly_cards(anomalies: &[Anomaly]) -> Vec<AnomalyCard> {
    anomalies.iter().map(anomaly_card).collect()
}

/// Header badge, e.g. "3 Active"
pub fn active_badge(anomalies: &[Anomaly]) -> String {
    format!("{} Active", anomalies.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{sample_snapshot, DataProvider};

    #[test]
    fn test_sample_cards() {
        let anomalies = sample_snapshot().fetch_anomalies().unwrap();
        let cards = anomaly_cards(&anomalies);

        assert_eq!(active_badge(&anomalies), "3 Active");
        assert_eq!(cards[0].title, "Put Skew (SPY 420 30d)");
        assert_eq!(cards[0].age, "2 mins ago");
        assert_eq!(cards[0].severity, "HIGH");
        assert_eq!(cards[0].severity_tone, Tone::Destructive);
        assert_eq!(cards[0].implied_vol, "28.4%");
        assert_eq!(cards[0].difference, "6.3%");
        assert_eq!(cards[0].difference_arrow, Arrow::Up);

        assert_eq!(cards[1].severity_tone, Tone::Warning);
        assert_eq!(cards[1].difference, "2.6%");
        assert_eq!(cards[1].difference_arrow, Arrow::Down);
        assert_eq!(cards[1].difference_tone, Tone::Negative);
    }

    #[test]
    fn test_low_severity_is_neutral() {
        assert_eq!(severity_tone(Severity::Low), Tone::Neutral);
        assert_eq!(format_age(1), "1 min ago");
    }
}
