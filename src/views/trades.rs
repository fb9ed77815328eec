//! Trade recommendation cards

use serde::Serialize;

use super::{plain_number, Tone};
use crate::core::{TradeLeg, TradeRecommendation, TradeStatus};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegLine {
    pub text: String,
    pub tone: Tone,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeCard {
    pub strategy: String,
    pub description: String,
    pub status: &'static str,
    pub status_tone: Tone,
    pub premium: String,
    pub expected_return: String,
    pub probability: String,
    /// Buys first, then sells
    pub legs: Vec<LegLine>,
}

pub fn status_tone(status: TradeStatus) -> Tone {
    match status {
        TradeStatus::HighConfidence => Tone::Primary,
        TradeStatus::PendingAnalysis => Tone::Warning,
    }
}

/// "BUY 10 SPY 420 30d Put"
pub fn leg_text(side: &str, leg: &TradeLeg) -> String {
    format!(
        "{} {} {} {} {}d {}",
        side,
        leg.quantity,
        leg.ticker,
        plain_number(leg.strike),
        leg.expiry_days,
        leg.option_type.label()
    )
}

pub fn trade_card(trade: &TradeRecommendation) -> TradeCard {
    let buys = trade.buy.iter().map(|leg| LegLine {
        text: leg_text("BUY", leg),
        tone: Tone::Positive,
    });
    let sells = trade.sell.iter().map(|leg| LegLine {
        text: leg_text("SELL", leg),
        tone: Tone::Negative,
    });

    TradeCard {
        strategy: trade.strategy.clone(),
        description: trade.description.clone(),
        status: trade.status.label(),
        status_tone: status_tone(trade.status),
        premium: format!("${}", plain_number(trade.premium)),
        expected_return: format!("{}%", plain_number(trade.expected_return)),
        probability: format!("{}%", plain_number(trade.probability)),
        legs: buys.chain(sells).collect(),
    }
}

pub fn trade_cards(trades: &[TradeRecommendation]) -> Vec<TradeCard> {
    trades.iter().map(trade_card).collect()
}
