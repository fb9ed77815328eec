//! Option chain definitions
//!
//! Call/put quotes per strike, grouped into a chain for one underlying and tenor.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::greeks::Greeks;

/// Option type (Call or Put)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    pub fn label(&self) -> &'static str {
        match self {
            OptionType::Call => "Call",
            OptionType::Put => "Put",
        }
    }
}

/// Expiry buckets offered by the chain picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ExpiryTenor {
    #[serde(rename = "7d")]
    D7,
    #[serde(rename = "14d")]
    D14,
    #[serde(rename = "30d")]
    D30,
    #[serde(rename = "60d")]
    D60,
    #[serde(rename = "90d")]
    D90,
}

impl ExpiryTenor {
    pub const ALL: [ExpiryTenor; 5] = [
        ExpiryTenor::D7,
        ExpiryTenor::D14,
        ExpiryTenor::D30,
        ExpiryTenor::D60,
        ExpiryTenor::D90,
    ];

    /// Calendar days to expiry
    pub fn days(&self) -> u32 {
        match self {
            ExpiryTenor::D7 => 7,
            ExpiryTenor::D14 => 14,
            ExpiryTenor::D30 => 30,
            ExpiryTenor::D60 => 60,
            ExpiryTenor::D90 => 90,
        }
    }

    /// Short code ("30d")
    pub fn code(&self) -> String {
        format!("{}d", self.days())
    }

    /// Picker label ("30 Days")
    pub fn label(&self) -> String {
        format!("{} Days", self.days())
    }

    /// Parse a short code such as "30d"
    pub fn from_code(code: &str) -> Option<Self> {
        let days: u32 = code.trim().trim_end_matches('d').parse().ok()?;
        Self::ALL.into_iter().find(|t| t.days() == days)
    }
}

impl Default for ExpiryTenor {
    fn default() -> Self {
        ExpiryTenor::D30
    }
}

/// Pricing verdict for a strike
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PricingStatus {
    Fair,
    Mispriced,
}

impl PricingStatus {
    pub fn is_abnormal(&self) -> bool {
        matches!(self, PricingStatus::Mispriced)
    }
}

/// One side (call or put) of a chain row
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuoteSide {
    pub bid: f64,
    pub ask: f64,
    pub volume: u64,
    pub open_interest: u64,
    /// Implied volatility in percent (28.4 = 28.4%)
    pub iv: f64,
}

impl QuoteSide {
    pub fn mid(&self) -> f64 {
        (self.bid + self.ask) / 2.0
    }

    pub fn spread(&self) -> f64 {
        self.ask - self.bid
    }
}

/// Calls and puts at a single strike
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainRow {
    pub strike: f64,
    pub call: QuoteSide,
    pub put: QuoteSide,
    pub greeks: Greeks,
    pub status: PricingStatus,
}

/// Chain for one underlying and expiry tenor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionChainSnapshot {
    pub underlying: String,
    pub tenor: ExpiryTenor,
    pub expiry: NaiveDate,
    pub rows: Vec<ChainRow>,
}

impl OptionChainSnapshot {
    /// Chain with no contracts
    pub fn empty(underlying: impl Into<String>, tenor: ExpiryTenor, expiry: NaiveDate) -> Self {
        Self {
            underlying: underlying.into(),
            tenor,
            expiry,
            rows: Vec::new(),
        }
    }

    /// Insert a row keeping strikes ascending
    pub fn add_row(&mut self, row: ChainRow) {
        self.rows.push(row);
        self.rows
            .sort_by(|a, b| a.strike.partial_cmp(&b.strike).unwrap_or(std::cmp::Ordering::Equal));
    }

    pub fn strikes(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.strike).collect()
    }

    pub fn row_at(&self, strike: f64) -> Option<&ChainRow> {
        self.rows.iter().find(|r| (r.strike - strike).abs() < 0.001)
    }

    /// Rows flagged as mispriced
    pub fn mispriced(&self) -> Vec<&ChainRow> {
        self.rows.iter().filter(|r| r.status.is_abnormal()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
