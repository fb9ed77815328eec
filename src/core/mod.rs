//! Core data types for the dashboard
//!
//! Defines fundamental types:
//! - OptionChainSnapshot: Strikes with call/put quotes and Greeks
//! - Records: Metrics, anomalies, trades, risk and performance rows
//! - DashError: Crate-wide error type

pub mod error;
pub mod greeks;
pub mod option;
pub mod records;

pub use error::*;
pub use greeks::*;
pub use option::*;
pub use records::*;
