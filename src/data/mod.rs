//! Data sources and storage
//!
//! Handles:
//! - The `DataProvider` seam every panel reads through
//! - Bundled sample data and JSON snapshots
//! - Local snapshot store

pub mod cache;
pub mod provider;
pub mod sample;
pub mod snapshot;

pub use cache::*;
pub use provider::*;
pub use sample::*;
pub use snapshot::*;
