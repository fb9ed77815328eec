//! # Volarb - Volatility Surface Arbitrage Dashboard
//!
//! Panels for spotting and acting on implied-volatility mispricing.
//!
//! ## Key Components
//!
//! - **Surface**: 11x11 implied-vol grid projected onto a 2D canvas, with
//!   colour-ramped markers and highlighted dislocations
//! - **Detection**: robust z-score scan of each strike slice
//! - **Data**: provider trait backed by the bundled sample or JSON snapshots
//! - **Views**: metric cards, option chain, anomaly alerts, trade ideas,
//!   risk bars, performance series
//! - **Dashboard**: event reducer tying provider, toasts and surface together
//!
//! ## Usage
//!
//! ```rust,no_run
//! use volarb::prelude::*;
//!
//! let mut dash = Dashboard::new(sample_snapshot(), DashboardConfig::default());
//! dash.start(Some(Size::new(800.0, 400.0))).unwrap();
//!
//! dash.dispatch(UiEvent::ModeChanged { mode: DataMode::Historical });
//! for card in dash.metric_cards() {
//!     println!("{}: {}", card.name, card.value);
//! }
//! ```
//!
//! Everything time-driven (toast expiry, the delayed alert, frame and resize
//! hooks) runs on the cooperative [`runtime::Runtime`], so the host decides
//! when time passes.

pub mod config;
pub mod core;
pub mod dashboard;
pub mod data;
pub mod detect;
pub mod notify;
pub mod runtime;
pub mod surface;
pub mod views;

/// Prelude with commonly used types
pub mod prelude {
    // Core types
    pub use crate::core::{
        Anomaly, ChainRow, DashError, DashResult, DataMode, ExpiryTenor, Greeks, Metric,
        OptionChainSnapshot, OptionType, PerformanceHistory, PricingStatus, RiskProfile,
        Severity, TradeRecommendation, TradeStatus, Underlying,
    };

    // Data
    pub use crate::data::{
        sample_snapshot, DashboardSnapshot, DataProvider, SnapshotConfig, SnapshotStore,
    };

    // Surface
    pub use crate::surface::{
        AnomalyMarker, AnomalyPredicate, Canvas, DisplayList, DrawCommand, HighlightMode,
        PaintOutcome, Rgba, SurfaceGrid, SurfaceParams, SurfaceRenderer, SurfaceStyle,
    };

    // Detection
    pub use crate::detect::{scan_surface, Dislocation, DislocationConfig, DislocationKind};

    // Runtime and notifications
    pub use crate::notify::{Toast, ToastBus, ToastSpec, ToastVariant};
    pub use crate::runtime::{Runtime, Size};

    // Dashboard
    pub use crate::config::{DashboardConfig, NotificationConfig};
    pub use crate::dashboard::{Dashboard, DashboardState, UiEvent};
}

// Re-export main types at crate root
pub use crate::core::{DashError, DashResult};
pub use crate::dashboard::Dashboard;
