//! Panel view-models
//!
//! Pure functions from records to display rows. Each row carries its final
//! text plus a [`Tone`] so any front end (egui, terminal) renders it the same.

pub mod anomalies;
pub mod chain;
pub mod metrics;
pub mod performance;
pub mod risk;
pub mod selector;
pub mod status;
pub mod trades;

pub use anomalies::*;
pub use chain::*;
pub use metrics::*;
pub use performance::*;
pub use risk::*;
pub use selector::*;
pub use status::*;
pub use trades::*;

use serde::Serialize;

/// Semantic colour of a piece of text or badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Neutral,
    Positive,
    Negative,
    Warning,
    Destructive,
    Primary,
}

/// Direction indicator next to a change figure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Arrow {
    Up,
    Down,
}

impl Arrow {
    pub fn glyph(&self) -> &'static str {
        match self {
            Arrow::Up => "↗",
            Arrow::Down => "↘",
        }
    }
}

/// Shortest decimal form, `38.0` prints as `38`
pub(crate) fn plain_number(value: f64) -> String {
    format!("{}", value)
}
