use crate::core::{DataMode, ExpiryTenor};
use crate::notify::ToastId;
use crate::surface::HighlightMode;

/// User interaction with the dashboard
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    ModeChanged { mode: DataMode },
    UnderlyingSelected { symbol: String },
    ExpiryChanged { tenor: ExpiryTenor },
    StrikeSearchChanged { query: String },
    RefreshRequested,
    SettingsApplied { highlight: HighlightMode, threshold: f64 },
    ToastDismissed { id: ToastId },
}

/// Panel whose records come from the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    Metrics,
    Chain,
    Anomalies,
    Trades,
    Risk,
    Performance,
    Underlyings,
}

impl Panel {
    pub const ALL: [Panel; 7] = [
        Panel::Underlyings,
        Panel::Metrics,
        Panel::Chain,
        Panel::Anomalies,
        Panel::Trades,
        Panel::Risk,
        Panel::Performance,
    ];
}

/// Something the user should be told about
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    ModeSwitched(DataMode),
    UnderlyingSelected(String),
    Rejected(String),
}

/// Side effects requested by the reducer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reaction {
    /// State changed and views should be rebuilt
    pub changed: bool,
    pub fetch: Vec<Panel>,
    pub notice: Option<Notice>,
    /// Surface must be painted again
    pub repaint: bool,
    pub dismiss: Option<ToastId>,
    /// Stamp the last-update clock
    pub stamp: bool,
}

impl Reaction {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn changed() -> Self {
        Self {
            changed: true,
            ..Default::default()
        }
    }

    pub fn fetch(mut self, panel: Panel) -> Self {
        if !self.fetch.contains(&panel) {
            self.fetch.push(panel);
        }
        self
    }

    pub fn notify(mut self, notice: Notice) -> Self {
        self.notice = Some(notice);
        self
    }
}
