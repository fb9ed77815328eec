//! Dashboard - composes every panel around one provider
//!
//! Owns the cooperative runtime, the toast bus and the surface renderer.
//! The host drives it with [`UiEvent`]s, `tick`, `frame` and
//! `container_resized`; panels read view-models built from [`DashboardState`].

pub mod event;
pub mod reducer;
pub mod state;

pub use event::*;
pub use state::*;

use std::time::Duration;

use chrono::{Local, NaiveDateTime};
use tracing::{debug, info, warn};

use crate::config::DashboardConfig;
use crate::core::{DashResult, DataMode};
use crate::data::DataProvider;
use crate::detect::{scan_surface, Dislocation};
use crate::notify::{Toast, ToastBus, ToastEvent, ToastSpec};
use crate::runtime::{Runtime, Size, Wakeup};
use crate::surface::{DisplayList, PaintOutcome, SurfaceGrid, SurfaceRenderer};
use crate::views::{
    self, AnomalyCard, ChainView, MetricCard, PerformanceView, RiskView, SelectorItem, StatusBar,
    TradeCard,
};

pub const WELCOME_TITLE: &str = "Welcome to Volatility Surface Arbitrage";
pub const WELCOME_BODY: &str = "Market data loaded successfully. System is ready.";
pub const ALERT_TITLE: &str = "New Volatility Anomaly Detected";

pub struct Dashboard<P: DataProvider> {
    provider: P,
    config: DashboardConfig,
    state: DashboardState,
    runtime: Runtime,
    toasts: ToastBus,
    surface: SurfaceRenderer,
    display: DisplayList,
    container: Option<Size>,
    started: bool,
}

impl<P: DataProvider> Dashboard<P> {
    pub fn new(provider: P, config: DashboardConfig) -> Self {
        let surface = SurfaceRenderer::new(config.surface.clone(), config.style.clone());
        let mut dashboard = Self {
            provider,
            state: DashboardState::from_config(&config),
            runtime: Runtime::new(),
            toasts: ToastBus::new(config.notifications.max_visible),
            surface,
            display: DisplayList::new(),
            container: None,
            started: false,
            config,
        };
        dashboard.apply_highlight();
        dashboard
    }

    /// Load every panel, mount the surface and queue the startup toasts
    pub fn start(&mut self, container: Option<Size>) -> DashResult<()> {
        self.state.underlyings = self.provider.underlyings()?;
        for panel in Panel::ALL.into_iter().filter(|p| *p != Panel::Underlyings) {
            self.fetch(panel);
        }
        self.state.last_update = Some(now_local());

        self.container = container;
        let outcome = self
            .surface
            .mount(&mut self.runtime, container, Some(&mut self.display));
        info!(?outcome, "Dashboard started");

        let notes = &self.config.notifications;
        let welcome = ToastSpec::new(WELCOME_TITLE, WELCOME_BODY, notes.welcome());
        self.toasts.publish(welcome, self.runtime.now());

        if notes.startup_alert {
            let alert = ToastSpec::new(ALERT_TITLE, self.alert_body(), notes.alert()).destructive();
            let delay = notes.alert_delay();
            self.toasts.schedule(&mut self.runtime, alert, delay);
        }

        self.started = true;
        Ok(())
    }

    /// Apply a user event; returns whether anything visible changed
    ///
    /// Events outside `start`..`shutdown` are ignored.
    pub fn dispatch(&mut self, ev: UiEvent) -> bool {
        if !self.started {
            debug!(?ev, "Event ignored: dashboard not running");
            return false;
        }
        let reaction = reducer::reduce(&mut self.state, ev);

        for panel in &reaction.fetch {
            self.fetch(*panel);
        }
        if reaction.stamp {
            self.state.last_update = Some(now_local());
        }
        if let Some(id) = reaction.dismiss {
            self.toasts.dismiss(id);
        }
        if let Some(notice) = &reaction.notice {
            self.announce(notice);
        }
        if reaction.repaint {
            self.apply_highlight();
            self.surface.repaint(Some(&mut self.display));
        }

        reaction.changed || reaction.notice.is_some() || reaction.dismiss.is_some()
    }

    /// Advance the virtual clock: fire due timers and expire toasts
    pub fn tick(&mut self, dt: Duration) -> Vec<ToastEvent> {
        for wakeup in self.runtime.advance(dt) {
            if let Wakeup::Timer { handle } = wakeup {
                self.toasts.on_timer(handle, self.runtime.now());
            }
        }
        self.toasts.expire(self.runtime.now());
        self.toasts.drain_events()
    }

    /// Deliver one frame to everything that requested it
    pub fn frame(&mut self) {
        for wakeup in self.runtime.next_frame() {
            self.surface
                .handle(&mut self.runtime, &wakeup, Some(&mut self.display));
        }
    }

    /// Host container changed size
    pub fn container_resized(&mut self, size: Size) -> Option<PaintOutcome> {
        self.container = Some(size);
        let mut outcome = None;
        for wakeup in self.runtime.resize(size) {
            if let Some(painted) = self
                .surface
                .handle(&mut self.runtime, &wakeup, Some(&mut self.display))
            {
                outcome = Some(painted);
            }
        }
        outcome
    }

    /// Unmount the surface and cancel every pending timer
    pub fn shutdown(&mut self) {
        if !self.started {
            return;
        }
        self.surface.unmount(&mut self.runtime);
        let cancelled = self.toasts.cancel_all(&mut self.runtime);
        self.started = false;
        info!(cancelled, "Dashboard shut down");
    }

    fn fetch(&mut self, panel: Panel) {
        let result = match panel {
            Panel::Metrics => self
                .provider
                .fetch_metrics(self.state.mode)
                .map(|v| self.state.metrics = v),
            Panel::Chain => self
                .provider
                .fetch_option_chain(&self.state.underlying, self.state.tenor)
                .map(|v| self.state.chain = Some(v)),
            Panel::Anomalies => self
                .provider
                .fetch_anomalies()
                .map(|v| self.state.anomalies = v),
            Panel::Trades => self.provider.fetch_trades().map(|v| self.state.trades = v),
            Panel::Risk => self.provider.fetch_risk().map(|v| self.state.risk = v),
            Panel::Performance => self
                .provider
                .fetch_performance()
                .map(|v| self.state.performance = v),
            Panel::Underlyings => self
                .provider
                .underlyings()
                .map(|v| self.state.underlyings = v),
        };

        if let Err(e) = result {
            warn!(?panel, "Fetch failed: {}", e);
            self.state.last_error = Some(e.to_string());
            let spec = ToastSpec::new("Data Error", e.to_string(), self.config.notifications.error())
                .destructive();
            self.toasts.publish(spec, self.runtime.now());
        }
    }

    fn announce(&mut self, notice: &Notice) {
        let notes = &self.config.notifications;
        let spec = match notice {
            Notice::ModeSwitched(mode) => {
                info!(mode = mode.label(), "Data mode switched");
                ToastSpec::new(mode.switch_title(), mode.switch_description(), notes.mode_switch())
            }
            Notice::UnderlyingSelected(symbol) => {
                let Some(underlying) = self.state.current_underlying() else {
                    return;
                };
                info!(symbol = %symbol, "Underlying selected");
                ToastSpec::new(
                    format!("Selected {}", underlying.symbol),
                    views::selection_summary(underlying),
                    notes.selection(),
                )
            }
            Notice::Rejected(msg) => {
                ToastSpec::new("Request Rejected", msg.clone(), notes.error()).destructive()
            }
        };
        self.toasts.publish(spec, self.runtime.now());
    }

    fn apply_highlight(&mut self) {
        let predicate = self.state.highlight.predicate(&self.state.detection);
        self.surface.set_predicate(predicate);
    }

    fn alert_body(&self) -> String {
        match self.state.anomalies.first() {
            Some(a) => format!(
                "{} {} Put shows significant mispricing ({}% vs {}% expected).",
                a.ticker, a.strike, a.implied_vol, a.expected_vol
            ),
            None => "Surface dislocation detected.".to_string(),
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub fn surface(&self) -> &SurfaceRenderer {
        &self.surface
    }

    /// Last paint of the volatility surface
    pub fn surface_display(&self) -> &DisplayList {
        &self.display
    }

    pub fn container(&self) -> Option<Size> {
        self.container
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn toasts(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.active()
    }

    pub fn mode(&self) -> DataMode {
        self.state.mode
    }

    /// Dislocations on the current surface under the current detector settings
    pub fn scan(&self) -> Vec<Dislocation> {
        let grid = SurfaceGrid::generate(self.surface.params());
        scan_surface(&grid, &self.state.detection)
    }

    pub fn metric_cards(&self) -> Vec<MetricCard> {
        views::metric_cards(&self.state.metrics)
    }

    pub fn chain_view(&self) -> Option<ChainView> {
        self.state
            .chain
            .as_ref()
            .map(|c| views::chain_view(c, &self.state.strike_query))
    }

    pub fn anomaly_cards(&self) -> Vec<AnomalyCard> {
        views::anomaly_cards(&self.state.anomalies)
    }

    pub fn trade_cards(&self) -> Vec<TradeCard> {
        views::trade_cards(&self.state.trades)
    }

    pub fn risk_view(&self) -> RiskView {
        views::risk_view(&self.state.risk)
    }

    pub fn performance_view(&self) -> PerformanceView {
        views::performance_view(&self.state.performance)
    }

    pub fn selector_items(&self, query: &str) -> Vec<SelectorItem> {
        views::selector_items(&self.state.underlyings, &self.state.underlying, query)
    }

    pub fn status_bar(&self) -> StatusBar {
        let at = self.state.last_update.unwrap_or_else(now_local);
        views::status_bar(self.state.mode, at)
    }
}

impl<P: DataProvider> Drop for Dashboard<P> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn now_local() -> NaiveDateTime {
    Local::now().naive_local()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sample_snapshot;
    use crate::notify::ToastVariant;

    fn started() -> Dashboard<crate::data::DashboardSnapshot> {
        let mut dash = Dashboard::new(sample_snapshot(), DashboardConfig::default());
        dash.start(Some(Size::new(800.0, 400.0))).unwrap();
        dash
    }

    #[test]
    fn test_start_loads_panels_and_paints() {
        let dash = started();

        assert_eq!(dash.state().metrics[0].name, "VIX Index");
        assert_eq!(dash.chain_view().unwrap().rows.len(), 5);
        assert_eq!(dash.anomaly_cards().len(), 3);
        assert!(dash.surface().is_mounted());
        assert!(dash.surface_display().markers().count() == 121);

        let titles: Vec<_> = dash.toasts().map(|t| t.spec.title.clone()).collect();
        assert_eq!(titles, vec![WELCOME_TITLE]);
    }

    #[test]
    fn test_startup_alert_after_ten_seconds() {
        let mut dash = started();

        dash.tick(Duration::from_secs(5));
        assert_eq!(dash.toasts().count(), 0);

        dash.tick(Duration::from_secs(5));
        let alert = dash.toasts().next().unwrap();
        assert_eq!(alert.spec.title, ALERT_TITLE);
        assert_eq!(alert.spec.variant, ToastVariant::Destructive);
        assert_eq!(
            alert.spec.description,
            "SPY 420 Put shows significant mispricing (28.4% vs 22.1% expected)."
        );
    }

    #[test]
    fn test_select_underlying_toast() {
        let mut dash = started();
        assert!(dash.dispatch(UiEvent::UnderlyingSelected {
            symbol: "AAPL".to_string()
        }));

        let last = dash.toasts().last().unwrap();
        assert_eq!(last.spec.title, "Selected AAPL");
        assert_eq!(last.spec.description, "Market Cap: $2.87T | Sector: Technology");
        assert!(dash.chain_view().unwrap().rows.is_empty());
    }

    #[test]
    fn test_settings_repaint_surface() {
        let mut dash = started();
        assert_eq!(dash.surface_display().len(), 1 + 12 + 3 + 3 + 121 + 2);

        dash.dispatch(UiEvent::SettingsApplied {
            highlight: crate::surface::HighlightMode::Off,
            threshold: 2.5,
        });
        assert_eq!(dash.surface_display().len(), 1 + 12 + 3 + 3 + 121);
    }

    #[test]
    fn test_shutdown_cancels_everything() {
        let mut dash = started();
        dash.shutdown();

        assert!(!dash.surface().is_mounted());
        assert_eq!(dash.runtime().pending(), 0);
        assert!(dash.container_resized(Size::new(300.0, 300.0)).is_none());
        dash.tick(Duration::from_secs(30));
        assert!(dash.toasts().all(|t| t.spec.title != ALERT_TITLE));
    }

    #[test]
    fn test_events_after_shutdown_are_ignored() {
        let mut dash = started();
        dash.shutdown();
        let toasts_before = dash.toasts().count();
        let display_before = dash.surface_display().clone();

        assert!(!dash.dispatch(UiEvent::ModeChanged {
            mode: DataMode::Historical
        }));
        assert!(!dash.dispatch(UiEvent::SettingsApplied {
            highlight: crate::surface::HighlightMode::Off,
            threshold: 2.5,
        }));

        assert_eq!(dash.mode(), DataMode::Live);
        assert_eq!(dash.toasts().count(), toasts_before);
        assert_eq!(dash.surface_display(), &display_before);
    }

    #[test]
    fn test_events_before_start_are_ignored() {
        let mut dash = Dashboard::new(sample_snapshot(), DashboardConfig::default());
        assert!(!dash.dispatch(UiEvent::RefreshRequested));
        assert!(dash.state().metrics.is_empty());
    }

    #[test]
    fn test_scan_follows_threshold() {
        let mut dash = started();
        assert_eq!(dash.scan().len(), 1);

        dash.dispatch(UiEvent::SettingsApplied {
            highlight: crate::surface::HighlightMode::Detector,
            threshold: 50.0,
        });
        assert!(dash.scan().is_empty());
    }
}
