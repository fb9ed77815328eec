use super::event::*;
use super::state::DashboardState;
use crate::views::next_selection;

pub fn reduce(state: &mut DashboardState, ev: UiEvent) -> Reaction {
    match ev {
        UiEvent::ModeChanged { mode } => {
            if mode == state.mode {
                return Reaction::none();
            }
            state.mode = mode;
            Reaction::changed()
                .fetch(Panel::Metrics)
                .notify(Notice::ModeSwitched(mode))
        }
        UiEvent::UnderlyingSelected { symbol } => {
            let next = next_selection(&state.underlying, &symbol, &state.default_underlying);
            if !state.underlyings.is_empty() && !state.is_listed(&next) {
                let msg = format!("Underlying {} is not available.", next);
                state.last_error = Some(msg.clone());
                return Reaction::none().notify(Notice::Rejected(msg));
            }
            state.underlying = next.clone();
            state.strike_query.clear();
            Reaction::changed()
                .fetch(Panel::Chain)
                .notify(Notice::UnderlyingSelected(next))
        }
        UiEvent::ExpiryChanged { tenor } => {
            if tenor == state.tenor {
                return Reaction::none();
            }
            state.tenor = tenor;
            Reaction::changed().fetch(Panel::Chain)
        }
        UiEvent::StrikeSearchChanged { query } => {
            if query == state.strike_query {
                return Reaction::none();
            }
            state.strike_query = query;
            Reaction::changed()
        }
        UiEvent::RefreshRequested => {
            let mut reaction = Reaction::changed();
            for panel in Panel::ALL {
                reaction = reaction.fetch(panel);
            }
            reaction.repaint = true;
            reaction.stamp = true;
            reaction
        }
        UiEvent::SettingsApplied {
            highlight,
            threshold,
        } => {
            if !(threshold.is_finite() && threshold > 0.0) {
                let msg = format!("Detector threshold must be positive, got {}.", threshold);
                state.last_error = Some(msg.clone());
                return Reaction::none().notify(Notice::Rejected(msg));
            }
            state.highlight = highlight;
            state.detection.threshold = threshold;
            Reaction {
                repaint: true,
                ..Reaction::changed()
            }
        }
        UiEvent::ToastDismissed { id } => Reaction {
            dismiss: Some(id),
            ..Reaction::none()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DataMode, ExpiryTenor};
    use crate::data::{sample_snapshot, DataProvider};
    use crate::surface::HighlightMode;

    fn state() -> DashboardState {
        DashboardState {
            underlying: "SPY".to_string(),
            default_underlying: "SPY".to_string(),
            underlyings: sample_snapshot().underlyings().unwrap(),
            ..Default::default()
        }
    }

    #[test]
    fn test_mode_change_fetches_only_metrics() {
        let mut s = state();
        let reaction = reduce(
            &mut s,
            UiEvent::ModeChanged {
                mode: DataMode::Historical,
            },
        );

        assert_eq!(s.mode, DataMode::Historical);
        assert_eq!(reaction.fetch, vec![Panel::Metrics]);
        assert_eq!(reaction.notice, Some(Notice::ModeSwitched(DataMode::Historical)));
        assert!(!reaction.repaint);

        let again = reduce(
            &mut s,
            UiEvent::ModeChanged {
                mode: DataMode::Historical,
            },
        );
        assert_eq!(again, Reaction::none());
    }

    #[test]
    fn test_underlying_selection() {
        let mut s = state();
        s.strike_query = "42".to_string();

        let reaction = reduce(
            &mut s,
            UiEvent::UnderlyingSelected {
                symbol: "aapl".to_string(),
            },
        );
        assert_eq!(s.underlying, "AAPL");
        assert!(s.strike_query.is_empty());
        assert_eq!(reaction.fetch, vec![Panel::Chain]);

        // picking the same symbol again falls back to SPY
        reduce(
            &mut s,
            UiEvent::UnderlyingSelected {
                symbol: "AAPL".to_string(),
            },
        );
        assert_eq!(s.underlying, "SPY");
    }

    #[test]
    fn test_reselect_uses_configured_default() {
        let mut config = crate::config::DashboardConfig::default();
        config.default_underlying = "aapl".to_string();
        let mut s = DashboardState {
            underlyings: sample_snapshot().underlyings().unwrap(),
            ..DashboardState::from_config(&config)
        };
        assert_eq!(s.underlying, "AAPL");

        for _ in 0..2 {
            reduce(
                &mut s,
                UiEvent::UnderlyingSelected {
                    symbol: "MSFT".to_string(),
                },
            );
        }
        assert_eq!(s.underlying, "AAPL");
    }

    #[test]
    fn test_unknown_underlying_rejected() {
        let mut s = state();
        let reaction = reduce(
            &mut s,
            UiEvent::UnderlyingSelected {
                symbol: "ZZZZ".to_string(),
            },
        );

        assert!(!reaction.changed);
        assert!(reaction.fetch.is_empty());
        assert!(matches!(reaction.notice, Some(Notice::Rejected(_))));
        assert_eq!(s.underlying, "SPY");
    }

    #[test]
    fn test_expiry_and_search() {
        let mut s = state();
        let reaction = reduce(
            &mut s,
            UiEvent::ExpiryChanged {
                tenor: ExpiryTenor::D60,
            },
        );
        assert_eq!(reaction.fetch, vec![Panel::Chain]);

        let reaction = reduce(
            &mut s,
            UiEvent::StrikeSearchChanged {
                query: "424".to_string(),
            },
        );
        assert!(reaction.changed);
        assert!(reaction.fetch.is_empty());
    }

    #[test]
    fn test_refresh_fetches_everything() {
        let mut s = state();
        let reaction = reduce(&mut s, UiEvent::RefreshRequested);
        assert_eq!(reaction.fetch.len(), Panel::ALL.len());
        assert!(reaction.repaint && reaction.stamp);
    }

    #[test]
    fn test_settings() {
        let mut s = state();
        let reaction = reduce(
            &mut s,
            UiEvent::SettingsApplied {
                highlight: HighlightMode::Always,
                threshold: 3.0,
            },
        );
        assert!(reaction.repaint);
        assert_eq!(s.highlight, HighlightMode::Always);
        assert_eq!(s.detection.threshold, 3.0);

        let rejected = reduce(
            &mut s,
            UiEvent::SettingsApplied {
                highlight: HighlightMode::Off,
                threshold: -1.0,
            },
        );
        assert!(!rejected.repaint);
        assert_eq!(s.highlight, HighlightMode::Always);
    }
}
