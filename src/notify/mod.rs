//! Toast notifications
//!
//! `ToastBus` is an explicit event store: toasts are published immediately or
//! scheduled through the [`Runtime`], expire after their own duration, and every
//! state change is appended to a drainable event log.

use std::collections::{BTreeMap, VecDeque};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::runtime::{Handle, Runtime};

/// Monotonic toast identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ToastId(u64);

impl ToastId {
    pub fn id(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastVariant {
    #[default]
    Default,
    Destructive,
}

/// What to show, before it is shown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToastSpec {
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
    pub duration: Duration,
}

impl ToastSpec {
    pub fn new(title: impl Into<String>, description: impl Into<String>, duration: Duration) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: ToastVariant::Default,
            duration,
        }
    }

    pub fn destructive(mut self) -> Self {
        self.variant = ToastVariant::Destructive;
        self
    }
}

/// A visible toast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Toast {
    pub id: ToastId,
    pub spec: ToastSpec,
    pub shown_at: Duration,
}

impl Toast {
    pub fn expires_at(&self) -> Duration {
        self.shown_at + self.spec.duration
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToastEvent {
    Shown(ToastId),
    Dismissed(ToastId),
    Expired(ToastId),
}

#[derive(Debug)]
pub struct ToastBus {
    limit: usize,
    next_id: u64,
    active: VecDeque<Toast>,
    scheduled: BTreeMap<Handle, ToastSpec>,
    events: Vec<ToastEvent>,
}

impl Default for ToastBus {
    fn default() -> Self {
        Self::new(3)
    }
}

impl ToastBus {
    /// Bus showing at most `limit` toasts at once (at least one)
    pub fn new(limit: usize) -> Self {
        Self {
            limit: limit.max(1),
            next_id: 0,
            active: VecDeque::new(),
            scheduled: BTreeMap::new(),
            events: Vec::new(),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Show a toast now; the oldest visible toast is dismissed when over the limit
    pub fn publish(&mut self, spec: ToastSpec, now: Duration) -> ToastId {
        self.next_id += 1;
        let id = ToastId(self.next_id);
        debug!(id = id.0, title = %spec.title, "Toast shown");

        self.active.push_back(Toast {
            id,
            spec,
            shown_at: now,
        });
        self.events.push(ToastEvent::Shown(id));

        while self.active.len() > self.limit {
            if let Some(evicted) = self.active.pop_front() {
                self.events.push(ToastEvent::Dismissed(evicted.id));
            }
        }
        id
    }

    /// Show a toast after `delay`
    pub fn schedule(&mut self, rt: &mut Runtime, spec: ToastSpec, delay: Duration) -> Handle {
        let handle = rt.set_timeout(delay);
        self.scheduled.insert(handle, spec);
        handle
    }

    /// Publish the toast behind a fired timer; `None` if the timer is not ours
    pub fn on_timer(&mut self, handle: Handle, now: Duration) -> Option<ToastId> {
        let spec = self.scheduled.remove(&handle)?;
        Some(self.publish(spec, now))
    }

    /// Remove toasts whose duration has elapsed
    pub fn expire(&mut self, now: Duration) -> Vec<ToastId> {
        let (expired, kept): (Vec<Toast>, Vec<Toast>) =
            self.active.drain(..).partition(|t| t.expires_at() <= now);
        self.active = kept.into();

        let ids: Vec<ToastId> = expired.iter().map(|t| t.id).collect();
        self.events.extend(ids.iter().map(|&id| ToastEvent::Expired(id)));
        ids
    }

    pub fn dismiss(&mut self, id: ToastId) -> bool {
        let Some(pos) = self.active.iter().position(|t| t.id == id) else {
            return false;
        };
        self.active.remove(pos);
        self.events.push(ToastEvent::Dismissed(id));
        true
    }

    /// Cancel every scheduled toast; returns how many were cancelled
    pub fn cancel_all(&mut self, rt: &mut Runtime) -> usize {
        let scheduled = std::mem::take(&mut self.scheduled);
        for handle in scheduled.keys() {
            rt.clear_timeout(*handle);
        }
        scheduled.len()
    }

    pub fn drain_events(&mut self) -> Vec<ToastEvent> {
        std::mem::take(&mut self.events)
    }

    /// Visible toasts, oldest first
    pub fn active(&self) -> impl Iterator<Item = &Toast> {
        self.active.iter()
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn scheduled_count(&self) -> usize {
        self.scheduled.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(title: &str, secs: u64) -> ToastSpec {
        ToastSpec::new(title, "", Duration::from_secs(secs))
    }

    #[test]
    fn test_publish_and_expire() {
        let mut bus = ToastBus::default();
        let a = bus.publish(spec("a", 5), Duration::ZERO);
        let b = bus.publish(spec("b", 3), Duration::ZERO);
        assert!(a < b);

        assert_eq!(bus.expire(Duration::from_secs(3)), vec![b]);
        assert_eq!(bus.active_count(), 1);
        assert_eq!(bus.expire(Duration::from_secs(5)), vec![a]);
        assert_eq!(
            bus.drain_events(),
            vec![
                ToastEvent::Shown(a),
                ToastEvent::Shown(b),
                ToastEvent::Expired(b),
                ToastEvent::Expired(a)
            ]
        );
        assert!(bus.drain_events().is_empty());
    }

    #[test]
    fn test_limit_evicts_oldest() {
        let mut bus = ToastBus::new(2);
        let first = bus.publish(spec("1", 5), Duration::ZERO);
        bus.publish(spec("2", 5), Duration::ZERO);
        bus.publish(spec("3", 5), Duration::ZERO);

        let titles: Vec<_> = bus.active().map(|t| t.spec.title.as_str()).collect();
        assert_eq!(titles, vec!["2", "3"]);
        assert!(bus.drain_events().contains(&ToastEvent::Dismissed(first)));
    }

    #[test]
    fn test_scheduled_toast_fires_after_delay() {
        let mut rt = Runtime::new();
        let mut bus = ToastBus::default();
        bus.schedule(&mut rt, spec("alert", 8).destructive(), Duration::from_secs(10));

        assert!(rt.advance(Duration::from_secs(9)).is_empty());
        let fired = rt.advance(Duration::from_secs(1));
        assert_eq!(fired.len(), 1);

        let id = bus.on_timer(fired[0].handle(), rt.now()).unwrap();
        let toast = bus.active().next().unwrap();
        assert_eq!(toast.id, id);
        assert_eq!(toast.spec.variant, ToastVariant::Destructive);
        assert_eq!(toast.expires_at(), Duration::from_secs(18));
    }

    #[test]
    fn test_cancel_all_stops_pending() {
        let mut rt = Runtime::new();
        let mut bus = ToastBus::default();
        bus.schedule(&mut rt, spec("later", 3), Duration::from_secs(10));

        assert_eq!(bus.cancel_all(&mut rt), 1);
        assert_eq!(rt.pending(), 0);
        assert!(rt.advance(Duration::from_secs(60)).is_empty());
        assert_eq!(bus.scheduled_count(), 0);
    }

    #[test]
    fn test_dismiss() {
        let mut bus = ToastBus::default();
        let id = bus.publish(spec("x", 5), Duration::ZERO);
        assert!(bus.dismiss(id));
        assert!(!bus.dismiss(id));
        assert_eq!(bus.active_count(), 0);
    }
}
