//! Metric cards

use serde::Serialize;

use super::{plain_number, Arrow, Tone};
use crate::core::{Metric, MetricIcon, MetricUnit, MetricValue};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeIndicator {
    pub arrow: Arrow,
    /// Percent change, two decimals
    pub text: String,
    pub tone: Tone,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricCard {
    pub name: String,
    pub value: String,
    pub icon: MetricIcon,
    /// Hidden when the metric did not move
    pub change: Option<ChangeIndicator>,
}

pub fn format_metric_value(metric: &Metric) -> String {
    match (&metric.value, metric.unit) {
        (MetricValue::Number(v), MetricUnit::Percent) => format!("{}%", plain_number(*v)),
        (MetricValue::Number(v), MetricUnit::Plain) => format!("{:.2}", v),
        (MetricValue::Text(text), _) => text.clone(),
    }
}

pub fn change_indicator(metric: &Metric) -> Option<ChangeIndicator> {
    if metric.change == 0.0 {
        return None;
    }
    let rising = metric.change >= 0.0;
    Some(ChangeIndicator {
        arrow: if rising { Arrow::Up } else { Arrow::Down },
        text: format!("{:.2}%", metric.change_percent),
        tone: if rising { Tone::Positive } else { Tone::Negative },
    })
}

pub fn metric_card(metric: &Metric) -> MetricCard {
    MetricCard {
        name: metric.name.clone(),
        value: format_metric_value(metric),
        icon: metric.icon,
        change: change_indicator(metric),
    }
}

pub fn metric_cards(metrics: &[Metric]) -> Vec<MetricCard> {
    metrics.iter().map(metric_card).collect()
}
