//! Fixed figures for the overview page. The stats endpoint's payload is not
//! interpreted yet, so the cards and chart show placeholder data.

use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StatCard {
    pub title: &'static str,
    pub value: &'static str,
    pub change: &'static str,
    /// `up` or `down`
    pub trend: &'static str,
}

pub fn analytics_cards() -> Vec<StatCard> {
    vec![
        StatCard { title: "Total Users", value: "2,847", change: "+12.5%", trend: "up" },
        StatCard { title: "Active Alerts", value: "1,234", change: "+8.2%", trend: "up" },
        StatCard { title: "Response Time", value: "2.4m", change: "-5.1%", trend: "down" },
        StatCard { title: "Monthly Reports", value: "847", change: "+15.3%", trend: "up" },
    ]
}

pub const CHART_MAX: u32 = 500;

pub const ALERT_SERIES: [(&str, &str); 4] = [
    ("Fire", "#1E40AF"),
    ("ICE", "#7DD3FC"),
    ("Police", "#3B82F6"),
    ("Ambulance", "#FCD34D"),
];

/// Alerts per month, in `ALERT_SERIES` order.
const MONTHLY_ALERTS: [(&str, [u32; 4]); 12] = [
    ("Jan", [380, 0, 0, 0]),
    ("Feb", [0, 150, 0, 0]),
    ("Mar", [0, 70, 0, 0]),
    ("April", [0, 0, 280, 0]),
    ("May", [0, 280, 380, 0]),
    ("June", [0, 280, 0, 0]),
    ("July", [0, 0, 0, 100]),
    ("Aug", [0, 0, 0, 240]),
    ("Sep", [0, 0, 380, 0]),
    ("Oct", [0, 0, 210, 0]),
    ("Nov", [0, 110, 0, 0]),
    ("Dec", [470, 0, 0, 0]),
];

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChartBar {
    pub series: &'static str,
    pub color: &'static str,
    pub value: u32,
    /// Bar height relative to `CHART_MAX`, 0–100.
    pub percent: u32,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChartMonth {
    pub month: &'static str,
    pub bars: Vec<ChartBar>,
}

pub fn alert_chart() -> Vec<ChartMonth> {
    MONTHLY_ALERTS
        .iter()
        .map(|&(month, values)| ChartMonth {
            month,
            bars: ALERT_SERIES
                .iter()
                .zip(values)
                .filter(|(_, value)| *value > 0)
                .map(|(&(series, color), value)| ChartBar {
                    series,
                    color,
                    value,
                    percent: value.min(CHART_MAX) * 100 / CHART_MAX,
                })
                .collect(),
        })
        .collect()
}
