//! Metric card content.
//!
//! Card layout is chosen by [`MetricKind`], never by comparing display titles.

use crate::change::{ChangeDirection, format_change_or_placeholder};
use crate::data::{Dataset, Series};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MetricKind {
    Simple {
        value: String,
        #[serde(default)]
        change: Option<String>,
    },
    Gauge {
        value: String,
        #[serde(default)]
        change: Option<String>,
    },
    RatingBars {
        value: String,
        ratings: Vec<f64>,
    },
}

impl MetricKind {
    pub fn value(&self) -> &str {
        match self {
            Self::Simple { value, .. }
            | Self::Gauge { value, .. }
            | Self::RatingBars { value, .. } => value,
        }
    }

    pub fn change(&self) -> Option<&str> {
        match self {
            Self::Simple { change, .. } | Self::Gauge { change, .. } => change.as_deref(),
            Self::RatingBars { .. } => None,
        }
    }

    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Simple { .. } => "simple",
            Self::Gauge { .. } => "gauge",
            Self::RatingBars { .. } => "rating_bars",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricCard {
    pub title: String,
    #[serde(flatten)]
    pub kind: MetricKind,
}

impl MetricCard {
    pub fn simple(title: &str, value: &str, change: Option<&str>) -> Self {
        Self {
            title: title.to_string(),
            kind: MetricKind::Simple {
                value: value.to_string(),
                change: change.map(str::to_string),
            },
        }
    }

    pub fn gauge(title: &str, value: &str, change: Option<&str>) -> Self {
        Self {
            title: title.to_string(),
            kind: MetricKind::Gauge {
                value: value.to_string(),
                change: change.map(str::to_string),
            },
        }
    }

    pub fn rating_bars(title: &str, value: &str, ratings: &[f64]) -> Self {
        Self {
            title: title.to_string(),
            kind: MetricKind::RatingBars {
                value: value.to_string(),
                ratings: ratings.to_vec(),
            },
        }
    }

    pub fn direction(&self) -> ChangeDirection {
        self.kind
            .change()
            .map_or(ChangeDirection::Flat, ChangeDirection::from_label)
    }
}

/// Width of one rating bar, where a rating of 5 fills the card.
pub fn rating_width_percent(rating: f64) -> f64 {
    rating * 20.0
}

/// A card as written in configuration. `Trend` cards are computed from the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CardSpec {
    Trend {
        title: String,
        trend: Series,
        #[serde(default)]
        caption: Option<String>,
    },
    Fixed(MetricCard),
}

impl CardSpec {
    pub fn resolve(&self, dataset: &Dataset) -> MetricCard {
        match self {
            Self::Fixed(card) => card.clone(),
            Self::Trend {
                title,
                trend,
                caption,
            } => trend_card(title, *trend, caption.as_deref(), dataset),
        }
    }
}

fn trend_card(title: &str, series: Series, caption: Option<&str>, dataset: &Dataset) -> MetricCard {
    let (Some(first), Some(latest)) = (dataset.first(), dataset.latest()) else {
        return MetricCard::simple(title, "-", Some(crate::change::CHANGE_PLACEHOLDER));
    };
    let value = series.format_value(latest.value(series));
    let change = format_change_or_placeholder(latest.value(series), first.value(series));
    let suffix = caption.map_or_else(|| format!("vs {}", first.label), str::to_string);
    MetricCard::simple(title, &value, Some(&format!("{change} {suffix}")))
}

pub fn sample_cards() -> Vec<CardSpec> {
    vec![
        CardSpec::Fixed(MetricCard::simple(
            "Average Deal Size",
            "$485K",
            Some("+12.3% vs last month"),
        )),
        CardSpec::Fixed(MetricCard::gauge(
            "Conversion Rate",
            "75%",
            Some("+5% vs last month"),
        )),
        CardSpec::Fixed(MetricCard::rating_bars(
            "Client Satisfaction",
            "4.7",
            &[4.8, 4.2, 4.5, 4.9, 4.7],
        )),
        CardSpec::Trend {
            title: "Sales Momentum".to_string(),
            trend: Series::Sales,
            caption: None,
        },
        CardSpec::Trend {
            title: "Mindshare".to_string(),
            trend: Series::Mindshare,
            caption: None,
        },
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailStat {
    pub label: String,
    pub value: String,
    pub change: Option<String>,
}

impl DetailStat {
    fn new(label: &str, value: &str, change: Option<&str>) -> Self {
        Self {
            label: label.to_string(),
            value: value.to_string(),
            change: change.map(str::to_string),
        }
    }
}

pub fn sample_details() -> Vec<DetailStat> {
    vec![
        DetailStat::new("Total Revenue", "$45,231.89", Some("+20.1% from last month")),
        DetailStat::new("Active Listings", "24", None),
        DetailStat::new("Pending Deals", "7", None),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KpiIcon {
    Dollar,
    Home,
    Users,
    Trending,
}

impl KpiIcon {
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Dollar => "$",
            Self::Home => "\u{2302}",
            Self::Users => "\u{263a}",
            Self::Trending => "\u{2197}",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiCard {
    pub title: String,
    pub value: String,
    pub change: String,
    pub icon: KpiIcon,
    pub rank: Option<u32>,
}

impl KpiCard {
    pub fn direction(&self) -> ChangeDirection {
        ChangeDirection::from_label(&self.change)
    }
}
