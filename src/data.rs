//! Sample performance series and keyed value lookups.
//!
//! Every consumer reads values through a [`Series`] key. Nothing indexes a
//! point's fields by position, so reordering the configured series never
//! changes which value a tooltip or bar shows.

use crate::error::{DashboardError, Result};
use crate::formatting::{format_fraction_percent, format_price, format_thousands};
use crate::theme;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Series {
    Price,
    Sales,
    Rentals,
    Mindshare,
}

impl Series {
    pub const ALL: [Self; 4] = [Self::Price, Self::Sales, Self::Rentals, Self::Mindshare];

    pub const fn key(self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::Sales => "sales",
            Self::Rentals => "rentals",
            Self::Mindshare => "mindshare",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Price => "Price",
            Self::Sales => "Sales",
            Self::Rentals => "Rentals",
            Self::Mindshare => "Mindshare",
        }
    }

    pub const fn color(self) -> &'static str {
        match self {
            Self::Price | Self::Sales => theme::ACCENT,
            Self::Rentals => theme::ACCENT_SOFT,
            Self::Mindshare => theme::RENT,
        }
    }

    /// Unit conversion used by tooltips and card values.
    pub fn format_value(self, value: f64) -> String {
        match self {
            Self::Price => format_price(value),
            Self::Sales | Self::Rentals => format_thousands(value),
            Self::Mindshare => format_fraction_percent(value),
        }
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub label: String,
    pub price: f64,
    pub sales: f64,
    pub rentals: f64,
    pub mindshare: f64,
}

impl DataPoint {
    pub fn new(label: &str, price: f64, sales: f64, rentals: f64, mindshare: f64) -> Self {
        Self {
            label: label.to_string(),
            price,
            sales,
            rentals,
            mindshare,
        }
    }

    pub const fn value(&self, series: Series) -> f64 {
        match series {
            Series::Price => self.price,
            Series::Sales => self.sales,
            Series::Rentals => self.rentals,
            Series::Mindshare => self.mindshare,
        }
    }

    fn validate(&self) -> Result<()> {
        for series in Series::ALL {
            let value = self.value(series);
            if !value.is_finite() || value < 0.0 {
                return Err(DashboardError::InvalidDataPoint {
                    label: self.label.clone(),
                    reason: format!("{series} must be a finite non-negative number, got {value}"),
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    points: Vec<DataPoint>,
}

impl Dataset {
    pub fn new(points: Vec<DataPoint>) -> Result<Self> {
        for point in &points {
            point.validate()?;
        }
        Ok(Self { points })
    }

    pub fn sample() -> Self {
        Self {
            points: vec![
                DataPoint::new("Feb 12", 0.001, 60.0, 40.0, 0.12),
                DataPoint::new("Feb 13", 0.0015, 90.0, 60.0, 0.15),
                DataPoint::new("Feb 14", 0.001, 70.0, 50.0, 0.11),
                DataPoint::new("Feb 15", 0.002, 120.0, 80.0, 0.18),
                DataPoint::new("Feb 16", 0.006, 250.0, 150.0, 0.25),
                DataPoint::new("Feb 17", 0.004, 180.0, 120.0, 0.22),
                DataPoint::new("Feb 18", 0.003, 150.0, 100.0, 0.20),
            ],
        }
    }

    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&DataPoint> {
        self.points.first()
    }

    pub fn latest(&self) -> Option<&DataPoint> {
        self.points.last()
    }

    pub fn values(&self, series: Series) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(move |point| point.value(series))
    }

    /// Largest value across every listed series, `None` when nothing is listed
    /// or the dataset is empty.
    pub fn max_of(&self, series: &[Series]) -> Option<f64> {
        series
            .iter()
            .flat_map(|&s| self.values(s))
            .fold(None, |acc: Option<f64>, value| {
                Some(acc.map_or(value, |current| current.max(value)))
            })
    }

    pub fn tooltip(&self, index: usize, series: &[Series]) -> Option<TooltipPayload> {
        let point = self.points.get(index)?;
        let values = series.iter().map(|&s| (s, point.value(s))).collect();
        Some(TooltipPayload {
            label: point.label.clone(),
            values,
        })
    }
}

/// Values shown when hovering one chart category.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipPayload {
    pub label: String,
    values: FxHashMap<Series, f64>,
}

impl TooltipPayload {
    pub fn get(&self, series: Series) -> Option<f64> {
        self.values.get(&series).copied()
    }

    pub fn lines(&self, order: &[Series]) -> Vec<String> {
        order
            .iter()
            .filter_map(|&series| {
                self.get(series)
                    .map(|value| format!("{}: {}", series.label(), series.format_value(value)))
            })
            .collect()
    }

    pub fn title_text(&self, order: &[Series]) -> String {
        let mut lines = vec![self.label.clone()];
        lines.extend(self.lines(order));
        lines.join("\n")
    }
}
