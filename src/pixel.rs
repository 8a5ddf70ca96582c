//! Discrete "pixel" scaling for the hand-built bar chart.
//!
//! A column is a stack of equally sized squares. `resolution` squares
//! represent the largest value of the whole chart, so all columns share one
//! scale.

use crate::data::{Dataset, Series};
use crate::error::{DashboardError, Result};
use serde::Serialize;

pub const DEFAULT_RESOLUTION: u32 = 20;
pub const AXIS_TICK_COUNT: usize = 5;

/// Number of pixels that represent `value` when `resolution` pixels stand for
/// `max_value`.
///
/// # Errors
///
/// [`DashboardError::InvalidArgument`] when `max_value` is not a finite positive
/// number, `resolution` is zero, or `value` is negative or not finite.
///
/// Values above `max_value` are not clamped, so the count can exceed
/// `resolution` and the column grows past its nominal height.
pub fn pixel_count(value: f64, max_value: f64, resolution: u32) -> Result<u32> {
    if !max_value.is_finite() || max_value <= 0.0 {
        return Err(DashboardError::invalid_argument(
            "max_value",
            format!("must be a finite number greater than zero, got {max_value}"),
        ));
    }
    if resolution == 0 {
        return Err(DashboardError::invalid_argument(
            "resolution",
            "must be greater than zero",
        ));
    }
    if !value.is_finite() || value < 0.0 {
        return Err(DashboardError::invalid_argument(
            "value",
            format!("must be a finite non-negative number, got {value}"),
        ));
    }

    let value_per_pixel = max_value / f64::from(resolution);
    let pixels = (value / value_per_pixel).round();
    if pixels >= f64::from(u32::MAX) {
        return Ok(u32::MAX);
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let count = pixels as u32;
    Ok(count)
}

/// Converts a tick or column position to `f64`. Positions stay far below
/// 2^52, so the conversion is exact.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn position_to_f64(position: usize) -> f64 {
    position as f64
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelScaler {
    max_value: f64,
    resolution: u32,
}

impl PixelScaler {
    pub fn new(max_value: f64, resolution: u32) -> Result<Self> {
        // Validates both arguments through the same path as a real lookup.
        pixel_count(0.0, max_value, resolution)?;
        Ok(Self {
            max_value,
            resolution,
        })
    }

    pub fn for_series(dataset: &Dataset, series: &[Series], resolution: u32) -> Result<Self> {
        let names = || {
            series
                .iter()
                .map(|s| s.key())
                .collect::<Vec<_>>()
                .join("+")
        };
        match dataset.max_of(series) {
            Some(max) if max > 0.0 => Self::new(max, resolution),
            _ => Err(DashboardError::EmptySeries { series: names() }),
        }
    }

    pub const fn max_value(&self) -> f64 {
        self.max_value
    }

    pub const fn resolution(&self) -> u32 {
        self.resolution
    }

    pub fn value_per_pixel(&self) -> f64 {
        self.max_value / f64::from(self.resolution)
    }

    pub fn pixels(&self, value: f64) -> Result<u32> {
        pixel_count(value, self.max_value, self.resolution)
    }

    /// Axis labels from the top of the column down to zero.
    pub fn axis_ticks(&self) -> Vec<u64> {
        let steps = position_to_f64(AXIS_TICK_COUNT - 1);
        (0..AXIS_TICK_COUNT)
            .map(|i| {
                let remaining = position_to_f64(AXIS_TICK_COUNT - 1 - i);
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let tick = (self.max_value * remaining / steps).round() as u64;
                tick
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PixelStack {
    pub series: Series,
    pub value: f64,
    pub pixels: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PixelColumn {
    pub label: String,
    pub stacks: Vec<PixelStack>,
}

impl PixelColumn {
    pub fn tallest(&self) -> u32 {
        self.stacks.iter().map(|s| s.pixels).max().unwrap_or(0)
    }
}

pub fn pixel_columns(
    dataset: &Dataset,
    series: &[Series],
    scaler: &PixelScaler,
) -> Result<Vec<PixelColumn>> {
    dataset
        .points()
        .iter()
        .map(|point| {
            let stacks = series
                .iter()
                .map(|&s| {
                    let value = point.value(s);
                    Ok(PixelStack {
                        series: s,
                        value,
                        pixels: scaler.pixels(value)?,
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(PixelColumn {
                label: point.label.clone(),
                stacks,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataPoint;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn scales_against_shared_maximum() {
        assert_eq!(pixel_count(60.0, 250.0, 20), Ok(5));
        assert_eq!(pixel_count(150.0, 250.0, 20), Ok(12));
        assert_eq!(pixel_count(0.0, 250.0, 20), Ok(0));
        assert_eq!(pixel_count(250.0, 250.0, 20), Ok(20));
    }

    #[test]
    fn rounds_half_away_from_zero() {
        // 31.25 / 12.5 = 2.5
        assert_eq!(pixel_count(31.25, 250.0, 20), Ok(3));
        assert_eq!(pixel_count(6.0, 250.0, 20), Ok(0));
    }

    #[test]
    fn values_above_maximum_are_not_clamped() {
        assert_eq!(pixel_count(500.0, 250.0, 20), Ok(40));
    }

    #[test]
    fn rejects_invalid_arguments() {
        for (value, max, resolution) in [
            (10.0, 0.0, 20),
            (10.0, -5.0, 20),
            (10.0, f64::NAN, 20),
            (10.0, f64::INFINITY, 20),
            (10.0, 250.0, 0),
            (-1.0, 250.0, 20),
            (f64::NAN, 250.0, 20),
        ] {
            let err = pixel_count(value, max, resolution).expect_err("must reject");
            assert!(
                err.is_invalid_argument(),
                "unexpected error for ({value}, {max}, {resolution}): {err}"
            );
        }
    }

    #[test]
    fn scaler_for_sample_series() {
        let scaler = PixelScaler::for_series(
            &Dataset::sample(),
            &[Series::Sales, Series::Rentals],
            DEFAULT_RESOLUTION,
        )
        .expect("sample has positive values");
        assert_eq!(scaler.max_value(), 250.0);
        assert_eq!(scaler.value_per_pixel(), 12.5);
        assert_eq!(scaler.axis_ticks(), vec![250, 188, 125, 63, 0]);
    }

    #[test]
    fn all_zero_series_cannot_be_scaled() {
        let dataset = Dataset::new(vec![DataPoint::new("Feb 12", 0.0, 0.0, 0.0, 0.0)])
            .expect("zeros are valid");
        let err = PixelScaler::for_series(&dataset, &[Series::Sales, Series::Rentals], 20)
            .expect_err("zero maximum");
        assert_eq!(
            err,
            DashboardError::EmptySeries {
                series: "sales+rentals".into()
            }
        );
    }

    #[test]
    fn builds_one_column_per_point() {
        let dataset = Dataset::sample();
        let scaler = PixelScaler::new(250.0, 20).expect("valid");
        let columns =
            pixel_columns(&dataset, &[Series::Sales, Series::Rentals], &scaler).expect("valid");

        assert_eq!(columns.len(), 7);
        let peak = &columns[4];
        assert_eq!(peak.label, "Feb 16");
        let counts: Vec<u32> = peak.stacks.iter().map(|s| s.pixels).collect();
        assert_eq!(counts, vec![20, 12]);
        assert_eq!(peak.tallest(), 20);
        // 60 -> 4.8 -> 5, 40 -> 3.2 -> 3
        let first: Vec<u32> = columns[0].stacks.iter().map(|s| s.pixels).collect();
        assert_eq!(first, vec![5, 3]);
    }

    proptest! {
        #[test]
        fn count_stays_within_resolution(
            max in 0.001f64..1_000_000.0,
            fraction in 0.0f64..=1.0,
            resolution in 1u32..500,
        ) {
            let value = max * fraction;
            let count = pixel_count(value, max, resolution).unwrap();
            prop_assert!(count <= resolution);
        }

        #[test]
        fn endpoints_map_to_zero_and_resolution(
            max in 0.001f64..1_000_000.0,
            resolution in 1u32..500,
        ) {
            prop_assert_eq!(pixel_count(0.0, max, resolution).unwrap(), 0);
            prop_assert_eq!(pixel_count(max, max, resolution).unwrap(), resolution);
        }
    }
}
