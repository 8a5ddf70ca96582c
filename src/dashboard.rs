//! The single parameterised dashboard model.
//!
//! Everything the page, the terminal summary and the exports show is resolved
//! here once from a [`DashboardConfig`]. Renderers only read it.

use crate::agent::AgentOverview;
use crate::cards::{DetailStat, MetricCard, sample_details};
use crate::config::{ChartConfig, DashboardConfig, DashboardView};
use crate::data::{Dataset, Series};
use crate::error::Result;
use crate::events::{RecentEvent, sample_events};
use crate::pins::{CardIndex, PinSet};
use crate::pixel::{PixelColumn, PixelScaler, PixelStack, pixel_columns};
use crate::theme::ThemeMode;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct Dashboard {
    pub title: String,
    pub theme: ThemeMode,
    pub view: DashboardView,
    pub dataset: Dataset,
    pub chart: ChartConfig,
    pub cards: Vec<MetricCard>,
    pub pinned_first: bool,
    pub details: Vec<DetailStat>,
    pub events: Vec<RecentEvent>,
    pub agent: AgentOverview,
    pub pixel_scaler: Option<PixelScaler>,
    pub pixel_columns: Vec<PixelColumn>,
    pins: PinSet,
}

impl Dashboard {
    pub fn from_config(config: &DashboardConfig) -> Result<Self> {
        Self::with_dataset(config, Dataset::sample())
    }

    pub fn with_dataset(config: &DashboardConfig, dataset: Dataset) -> Result<Self> {
        config.validate()?;

        let cards: Vec<MetricCard> = config
            .cards
            .iter()
            .map(|spec| spec.resolve(&dataset))
            .collect();

        let mut events = sample_events();
        if let Some(limit) = config.events_limit {
            events.truncate(limit);
        }

        let (pixel_scaler, pixel_columns) =
            build_pixel_columns(&dataset, &config.chart.pixel, config.resolution);

        let mut dashboard = Self {
            title: config.title.clone(),
            theme: config.theme,
            view: config.view,
            dataset,
            chart: config.chart.clone(),
            cards,
            pinned_first: config.pinned_first,
            details: sample_details(),
            events,
            agent: AgentOverview::sample(&config.agent_name),
            pixel_scaler,
            pixel_columns,
            pins: PinSet::new(),
        };

        for &index in &config.pins {
            if dashboard.toggle_pin(index).is_none() {
                warn!(
                    index,
                    cards = dashboard.cards.len(),
                    "ignoring pin for a card that does not exist"
                );
            }
        }

        debug!(
            cards = dashboard.cards.len(),
            pinned = dashboard.pins.len(),
            columns = dashboard.pixel_columns.len(),
            "dashboard resolved"
        );
        Ok(dashboard)
    }

    pub const fn pins(&self) -> &PinSet {
        &self.pins
    }

    /// Toggles a card's pin. `None` when no card has that index.
    pub fn toggle_pin(&mut self, index: CardIndex) -> Option<bool> {
        if index >= self.cards.len() {
            return None;
        }
        Some(self.pins.toggle(index))
    }

    pub fn ordered_cards(&self) -> Vec<(CardIndex, &MetricCard)> {
        if self.pinned_first {
            self.pins.pinned_first(&self.cards)
        } else {
            self.cards.iter().enumerate().collect()
        }
    }

    /// Series listed in a tooltip. The configured order wins; charted series
    /// that the configuration left out are appended.
    pub fn tooltip_series(&self) -> Vec<Series> {
        let mut series = self.chart.tooltip.clone();
        for charted in [self.chart.area, self.chart.line].into_iter().flatten() {
            if !series.contains(&charted) {
                series.push(charted);
            }
        }
        series
    }
}

/// Zero-length bars stand in when the series cannot be scaled.
fn build_pixel_columns(
    dataset: &Dataset,
    series: &[Series],
    resolution: u32,
) -> (Option<PixelScaler>, Vec<PixelColumn>) {
    let scaled = PixelScaler::for_series(dataset, series, resolution).and_then(|scaler| {
        pixel_columns(dataset, series, &scaler).map(|columns| (scaler, columns))
    });
    match scaled {
        Ok((scaler, columns)) => (Some(scaler), columns),
        Err(err) => {
            warn!(error = %err, "pixel chart falls back to empty bars");
            let columns = dataset
                .points()
                .iter()
                .map(|point| PixelColumn {
                    label: point.label.clone(),
                    stacks: series
                        .iter()
                        .map(|&s| PixelStack {
                            series: s,
                            value: point.value(s),
                            pixels: 0,
                        })
                        .collect(),
                })
                .collect();
            (None, columns)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataPoint;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_config_builds_sample_dashboard() {
        let dashboard = Dashboard::from_config(&DashboardConfig::default()).expect("valid");
        assert_eq!(dashboard.cards.len(), 5);
        assert_eq!(dashboard.events.len(), 5);
        assert!(dashboard.pins().is_empty());
        assert_eq!(
            dashboard.pixel_scaler.map(|s| s.max_value()),
            Some(250.0)
        );
        assert_eq!(dashboard.pixel_columns.len(), 7);
    }

    #[test]
    fn configured_pins_toggle_in_order_and_skip_unknown_cards() {
        let config = DashboardConfig {
            pins: vec![2, 42, 0, 2, 4],
            ..DashboardConfig::default()
        };
        let dashboard = Dashboard::from_config(&config).expect("valid");

        assert_eq!(dashboard.pins().iter().collect::<Vec<_>>(), vec![0, 4]);
        let order: Vec<CardIndex> = dashboard.ordered_cards().iter().map(|(i, _)| *i).collect();
        assert_eq!(order, vec![0, 4, 1, 2, 3]);
    }

    #[test]
    fn pinned_first_can_be_disabled() {
        let config = DashboardConfig {
            pins: vec![3],
            pinned_first: false,
            ..DashboardConfig::default()
        };
        let dashboard = Dashboard::from_config(&config).expect("valid");
        let order: Vec<CardIndex> = dashboard.ordered_cards().iter().map(|(i, _)| *i).collect();
        assert_eq!(order, vec![0, 1, 2, 3, 4]);
        assert!(dashboard.pins().is_pinned(3));
    }

    #[test]
    fn toggle_pin_rejects_out_of_range() {
        let mut dashboard = Dashboard::from_config(&DashboardConfig::default()).expect("valid");
        assert_eq!(dashboard.toggle_pin(5), None);
        assert_eq!(dashboard.toggle_pin(1), Some(true));
        assert_eq!(dashboard.toggle_pin(1), Some(false));
    }

    #[test]
    fn events_are_limited() {
        let config = DashboardConfig {
            events_limit: Some(2),
            ..DashboardConfig::default()
        };
        let dashboard = Dashboard::from_config(&config).expect("valid");
        assert_eq!(dashboard.events.len(), 2);
    }

    #[test]
    fn unscalable_series_render_empty_bars() {
        let dataset = Dataset::new(vec![
            DataPoint::new("Mar 1", 0.0, 0.0, 0.0, 0.0),
            DataPoint::new("Mar 2", 0.0, 0.0, 0.0, 0.0),
        ])
        .expect("valid");
        let dashboard =
            Dashboard::with_dataset(&DashboardConfig::default(), dataset).expect("valid");

        assert!(dashboard.pixel_scaler.is_none());
        assert_eq!(dashboard.pixel_columns.len(), 2);
        assert!(dashboard.pixel_columns.iter().all(|c| c.tallest() == 0));
    }

    #[test]
    fn tooltip_series_include_charted_series() {
        let mut config = DashboardConfig::default();
        config.chart.tooltip = vec![Series::Mindshare];
        let dashboard = Dashboard::from_config(&config).expect("valid");
        assert_eq!(
            dashboard.tooltip_series(),
            vec![Series::Mindshare, Series::Sales, Series::Price]
        );
    }
}
