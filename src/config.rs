use crate::cards::{CardSpec, sample_cards};
use crate::data::Series;
use crate::error::DashboardError;
use crate::pins::CardIndex;
use crate::pixel::DEFAULT_RESOLUTION;
use crate::theme::ThemeMode;
use anyhow::{Context, Result};
use clap::ValueEnum;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_NAME: &str = "propdash";
pub const ENV_PREFIX: &str = "PROPDASH";
/// Upper bound on pixels per bar. The page emits one element per pixel.
pub const MAX_RESOLUTION: u32 = 500;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DashboardView {
    Performance,
    Agent,
    #[default]
    All,
}

impl DashboardView {
    pub const fn shows_performance(self) -> bool {
        matches!(self, Self::Performance | Self::All)
    }

    pub const fn shows_agent(self) -> bool {
        matches!(self, Self::Agent | Self::All)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Performance => "performance",
            Self::Agent => "agent",
            Self::All => "all",
        }
    }
}

/// Which series each chart draws.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub area: Option<Series>,
    pub line: Option<Series>,
    pub tooltip: Vec<Series>,
    pub pixel: Vec<Series>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            area: Some(Series::Sales),
            line: Some(Series::Price),
            tooltip: vec![Series::Sales, Series::Rentals, Series::Price, Series::Mindshare],
            pixel: vec![Series::Sales, Series::Rentals],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub title: String,
    pub agent_name: String,
    pub theme: ThemeMode,
    pub view: DashboardView,
    pub resolution: u32,
    pub chart: ChartConfig,
    pub cards: Vec<CardSpec>,
    pub pins: Vec<CardIndex>,
    pub pinned_first: bool,
    pub events_limit: Option<usize>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: "Performance Overview".to_string(),
            agent_name: "Agent Smith".to_string(),
            theme: ThemeMode::Dark,
            view: DashboardView::All,
            resolution: DEFAULT_RESOLUTION,
            chart: ChartConfig::default(),
            cards: sample_cards(),
            pins: Vec::new(),
            pinned_first: true,
            events_limit: None,
        }
    }
}

/// Command-line values that take precedence over file and environment settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub theme: Option<ThemeMode>,
    pub view: Option<DashboardView>,
    pub resolution: Option<u32>,
    pub events_limit: Option<usize>,
    pub pins: Vec<CardIndex>,
}

impl DashboardConfig {
    pub fn validate(&self) -> Result<(), DashboardError> {
        if self.resolution == 0 {
            return Err(DashboardError::InvalidConfig(
                "resolution must be greater than zero".to_string(),
            ));
        }
        if self.resolution > MAX_RESOLUTION {
            return Err(DashboardError::InvalidConfig(format!(
                "resolution must be at most {MAX_RESOLUTION}, got {}",
                self.resolution
            )));
        }
        if self.chart.pixel.is_empty() {
            return Err(DashboardError::InvalidConfig(
                "chart.pixel must list at least one series".to_string(),
            ));
        }
        Ok(())
    }

    /// CLI pins are toggled after the configured ones.
    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(theme) = overrides.theme {
            self.theme = theme;
        }
        if let Some(view) = overrides.view {
            self.view = view;
        }
        if let Some(resolution) = overrides.resolution {
            self.resolution = resolution;
        }
        if overrides.events_limit.is_some() {
            self.events_limit = overrides.events_limit;
        }
        self.pins.extend(overrides.pins);
    }
}

/// Loads defaults, then `propdash.toml` (or `path`), then `PROPDASH_*` variables.
pub fn load_config(path: Option<&Path>) -> Result<DashboardConfig> {
    let file = match path {
        Some(path) => File::from(path).required(true),
        None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
    };
    let settings = Config::builder()
        .add_source(file)
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        )
        .build()
        .with_context(|| match path {
            Some(path) => format!("failed to read configuration from {}", path.display()),
            None => "failed to read configuration".to_string(),
        })?;
    let config: DashboardConfig = settings
        .try_deserialize()
        .context("failed to parse dashboard configuration")?;
    config.validate()?;
    tracing::debug!(
        theme = config.theme.as_str(),
        view = config.view.as_str(),
        cards = config.cards.len(),
        "configuration loaded"
    );
    Ok(config)
}
