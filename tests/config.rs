use pretty_assertions::assert_eq;
use propdash::cards::{CardSpec, MetricKind};
use propdash::config::{ConfigOverrides, DashboardView};
use propdash::{Dashboard, DashboardConfig, Series, ThemeMode, load_config};
use std::fs;
use tempfile::TempDir;

const CUSTOM_LAYOUT: &str = r#"
title = "Q1 Overview"
agent_name = "Dana Brooks"
theme = "light"
view = "performance"
resolution = 10
pins = [1]
events_limit = 3

[chart]
line = "mindshare"
pixel = ["sales"]

[[cards]]
title = "Listings"
kind = "simple"
value = "24"
change = "-2 from last month"

[[cards]]
title = "Sales Momentum"
trend = "sales"

[[cards]]
title = "Satisfaction"
kind = "rating_bars"
value = "4.5"
ratings = [4.0, 5.0]
"#;

fn write_config(contents: &str) -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("dashboard.toml");
    fs::write(&path, contents).expect("config written");
    (dir, path)
}

#[test]
fn toml_file_replaces_defaults() {
    let (_dir, path) = write_config(CUSTOM_LAYOUT);
    let config = load_config(Some(&path)).expect("config loads");

    assert_eq!(config.title, "Q1 Overview");
    assert_eq!(config.agent_name, "Dana Brooks");
    assert_eq!(config.theme, ThemeMode::Light);
    assert_eq!(config.view, DashboardView::Performance);
    assert_eq!(config.resolution, 10);
    assert_eq!(config.pins, vec![1]);
    assert_eq!(config.events_limit, Some(3));
    assert_eq!(config.chart.area, Some(Series::Sales));
    assert_eq!(config.chart.line, Some(Series::Mindshare));
    assert_eq!(config.chart.pixel, vec![Series::Sales]);
    assert_eq!(config.cards.len(), 3);
    assert!(matches!(
        &config.cards[1],
        CardSpec::Trend { trend: Series::Sales, .. }
    ));
}

#[test]
fn loaded_layout_builds_a_dashboard() {
    let (_dir, path) = write_config(CUSTOM_LAYOUT);
    let mut config = load_config(Some(&path)).expect("config loads");
    config.apply_overrides(ConfigOverrides {
        pins: vec![2, 1],
        ..ConfigOverrides::default()
    });
    let dashboard = Dashboard::from_config(&config).expect("dashboard builds");

    assert_eq!(dashboard.pins().iter().collect::<Vec<_>>(), vec![2]);
    assert_eq!(dashboard.ordered_cards()[0].0, 2);
    assert_eq!(dashboard.events.len(), 3);
    assert_eq!(dashboard.agent.greeting(), "Welcome back, Dana Brooks");
    assert_eq!(
        dashboard.pixel_scaler.map(|scaler| scaler.resolution()),
        Some(10)
    );
    assert!(matches!(
        &dashboard.cards[1].kind,
        MetricKind::Simple { value, change: Some(change) }
            if value == "150" && change == "+150.00% vs Feb 12"
    ));
}

#[test]
fn missing_explicit_file_is_an_error() {
    let dir = TempDir::new().expect("temp dir");
    let err = load_config(Some(&dir.path().join("absent.toml"))).expect_err("file is required");
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn invalid_values_are_rejected() {
    let (_dir, path) = write_config("resolution = 0\n");
    let err = load_config(Some(&path)).expect_err("zero resolution");
    assert!(format!("{err:#}").contains("resolution"));
}

#[test]
fn partial_file_keeps_sample_layout() {
    let (_dir, path) = write_config("theme = \"light\"\n");
    let config = load_config(Some(&path)).expect("config loads");
    assert_eq!(
        config,
        DashboardConfig {
            theme: ThemeMode::Light,
            ..DashboardConfig::default()
        }
    );
}

#[test]
fn oversized_resolution_is_rejected() {
    let (_dir, path) = write_config("resolution = 501\n");
    let err = load_config(Some(&path)).expect_err("resolution above the cap");
    assert!(format!("{err:#}").contains("at most 500"));

    let mut config = DashboardConfig::default();
    config.apply_overrides(ConfigOverrides {
        resolution: Some(10_000),
        ..ConfigOverrides::default()
    });
    assert!(Dashboard::from_config(&config).is_err());
}
