use chrono::{Local, TimeZone};
use flate2::read::GzDecoder;
use propdash::config::DashboardView;
use propdash::export::{DashboardSnapshot, save_dataset_csv, save_snapshot_json};
use propdash::report::{HtmlReportContext, HtmlReportPaths, render_dashboard, save_html_report};
use propdash::{Dashboard, DashboardConfig, ThemeMode};
use std::io::Read;
use std::path::Path;
use tempfile::TempDir;

fn generated_at() -> chrono::DateTime<Local> {
    Local
        .with_ymd_and_hms(2026, 2, 18, 17, 45, 0)
        .single()
        .expect("unambiguous time")
}

fn sample_dashboard(config: &DashboardConfig) -> Dashboard {
    Dashboard::from_config(config).expect("dashboard builds")
}

#[test]
fn full_page_contains_every_section() {
    let dashboard = sample_dashboard(&DashboardConfig {
        pins: vec![4],
        ..DashboardConfig::default()
    });
    let generated_at = generated_at();
    let html = render_dashboard(&HtmlReportContext {
        dashboard: &dashboard,
        generated_at: &generated_at,
        paths: HtmlReportPaths {
            csv: None,
            json: None,
        },
        output_path: Path::new("dashboard.html"),
    });

    assert!(html.contains("<title>Performance Overview</title>"));
    assert!(html.contains("class=\"composite-chart\""));
    assert!(html.contains("id=\"hover-readout\""));
    assert!(html.contains("Total Revenue"));
    assert!(html.contains("$45,231.89"));
    assert_eq!(html.matches("class=\"card metric-card").count(), 5);
    assert!(html.contains("class=\"card metric-card pinned\" data-index=\"4\""));
    assert!(html.contains("class=\"pixel-chart\""));
    assert!(html.contains("Recent Events"));
    assert!(html.contains("Upcoming Appointments"));
    assert!(html.contains("Top Performer Q1"));
    assert!(html.contains("2026-02-18 17:45:00"));
}

#[test]
fn agent_view_skips_performance_widgets() {
    let dashboard = sample_dashboard(&DashboardConfig {
        view: DashboardView::Agent,
        theme: ThemeMode::Light,
        ..DashboardConfig::default()
    });
    let generated_at = generated_at();
    let html = render_dashboard(&HtmlReportContext {
        dashboard: &dashboard,
        generated_at: &generated_at,
        paths: HtmlReportPaths {
            csv: None,
            json: None,
        },
        output_path: Path::new("dashboard.html"),
    });

    assert!(html.contains("class=\"theme-light\""));
    assert!(!html.contains("class=\"card metric-card"));
    assert!(!html.contains("id=\"hover-readout\""));
    assert!(html.contains("Monthly Commission"));
}

#[tokio::test]
async fn outputs_are_written_into_new_directories() {
    let dir = TempDir::new().expect("temp dir");
    let out = dir.path().join("nested").join("output");
    let dashboard = sample_dashboard(&DashboardConfig::default());
    let generated_at = generated_at();

    let csv_path = save_dataset_csv(&out.join("performance.csv"), &dashboard.dataset, true)
        .await
        .expect("csv saved");
    assert_eq!(csv_path, out.join("performance.csv.gz"));
    let mut csv = String::new();
    GzDecoder::new(std::fs::File::open(&csv_path).expect("archive exists"))
        .read_to_string(&mut csv)
        .expect("valid gzip");
    assert!(csv.starts_with("label,price,sales,rentals,mindshare"));

    let json_path = out.join("dashboard.json");
    save_snapshot_json(&json_path, &DashboardSnapshot::new(&dashboard, generated_at))
        .await
        .expect("json saved");
    let snapshot: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&json_path).expect("json exists"))
            .expect("valid json");
    assert_eq!(snapshot["title"], "Performance Overview");

    let html_path = out.join("dashboard.html");
    let context = HtmlReportContext {
        dashboard: &dashboard,
        generated_at: &generated_at,
        paths: HtmlReportPaths {
            csv: Some(&csv_path),
            json: Some(&json_path),
        },
        output_path: &html_path,
    };
    save_html_report(&html_path, &context, false)
        .await
        .expect("html saved");
    let plain = std::fs::read_to_string(&html_path).expect("html exists");
    assert!(plain.contains("href=\"performance.csv.gz\""));
    assert!(plain.contains("href=\"dashboard.json\""));

    save_html_report(&html_path, &context, true)
        .await
        .expect("minified html saved");
    let minified = std::fs::read(&html_path).expect("html exists");
    assert!(minified.len() < plain.len());
}
