use crate::cli::Cli;
use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use propdash::dashboard::Dashboard;
use propdash::export::{DashboardSnapshot, save_dataset_csv, save_snapshot_json};
use propdash::load_config;
use propdash::progress::{ProgressState, Stage, run_with_spinner};
use propdash::report::{HtmlReportContext, HtmlReportPaths, save_html_report};
use propdash::summary::{SummaryContext, SummaryPaths, print_summary};
use tracing::info;

mod cli;

#[tokio::main]
async fn main() -> Result<()> {
    colored::control::set_override(true);

    let mut cli = Cli::parse();
    init_logging(&cli);

    if let Some(command) = cli.command.take() {
        crate::cli::handle_command(command)?;
        return Ok(());
    }

    let mut config = load_config(cli.config.as_deref())?;
    config.apply_overrides(cli.overrides());

    let generated_at = Local::now();
    let progress = (!cli.no_progress).then(|| ProgressState::new(true));

    let dashboard = run_with_spinner(progress.as_ref(), Stage::Render, "dashboard", async {
        Dashboard::from_config(&config).context("failed to build dashboard")
    })
    .await?;

    let saved_csv = run_with_spinner(progress.as_ref(), Stage::Write, "outputs", async {
        let saved_csv = match cli.save_csv.as_deref() {
            Some(path) => Some(save_dataset_csv(path, &dashboard.dataset, cli.archive_csv).await?),
            None => None,
        };

        if let Some(path) = cli.save_json.as_deref() {
            let snapshot = DashboardSnapshot::new(&dashboard, generated_at);
            save_snapshot_json(path, &snapshot).await?;
        }

        if let Some(path) = cli.save_html.as_deref() {
            let html_context = HtmlReportContext {
                dashboard: &dashboard,
                generated_at: &generated_at,
                paths: HtmlReportPaths {
                    csv: saved_csv.as_deref(),
                    json: cli.save_json.as_deref(),
                },
                output_path: path,
            };
            save_html_report(path, &html_context, cli.minify).await?;
        }

        Ok::<_, anyhow::Error>(saved_csv)
    })
    .await?;

    if let Some(progress) = &progress {
        progress.clear();
    }

    print_summary(&SummaryContext {
        dashboard: &dashboard,
        generated_at: &generated_at,
        paths: SummaryPaths {
            html: cli.save_html.as_deref(),
            csv: saved_csv.as_deref(),
            json: cli.save_json.as_deref(),
        },
    });

    Ok(())
}

/// Logs go to stderr so the summary on stdout stays readable.
fn init_logging(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        log_level = cli.log_level,
        "propdash starting"
    );
}
