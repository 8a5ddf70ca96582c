use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate, generate_to};
use propdash::change::format_change;
use propdash::config::{ConfigOverrides, DashboardView};
use propdash::pins::CardIndex;
use propdash::pixel::{DEFAULT_RESOLUTION, pixel_count};
use propdash::theme::ThemeMode;

pub const DEFAULT_HTML_PATH: &str = "data/output/dashboard.html";
pub const DEFAULT_CSV_PATH: &str = "data/output/performance.csv";
pub const DEFAULT_JSON_PATH: &str = "data/output/dashboard.json";
pub const DEFAULT_LOG_LEVEL: &str = "warn";

pub const SAVE_HTML_HELP: &str = "Save the HTML dashboard to the given file (defaults to data/output/dashboard.html when no path is provided).";
pub const SAVE_CSV_HELP: &str = "Save the performance dataset to the given CSV file (defaults to data/output/performance.csv when no path is provided). Use --archive-csv to store a .gz instead.";
pub const SAVE_JSON_HELP: &str = "Save a JSON snapshot of the resolved dashboard (defaults to data/output/dashboard.json when no path is provided).";
pub const ARCHIVE_CSV_HELP: &str = "Archive the saved CSV output into a .gz file.";
pub const PIN_HELP: &str = "Toggle the pin on the card at INDEX (zero-based). Repeat to pin several cards; naming an index twice unpins it.";

#[derive(Debug, Parser)]
#[command(
    name = "propdash",
    about = "Render the real-estate performance dashboard as a themed HTML page with a terminal summary.",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    #[arg(
        long,
        value_name = "FILE",
        env = "PROPDASH_CONFIG",
        help = "Read settings from this TOML file instead of ./propdash.toml."
    )]
    pub config: Option<PathBuf>,
    #[arg(long, value_enum, help = "Initial colour theme of the page.")]
    pub theme: Option<ThemeMode>,
    #[arg(long, value_enum, help = "Which dashboard screens to render.")]
    pub view: Option<DashboardView>,
    #[arg(long = "pin", value_name = "INDEX", help = PIN_HELP)]
    pub pins: Vec<CardIndex>,
    #[arg(
        long,
        value_name = "N",
        help = "Number of pixels that stand for the tallest bar in the pixel chart."
    )]
    pub resolution: Option<u32>,
    #[arg(long, value_name = "N", help = "Show at most N recent events.")]
    pub events: Option<usize>,
    #[arg(
        long,
        value_name = "FILE",
        num_args = 0..=1,
        default_missing_value = DEFAULT_HTML_PATH,
        help = SAVE_HTML_HELP
    )]
    pub save_html: Option<PathBuf>,
    #[arg(
        long,
        value_name = "FILE",
        num_args = 0..=1,
        default_missing_value = DEFAULT_CSV_PATH,
        help = SAVE_CSV_HELP
    )]
    pub save_csv: Option<PathBuf>,
    #[arg(long, help = ARCHIVE_CSV_HELP)]
    pub archive_csv: bool,
    #[arg(
        long,
        value_name = "FILE",
        num_args = 0..=1,
        default_missing_value = DEFAULT_JSON_PATH,
        help = SAVE_JSON_HELP
    )]
    pub save_json: Option<PathBuf>,
    #[arg(long, help = "Minify the saved HTML dashboard.")]
    pub minify: bool,
    #[arg(long, help = "Disable progress spinner output.")]
    pub no_progress: bool,
    #[arg(
        long,
        value_name = "LEVEL",
        default_value = DEFAULT_LOG_LEVEL,
        help = "Log filter used when RUST_LOG is not set (e.g. debug, propdash=trace)."
    )]
    pub log_level: String,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            theme: self.theme,
            view: self.view,
            resolution: self.resolution,
            events_limit: self.events,
            pins: self.pins.clone(),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate shell completion scripts, optionally installing them for the current user.
    Completions {
        #[arg(value_enum, help = "Shell to generate completions for.")]
        shell: Shell,
        #[arg(
            long,
            value_name = "DIR",
            help = "Directory to write the completion script to."
        )]
        output_dir: Option<PathBuf>,
        #[arg(
            long,
            help = "Install the completion script into the default location for the selected shell."
        )]
        install: bool,
    },
    /// Print the signed percentage change between two readings.
    #[command(allow_negative_numbers = true)]
    Change {
        #[arg(help = "Most recent reading.")]
        latest: f64,
        #[arg(help = "Reading to compare against; must not be zero.")]
        baseline: f64,
    },
    /// Print how many pixels a value occupies in the pixel chart.
    #[command(allow_negative_numbers = true)]
    Pixels {
        #[arg(help = "Value to scale.")]
        value: f64,
        #[arg(help = "Value drawn at full height.")]
        max: f64,
        #[arg(long, default_value_t = DEFAULT_RESOLUTION, help = "Pixels drawn at full height.")]
        resolution: u32,
    },
}

pub fn handle_command(command: Commands) -> Result<()> {
    match command {
        Commands::Completions {
            shell,
            output_dir,
            install,
        } => generate_completions(shell, output_dir, install),
        Commands::Change { latest, baseline } => {
            let label = format_change(latest, baseline)
                .with_context(|| format!("cannot compare {latest} against {baseline}"))?;
            println!("{label}");
            Ok(())
        }
        Commands::Pixels {
            value,
            max,
            resolution,
        } => {
            let count = pixel_count(value, max, resolution)
                .with_context(|| format!("cannot scale {value} against {max}"))?;
            println!("{count}");
            Ok(())
        }
    }
}

fn generate_completions(shell: Shell, output_dir: Option<PathBuf>, install: bool) -> Result<()> {
    let mut command = Cli::command();
    let bin_name = command.get_name().to_string();

    let target_dir = if let Some(dir) = output_dir {
        Some(dir)
    } else if install {
        Some(default_install_dir(shell)?)
    } else {
        None
    };

    if let Some(dir) = target_dir {
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create completion directory {}", dir.display()))?;
        let path = generate_to(shell, &mut command, bin_name, &dir)
            .context("failed to write completion file")?;
        println!("Installed {shell:?} completions to {}", path.display());
    } else {
        let mut stdout = io::stdout().lock();
        generate(shell, &mut command, bin_name, &mut stdout);
        stdout
            .flush()
            .context("failed to flush completion output")?;
    }

    Ok(())
}

fn default_install_dir(shell: Shell) -> Result<PathBuf> {
    let home = std::env::var_os("HOME").ok_or_else(|| {
        anyhow!("HOME environment variable is not set; use --output-dir to specify a path")
    })?;
    let mut path = PathBuf::from(home);

    match shell {
        Shell::Bash => {
            path.push(".local/share/bash-completion/completions");
            Ok(path)
        }
        Shell::Elvish => {
            path.push(".elvish/lib/completions");
            Ok(path)
        }
        Shell::Fish => {
            path.push(".config/fish/completions");
            Ok(path)
        }
        Shell::PowerShell => {
            path.push(".local/share/powershell/Scripts");
            Ok(path)
        }
        Shell::Zsh => {
            path.push(".local/share/zsh/site-functions");
            Ok(path)
        }
        other => Err(anyhow!(
            "no default install location for {other:?}; specify --output-dir"
        )),
    }
}
