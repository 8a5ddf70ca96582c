use anyhow::Result;
use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::future::Future;
use std::time::{Duration, Instant};
use tracing::debug;

const BRAILLE_FRAMES: [&str; 8] = ["⠁", "⠂", "⠄", "⡀", "⢀", "⠠", "⠐", "⠈"];
const ASCII_FRAMES: &str = "|/-\\";
const TICK_INTERVAL: Duration = Duration::from_millis(100);
const DRAW_HZ: u8 = 15;

/// Steps of one dashboard run, in the order `main` drives them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Render,
    Write,
}

impl Stage {
    pub const ALL: [Self; 2] = [Self::Render, Self::Write];

    const fn position(self) -> usize {
        self as usize + 1
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Render => "Render",
            Self::Write => "Write",
        }
    }
}

/// Spinner frames picked from the terminal the run is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpinnerTicks {
    Ascii,
    Braille,
    TintedBraille,
}

impl SpinnerTicks {
    fn detect(use_color: bool) -> Self {
        Self::select(std::env::var("TERM").ok().as_deref(), use_color)
    }

    fn select(term: Option<&str>, use_color: bool) -> Self {
        if term.is_some_and(|term| term.eq_ignore_ascii_case("dumb")) {
            Self::Ascii
        } else if use_color {
            Self::TintedBraille
        } else {
            Self::Braille
        }
    }

    fn apply(self, style: ProgressStyle) -> ProgressStyle {
        match self {
            Self::Ascii => style.tick_chars(ASCII_FRAMES),
            Self::Braille => style.tick_strings(&BRAILLE_FRAMES),
            Self::TintedBraille => {
                let frames: Vec<String> = BRAILLE_FRAMES
                    .iter()
                    .map(|frame| frame.bright_cyan().bold().to_string())
                    .collect();
                let frames: Vec<&str> = frames.iter().map(String::as_str).collect();
                style.tick_strings(&frames)
            }
        }
    }
}

pub struct ProgressState {
    multi: MultiProgress,
    style: ProgressStyle,
}

impl ProgressState {
    pub fn new(use_color: bool) -> Self {
        let multi = MultiProgress::new();
        multi.set_draw_target(ProgressDrawTarget::stderr_with_hz(DRAW_HZ));
        let style = ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        let style = SpinnerTicks::detect(use_color).apply(style);
        Self { multi, style }
    }

    fn spinner(&self, message: String) -> ProgressBar {
        let bar = self.multi.add(ProgressBar::new_spinner());
        bar.set_style(self.style.clone());
        bar.set_message(message);
        bar.enable_steady_tick(TICK_INTERVAL);
        bar
    }

    pub fn clear(&self) {
        if let Err(err) = self.multi.clear() {
            debug!(error = %err, "failed to clear progress output");
        }
    }
}

fn format_stage_message(stage: Stage, label: &str) -> String {
    let prefix = format!("[{}/{}]", stage.position(), Stage::ALL.len());
    format!(
        "{} {}: {}",
        prefix.bright_yellow().bold(),
        stage.label().bright_cyan().bold(),
        label.bright_white().bold()
    )
}

fn format_elapsed(elapsed: Duration) -> String {
    if elapsed < Duration::from_secs(1) {
        format!("{}ms", elapsed.as_millis())
    } else {
        format!("{:.1}s", elapsed.as_secs_f64())
    }
}

fn finish_message(stage: Stage, label: &str, succeeded: bool, elapsed: Duration) -> String {
    let status = if succeeded {
        "done".bright_green().bold()
    } else {
        "failed".bright_red().bold()
    };
    format!(
        "{} {} {}",
        format_stage_message(stage, label),
        status,
        format!("({})", format_elapsed(elapsed)).bright_black()
    )
}

/// Runs `fut` as one stage, under a spinner when `progress` is set.
/// Stage timings are logged at debug level either way.
pub async fn run_with_spinner<T>(
    progress: Option<&ProgressState>,
    stage: Stage,
    label: &str,
    fut: impl Future<Output = Result<T>>,
) -> Result<T> {
    let started = Instant::now();
    let bar = progress.map(|progress| progress.spinner(format_stage_message(stage, label)));
    let result = fut.await;
    let elapsed = started.elapsed();

    debug!(
        stage = stage.label(),
        label,
        succeeded = result.is_ok(),
        elapsed = ?elapsed,
        "stage finished"
    );
    if let Some(bar) = bar {
        bar.finish_with_message(finish_message(stage, label, result.is_ok(), elapsed));
    }
    result
}
