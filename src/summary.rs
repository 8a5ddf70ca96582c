use crate::cards::MetricCard;
use crate::change::ChangeDirection;
use crate::dashboard::Dashboard;
use crate::data::Series;
use crate::pixel::PixelColumn;
use chrono::{DateTime, Local};
use colored::{ColoredString, Colorize};
use std::path::Path;

const STACK_WIDTH: usize = 3;

pub struct SummaryPaths<'a> {
    pub html: Option<&'a Path>,
    pub csv: Option<&'a Path>,
    pub json: Option<&'a Path>,
}

pub struct SummaryContext<'a> {
    pub dashboard: &'a Dashboard,
    pub generated_at: &'a DateTime<Local>,
    pub paths: SummaryPaths<'a>,
}

pub fn print_summary(context: &SummaryContext<'_>) {
    let dashboard = context.dashboard;
    println!();
    print_summary_header(context);
    print_summary_paths(&context.paths);

    if dashboard.view.shows_performance() {
        println!();
        println!("{}", "Metric Cards".bold().bright_magenta());
        let table_width = print_card_table(dashboard);
        println!();
        println!("{}", "Sales vs Rentals".bold().bright_magenta());
        let chart_width = print_pixel_chart(&dashboard.pixel_columns);
        let divider = "=".repeat(table_width.max(chart_width));
        println!("{}", divider.bright_cyan());
    }

    if dashboard.view.shows_agent() {
        println!();
        print_agent_lines(dashboard);
    }
}

fn print_summary_header(context: &SummaryContext<'_>) {
    println!(
        "{}",
        "====================== PropDash ======================"
            .bold()
            .bright_cyan()
    );
    println!(
        "{} {}",
        "Generated".bright_yellow().bold(),
        context
            .generated_at
            .format("%Y-%m-%d %H:%M:%S %Z")
            .to_string()
            .bright_white()
    );
    println!(
        "{} {} | {} | {}",
        "Dashboard".bright_yellow().bold(),
        context.dashboard.title.bright_white(),
        format!("theme: {}", context.dashboard.theme.as_str()).bright_white(),
        format!("view: {}", context.dashboard.view.as_str()).bright_white()
    );
}

fn print_summary_paths(paths: &SummaryPaths<'_>) {
    print_path_line("HTML Dashboard", paths.html, "not saved (use --save-html)");
    print_path_line("Dataset CSV", paths.csv, "not saved (use --save-csv)");
    print_path_line("JSON Snapshot", paths.json, "not saved (use --save-json)");
}

fn print_path_line(label: &str, path: Option<&Path>, hint: &str) {
    let label_colored = label.bright_yellow().bold();
    match path {
        Some(path) => println!(
            "{} {}",
            label_colored,
            format!("{}", path.display()).bright_white()
        ),
        None => println!("{} {}", label_colored, hint.bright_black()),
    }
}

fn colored_change(change: &str) -> ColoredString {
    match ChangeDirection::from_label(change) {
        ChangeDirection::Down => change.bright_red(),
        ChangeDirection::Up | ChangeDirection::Flat => change.bright_green(),
    }
}

fn card_line(index: usize, card: &MetricCard, pinned: bool) -> String {
    format!(
        "{:^3} | {:>2} | {:<22} | {:>8}",
        if pinned { "\u{2605}" } else { "" },
        index,
        card.title,
        card.kind.value()
    )
}

fn print_card_table(dashboard: &Dashboard) -> usize {
    if dashboard.cards.is_empty() {
        let message = "No metric cards configured.";
        println!("{}", message.bright_black());
        return message.len();
    }

    let header = format!(
        "{:^3} | {:>2} | {:<22} | {:>8} | Change",
        "Pin", "#", "Card", "Value"
    );
    let separator = "----+----+------------------------+----------+------------------------";
    let mut max_width = header.len().max(separator.len());
    println!("{}", header.bold().bright_white());
    println!("{}", separator.bright_black());

    for (index, card) in dashboard.ordered_cards() {
        let line = card_line(index, card, dashboard.pins().is_pinned(index));
        let change = card.kind.change().unwrap_or("-");
        max_width = max_width.max(line.chars().count() + 3 + change.chars().count());
        println!("{} | {}", line.bright_white(), colored_change(change));
    }

    max_width
}

const fn series_glyph(series: Series) -> char {
    match series {
        Series::Sales | Series::Price => '\u{2588}',
        Series::Rentals => '\u{2593}',
        Series::Mindshare => '\u{2591}',
    }
}

fn column_width(column: &PixelColumn) -> usize {
    let stacks = column.stacks.len();
    let stack_area = stacks * STACK_WIDTH + stacks.saturating_sub(1);
    stack_area.max(column.label.chars().count())
}

/// Plain-text rows of the pixel chart, tallest row first, labels last.
pub fn pixel_chart_rows(columns: &[PixelColumn]) -> Vec<String> {
    let height = columns.iter().map(PixelColumn::tallest).max().unwrap_or(0);
    let widths: Vec<usize> = columns.iter().map(column_width).collect();
    let mut rows = Vec::with_capacity(usize::try_from(height).map_or(1, |h| h.saturating_add(1)));

    for level in (1..=height).rev() {
        let cells: Vec<String> = columns
            .iter()
            .zip(&widths)
            .map(|(column, &width)| {
                let stacks = column
                    .stacks
                    .iter()
                    .map(|stack| {
                        if stack.pixels >= level {
                            series_glyph(stack.series).to_string().repeat(STACK_WIDTH)
                        } else {
                            " ".repeat(STACK_WIDTH)
                        }
                    })
                    .collect::<Vec<_>>()
                    .join(" ");
                format!("{stacks:<width$}")
            })
            .collect();
        rows.push(cells.join("  ").trim_end().to_string());
    }

    let labels: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|(column, &width)| format!("{:<width$}", column.label))
        .collect();
    rows.push(labels.join("  ").trim_end().to_string());
    rows
}

fn print_pixel_chart(columns: &[PixelColumn]) -> usize {
    if columns.is_empty() {
        let message = "No pixel data available.";
        println!("{}", message.bright_black());
        return message.len();
    }

    let rows = pixel_chart_rows(columns);
    let mut max_width = 0;
    let label_row = rows.len() - 1;
    for (idx, row) in rows.iter().enumerate() {
        max_width = max_width.max(row.chars().count());
        if idx == label_row {
            println!("{}", row.bright_black());
        } else {
            println!("{}", row.bright_green());
        }
    }

    if let Some(first) = columns.first() {
        let legend = first
            .stacks
            .iter()
            .map(|stack| format!("{} {}", series_glyph(stack.series), stack.series.label()))
            .collect::<Vec<_>>()
            .join("   ");
        max_width = max_width.max(legend.chars().count());
        println!("{}", legend.bright_white());
    }

    max_width
}

fn print_agent_lines(dashboard: &Dashboard) {
    let agent = &dashboard.agent;
    println!(
        "{} {} | {}",
        "Agent".bright_yellow().bold(),
        agent.greeting().bright_white(),
        agent.standing.bright_white()
    );
    println!(
        "{} {}",
        "Schedule".bright_yellow().bold(),
        agent.appointment_summary().bright_white()
    );
    println!(
        "{} {}",
        "Recent events".bright_yellow().bold(),
        dashboard.events.len().to_string().bright_white()
    );
}
