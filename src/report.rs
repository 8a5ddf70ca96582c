use crate::agent::{AchievementBadge, AgentOverview};
use crate::cards::{MetricCard, MetricKind, rating_width_percent};
use crate::change::ChangeDirection;
use crate::chart::{composite_chart, pixel_chart};
use crate::dashboard::Dashboard;
use crate::events::RecentEvent;
use crate::pins::CardIndex;
use crate::theme::{DARK, LIGHT};
use crate::export::write_output_file;
use anyhow::Result;
use chrono::{DateTime, Local};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::path::Path;

pub struct HtmlReportPaths<'a> {
    pub csv: Option<&'a Path>,
    pub json: Option<&'a Path>,
}

pub struct HtmlReportContext<'a> {
    pub dashboard: &'a Dashboard,
    pub generated_at: &'a DateTime<Local>,
    pub paths: HtmlReportPaths<'a>,
    pub output_path: &'a Path,
}

pub async fn save_html_report(
    output_path: &Path,
    context: &HtmlReportContext<'_>,
    minify: bool,
) -> Result<()> {
    let html = render_dashboard(context);
    let bytes = if minify {
        minify_document(&html)
    } else {
        html.into_bytes()
    };
    tracing::info!(path = %output_path.display(), bytes = bytes.len(), minify, "writing HTML dashboard");
    write_output_file(output_path, &bytes).await
}

fn minify_document(html: &str) -> Vec<u8> {
    let mut cfg = minify_html::Cfg::default();
    cfg.minify_css = true;
    cfg.minify_js = true;
    minify_html::minify(html.as_bytes(), &cfg)
}

pub fn render_dashboard(context: &HtmlReportContext<'_>) -> String {
    let dashboard = context.dashboard;
    let theme = dashboard.theme;
    let generated_at = context
        .generated_at
        .format("%Y-%m-%d %H:%M:%S %Z")
        .to_string();
    let style = format!(
        "{}{}{}",
        DARK.css_block(".theme-dark"),
        LIGHT.css_block(".theme-light"),
        REPORT_STYLE
    );

    let page = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                meta name="color-scheme" content="dark light";
                title { (dashboard.title) }
                style { (PreEscaped(style)) }
            }
            body class=(theme.css_class()) data-theme=(theme.as_str()) {
                div.page {
                    header.topbar {
                        div {
                            div.pill { "PropDash v" (env!("CARGO_PKG_VERSION")) }
                            p.subtitle { "Generated " span.mono { (generated_at) } }
                        }
                        button #theme-toggle.icon-button type="button" aria-label="Toggle theme"
                            aria-pressed=(if theme.is_dark() { "true" } else { "false" })
                            data-next-theme=(theme.toggled().as_str()) {
                            span.icon-sun { "\u{2600}" }
                            span.icon-moon { "\u{263e}" }
                        }
                    }
                    @if dashboard.view.shows_performance() {
                        (performance_section(dashboard))
                    }
                    @if dashboard.view.shows_agent() {
                        (agent_section(&dashboard.agent))
                    }
                    (downloads(context))
                    footer.footer {
                        "Sample data only. Nothing on this page is fetched or stored."
                    }
                }
                script { (PreEscaped(REPORT_SCRIPT)) }
            }
        }
    };
    page.into_string()
}

fn performance_section(dashboard: &Dashboard) -> Markup {
    html! {
        section.grid-main {
            div.panel.chart-panel {
                div.panel-head {
                    h2 { (dashboard.title) }
                    span #hover-readout.hover-readout { "Hover the chart for details" }
                }
                (composite_chart(dashboard))
            }
            aside.panel.details {
                h2 { "Details" }
                @for stat in &dashboard.details {
                    div.detail {
                        h3 { (stat.label) }
                        p.value { (stat.value) }
                        @if let Some(change) = &stat.change {
                            p class=(change_class(change)) { (change) }
                        }
                    }
                }
            }
        }
        section.cards {
            @for (index, card) in dashboard.ordered_cards() {
                (metric_card(index, card, dashboard.pins().is_pinned(index)))
            }
        }
        section.grid-secondary {
            div.panel.pixel-panel {
                h2 { "Sales vs Rentals" }
                (pixel_chart(dashboard))
            }
            div.panel.events-panel {
                h2 { "Recent Events" }
                (recent_events(&dashboard.events))
            }
        }
    }
}

fn change_class(change: &str) -> String {
    format!("change {}", ChangeDirection::from_label(change).css_class())
}

fn metric_card(index: CardIndex, card: &MetricCard, pinned: bool) -> Markup {
    html! {
        article.card.metric-card.pinned[pinned] data-index=(index) data-kind=(card.kind.tag()) {
            button.star type="button" aria-pressed=(if pinned { "true" } else { "false" }) title="Pin card" { "\u{2605}" }
            h3 { (card.title) }
            @match &card.kind {
                MetricKind::Simple { value, change } => {
                    p.value { (value) }
                    @if let Some(change) = change {
                        p class=(change_class(change)) { (change) }
                    }
                }
                MetricKind::Gauge { value, change } => {
                    div.gauge-row {
                        div.gauge { span { (value) } }
                        @if let Some(change) = change {
                            p class=(change_class(change)) { (change) }
                        }
                    }
                }
                MetricKind::RatingBars { value, ratings } => {
                    div.rating-row {
                        div.rating-bars {
                            @for rating in ratings {
                                div.rating-bar style=(format!("width: {}%", rating_width_percent(*rating))) {}
                            }
                        }
                        p.value { (value) }
                    }
                }
            }
        }
    }
}

fn recent_events(events: &[RecentEvent]) -> Markup {
    html! {
        @if events.is_empty() {
            p.muted { "No recent events." }
        } @else {
            ul.events {
                @for event in events {
                    li.event {
                        span.avatar title=(event.agent) {
                            @if let Some(src) = &event.avatar {
                                img src=(src) alt=(event.agent);
                            } @else {
                                (event.initials())
                            }
                        }
                        div.event-body {
                            div.event-top {
                                span.agent { (event.agent) }
                                span.price { (event.price) }
                            }
                            div.event-meta {
                                span class=(event.action.css_class()) { (event.action) }
                                span.sep { "\u{2022}" }
                                span { (event.timestamp) }
                                span.sep { "\u{2022}" }
                                span { (event.property) }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn agent_section(agent: &AgentOverview) -> Markup {
    html! {
        section.agent {
            div.agent-head {
                div {
                    h2 { "Dashboard" }
                    p.subtitle { (agent.greeting()) }
                }
                div.standing {
                    span.badge-trophy { "\u{1f3c6}" }
                    span { (agent.standing) }
                }
            }
            div.kpis {
                @for kpi in &agent.kpis {
                    article.card.kpi {
                        div.kpi-head {
                            span.kpi-title {
                                (kpi.title)
                                @if let Some(rank) = kpi.rank {
                                    span.rank { "#" (rank) }
                                }
                            }
                            span.kpi-icon { (kpi.icon.glyph()) }
                        }
                        p.value { (kpi.value) }
                        p class=(format!("change {}", kpi.direction().css_class())) { (kpi.change) }
                    }
                }
            }
            div.grid-two {
                div.panel {
                    h2 { "Upcoming Appointments" }
                    p.subtitle { (agent.appointment_summary()) }
                    @for appointment in &agent.appointments {
                        div.row {
                            div {
                                p.row-title { (appointment.title) }
                                p.row-sub { (appointment.client) " - " (appointment.address) }
                            }
                            span.row-meta { (appointment.when) }
                        }
                    }
                }
                div.panel {
                    h2 { "Achievement Progress" }
                    p.subtitle { "Your current badges and rankings" }
                    @for achievement in &agent.achievements {
                        div.row.row-start {
                            @match achievement.badge {
                                AchievementBadge::Award => {
                                    span.badge-award { "\u{1f3c5}" }
                                }
                                AchievementBadge::Trophy => {
                                    span.badge-trophy { "\u{1f3c6}" }
                                }
                            }
                            div {
                                p.row-title { (achievement.title) }
                                p.row-sub { (achievement.detail) }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn downloads(context: &HtmlReportContext<'_>) -> Markup {
    let items = [("CSV data", context.paths.csv), ("JSON snapshot", context.paths.json)];
    let any_saved = items.iter().any(|(_, path)| path.is_some());

    html! {
        section.downloads {
            h3 { "Downloads" }
            @if !any_saved {
                p.muted { "No exports were saved. Use --save-csv or --save-json." }
            } @else {
                div.download-list {
                    @for (label, path) in items {
                        div.download-item {
                            div.download-label { (label) }
                            @if let Some(path) = path {
                                @let full_display = path.to_string_lossy();
                                @let display_name = path
                                    .file_name()
                                    .and_then(|name| name.to_str())
                                    .unwrap_or(full_display.as_ref());
                                @if let Some(rel) = relative_link(context.output_path, path) {
                                    a.download-link href=(rel) title=(full_display) { (display_name) }
                                } @else {
                                    span.download-path title=(full_display) { (display_name) }
                                }
                            } @else {
                                span.download-path { "Not saved" }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn relative_link(html_path: &Path, target: &Path) -> Option<String> {
    let html_dir = html_path.parent()?;
    let target_dir = target.parent()?;
    if html_dir == target_dir {
        target
            .file_name()
            .and_then(|name| name.to_str())
            .map(std::string::ToString::to_string)
    } else {
        None
    }
}

const REPORT_SCRIPT: &str = r#"
(function () {
  const body = document.body;
  const toggle = document.getElementById("theme-toggle");
  if (toggle) {
    toggle.addEventListener("click", function () {
      const dark = body.classList.contains("theme-dark");
      body.classList.toggle("theme-dark", !dark);
      body.classList.toggle("theme-light", dark);
      body.dataset.theme = dark ? "light" : "dark";
      toggle.dataset.nextTheme = dark ? "dark" : "light";
      toggle.setAttribute("aria-pressed", dark ? "false" : "true");
    });
  }

  document.querySelectorAll(".metric-card .star").forEach(function (star) {
    star.addEventListener("click", function () {
      const card = star.closest(".metric-card");
      const pinned = card.classList.toggle("pinned");
      star.setAttribute("aria-pressed", pinned ? "true" : "false");
    });
  });

  const readout = document.getElementById("hover-readout");
  if (readout) {
    const idle = readout.textContent;
    document.querySelectorAll(".hover-target").forEach(function (target) {
      target.addEventListener("mouseenter", function () {
        const value = target.dataset.value;
        readout.textContent = value ? target.dataset.label + ": " + value : target.dataset.label;
      });
      target.addEventListener("mouseleave", function () {
        readout.textContent = idle;
      });
    });
  }
})();
"#;

const REPORT_STYLE: &str = r#"
* {
  box-sizing: border-box;
}

body {
  margin: 0;
  font-family: "Inter", "Segoe UI", system-ui, sans-serif;
  background: var(--page-bg);
  color: var(--text);
  transition: background 140ms ease-out, color 140ms ease-out;
}

.page {
  max-width: 1200px;
  margin: 0 auto;
  padding: 24px;
}

.topbar {
  display: flex;
  justify-content: space-between;
  align-items: center;
  margin-bottom: 24px;
}

.pill {
  display: inline-flex;
  padding: 4px 12px;
  border-radius: 999px;
  border: 1px solid var(--border);
  color: var(--accent);
  font-size: 12px;
  font-weight: 600;
  letter-spacing: 0.08em;
  text-transform: uppercase;
}

.subtitle,
.muted {
  color: var(--subtext);
  margin: 6px 0 0;
  font-size: 14px;
}

.mono {
  font-family: "JetBrains Mono", ui-monospace, monospace;
}

.icon-button {
  width: 40px;
  height: 40px;
  border-radius: 8px;
  border: 1px solid var(--border);
  background: transparent;
  color: var(--text);
  cursor: pointer;
  font-size: 18px;
}

.theme-dark .icon-moon,
.theme-light .icon-sun {
  display: none;
}

h2 {
  font-size: 18px;
  font-weight: 600;
  margin: 0 0 16px;
}

h3 {
  font-size: 15px;
  font-weight: 600;
  margin: 0 0 8px;
}

.panel,
.card {
  background: var(--card-bg);
  border: 1px solid var(--border);
  border-radius: 12px;
  padding: 24px;
  position: relative;
}

.grid-main {
  display: grid;
  grid-template-columns: 2fr 1fr;
  gap: 24px;
}

.grid-secondary,
.grid-two {
  display: grid;
  grid-template-columns: 1fr 1fr;
  gap: 24px;
  margin-top: 24px;
}

.panel-head {
  display: flex;
  justify-content: space-between;
  align-items: baseline;
}

.hover-readout {
  color: var(--accent);
  font-size: 13px;
}

.composite-chart {
  width: 100%;
  height: 400px;
}

.composite-chart .grid {
  stroke: var(--border);
  stroke-dasharray: 3 3;
}

.composite-chart .tick {
  fill: var(--axis);
  font-size: 12px;
}

.composite-chart .area-stroke,
.composite-chart .line-stroke {
  stroke-width: 2;
}

.composite-chart .hover-target {
  fill: transparent;
  cursor: crosshair;
}

.composite-chart .hover-target:hover {
  fill: var(--tooltip-border);
  fill-opacity: 0.2;
}

.details .detail {
  background: var(--panel-bg);
  border-radius: 8px;
  padding: 16px;
  margin-bottom: 16px;
}

.details h3 {
  color: var(--subtext);
  font-weight: 500;
}

.value {
  font-size: 24px;
  font-weight: 700;
  margin: 0;
}

.change {
  font-size: 13px;
  margin: 4px 0 0;
}

.change.up,
.change.neutral {
  color: var(--accent);
}

.change.down {
  color: var(--negative);
}

.cards {
  display: grid;
  grid-template-columns: repeat(auto-fit, minmax(220px, 1fr));
  gap: 24px;
  margin-top: 24px;
}

.star {
  position: absolute;
  top: 8px;
  right: 8px;
  border: none;
  background: transparent;
  color: var(--subtext);
  cursor: pointer;
  font-size: 18px;
}

.metric-card.pinned {
  border-color: var(--accent);
}

.metric-card.pinned .star {
  color: var(--accent);
}

.gauge-row,
.rating-row {
  display: flex;
  align-items: center;
  gap: 12px;
}

.gauge {
  width: 56px;
  height: 56px;
  border-radius: 50%;
  border: 4px solid var(--accent);
  display: flex;
  align-items: center;
  justify-content: center;
  font-weight: 700;
}

.rating-bars {
  flex: 1;
  display: grid;
  gap: 4px;
}

.rating-bar {
  height: 4px;
  border-radius: 4px;
  background: var(--accent);
}

.pixel-chart {
  display: grid;
  grid-template-columns: auto 1fr;
  grid-template-rows: 1fr auto;
  gap: 8px 12px;
  min-height: 240px;
}

.pixel-axis {
  display: flex;
  flex-direction: column;
  justify-content: space-between;
  color: var(--axis);
  font-size: 12px;
  padding-bottom: 20px;
}

.pixel-columns {
  display: flex;
  align-items: flex-end;
  gap: 16px;
}

.pixel-column {
  flex: 1;
  display: flex;
  flex-direction: column;
  align-items: center;
  gap: 6px;
}

.pixel-stacks {
  display: flex;
  align-items: flex-end;
  gap: 4px;
}

.pixel-stack {
  display: flex;
  flex-direction: column-reverse;
  gap: 2px;
}

.pixel {
  width: 6px;
  height: 6px;
}

.pixel-sales .pixel,
.pixel-price .pixel,
.legend-item.pixel-sales i,
.legend-item.pixel-price i {
  background: var(--accent);
}

.pixel-rentals .pixel,
.legend-item.pixel-rentals i {
  background: var(--accent-soft);
}

.pixel-mindshare .pixel,
.legend-item.pixel-mindshare i {
  background: var(--rent);
}

.pixel-label {
  color: var(--subtext);
  font-size: 12px;
}

.legend {
  grid-column: 2;
  display: flex;
  gap: 16px;
  color: var(--subtext);
  font-size: 12px;
}

.legend-item i {
  display: inline-block;
  width: 8px;
  height: 8px;
  margin-right: 6px;
}

.events {
  list-style: none;
  margin: 0;
  padding: 0;
}

.event {
  display: flex;
  gap: 8px;
  padding: 6px 0;
}

.avatar {
  width: 24px;
  height: 24px;
  border-radius: 50%;
  background: var(--panel-bg);
  color: var(--text);
  display: inline-flex;
  align-items: center;
  justify-content: center;
  font-size: 10px;
  overflow: hidden;
  flex-shrink: 0;
}

.avatar img {
  width: 100%;
  height: 100%;
}

.event-body {
  flex: 1;
  min-width: 0;
  font-size: 12px;
}

.event-top {
  display: flex;
  justify-content: space-between;
}

.agent {
  font-weight: 500;
  overflow: hidden;
  text-overflow: ellipsis;
  white-space: nowrap;
}

.price,
.action-sold {
  color: var(--accent);
}

.action-rent {
  color: var(--rent);
}

.event-meta {
  display: flex;
  gap: 4px;
  color: var(--subtext);
}

.agent-head {
  display: flex;
  justify-content: space-between;
  align-items: center;
  margin: 40px 0 24px;
}

.standing {
  display: flex;
  gap: 8px;
  align-items: center;
  font-weight: 600;
}

.kpis {
  display: grid;
  grid-template-columns: repeat(4, 1fr);
  gap: 16px;
}

.kpi-head {
  display: flex;
  justify-content: space-between;
  color: var(--subtext);
  font-size: 14px;
  margin-bottom: 8px;
}

.rank {
  color: var(--subtext);
  font-size: 12px;
  margin-left: 8px;
}

.kpi-icon {
  color: var(--accent);
}

.row {
  display: flex;
  justify-content: space-between;
  align-items: center;
  gap: 16px;
  background: var(--panel-bg);
  border-radius: 8px;
  padding: 12px;
  margin-top: 12px;
}

.row-start {
  justify-content: flex-start;
}

.row-title {
  margin: 0;
  font-weight: 500;
}

.row-sub,
.row-meta {
  margin: 0;
  color: var(--subtext);
  font-size: 13px;
}

.badge-award {
  color: var(--accent);
  font-size: 24px;
}

.badge-trophy {
  color: var(--badge);
  font-size: 24px;
}

.downloads {
  margin-top: 32px;
  border: 1px solid var(--border);
  border-radius: 12px;
  padding: 16px 24px;
}

.download-list {
  display: grid;
  grid-template-columns: repeat(auto-fit, minmax(220px, 1fr));
  gap: 12px;
}

.download-label {
  font-size: 12px;
  text-transform: uppercase;
  letter-spacing: 0.08em;
  color: var(--subtext);
  margin-bottom: 6px;
}

.download-link,
.download-path {
  color: var(--accent);
  font-weight: 600;
  text-decoration: none;
  word-break: break-all;
}

.footer {
  margin-top: 24px;
  color: var(--subtext);
  font-size: 13px;
  text-align: center;
}

@media (max-width: 900px) {
  .grid-main,
  .grid-secondary,
  .grid-two {
    grid-template-columns: 1fr;
  }

  .kpis {
    grid-template-columns: repeat(2, 1fr);
  }
}
"#;
