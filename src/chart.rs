//! Inline SVG and pixel-bar chart markup.

use crate::dashboard::Dashboard;
use crate::data::{Dataset, Series};
use crate::formatting::format_tick;
use crate::pixel::{AXIS_TICK_COUNT, DEFAULT_RESOLUTION, PixelScaler, position_to_f64};
use maud::{Markup, html};

pub const CHART_WIDTH: f64 = 720.0;
pub const CHART_HEIGHT: f64 = 360.0;
const PAD_LEFT: f64 = 56.0;
const PAD_RIGHT: f64 = 72.0;
const PAD_TOP: f64 = 16.0;
const PAD_BOTTOM: f64 = 36.0;
const DOT_RADIUS: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub width: f64,
    pub height: f64,
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            width: CHART_WIDTH,
            height: CHART_HEIGHT,
        }
    }
}

impl Frame {
    fn plot_width(&self) -> f64 {
        self.width - PAD_LEFT - PAD_RIGHT
    }

    fn plot_height(&self) -> f64 {
        self.height - PAD_TOP - PAD_BOTTOM
    }

    pub fn baseline(&self) -> f64 {
        self.height - PAD_BOTTOM
    }

    pub fn x_at(&self, index: usize, count: usize) -> f64 {
        if count <= 1 {
            return PAD_LEFT + self.plot_width() / 2.0;
        }
        PAD_LEFT + self.plot_width() * position_to_f64(index) / position_to_f64(count - 1)
    }

    /// Maps `value` onto an axis whose top is `max`. A non-positive `max`
    /// keeps every point on the baseline.
    pub fn y_at(&self, value: f64, max: f64) -> f64 {
        if max <= 0.0 || !max.is_finite() {
            return self.baseline();
        }
        PAD_TOP + self.plot_height() * (1.0 - value / max)
    }

    fn band_width(&self, count: usize) -> f64 {
        self.plot_width() / position_to_f64(count.max(1))
    }
}

/// Screen coordinates of one series, scaled against the series' own maximum.
pub fn series_points(frame: &Frame, dataset: &Dataset, series: Series) -> Vec<(f64, f64)> {
    let max = dataset.max_of(&[series]).unwrap_or(0.0);
    let count = dataset.len();
    dataset
        .values(series)
        .enumerate()
        .map(|(idx, value)| (frame.x_at(idx, count), frame.y_at(value, max)))
        .collect()
}

pub fn line_path(points: &[(f64, f64)]) -> String {
    points
        .iter()
        .enumerate()
        .map(|(idx, (x, y))| {
            let command = if idx == 0 { 'M' } else { 'L' };
            format!("{command}{x:.1},{y:.1}")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn area_path(points: &[(f64, f64)], baseline: f64) -> String {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return String::new();
    };
    format!(
        "{} L{:.1},{baseline:.1} L{:.1},{baseline:.1} Z",
        line_path(points),
        last.0,
        first.0
    )
}

fn left_ticks(dataset: &Dataset, series: Option<Series>) -> Vec<u64> {
    series
        .and_then(|s| dataset.max_of(&[s]))
        .and_then(|max| PixelScaler::new(max, DEFAULT_RESOLUTION).ok())
        .map_or_else(|| vec![0; AXIS_TICK_COUNT], |scaler| scaler.axis_ticks())
}

fn right_ticks(dataset: &Dataset, series: Option<Series>) -> Vec<String> {
    let Some(series) = series else {
        return Vec::new();
    };
    let max = dataset.max_of(&[series]).unwrap_or(0.0);
    let steps = position_to_f64(AXIS_TICK_COUNT - 1);
    (0..AXIS_TICK_COUNT)
        .map(|i| series.format_value(max * position_to_f64(AXIS_TICK_COUNT - 1 - i) / steps))
        .collect()
}

fn fmt_coord(value: f64) -> String {
    format!("{value:.1}")
}

pub fn composite_chart(dashboard: &Dashboard) -> Markup {
    let frame = Frame::default();
    let dataset = &dashboard.dataset;
    let count = dataset.len();
    let area_series = dashboard.chart.area;
    let line_series = dashboard.chart.line;
    let tooltip_series = dashboard.tooltip_series();
    let view_box = format!("0 0 {} {}", frame.width, frame.height);
    let tick_step = frame.plot_height() / position_to_f64(AXIS_TICK_COUNT - 1);
    let band = frame.band_width(count);

    html! {
        svg.composite-chart viewBox=(view_box) role="img" aria-label="Performance overview chart" {
            defs {
                linearGradient id="area-fill" x1="0" y1="0" x2="0" y2="1" {
                    @let color = area_series.map_or(crate::theme::ACCENT, Series::color);
                    stop offset="5%" stop-color=(color) stop-opacity="0.2" {}
                    stop offset="95%" stop-color=(color) stop-opacity="0" {}
                }
            }
            @for (i, tick) in left_ticks(dataset, area_series).into_iter().enumerate() {
                @let y = PAD_TOP + tick_step * position_to_f64(i);
                line.grid x1=(fmt_coord(PAD_LEFT)) x2=(fmt_coord(frame.width - PAD_RIGHT))
                    y1=(fmt_coord(y)) y2=(fmt_coord(y)) {}
                @if area_series.is_some() {
                    text.tick x=(fmt_coord(PAD_LEFT - 8.0)) y=(fmt_coord(y + 4.0)) text-anchor="end" {
                        (format_tick(tick))
                    }
                }
            }
            @for (i, label) in right_ticks(dataset, line_series).into_iter().enumerate() {
                @let y = PAD_TOP + tick_step * position_to_f64(i);
                text.tick x=(fmt_coord(frame.width - PAD_RIGHT + 8.0)) y=(fmt_coord(y + 4.0)) text-anchor="start" {
                    (label)
                }
            }
            @if let Some(series) = area_series {
                @let points = series_points(&frame, dataset, series);
                path.area-fill d=(area_path(&points, frame.baseline())) fill="url(#area-fill)" {}
                path.area-stroke d=(line_path(&points)) stroke=(series.color()) fill="none" {}
            }
            @if let Some(series) = line_series {
                @let points = series_points(&frame, dataset, series);
                path.line-stroke d=(line_path(&points)) stroke=(series.color()) fill="none" {}
                @for (x, y) in &points {
                    circle.dot cx=(fmt_coord(*x)) cy=(fmt_coord(*y)) r=(DOT_RADIUS) fill=(series.color()) {}
                }
            }
            @for (idx, point) in dataset.points().iter().enumerate() {
                @let x = frame.x_at(idx, count);
                text.tick x=(fmt_coord(x)) y=(fmt_coord(frame.height - 12.0)) text-anchor="middle" {
                    (point.label)
                }
                @if let Some(payload) = dataset.tooltip(idx, &tooltip_series) {
                    @let hovered = line_series.or(area_series).map(|s| s.format_value(point.value(s)));
                    rect.hover-target
                        x=(fmt_coord(x - band / 2.0)) y=(fmt_coord(PAD_TOP))
                        width=(fmt_coord(band)) height=(fmt_coord(frame.plot_height()))
                        data-label=(payload.label)
                        data-value=[hovered] {
                        title { (payload.title_text(&tooltip_series)) }
                    }
                }
            }
        }
    }
}

pub fn pixel_chart(dashboard: &Dashboard) -> Markup {
    let ticks = dashboard
        .pixel_scaler
        .map_or_else(|| vec![0; AXIS_TICK_COUNT], |scaler| scaler.axis_ticks());

    html! {
        div.pixel-chart {
            div.pixel-axis {
                @for tick in ticks {
                    span { (format_tick(tick)) }
                }
            }
            div.pixel-columns {
                @for column in &dashboard.pixel_columns {
                    div.pixel-column {
                        div.pixel-stacks {
                            @for stack in &column.stacks {
                                div class=(format!("pixel-stack pixel-{}", stack.series.key()))
                                    title=(format!("{} {}: {}", column.label, stack.series.label(), stack.series.format_value(stack.value)))
                                    data-pixels=(stack.pixels) {
                                    @for _ in 0..stack.pixels {
                                        div.pixel {}
                                    }
                                }
                            }
                        }
                        div.pixel-label { (column.label) }
                    }
                }
            }
            div.legend {
                @for stack in dashboard.pixel_columns.first().map(|c| c.stacks.as_slice()).unwrap_or_default() {
                    span class=(format!("legend-item pixel-{}", stack.series.key())) {
                        i {}
                        (stack.series.label())
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;

    #[test]
    fn x_positions_span_the_plot() {
        let frame = Frame::default();
        assert_eq!(frame.x_at(0, 7), PAD_LEFT);
        assert_eq!(frame.x_at(6, 7), CHART_WIDTH - PAD_RIGHT);
        assert_eq!(frame.x_at(0, 1), PAD_LEFT + frame.plot_width() / 2.0);
    }

    #[test]
    fn y_positions_invert_values() {
        let frame = Frame::default();
        assert_eq!(frame.y_at(250.0, 250.0), PAD_TOP);
        assert_eq!(frame.y_at(0.0, 250.0), frame.baseline());
        assert_eq!(frame.y_at(10.0, 0.0), frame.baseline());
    }

    #[test]
    fn paths_are_built_from_points() {
        let points = [(10.0, 20.0), (30.0, 40.5)];
        assert_eq!(line_path(&points), "M10.0,20.0 L30.0,40.5");
        assert_eq!(
            area_path(&points, 100.0),
            "M10.0,20.0 L30.0,40.5 L30.0,100.0 L10.0,100.0 Z"
        );
        assert_eq!(area_path(&[], 100.0), "");
    }

    #[test]
    fn right_axis_uses_series_units() {
        let ticks = right_ticks(&Dataset::sample(), Some(Series::Price));
        assert_eq!(ticks.first().map(String::as_str), Some("$0.0060"));
        assert_eq!(ticks.last().map(String::as_str), Some("$0.0000"));
        assert!(right_ticks(&Dataset::sample(), None).is_empty());
    }

    #[test]
    fn composite_chart_has_tooltips_for_every_point() {
        let dashboard = Dashboard::from_config(&DashboardConfig::default()).expect("valid");
        let svg = composite_chart(&dashboard).into_string();
        assert_eq!(svg.matches("class=\"hover-target\"").count(), 7);
        assert!(svg.contains("data-label=\"Feb 16\""));
        assert!(svg.contains("data-value=\"$0.0060\""));
        assert!(svg.contains("Sales: 250"));
        assert!(svg.contains("Mindshare: 25.0%"));
        assert_eq!(svg.matches("class=\"dot\"").count(), 7);
    }

    #[test]
    fn pixel_chart_draws_one_square_per_pixel() {
        let dashboard = Dashboard::from_config(&DashboardConfig::default()).expect("valid");
        let html = pixel_chart(&dashboard).into_string();
        let expected: u32 = dashboard
            .pixel_columns
            .iter()
            .flat_map(|c| c.stacks.iter().map(|s| s.pixels))
            .sum();
        assert_eq!(html.matches("class=\"pixel\"").count(), usize::try_from(expected).expect("fits in usize"));
        assert!(html.contains("<span>250</span>"));
        assert!(html.contains("<span>188</span>"));
        assert!(html.contains("data-pixels=\"20\""));
    }
}
