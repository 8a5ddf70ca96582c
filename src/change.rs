use crate::error::{DashboardError, Result};

pub const CHANGE_PLACEHOLDER: &str = "N/A";

/// Relative change from `baseline` to `latest`, in percent.
///
/// # Errors
///
/// [`DashboardError::InvalidArgument`] when either reading is not finite or
/// `baseline` is zero.
pub fn percent_change(latest: f64, baseline: f64) -> Result<f64> {
    if !latest.is_finite() {
        return Err(DashboardError::invalid_argument(
            "latest",
            format!("must be finite, got {latest}"),
        ));
    }
    if !baseline.is_finite() {
        return Err(DashboardError::invalid_argument(
            "baseline",
            format!("must be finite, got {baseline}"),
        ));
    }
    if baseline == 0.0 {
        return Err(DashboardError::invalid_argument(
            "baseline",
            "must not be zero",
        ));
    }
    Ok((latest - baseline) / baseline * 100.0)
}

/// `+10.00%` style label. Non-negative changes carry an explicit `+`.
///
/// # Errors
///
/// Same as [`percent_change`].
pub fn format_change(latest: f64, baseline: f64) -> Result<String> {
    let change = percent_change(latest, baseline)?;
    if change >= 0.0 {
        Ok(format!("+{:.2}%", change.abs()))
    } else {
        Ok(format!("{change:.2}%"))
    }
}

pub fn format_change_or_placeholder(latest: f64, baseline: f64) -> String {
    format_change(latest, baseline).unwrap_or_else(|err| {
        tracing::debug!(latest, baseline, error = %err, "change is not computable");
        CHANGE_PLACEHOLDER.to_string()
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeDirection {
    Up,
    Down,
    Flat,
}

impl ChangeDirection {
    pub fn from_label(label: &str) -> Self {
        match label.trim_start().chars().next() {
            Some('+') => Self::Up,
            Some('-' | '\u{2212}') => Self::Down,
            _ => Self::Flat,
        }
    }

    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Flat => "neutral",
        }
    }
}
