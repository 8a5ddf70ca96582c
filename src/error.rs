use thiserror::Error;

pub type Result<T> = std::result::Result<T, DashboardError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DashboardError {
    #[error("invalid argument `{argument}`: {reason}")]
    InvalidArgument {
        argument: &'static str,
        reason: String,
    },

    #[error("series {series} has no positive values to scale against")]
    EmptySeries { series: String },

    #[error("data point {label:?} is invalid: {reason}")]
    InvalidDataPoint { label: String, reason: String },

    #[error("invalid dashboard configuration: {0}")]
    InvalidConfig(String),
}

impl DashboardError {
    pub(crate) fn invalid_argument(argument: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            argument,
            reason: reason.into(),
        }
    }

    /// True for precondition violations that callers replace with a placeholder.
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. } | Self::EmptySeries { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_argument_message_names_the_argument() {
        let err = DashboardError::invalid_argument("max_value", "must be greater than zero");
        assert_eq!(
            err.to_string(),
            "invalid argument `max_value`: must be greater than zero"
        );
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn config_errors_are_not_argument_errors() {
        let err = DashboardError::InvalidConfig("resolution must be positive".into());
        assert!(!err.is_invalid_argument());
    }
}
