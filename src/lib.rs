//! Real-estate performance dashboard: pixel-bar scaling, card pinning, change labels,
//! and a themed HTML page rendered from one [`Dashboard`] model.

pub mod agent;
pub mod cards;
pub mod change;
pub mod chart;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod error;
pub mod events;
pub mod export;
pub mod formatting;
pub mod pins;
pub mod pixel;
pub mod progress;
pub mod report;
pub mod summary;
pub mod theme;

pub use change::{format_change, percent_change};
pub use config::{DashboardConfig, load_config};
pub use dashboard::Dashboard;
pub use data::{DataPoint, Dataset, Series};
pub use error::{DashboardError, Result};
pub use pins::PinSet;
pub use pixel::{PixelScaler, pixel_count};
pub use theme::ThemeMode;
