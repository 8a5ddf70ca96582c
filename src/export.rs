//! Files written next to the HTML dashboard: the dataset as CSV and a JSON snapshot.

use crate::cards::MetricCard;
use crate::config::DashboardView;
use crate::dashboard::Dashboard;
use crate::data::Dataset;
use crate::pins::{CardIndex, PinSet};
use crate::pixel::PixelColumn;
use crate::theme::ThemeMode;
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use csv::Writer;
use flate2::Compression;
use flate2::write::GzEncoder;
use serde::Serialize;
use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::fs;

pub(crate) async fn write_output_file(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }

    fs::write(path, bytes)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;

    Ok(())
}

fn finalize_writer(mut writer: Writer<Vec<u8>>, label: &str) -> Result<Vec<u8>> {
    writer
        .flush()
        .with_context(|| format!("failed to flush {label}"))?;
    writer
        .into_inner()
        .with_context(|| format!("failed to finalize {label}"))
}

pub fn serialize_dataset_csv(dataset: &Dataset) -> Result<Vec<u8>> {
    let mut writer = Writer::from_writer(Vec::new());
    for point in dataset.points() {
        writer
            .serialize(point)
            .with_context(|| format!("failed to serialize data point {}", point.label))?;
    }
    finalize_writer(writer, "dataset CSV writer")
}

pub fn gzip_bytes(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
    encoder
        .write_all(bytes)
        .context("failed to compress CSV output")?;
    encoder.finish().context("failed to finish gzip stream")
}

/// `performance.csv` becomes `performance.csv.gz`; paths already ending in `.gz` are kept.
pub fn archive_path(path: &Path) -> PathBuf {
    if path.extension().is_some_and(|ext| ext == "gz") {
        return path.to_path_buf();
    }
    let mut name = path
        .file_name()
        .map_or_else(|| OsString::from("performance.csv"), OsString::from);
    name.push(".gz");
    path.with_file_name(name)
}

/// Returns the path that was actually written.
pub async fn save_dataset_csv(path: &Path, dataset: &Dataset, archive: bool) -> Result<PathBuf> {
    let serialized = serialize_dataset_csv(dataset)?;
    let (target, bytes) = if archive {
        (archive_path(path), gzip_bytes(&serialized)?)
    } else {
        (path.to_path_buf(), serialized)
    };
    tracing::info!(path = %target.display(), rows = dataset.len(), archive, "writing dataset CSV");
    write_output_file(&target, &bytes).await?;
    Ok(target)
}

#[derive(Debug, Serialize)]
pub struct SnapshotCard<'a> {
    pub index: CardIndex,
    pub pinned: bool,
    #[serde(flatten)]
    pub card: &'a MetricCard,
}

/// Everything the page shows, as plain data.
#[derive(Debug, Serialize)]
pub struct DashboardSnapshot<'a> {
    pub generated_at: DateTime<Local>,
    pub title: &'a str,
    pub theme: ThemeMode,
    pub view: DashboardView,
    pub pins: &'a PinSet,
    pub cards: Vec<SnapshotCard<'a>>,
    pub pixel_max: Option<f64>,
    pub resolution: Option<u32>,
    pub pixel_columns: &'a [PixelColumn],
    pub dataset: &'a Dataset,
}

impl<'a> DashboardSnapshot<'a> {
    pub fn new(dashboard: &'a Dashboard, generated_at: DateTime<Local>) -> Self {
        let cards = dashboard
            .ordered_cards()
            .into_iter()
            .map(|(index, card)| SnapshotCard {
                index,
                pinned: dashboard.pins().is_pinned(index),
                card,
            })
            .collect();
        Self {
            generated_at,
            title: &dashboard.title,
            theme: dashboard.theme,
            view: dashboard.view,
            pins: dashboard.pins(),
            cards,
            pixel_max: dashboard.pixel_scaler.map(|scaler| scaler.max_value()),
            resolution: dashboard.pixel_scaler.map(|scaler| scaler.resolution()),
            pixel_columns: &dashboard.pixel_columns,
            dataset: &dashboard.dataset,
        }
    }
}

pub fn serialize_snapshot(snapshot: &DashboardSnapshot<'_>) -> Result<Vec<u8>> {
    serde_json::to_vec_pretty(snapshot).context("failed to serialize dashboard snapshot")
}

pub async fn save_snapshot_json(path: &Path, snapshot: &DashboardSnapshot<'_>) -> Result<()> {
    let bytes = serialize_snapshot(snapshot)?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "writing JSON snapshot");
    write_output_file(path, &bytes).await
}
