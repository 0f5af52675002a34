//! Persistent outputs of a batch run: the CSV results store and the plain-text error log
use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use drr::{DimensionEstimate, Metric};
use serde::{Deserialize, Serialize};

/// One row of the results store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub dataset: String,
    pub raw_dimension: usize,
    pub intrinsic_dimension: usize,
    pub drr: f64,
    pub correlation_dimension: f64,
    pub n_samples: usize,
    pub metric: String,
}

impl ResultRecord {
    pub fn new(dataset: &str, estimate: &DimensionEstimate<f64>, metric: Metric) -> Self {
        ResultRecord {
            dataset: dataset.to_string(),
            raw_dimension: estimate.raw_dimension(),
            intrinsic_dimension: estimate.intrinsic_dimension(),
            drr: estimate.drr(),
            correlation_dimension: estimate.correlation_dimension(),
            n_samples: estimate.n_samples(),
            metric: metric.name().to_string(),
        }
    }
}

fn create_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)
            .with_context(|| format!("could not create directory {}", parent.display())),
        _ => Ok(()),
    }
}

/// CSV file receiving one row per successfully estimated dataset
///
/// Rows are appended as soon as they are known, an interrupted batch run picks up where it
/// stopped by skipping the datasets already in the store.
#[derive(Debug, Clone)]
pub struct ResultsStore {
    path: PathBuf,
}

impl ResultsStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        ResultsStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Identifiers of the datasets already in the store
    pub fn completed(&self) -> Result<HashSet<String>> {
        if !self.path.is_file() {
            return Ok(HashSet::new());
        }

        let mut reader = csv::Reader::from_path(&self.path)
            .with_context(|| format!("could not open results {}", self.path.display()))?;
        let column = match reader.headers()?.iter().position(|name| name == "dataset") {
            Some(column) => column,
            None => return Ok(HashSet::new()),
        };

        let mut completed = HashSet::new();
        for row in reader.records() {
            let row = row.with_context(|| format!("malformed results {}", self.path.display()))?;
            if let Some(dataset) = row.get(column) {
                completed.insert(dataset.to_string());
            }
        }

        Ok(completed)
    }

    /// Append `record`, writing the header first if the store is new or empty
    pub fn append(&self, record: &ResultRecord) -> Result<()> {
        create_parent(&self.path)?;
        let is_empty = fs::metadata(&self.path)
            .map(|meta| meta.len() == 0)
            .unwrap_or(true);

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("could not open results {}", self.path.display()))?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(is_empty)
            .from_writer(file);

        writer.serialize(record)?;
        writer.flush()?;

        Ok(())
    }

    /// Every row of the store
    pub fn records(&self) -> Result<Vec<ResultRecord>> {
        let mut reader = csv::Reader::from_path(&self.path)
            .with_context(|| format!("could not open results {}", self.path.display()))?;

        reader
            .deserialize()
            .collect::<std::result::Result<Vec<ResultRecord>, _>>()
            .with_context(|| format!("malformed results {}", self.path.display()))
    }
}

/// Plain-text log of failed datasets, one `<timestamp> - <dataset> - <error>` line each
#[derive(Debug, Clone)]
pub struct ErrorLog {
    path: PathBuf,
}

impl ErrorLog {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        ErrorLog { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, dataset: &str, error: &anyhow::Error) -> Result<()> {
        create_parent(&self.path)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("could not open error log {}", self.path.display()))?;

        writeln!(
            file,
            "{} - {} - {:#}",
            chrono::Local::now().to_rfc3339(),
            dataset,
            error
        )?;

        Ok(())
    }
}
