use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use drr::{DimensionEstimate, Metric};
use drr_datasets::{load_dataset, CleaningOptions, DatasetMetadata};

use crate::manifest::read_manifest;
use crate::results::{ErrorLog, ResultRecord, ResultsStore};

/// Estimator settings exposed on the command line
#[derive(Debug, Clone, PartialEq)]
pub struct EstimatorOptions {
    pub max_samples: usize,
    pub metric: Metric,
    pub seed: u64,
}

impl Default for EstimatorOptions {
    fn default() -> Self {
        EstimatorOptions {
            max_samples: 2000,
            metric: Metric::L1,
            seed: 42,
        }
    }
}

/// Where a batch run keeps its state and how it treats every dataset
#[derive(Debug, Clone, PartialEq)]
pub struct BatchConfig {
    pub results_file: PathBuf,
    pub error_log_file: PathBuf,
    pub cleaning: CleaningOptions,
    pub estimator: EstimatorOptions,
}

impl Default for BatchConfig {
    fn default() -> Self {
        BatchConfig {
            results_file: PathBuf::from("results/dataset_results.csv"),
            error_log_file: PathBuf::from("logs/batch_errors.log"),
            cleaning: CleaningOptions::default(),
            estimator: EstimatorOptions::default(),
        }
    }
}

/// Counts of a finished batch run
#[derive(Debug, Clone, PartialEq)]
pub struct BatchSummary {
    pub total_datasets: usize,
    pub already_processed: usize,
    pub newly_processed: usize,
    pub successful: usize,
    pub failed: usize,
    pub results_file: PathBuf,
}

impl BatchSummary {
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// Estimate of a single dataset together with what cleaning did to it
#[derive(Debug, Clone)]
pub struct SingleReport {
    pub path: PathBuf,
    pub metadata: DatasetMetadata,
    pub estimate: DimensionEstimate<f64>,
}

/// Clean the CSV file at `path` and estimate its intrinsic dimension
pub fn process_single(
    path: &Path,
    cleaning: &CleaningOptions,
    estimator: &EstimatorOptions,
) -> Result<SingleReport> {
    let (records, metadata) = load_dataset(path, cleaning)
        .with_context(|| format!("could not load {}", path.display()))?;

    let estimate = drr::estimate(
        &records,
        estimator.metric,
        estimator.max_samples,
        estimator.seed,
    )
    .with_context(|| {
        let (nrows, ncols) = records.dim();
        format!(
            "could not estimate dimension of {} ({}x{}, metric {})",
            path.display(),
            nrows,
            ncols,
            estimator.metric
        )
    })?;

    log::info!(
        "{}: R = {}, I = {}, DRR = {:.3}",
        path.display(),
        estimate.raw_dimension(),
        estimate.intrinsic_dimension(),
        estimate.drr()
    );

    Ok(SingleReport {
        path: path.to_path_buf(),
        metadata,
        estimate,
    })
}

/// Runs every dataset of a manifest through cleaning and estimation
///
/// Results are persisted one by one, so a run can be interrupted and resumed. A failing dataset
/// is recorded in the error log and does not stop the run.
pub struct BatchProcessor {
    config: BatchConfig,
    store: ResultsStore,
    errors: ErrorLog,
}

impl BatchProcessor {
    pub fn new(config: BatchConfig) -> Self {
        let store = ResultsStore::new(&config.results_file);
        let errors = ErrorLog::new(&config.error_log_file);

        BatchProcessor {
            config,
            store,
            errors,
        }
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Identifiers of the datasets a previous run already stored
    pub fn completed(&self) -> Result<HashSet<String>> {
        self.store.completed()
    }

    pub fn process_manifest(&self, manifest: &Path, data_root: &Path) -> Result<BatchSummary> {
        let entries = read_manifest(manifest)?;
        let completed = self.completed()?;
        log::info!(
            "{} datasets in {}, {} already processed",
            entries.len(),
            manifest.display(),
            completed.len()
        );

        let mut summary = BatchSummary {
            total_datasets: entries.len(),
            already_processed: 0,
            newly_processed: 0,
            successful: 0,
            failed: 0,
            results_file: self.config.results_file.clone(),
        };

        for entry in &entries {
            if completed.contains(&entry.id) {
                log::debug!("skipping {}", entry.id);
                summary.already_processed += 1;
                continue;
            }

            log::info!("processing {}", entry.id);
            let res = process_single(
                &entry.file(data_root),
                &self.config.cleaning,
                &self.config.estimator,
            );
            summary.newly_processed += 1;

            match res {
                Ok(report) => {
                    let record =
                        ResultRecord::new(&entry.id, &report.estimate, self.config.estimator.metric);
                    self.store.append(&record)?;
                    summary.successful += 1;
                }
                Err(err) => {
                    log::error!("{} failed: {:#}", entry.id, err);
                    self.errors.append(&entry.id, &err)?;
                    summary.failed += 1;
                }
            }
        }

        log::info!(
            "batch finished: {} successful, {} failed",
            summary.successful,
            summary.failed
        );

        Ok(summary)
    }
}
