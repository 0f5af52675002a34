//! Batch driver behind the `drr` binary
//!
//! A batch run reads a [manifest](manifest) of datasets, cleans every CSV file with
//! `drr-datasets`, estimates its intrinsic dimension with `drr` and appends the outcome to a
//! [results store](results::ResultsStore). Datasets already in the store are skipped, failures
//! go to an [error log](results::ErrorLog).
pub mod batch;
pub mod logging;
pub mod manifest;
pub mod results;

pub use batch::{
    process_single, BatchConfig, BatchProcessor, BatchSummary, EstimatorOptions, SingleReport,
};
pub use manifest::{parse_manifest, read_manifest, ManifestEntry, ManifestError};
pub use results::{ErrorLog, ResultRecord, ResultsStore};
