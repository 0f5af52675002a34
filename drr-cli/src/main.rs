use std::path::PathBuf;
use std::process;

use anyhow::Result;
use drr::Metric;
use drr_cli::logging::{self, LogLevel};
use drr_cli::{
    process_single, BatchConfig, BatchProcessor, BatchSummary, EstimatorOptions, SingleReport,
};
use drr_datasets::CleaningOptions;
use structopt::StructOpt;

const RULE: &str = "============================================================";

/// Estimate the intrinsic dimension and Dimensionality Reduction Ratio of CSV datasets
#[derive(Debug, StructOpt)]
#[structopt(name = "drr")]
struct Options {
    #[structopt(
        short = "b",
        long = "batch",
        parse(from_os_str),
        required_unless = "single",
        conflicts_with = "single"
    )]
    /// Process every dataset listed in a manifest file
    batch: Option<PathBuf>,
    #[structopt(short = "s", long = "single", parse(from_os_str))]
    /// Process a single CSV file
    single: Option<PathBuf>,
    #[structopt(long = "max-samples", default_value = "2000")]
    /// Upper bound on the records used for pairwise distances
    max_samples: usize,
    #[structopt(long = "metric", alias = "distance-metric", default_value = "l1")]
    /// Distance metric, one of l1, l2, euclidean, manhattan, cosine
    metric: Metric,
    #[structopt(long = "seed", default_value = "42")]
    /// Seed of all random subsampling
    seed: u64,
    #[structopt(long = "max-rows", default_value = "10000")]
    /// Cleaned datasets with more rows are subsampled to this many
    max_rows: usize,
    #[structopt(long = "data-root", parse(from_os_str), default_value = "data")]
    /// Directory the manifest entries are relative to
    data_root: PathBuf,
    #[structopt(
        long = "results-file",
        parse(from_os_str),
        default_value = "results/dataset_results.csv"
    )]
    results_file: PathBuf,
    #[structopt(
        long = "error-log",
        parse(from_os_str),
        default_value = "logs/batch_errors.log"
    )]
    error_log: PathBuf,
    #[structopt(long = "log-level", default_value = "INFO")]
    /// One of DEBUG, INFO, WARNING, ERROR
    log_level: LogLevel,
    #[structopt(long = "log-file", parse(from_os_str))]
    /// Also append log records to this file
    log_file: Option<PathBuf>,
}

impl Options {
    fn cleaning(&self) -> CleaningOptions {
        CleaningOptions {
            max_rows: Some(self.max_rows),
            seed: self.seed,
        }
    }

    fn estimator(&self) -> EstimatorOptions {
        EstimatorOptions {
            max_samples: self.max_samples,
            metric: self.metric,
            seed: self.seed,
        }
    }
}

fn print_report(report: &SingleReport) {
    let (r, i, drr) = report.estimate.as_tuple();
    let name = report
        .path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| report.path.display().to_string());

    println!("\n{}", RULE);
    println!("RESULTS FOR: {}", name);
    println!("{}", RULE);
    println!("Original Dimensions (R): {}", r);
    println!("Intrinsic Dimension (I): {}", i);
    println!("DRR (1 - I/R): {:.3}", drr);
    println!("Data Quality: {:.1}% dimensionality reduction", drr * 100.);
    println!("{}", RULE);
}

fn print_summary(summary: &BatchSummary) {
    println!("\n{}", RULE);
    println!("BATCH PROCESSING SUMMARY");
    println!("{}", RULE);
    println!("Total datasets: {}", summary.total_datasets);
    println!("Already processed: {}", summary.already_processed);
    println!("Newly processed: {}", summary.newly_processed);
    println!("Successful: {}", summary.successful);
    println!("Failed: {}", summary.failed);
    println!("Results file: {}", summary.results_file.display());
    println!("{}", RULE);
}

fn run(opt: &Options) -> Result<bool> {
    if let Some(path) = &opt.single {
        let report = process_single(path, &opt.cleaning(), &opt.estimator())?;
        print_report(&report);
        return Ok(true);
    }

    let manifest = match &opt.batch {
        Some(manifest) => manifest,
        None => anyhow::bail!("either --batch or --single is required"),
    };
    let processor = BatchProcessor::new(BatchConfig {
        results_file: opt.results_file.clone(),
        error_log_file: opt.error_log.clone(),
        cleaning: opt.cleaning(),
        estimator: opt.estimator(),
    });

    let summary = processor.process_manifest(manifest, &opt.data_root)?;
    print_summary(&summary);

    Ok(summary.is_success())
}

fn main() {
    let opt = Options::from_args();
    if let Err(err) = logging::init(opt.log_level, opt.log_file.as_deref()) {
        eprintln!("error: {:#}", err);
        process::exit(1);
    }

    match run(&opt) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(err) => {
            log::error!("{:#}", err);
            process::exit(1);
        }
    }
}
