//! `drr-datasets` turns raw CSV tables into the numeric matrices `drr` estimates dimensions of.
//!
//! ## Cleaning
//!
//! Real tables mix features with things that are not features. [`load_dataset`] and
//! [`clean_csv`] remove
//!
//! * goal columns, whose header ends in `+` (maximised) or `-` (minimised)
//! * columns holding text
//! * rows with a missing or non-finite value
//!
//! and subsample what is left to at most [`CleaningOptions::max_rows`] rows with a seeded draw.
//! A [`DatasetMetadata`] records every step.
//!
//! ```
//! use drr_datasets::{clean_csv, CleaningOptions};
//!
//! let table = "x,y,label,cost-\n1,2,a,5\n2,4,b,6\n3,,c,7\n";
//! let (records, metadata) = clean_csv(table.as_bytes(), &CleaningOptions::default()).unwrap();
//!
//! assert_eq!(records.dim(), (2, 2));
//! assert_eq!(metadata.goal_columns, vec!["cost-"]);
//! assert_eq!(metadata.incomplete_rows, 1);
//! ```
//!
//! ## Synthetic records
//!
//! With the `generate` feature enabled the [`generate`] module provides records of known
//! intrinsic dimension for tests and benchmarks.

mod dataset;
mod error;

#[cfg(feature = "generate")]
pub mod generate;

pub use dataset::{
    array_from_csv, array_from_gz_csv, clean_csv, is_goal_column, load_dataset, validate,
    CleaningOptions, DatasetMetadata,
};
pub use error::{DatasetError, Result};
