use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};
use flate2::read::GzDecoder;
use ndarray::prelude::*;
use ndarray::Data;
use ndarray_csv::Array2Reader;
use rand::{seq::index, SeedableRng};
use rand_xoshiro::Xoshiro256Plus;

use crate::error::{DatasetError, Result};

/// Convert Gzipped CSV bytes into 2D array
pub fn array_from_gz_csv<R: Read>(
    gz: R,
    has_headers: bool,
    separator: u8,
) -> Result<Array2<f64>> {
    // unzip file
    let file = GzDecoder::new(gz);
    array_from_csv(file, has_headers, separator)
}

/// Convert CSV bytes into 2D array
///
/// Every cell must parse as a number, see [`clean_csv`] for tables with labels, text columns
/// or missing values.
pub fn array_from_csv<R: Read>(
    csv: R,
    has_headers: bool,
    separator: u8,
) -> Result<Array2<f64>> {
    // parse CSV
    let mut reader = ReaderBuilder::new()
        .has_headers(has_headers)
        .delimiter(separator)
        .from_reader(csv);

    // extract ndarray
    let array = reader.deserialize_array2_dynamic()?;
    Ok(array)
}

/// How raw tables are turned into feature matrices
#[derive(Debug, Clone, PartialEq)]
pub struct CleaningOptions {
    /// Tables with more complete rows are subsampled to this many rows
    pub max_rows: Option<usize>,
    /// Seed of the row subsampling
    pub seed: u64,
}

impl Default for CleaningOptions {
    fn default() -> Self {
        CleaningOptions {
            max_rows: Some(10_000),
            seed: 42,
        }
    }
}

/// What happened to a table on its way to a feature matrix
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DatasetMetadata {
    pub path: Option<PathBuf>,
    /// Rows and columns of the raw table, header excluded
    pub original_shape: (usize, usize),
    /// Goal columns that were removed
    pub goal_columns: Vec<String>,
    /// Columns removed because they hold text
    pub non_numeric_columns: Vec<String>,
    /// Names of the kept columns, in order
    pub feature_names: Vec<String>,
    /// Rows removed because of a missing or non-finite cell
    pub incomplete_rows: usize,
    pub subsampled: bool,
    /// Rows and columns of the cleaned matrix
    pub shape: (usize, usize),
}

/// Goal columns mark optimisation targets with a trailing `+` (maximise) or `-` (minimise)
pub fn is_goal_column(name: &str) -> bool {
    let name = name.trim();
    name.ends_with('+') || name.ends_with('-')
}

/// Read and clean the CSV file at `path`, decompressing it first if it ends in `.gz`
pub fn load_dataset<P: AsRef<Path>>(
    path: P,
    options: &CleaningOptions,
) -> Result<(Array2<f64>, DatasetMetadata)> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(DatasetError::NotFound(path.to_path_buf()));
    }

    let file = File::open(path)?;
    let is_gz = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("gz"))
        .unwrap_or(false);

    let (records, mut metadata) = if is_gz {
        clean_csv(GzDecoder::new(file), options)?
    } else {
        clean_csv(file, options)?
    };
    metadata.path = Some(path.to_path_buf());

    log::info!(
        "loaded {}: {}x{} raw, {}x{} cleaned",
        path.display(),
        metadata.original_shape.0,
        metadata.original_shape.1,
        metadata.shape.0,
        metadata.shape.1
    );

    Ok((records, metadata))
}

enum Cell {
    Number(f64),
    Missing,
    Text,
}

fn parse_cell(cell: &str) -> Cell {
    if cell.is_empty() {
        return Cell::Missing;
    }
    match cell.parse::<f64>() {
        Ok(v) if v.is_finite() => Cell::Number(v),
        Ok(_) => Cell::Missing,
        Err(_) => Cell::Text,
    }
}

/// Turn a CSV table with a header row into a numeric feature matrix
///
/// Goal columns (see [`is_goal_column`]) and columns holding text are removed, then rows with a
/// missing or non-finite value are dropped. If more rows than `options.max_rows` remain, a
/// seeded draw without replacement keeps that many of them in their original order.
pub fn clean_csv<R: Read>(
    csv: R,
    options: &CleaningOptions,
) -> Result<(Array2<f64>, DatasetMetadata)> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(csv);

    let headers = reader.headers()?.clone();
    let rows = reader
        .records()
        .collect::<std::result::Result<Vec<StringRecord>, _>>()?;

    let mut metadata = DatasetMetadata {
        original_shape: (rows.len(), headers.len()),
        ..Default::default()
    };

    let mut kept = Vec::new();
    for (col, name) in headers.iter().enumerate() {
        if is_goal_column(name) {
            metadata.goal_columns.push(name.to_string());
            continue;
        }

        let mut has_number = false;
        let mut has_text = false;
        for row in &rows {
            match parse_cell(row.get(col).unwrap_or("")) {
                Cell::Number(_) => has_number = true,
                Cell::Text => has_text = true,
                Cell::Missing => {}
            }
        }

        if has_number && !has_text {
            kept.push(col);
            metadata.feature_names.push(name.to_string());
        } else {
            log::warn!("dropping non-numeric column `{}`", name);
            metadata.non_numeric_columns.push(name.to_string());
        }
    }

    if kept.is_empty() {
        return Err(DatasetError::NoNumericColumns(headers.len()));
    }

    let mut complete: Vec<Vec<f64>> = Vec::with_capacity(rows.len());
    for row in &rows {
        let values = kept
            .iter()
            .map(|&col| match parse_cell(row.get(col).unwrap_or("")) {
                Cell::Number(v) => Some(v),
                _ => None,
            })
            .collect::<Option<Vec<f64>>>();
        match values {
            Some(values) => complete.push(values),
            None => metadata.incomplete_rows += 1,
        }
    }

    if metadata.incomplete_rows > 0 {
        log::warn!("dropped {} incomplete rows", metadata.incomplete_rows);
    }
    if complete.is_empty() {
        return Err(DatasetError::NoCompleteRows(rows.len()));
    }

    if let Some(max_rows) = options.max_rows.filter(|&max_rows| complete.len() > max_rows) {
        let mut rng = Xoshiro256Plus::seed_from_u64(options.seed);
        let mut indices = index::sample(&mut rng, complete.len(), max_rows).into_vec();
        indices.sort_unstable();

        log::info!(
            "subsampling {} of {} rows with seed {}",
            max_rows,
            complete.len(),
            options.seed
        );
        complete = indices
            .into_iter()
            .map(|i| std::mem::take(&mut complete[i]))
            .collect();
        metadata.subsampled = true;
    }

    let shape = (complete.len(), kept.len());
    let records = Array2::from_shape_vec(shape, complete.into_iter().flatten().collect())?;
    validate(&records)?;
    metadata.shape = shape;

    Ok((records, metadata))
}

/// Checks that `records` is a non-empty matrix of finite values
pub fn validate<D: Data<Elem = f64>>(records: &ArrayBase<D, Ix2>) -> Result<()> {
    let (nrows, ncols) = records.dim();
    if nrows == 0 || ncols == 0 {
        return Err(DatasetError::Empty { nrows, ncols });
    }

    match records.indexed_iter().find(|(_, v)| !v.is_finite()) {
        Some(((row, col), _)) => Err(DatasetError::NonFinite { row, col }),
        None => Ok(()),
    }
}
