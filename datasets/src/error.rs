use std::path::PathBuf;

use ndarray_csv::ReadError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DatasetError>;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DatasetError {
    #[error("dataset file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("no numeric feature columns left out of {0} columns")]
    NoNumericColumns(usize),
    #[error("no complete rows left out of {0} rows")]
    NoCompleteRows(usize),
    #[error("data of shape {nrows}x{ncols} is empty")]
    Empty { nrows: usize, ncols: usize },
    #[error("non-finite value at row {row}, column {col}")]
    NonFinite { row: usize, col: usize },
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    ReadArray(#[from] ReadError),
    #[error("invalid ndarray shape {0}")]
    Shape(#[from] ndarray::ShapeError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
