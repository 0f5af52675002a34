//! Indented text files listing the datasets of a batch run
//!
//! Every non-empty line not starting with `#` names a node of a tree. Children are indented one
//! level (four spaces or a tab) deeper than their parent, and nodes without children are
//! datasets:
//!
//! ```text
//! # benchmarks
//! config
//!     SS-A
//!     SS-B.csv.gz
//! hpo
//!     xgboost
//! ```
//!
//! lists the datasets `config/SS-A`, `config/SS-B.csv.gz` and `hpo/xgboost`.
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ManifestError>;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("line {line}: indentation must grow by one level at a time")]
    Indentation { line: usize },
    #[error("could not read manifest {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A dataset listed in a manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// `/`-joined path from the root of the manifest tree
    pub id: String,
    /// Line of the manifest, starting at one
    pub line: usize,
}

impl ManifestEntry {
    /// Location of the CSV file of this dataset below `data_root`
    pub fn file(&self, data_root: &Path) -> PathBuf {
        dataset_file(data_root, &self.id)
    }
}

/// Location of dataset `id` below `data_root`, `.csv` is appended unless `id` already names a
/// CSV file
pub fn dataset_file(data_root: &Path, id: &str) -> PathBuf {
    if id.ends_with(".csv") || id.ends_with(".csv.gz") {
        data_root.join(id)
    } else {
        data_root.join(format!("{}.csv", id))
    }
}

fn indentation(line: &str) -> Option<(usize, &str)> {
    let mut depth = 0;
    let mut rest = line;
    loop {
        if let Some(stripped) = rest.strip_prefix('\t') {
            rest = stripped;
        } else if let Some(stripped) = rest.strip_prefix("    ") {
            rest = stripped;
        } else {
            break;
        }
        depth += 1;
    }

    // stray spaces are not a level
    if rest.starts_with(' ') {
        None
    } else {
        Some((depth, rest.trim_end()))
    }
}

/// Parse the text of a manifest into its datasets, in order of appearance
pub fn parse_manifest(text: &str) -> Result<Vec<ManifestEntry>> {
    let mut entries = Vec::new();
    let mut path: Vec<&str> = Vec::new();
    let mut previous: Option<(usize, usize)> = None;

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        if raw.trim().is_empty() || raw.trim_start().starts_with('#') {
            continue;
        }

        let (depth, name) = indentation(raw).ok_or(ManifestError::Indentation { line })?;
        if depth > path.len() {
            return Err(ManifestError::Indentation { line });
        }

        if let Some((prev_depth, prev_line)) = previous {
            if depth <= prev_depth {
                entries.push(ManifestEntry {
                    id: path.join("/"),
                    line: prev_line,
                });
            }
        }

        path.truncate(depth);
        path.push(name);
        previous = Some((depth, line));
    }

    if let Some((_, prev_line)) = previous {
        entries.push(ManifestEntry {
            id: path.join("/"),
            line: prev_line,
        });
    }

    Ok(entries)
}

/// Read and parse the manifest at `path`
pub fn read_manifest(path: &Path) -> Result<Vec<ManifestEntry>> {
    let text = fs::read_to_string(path).map_err(|source| ManifestError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_manifest(&text)
}
