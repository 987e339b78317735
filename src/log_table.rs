use anyhow::{Context, Result};
use log::debug;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::iter;
use std::path::Path;

pub const MARKER_START: &str = "Per MPI rank memory";
pub const MARKER_END: &str = "Loop time";

/// Substrings delimiting a thermo block inside a log file.
#[derive(Debug, Clone)]
pub struct Markers {
    pub start: String,
    pub end: String,
}

impl Markers {
    pub fn new(start: &str, end: &str) -> Self {
        Self {
            start: start.to_string(),
            end: end.to_string(),
        }
    }
}

impl Default for Markers {
    fn default() -> Self {
        Self::new(MARKER_START, MARKER_END)
    }
}

#[derive(Debug)]
pub enum LogParsingError {
    MissingHeaderRow,
    RowLengthMismatch { row: usize, expected: usize, got: usize },
    InvalidValue { row: usize, field: String },
}

impl std::fmt::Display for LogParsingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl std::error::Error for LogParsingError {}

/// Columns extracted from the thermo blocks of a log file. Every column
/// grown by one block receives exactly one value per data row, so columns
/// sharing a header keep equal lengths within that block.
#[derive(Debug, Default)]
pub struct LogTable {
    keys: HashMap<String, usize>,
    columns: Vec<Vec<f64>>,
}

impl LogTable {
    pub fn read(path: &Path, markers: &Markers) -> Result<Self> {
        let file =
            File::open(path).context(format!("Reading {}", path.to_string_lossy()))?;
        let table = Self::parse(BufReader::new(file), markers)?;
        debug!(
            "{}: {} columns, {} rows",
            path.to_string_lossy(),
            table.get_keys().len(),
            table.min_len()
        );
        Ok(table)
    }

    pub fn parse<R: BufRead>(reader: R, markers: &Markers) -> Result<Self, LogParsingError> {
        let mut table = Self::default();
        let mut lines = reader.lines().map_while(Result::ok).enumerate();
        while let Some((_, line)) = lines.next() {
            if !line.contains(&markers.start) {
                continue;
            }
            let (_, header) = lines.next().ok_or(LogParsingError::MissingHeaderRow)?;
            let section: Vec<usize> = header
                .split_whitespace()
                .map(|key| table.column_index(key))
                .collect();
            if section.is_empty() {
                return Err(LogParsingError::MissingHeaderRow);
            }
            for (i, line) in &mut lines {
                if line.contains(&markers.end) {
                    break;
                }
                let values = line
                    .split_whitespace()
                    .map(|field| {
                        field.parse::<f64>().map_err(|_| LogParsingError::InvalidValue {
                            row: i + 1,
                            field: field.to_string(),
                        })
                    })
                    .collect::<Result<Vec<f64>, _>>()?;
                if values.is_empty() {
                    continue;
                }
                if values.len() != section.len() {
                    return Err(LogParsingError::RowLengthMismatch {
                        row: i + 1,
                        expected: section.len(),
                        got: values.len(),
                    });
                }
                for (&j, value) in iter::zip(&section, values) {
                    table.columns[j].push(value);
                }
            }
        }
        Ok(table)
    }

    fn column_index(&mut self, key: &str) -> usize {
        match self.keys.get(key) {
            Some(&j) => j,
            None => {
                let j = self.columns.len();
                self.keys.insert(key.to_string(), j);
                self.columns.push(Vec::new());
                j
            }
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&[f64]> {
        self.keys.get(key).map(|&j| self.columns[j].as_slice())
    }

    #[must_use]
    pub fn get_keys(&self) -> Vec<&String> {
        let mut entries: Vec<(&String, &usize)> = self.keys.iter().collect();
        entries.sort_by(|a, b| a.1.cmp(b.1));
        entries.into_iter().map(|i| i.0).collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.iter().all(Vec::is_empty)
    }

    /// Shortest column length; truncating every series to this keeps
    /// x/y pairs index-aligned.
    #[must_use]
    pub fn min_len(&self) -> usize {
        self.columns.iter().map(Vec::len).min().unwrap_or(0)
    }

    /// Append another table's columns onto matching columns of `self`,
    /// creating the ones `self` does not have yet.
    pub fn merge(&mut self, other: LogTable) {
        let mut entries: Vec<(String, usize)> = other.keys.into_iter().collect();
        entries.sort_by_key(|entry| entry.1);
        let mut columns = other.columns;
        for (key, j) in entries {
            let column = std::mem::take(&mut columns[j]);
            let target = self.column_index(&key);
            self.columns[target].extend(column);
        }
    }
}
