use std::path::PathBuf;

use thiserror::Error;

use crate::model::{ParseFareError, Station};

#[derive(Error, Debug)]
pub enum Error {
    #[error("station {0} does not exist in the fare network")]
    UnknownStation(Station),
    #[error("no path exists between {from} and {to}")]
    NoPath { from: Station, to: Station },
    #[error("path reconstruction stopped at {0} before reaching the source")]
    Reconstruction(Station),
    #[error("line {line}: {table} fare table has {actual} rows, expected {expected}")]
    TableRowCount {
        line: String,
        table: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("line {line}: {table} fare table row {row} has {actual} fares, expected {expected}")]
    TableRowWidth {
        line: String,
        table: &'static str,
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("transfer {side} endpoint not found: no station {code:?} on line {line:?}")]
    TransferEndpoint {
        side: &'static str,
        line: String,
        code: String,
    },
    #[error("invalid fare data: {0}")]
    InvalidData(String),
    #[error(transparent)]
    InvalidFare(#[from] ParseFareError),
    #[error("cannot read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
