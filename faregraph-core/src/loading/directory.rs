//! The normalized fare directory description and its JSON on-disk layout.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::Error;
use crate::model::{Fare, Station};

/// Normalized description of a whole network: one matrix per transit line
/// plus the zero-fare transfer list. Everything the graph builder consumes.
#[derive(Debug, Clone, Deserialize)]
pub struct FareDirectory {
    pub matrices: Vec<LineMatrix>,
    pub transfers: Vec<TransferRecord>,
}

/// One transit line: its ordered stations and two square fare tables.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineMatrix {
    pub transit_line: String,
    pub stations: Vec<StationEntry>,
    pub fares: FareTables,
}

impl LineMatrix {
    /// Fully-qualified identity of the station at `index`.
    ///
    /// # Panics
    ///
    /// If `index` is out of bounds for the station list.
    pub fn station(&self, index: usize) -> Station {
        let entry = &self.stations[index];
        Station::new(&self.transit_line, &entry.code, &entry.name)
    }

    /// Resolves a station code on this line to its full identity.
    pub fn resolve(&self, code: &str) -> Option<Station> {
        self.stations
            .iter()
            .find(|entry| entry.code == code)
            .map(|entry| Station::new(&self.transit_line, &entry.code, &entry.name))
    }
}

/// A station as listed inside one matrix, before being qualified with the
/// line identifier.
#[derive(Debug, Clone, Deserialize)]
pub struct StationEntry {
    pub code: String,
    pub name: String,
}

/// The two N×N fare tables of one line, indexed `[from][to]` in station
/// list order.
#[derive(Debug, Clone, Deserialize)]
pub struct FareTables {
    #[serde(rename = "svc")]
    pub stored_value_card: Vec<Vec<Fare>>,
    #[serde(rename = "sjt")]
    pub single_journey_ticket: Vec<Vec<Fare>>,
}

/// Declared zero-fare link between two stations, same or different lines.
#[derive(Debug, Clone, Deserialize)]
pub struct TransferRecord {
    pub from: TransferEndpoint,
    pub to: TransferEndpoint,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferEndpoint {
    pub transit_line: String,
    pub code: String,
}

/// Layout of the JSON index file pointing at the per-line matrix files and
/// the transfer list.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DirectoryIndex {
    matrix_paths: Vec<String>,
    transfers_path: String,
}

/// Loads the JSON layout: an index file whose `matrixPaths` and
/// `transfersPath` entries are resolved relative to the index file itself.
pub fn load_json_directory(path: &Path) -> Result<FareDirectory, Error> {
    let index: DirectoryIndex = parse_json_file(path)?;
    if index.matrix_paths.is_empty() {
        return Err(Error::InvalidData(format!(
            "no matrices listed in {}",
            path.display()
        )));
    }
    let base = path.parent().unwrap_or_else(|| Path::new("."));

    let mut matrices = Vec::with_capacity(index.matrix_paths.len());
    for matrix_path in &index.matrix_paths {
        matrices.push(parse_json_file(&base.join(matrix_path))?);
    }
    let transfers = parse_json_file(&base.join(&index.transfers_path))?;

    Ok(FareDirectory {
        matrices,
        transfers,
    })
}

fn parse_json_file<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, Error> {
    let text = fs::read_to_string(path).map_err(|source| Error::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text)
        .map_err(|err| Error::InvalidData(format!("{}: {err}", path.display())))
}
