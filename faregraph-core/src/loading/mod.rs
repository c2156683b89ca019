//! Loading fare directories from disk and building the routable network.

pub mod builder;
pub mod directory;
mod matrix;
mod transfers;

pub use builder::build_fare_network;
pub use directory::{
    FareDirectory, FareTables, LineMatrix, StationEntry, TransferEndpoint, TransferRecord,
    load_json_directory,
};
pub use matrix::matrix_from_text;
pub use transfers::transfers_from_text;

use std::path::Path;

use log::info;

use crate::error::Error;

/// Loads a fare directory from either supported layout: a directory of text
/// fare matrices plus `transfers.txt`, or a JSON index file.
pub fn load_directory(path: &Path) -> Result<FareDirectory, Error> {
    if path.is_dir() {
        load_text_directory(path)
    } else {
        load_json_directory(path)
    }
}

/// Text layout: every `*.txt` file in `dir` except `transfers.txt` holds one
/// line matrix; `transfers.txt`, when present, lists the zero-fare links.
pub fn load_text_directory(dir: &Path) -> Result<FareDirectory, Error> {
    let mut matrix_paths = Vec::new();
    let mut transfers_path = None;
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().is_none_or(|ext| ext != "txt") {
            continue;
        }
        if path.file_name().is_some_and(|name| name == "transfers.txt") {
            transfers_path = Some(path);
        } else {
            matrix_paths.push(path);
        }
    }
    // Directory iteration order is platform-dependent; sort so node
    // numbering stays stable across runs.
    matrix_paths.sort();

    if matrix_paths.is_empty() {
        return Err(Error::InvalidData(format!(
            "no fare matrix files (*.txt) in {}",
            dir.display()
        )));
    }

    let matrices = matrix_paths
        .iter()
        .map(|path| matrix_from_text(path))
        .collect::<Result<Vec<_>, _>>()?;
    let transfers = match transfers_path {
        Some(path) => transfers_from_text(&path)?,
        None => Vec::new(),
    };

    info!(
        "loaded {} line matrices and {} transfers from {}",
        matrices.len(),
        transfers.len(),
        dir.display()
    );
    Ok(FareDirectory {
        matrices,
        transfers,
    })
}
