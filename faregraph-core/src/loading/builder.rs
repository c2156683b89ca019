use itertools::Itertools;
use log::info;
use rayon::prelude::*;

use crate::error::Error;
use crate::loading::directory::{FareDirectory, LineMatrix, TransferEndpoint, TransferRecord};
use crate::model::{Fare, FareInfo, FareNetwork, Station};

/// Expands a fare directory into a routable network: every line matrix
/// becomes one direct edge per unordered station pair, every transfer
/// record a zero-fare link.
///
/// Matrix validation and pairwise expansion are pure per-line computations
/// and run in parallel; the edges are then inserted sequentially, so node
/// numbering and edge weights come out identical on every run with the same
/// input. Transfers are applied only after every matrix, once both of their
/// endpoints are known.
///
/// # Errors
///
/// Any shape or resolution error aborts the build. The network value never
/// escapes on failure, so callers cannot observe a partially built graph.
pub fn build_fare_network(directory: &FareDirectory) -> Result<FareNetwork, Error> {
    let expanded: Vec<Vec<(Station, Station, FareInfo)>> = directory
        .matrices
        .par_iter()
        .map(expand_matrix)
        .collect::<Result<_, _>>()?;

    let mut network = FareNetwork::new();
    for (matrix, edges) in directory.matrices.iter().zip(expanded) {
        // Register every station up front: a single-station line has no
        // pairwise edges but its station must still resolve in queries.
        for index in 0..matrix.stations.len() {
            network.ensure_node(&matrix.station(index));
        }
        for (from, to, fares) in edges {
            network.add_edge(&from, &to, fares);
        }
    }

    for transfer in &directory.transfers {
        let (from, to) = resolve_transfer(directory, transfer)?;
        network.add_transfer(&from, &to)?;
    }

    info!(
        "fare network built: {} stations, {} edges ({} transfers)",
        network.station_count(),
        network.edge_count(),
        directory.transfers.len()
    );
    Ok(network)
}

/// Validates one line's tables and lists its pairwise edges without
/// touching the network.
fn expand_matrix(matrix: &LineMatrix) -> Result<Vec<(Station, Station, FareInfo)>, Error> {
    if matrix.transit_line.trim().is_empty() {
        return Err(Error::InvalidData(
            "fare matrix without a transit line identifier".into(),
        ));
    }
    if matrix.stations.is_empty() {
        return Err(Error::InvalidData(format!(
            "line {} has no stations",
            matrix.transit_line
        )));
    }

    let n = matrix.stations.len();
    validate_table(&matrix.fares.stored_value_card, n, &matrix.transit_line, "SVC")?;
    validate_table(
        &matrix.fares.single_journey_ticket,
        n,
        &matrix.transit_line,
        "SJT",
    )?;

    // The tables are complete: every station pair gets its own direct edge,
    // never a chain through intermediate stations. Diagonals are never read.
    let mut edges = Vec::with_capacity(n * (n - 1) / 2);
    for (i, j) in (0..n).tuple_combinations() {
        let fares = FareInfo::new(
            matrix.fares.stored_value_card[i][j],
            matrix.fares.single_journey_ticket[i][j],
        );
        edges.push((matrix.station(i), matrix.station(j), fares));
    }
    Ok(edges)
}

fn validate_table(
    table: &[Vec<Fare>],
    expected: usize,
    line: &str,
    label: &'static str,
) -> Result<(), Error> {
    if table.len() != expected {
        return Err(Error::TableRowCount {
            line: line.to_string(),
            table: label,
            expected,
            actual: table.len(),
        });
    }
    for (row, fares) in table.iter().enumerate() {
        if fares.len() != expected {
            return Err(Error::TableRowWidth {
                line: line.to_string(),
                table: label,
                row,
                expected,
                actual: fares.len(),
            });
        }
    }
    Ok(())
}

fn resolve_transfer(
    directory: &FareDirectory,
    transfer: &TransferRecord,
) -> Result<(Station, Station), Error> {
    let from = resolve_endpoint(directory, &transfer.from, "from")?;
    let to = resolve_endpoint(directory, &transfer.to, "to")?;
    Ok((from, to))
}

/// Resolves a `(line, code)` reference against the loaded matrices to the
/// full station identity used as the graph key.
fn resolve_endpoint(
    directory: &FareDirectory,
    endpoint: &TransferEndpoint,
    side: &'static str,
) -> Result<Station, Error> {
    directory
        .matrices
        .iter()
        .find(|matrix| matrix.transit_line == endpoint.transit_line)
        .and_then(|matrix| matrix.resolve(&endpoint.code))
        .ok_or_else(|| Error::TransferEndpoint {
            side,
            line: endpoint.transit_line.clone(),
            code: endpoint.code.clone(),
        })
}
