//! Text layout for one line's fare matrix.
//!
//! ```text
//! # LRT-1 fare matrix
//! LRT-1
//! Baclaran, EDSA, Libertad
//! 0, 15, 15
//! 15, 0, 15
//! 15, 15, 0
//! 0, 20, 20
//! 20, 0, 20
//! 20, 20, 0
//! ```
//!
//! The first meaningful line names the transit line, the second lists the
//! stations, then come N stored-value rows followed by N single-journey
//! rows. `#` comments and blank lines are skipped. The layout carries no
//! separate station codes, so the name doubles as the code.

use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::error::Error;
use crate::loading::directory::{FareTables, LineMatrix, StationEntry};
use crate::model::Fare;

pub fn matrix_from_text(path: &Path) -> Result<LineMatrix, Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .trim(Trim::All)
        .from_path(path)?;
    let mut records = reader.records();

    let transit_line = match records.next().transpose()? {
        Some(record) => record.get(0).unwrap_or_default().to_string(),
        None => {
            return Err(Error::InvalidData(format!(
                "{}: fare matrix file is empty",
                path.display()
            )));
        }
    };

    let stations: Vec<StationEntry> = match records.next().transpose()? {
        Some(record) => record
            .iter()
            .map(|name| StationEntry {
                code: name.to_string(),
                name: name.to_string(),
            })
            .collect(),
        None => {
            return Err(Error::InvalidData(format!(
                "{}: fare matrix has no station list",
                path.display()
            )));
        }
    };

    let n = stations.len();
    let mut rows = Vec::with_capacity(2 * n);
    for record in records {
        rows.push(parse_fare_row(&record?)?);
    }
    if rows.len() != 2 * n {
        return Err(Error::InvalidData(format!(
            "{}: expected {} fare rows ({n} per table), found {}",
            path.display(),
            2 * n,
            rows.len()
        )));
    }

    let single_journey_ticket = rows.split_off(n);
    Ok(LineMatrix {
        transit_line,
        stations,
        fares: FareTables {
            stored_value_card: rows,
            single_journey_ticket,
        },
    })
}

fn parse_fare_row(record: &StringRecord) -> Result<Vec<Fare>, Error> {
    record
        .iter()
        .map(|field| Ok(field.parse::<Fare>()?))
        .collect()
}
