//! Text layout for the transfer list.
//!
//! One transfer per row: `FromStation, FromLine, ToStation, ToLine`.
//! `#` comments and blank lines are skipped; every transfer is zero fare.

use std::path::Path;

use csv::{ReaderBuilder, Trim};

use crate::error::Error;
use crate::loading::directory::{TransferEndpoint, TransferRecord};

pub fn transfers_from_text(path: &Path) -> Result<Vec<TransferRecord>, Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .trim(Trim::All)
        .from_path(path)?;

    let mut transfers = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.len() != 4 {
            return Err(Error::InvalidData(format!(
                "{}: transfer row {:?} must be `FromStation, FromLine, ToStation, ToLine`",
                path.display(),
                record.iter().collect::<Vec<_>>().join(", ")
            )));
        }
        transfers.push(TransferRecord {
            from: TransferEndpoint {
                transit_line: record[1].to_string(),
                code: record[0].to_string(),
            },
            to: TransferEndpoint {
                transit_line: record[3].to_string(),
                code: record[2].to_string(),
            },
        });
    }
    Ok(transfers)
}
