use itertools::Itertools;
use serde_json::{Map, Value};

use crate::error::Error;
use crate::io::azure_client::CostQueryResponse;
use crate::prelude::*;

/// One cost row, keyed by column name, in column order.
pub type CostRecord = Map<String, Value>;

/// Zips every row with the column names, position by position.
///
/// Rows keep their order and nothing is filtered. A row that doesn't have exactly
/// one value per column fails the whole thing, so a half-filled record never
/// makes it into the report.
pub fn flatten(response: CostQueryResponse) -> AppResult<Vec<CostRecord>> {
    let CostQueryResponse { columns, rows, .. } = response;

    let names: Vec<String> = columns.into_iter().map(|column| column.name).collect();

    // Two columns with the same name would collapse into one field.
    if let Some(name) = names.iter().duplicates().next() {
        return Err(Error::DuplicateColumn {
            name: name.to_owned(),
        }
        .into());
    }

    let records = rows
        .into_iter()
        .enumerate()
        .map(|(index, row)| into_record(&names, index, row))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(records)
}

// private

fn into_record(names: &[String], index: usize, row: Vec<Value>) -> Result<CostRecord, Error> {
    if row.len() != names.len() {
        return Err(Error::RowShapeMismatch {
            row: index,
            expected: names.len(),
            found: row.len(),
        });
    }

    let record = names.iter().cloned().zip_eq(row).collect();

    Ok(record)
}
