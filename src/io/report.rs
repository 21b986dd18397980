use std::fs;
use std::path::Path;

use crate::calculation::flatten::CostRecord;
use crate::error::Error;
use crate::prelude::*;

/// Writes the records as a JSON array, replacing whatever was at `path`.
///
/// Indented with two spaces unless `unformatted` is set. Returns the number of
/// bytes written.
pub fn write_report(path: &Path, records: &[CostRecord], unformatted: bool) -> AppResult<usize> {
    let json = if unformatted {
        serde_json::to_string(records)
    } else {
        serde_json::to_string_pretty(records)
    }
    .map_err(Error::Serialize)?;

    // fs::write truncates, so a previous report never leaks into this one.
    fs::write(path, &json).map_err(|source| Error::WriteReport {
        path: path.display().to_string(),
        source,
    })?;

    Ok(json.len())
}
