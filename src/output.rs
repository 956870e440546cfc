//! CSV emission of the pairwise distance table.
//!
//! One row per pair `(i, j)` with `i < j`, one column per method, ground
//! truth first. The core exposes matrices in memory only; this writer is
//! the serialization collaborator sitting at the output boundary.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use crate::eval::DistanceSet;

/// Writes the distance table to `path`, creating or truncating the file.
pub fn write_csv<P: AsRef<Path>>(path: P, distances: &DistanceSet) -> Result<()> {
    let path = path.as_ref();
    let writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to open {} for writing", path.display()))?;
    let pairs = write_table(writer, distances)?;
    info!("wrote {} pair rows to {}", pairs, path.display());
    Ok(())
}

/// The writer core, generic over the sink so tests can write to memory.
fn write_table<W: Write>(mut writer: csv::Writer<W>, distances: &DistanceSet) -> Result<usize> {
    let header: Vec<String> = ["i", "j"]
        .into_iter()
        .map(str::to_owned)
        .chain(distances.methods.iter().map(|m| m.to_string()))
        .collect();
    writer.write_record(&header)?;

    let mut pairs = 0;
    for (i, j, row) in distances.pairs() {
        let record: Vec<String> = [i, j]
            .into_iter()
            .map(|v| v.to_string())
            .chain(row.iter().map(|d| d.to_string()))
            .collect();
        writer.write_record(&record)?;
        pairs += 1;
    }
    writer.flush()?;
    Ok(pairs)
}
