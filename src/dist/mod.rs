//! Distance functions over sketches and raw sequences.
//!
//! The MinHash family is compared with Hamming distance (count of differing
//! positions), the tensor family with L1 distance (sum of absolute
//! component differences). The 2-D variants handle the row-structured
//! sketches: the sparse-projection sketch compares all rows pairwise by
//! position, and the sliding tensor sketch compares only the overlapping
//! prefix of windows ("min-length" policy).

pub mod edit;

pub use edit::edit_distance;

use crate::error::{Result, SketchError};

fn check_len(a: usize, b: usize, what: &str) -> Result<()> {
    if a != b {
        return Err(SketchError::InvalidInput(format!(
            "mismatched {} widths: {} vs {}",
            what, a, b
        )));
    }
    Ok(())
}

/// Number of positions where the two sketches differ.
pub fn hamming(a: &[i64], b: &[i64]) -> Result<u64> {
    check_len(a.len(), b.len(), "sketch")?;
    Ok(a.iter().zip(b).filter(|(x, y)| x != y).count() as u64)
}

/// Hamming distance summed over all rows of two row-structured sketches.
pub fn hamming2d(a: &[Vec<i64>], b: &[Vec<i64>]) -> Result<u64> {
    check_len(a.len(), b.len(), "sketch row")?;
    let mut total = 0;
    for (ra, rb) in a.iter().zip(b) {
        total += hamming(ra, rb)?;
    }
    Ok(total)
}

/// Sum of absolute component differences.
pub fn l1(a: &[i64], b: &[i64]) -> Result<u64> {
    check_len(a.len(), b.len(), "sketch")?;
    Ok(a.iter().zip(b).map(|(&x, &y)| x.abs_diff(y)).sum())
}

/// L1 distance over per-window sketches, restricted to the overlap of the
/// shorter side's window count. Extra windows of the longer side are
/// discarded, so sequences of different lengths stay comparable.
pub fn l1_2d_minlen(a: &[Vec<i64>], b: &[Vec<i64>]) -> Result<u64> {
    let mut total = 0;
    for (ra, rb) in a.iter().zip(b) {
        total += l1(ra, rb)?;
    }
    Ok(total)
}
