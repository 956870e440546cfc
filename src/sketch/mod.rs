//! Sequence sketching algorithms.
//!
//! Each sketcher is a parameter object: all random state (permutation
//! tables, sparse dictionaries, tensor hash tables) is drawn once at
//! construction from a caller-supplied seed and read-only afterwards. The
//! same parameter instance therefore produces the same hash functions for
//! every sequence it sketches, which is what makes sketches of different
//! sequences comparable, and makes concurrent `compute` calls safe.
//!
//! The five kinds share the shape "parameters + compute(kmer sequence) ->
//! fixed-width output" but differ in algorithm and in the distance their
//! outputs are compared with, so all of them live behind the [`Sketcher`]
//! trait.

pub mod minhash;
pub mod omp;
pub mod tensor;
pub mod tensor_slide;
pub mod weighted_minhash;

pub use minhash::MinHash;
pub use omp::OmpSketch;
pub use tensor::TensorSketch;
pub use tensor_slide::TensorSlideSketch;
pub use weighted_minhash::WeightedMinHash;

use crate::error::{Result, SketchError};

/// Output of one `compute` call.
///
/// The MinHash family and the global tensor sketch emit a flat vector of
/// exactly `embed_dim` components; the sparse-projection sketch and the
/// sliding tensor sketch emit one row per output dimension or window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sketch {
    Flat(Vec<i64>),
    Rows(Vec<Vec<i64>>),
}

impl Sketch {
    pub fn as_flat(&self) -> Result<&[i64]> {
        match self {
            Sketch::Flat(v) => Ok(v),
            Sketch::Rows(_) => Err(SketchError::InvalidInput(
                "expected a flat sketch, got a row-structured one".into(),
            )),
        }
    }

    pub fn as_rows(&self) -> Result<&[Vec<i64>]> {
        match self {
            Sketch::Rows(v) => Ok(v),
            Sketch::Flat(_) => Err(SketchError::InvalidInput(
                "expected a row-structured sketch, got a flat one".into(),
            )),
        }
    }
}

/// Common contract for the five sketch kinds.
pub trait Sketcher: Send + Sync {
    /// Short column name used in logs and the output table.
    fn name(&self) -> &'static str;

    /// Sketches one k-mer encoded sequence. Deterministic for a fixed
    /// parameter instance; takes `&self` only, so it may be called from
    /// many threads at once.
    fn compute(&self, kmer_seq: &[u64]) -> Result<Sketch>;

    /// Scalar distance between two sketches produced by this instance.
    fn distance(&self, a: &Sketch, b: &Sketch) -> Result<u64>;
}

/// Checks that every k-mer code is inside the sketcher's alphabet before
/// it is used as a table index.
pub(crate) fn check_alphabet(kmer_seq: &[u64], sig_len: u64) -> Result<()> {
    if let Some(&bad) = kmer_seq.iter().find(|&&c| c >= sig_len) {
        return Err(SketchError::InvalidInput(format!(
            "k-mer code {} is outside the sketch alphabet [0, {})",
            bad, sig_len
        )));
    }
    Ok(())
}

/// Converts a k-mer alphabet size into a table length, rejecting alphabets
/// too large to materialize per-symbol tables for.
pub(crate) fn table_len(sig_len: u64, kind: &str) -> Result<usize> {
    // Permutation and hash tables are dense in the alphabet size; anything
    // beyond this cannot be allocated and points at a misconfigured k.
    const MAX_TABLE_LEN: u64 = 1 << 32;
    if sig_len == 0 {
        return Err(SketchError::Config(format!(
            "{}: sig_len must be positive",
            kind
        )));
    }
    if sig_len > MAX_TABLE_LEN {
        return Err(SketchError::Config(format!(
            "{}: k-mer alphabet of size {} is too large for dense hash tables",
            kind, sig_len
        )));
    }
    Ok(sig_len as usize)
}
