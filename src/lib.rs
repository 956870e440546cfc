//! Sketch-based similarity estimation for discrete symbol sequences.
//!
//! Maps each sequence over a small integer alphabet to a fixed-size numeric
//! fingerprint (a "sketch") such that distances between fingerprints
//! approximate the edit distance between the original sequences, at a
//! fraction of the quadratic cost of exact alignment. The crate bundles:
//!
//! 1. A k-mer encoder turning sequences into k-mer code sequences.
//! 2. Five sketching algorithms: MinHash, weighted MinHash, a
//!    sparse-projection (matching-pursuit) sketch, the order-sensitive
//!    tensor sketch, and its sliding-window variant.
//! 3. The exact dynamic-programming edit distance used as ground truth.
//! 4. An evaluator assembling all-pairs distance matrices, one per method.

pub mod config;
pub mod dist;
pub mod error;
pub mod eval;
pub mod output;
pub mod seq;
pub mod sketch;
pub mod stats;

pub use config::RunConfig;
pub use error::{Result, SketchError};
pub use eval::{DistanceSet, Evaluator};
