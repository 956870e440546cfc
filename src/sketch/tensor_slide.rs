//! Sliding-window tensor sketch.
//!
//! Applies the tensor contraction of [`TensorSketch`] to windows of
//! `window_size` k-mer positions taken every `stride` positions, producing
//! one sketch per window instead of one per sequence. Localized structure
//! survives block rearrangements that scramble the global sketch, so the
//! per-window view is the right tool for sequences mutated by block
//! permutation. The per-window width is typically `embed_dim / stride` so
//! the total output stays comparable to the flat methods; that split is the
//! caller's choice, this type takes the final width.

use crate::dist::l1_2d_minlen;
use crate::error::{Result, SketchError};
use crate::sketch::tensor::TensorSketch;
use crate::sketch::{Sketch, Sketcher};

pub struct TensorSlideSketch {
    inner: TensorSketch,
    window_size: usize,
    stride: usize,
}

impl TensorSlideSketch {
    pub fn new(
        embed_dim: usize,
        sig_len: u64,
        tuple_len: usize,
        window_size: usize,
        stride: usize,
        seed: u64,
    ) -> Result<Self> {
        if window_size == 0 {
            return Err(SketchError::Config(
                "tensor slide: window_size must be positive".into(),
            ));
        }
        if stride == 0 {
            return Err(SketchError::Config(
                "tensor slide: stride must be positive".into(),
            ));
        }
        Ok(TensorSlideSketch {
            inner: TensorSketch::new(embed_dim, sig_len, tuple_len, seed)?,
            window_size,
            stride,
        })
    }

    /// Number of windows produced for an input of `len` k-mers.
    pub fn num_windows(&self, len: usize) -> usize {
        len.div_ceil(self.stride)
    }
}

impl Sketcher for TensorSlideSketch {
    fn name(&self) -> &'static str {
        "TSS"
    }

    /// One row per window; the final windows may cover fewer than
    /// `window_size` positions. An empty input yields zero windows.
    fn compute(&self, kmer_seq: &[u64]) -> Result<Sketch> {
        let mut rows = Vec::with_capacity(self.num_windows(kmer_seq.len()));
        let mut start = 0;
        while start < kmer_seq.len() {
            let end = (start + self.window_size).min(kmer_seq.len());
            rows.push(self.inner.sketch_flat(&kmer_seq[start..end])?);
            start += self.stride;
        }
        Ok(Sketch::Rows(rows))
    }

    /// L1 distance over the overlap of the two window lists; extra windows
    /// of the longer sequence are discarded.
    fn distance(&self, a: &Sketch, b: &Sketch) -> Result<u64> {
        l1_2d_minlen(a.as_rows()?, b.as_rows()?)
    }
}
