//! Order-sensitive tensor sketch.
//!
//! Counts, implicitly, every length-`tuple_len` subsequence of the input.
//! Construction draws `tuple_len` layers of random (offset, sign) tables
//! over the k-mer alphabet; each table hashes a symbol to a cyclic shift of
//! the `embed_dim` counters and a +-1 sign. Processing a symbol folds it
//! into every partial subsequence counted so far:
//!
//! ```text
//! T[p][(m + offset[p][c]) % embed_dim] += sign[p][c] * T[p - 1][m]
//! ```
//!
//! applied for `p` from `tuple_len` down to 1, with `T[0] = [1, 0, ..]`.
//! The final layer `T[tuple_len]` is the sketch. Because each subsequence
//! contributes through the layers in positional order, permuting a sequence
//! generally changes the sketch; this is the piece MinHash cannot see.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::dist::l1;
use crate::error::{Result, SketchError};
use crate::sketch::{check_alphabet, table_len, Sketch, Sketcher};

pub struct TensorSketch {
    embed_dim: usize,
    sig_len: u64,
    tuple_len: usize,
    /// Per-layer cyclic shift of each symbol, in `[0, embed_dim)`.
    offsets: Vec<Vec<usize>>,
    /// Per-layer sign of each symbol.
    signs: Vec<Vec<i64>>,
}

impl TensorSketch {
    pub fn new(embed_dim: usize, sig_len: u64, tuple_len: usize, seed: u64) -> Result<Self> {
        if embed_dim == 0 {
            return Err(SketchError::Config(
                "tensor sketch: embed_dim must be positive".into(),
            ));
        }
        if tuple_len == 0 {
            return Err(SketchError::Config(
                "tensor sketch: tuple_len must be positive".into(),
            ));
        }
        let len = table_len(sig_len, "tensor sketch")?;
        let mut rng = StdRng::seed_from_u64(seed);
        let offsets = (0..tuple_len)
            .map(|_| (0..len).map(|_| rng.random_range(0..embed_dim)).collect())
            .collect();
        let signs = (0..tuple_len)
            .map(|_| {
                (0..len)
                    .map(|_| if rng.random_bool(0.5) { 1 } else { -1 })
                    .collect()
            })
            .collect();
        Ok(TensorSketch {
            embed_dim,
            sig_len,
            tuple_len,
            offsets,
            signs,
        })
    }

    pub fn embed_dim(&self) -> usize {
        self.embed_dim
    }

    /// The recursive contraction, shared with the sliding-window variant.
    pub(crate) fn sketch_flat(&self, kmer_seq: &[u64]) -> Result<Vec<i64>> {
        check_alphabet(kmer_seq, self.sig_len)?;

        // layers[p] holds the signed counts of length-p subsequences seen
        // so far, spread over embed_dim bins.
        let mut layers = vec![vec![0i64; self.embed_dim]; self.tuple_len + 1];
        layers[0][0] = 1;

        for &c in kmer_seq {
            let c = c as usize;
            for p in (1..=self.tuple_len).rev() {
                let (prev_layers, cur_layers) = layers.split_at_mut(p);
                let prev = &prev_layers[p - 1];
                let cur = &mut cur_layers[0];
                let offset = self.offsets[p - 1][c];
                let sign = self.signs[p - 1][c];
                for (m, &v) in prev.iter().enumerate() {
                    if v != 0 {
                        let dst = (m + offset) % self.embed_dim;
                        cur[dst] += sign * v;
                    }
                }
            }
        }
        Ok(layers.swap_remove(self.tuple_len))
    }
}

impl Sketcher for TensorSketch {
    fn name(&self) -> &'static str {
        "TS"
    }

    fn compute(&self, kmer_seq: &[u64]) -> Result<Sketch> {
        Ok(Sketch::Flat(self.sketch_flat(kmer_seq)?))
    }

    fn distance(&self, a: &Sketch, b: &Sketch) -> Result<u64> {
        l1(a.as_flat()?, b.as_flat()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_for_fixed_instance() {
        let ts = TensorSketch::new(16, 64, 3, 2).unwrap();
        let seq = vec![0, 1, 2, 3, 4, 5, 6, 7];
        assert_eq!(ts.compute(&seq).unwrap(), ts.compute(&seq).unwrap());
    }

    #[test]
    fn empty_and_too_short_inputs_are_all_zeros() {
        let ts = TensorSketch::new(8, 64, 3, 2).unwrap();
        assert_eq!(ts.compute(&[]).unwrap(), Sketch::Flat(vec![0; 8]));
        // No length-3 subsequence exists in a length-2 input.
        assert_eq!(ts.compute(&[1, 2]).unwrap(), Sketch::Flat(vec![0; 8]));
    }

    #[test]
    fn counts_are_conserved_up_to_sign() {
        // Every length-t subsequence contributes exactly +-1 to one bin, so
        // the L1 mass of the sketch is at most C(n, t) and has its parity.
        let ts = TensorSketch::new(4, 16, 2, 3).unwrap();
        let seq = vec![0, 1, 2, 3]; // C(4, 2) = 6 pairs
        let sketch = ts.sketch_flat(&seq).unwrap();
        let mass: i64 = sketch.iter().map(|v| v.abs()).sum();
        assert!(mass <= 6);
        assert_eq!(mass % 2, 0);
    }

    #[test]
    fn order_sensitive_for_some_seed() {
        // A permutation of the input must be able to change the sketch,
        // in contrast to MinHash. A single seed could collide by chance,
        // so witness the difference across a handful of seeds.
        let a = vec![0, 1];
        let b = vec![1, 0];
        let differs = (0..16).any(|seed| {
            let ts = TensorSketch::new(8, 4, 2, seed).unwrap();
            ts.compute(&a).unwrap() != ts.compute(&b).unwrap()
        });
        assert!(differs);
    }

    #[test]
    fn single_pair_lands_in_one_bin() {
        let ts = TensorSketch::new(8, 4, 2, 0).unwrap();
        let sketch = ts.sketch_flat(&[2, 3]).unwrap();
        let nonzero: Vec<i64> = sketch.into_iter().filter(|&v| v != 0).collect();
        assert_eq!(nonzero.len(), 1);
        assert_eq!(nonzero[0].abs(), 1);
    }

    #[test]
    fn rejects_code_outside_alphabet() {
        let ts = TensorSketch::new(8, 16, 2, 0).unwrap();
        assert!(ts.compute(&[16]).is_err());
    }
}
