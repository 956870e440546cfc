//! Sparse-projection sketch ("OMP").
//!
//! A matching-pursuit style summary of the k-mer occurrence histogram.
//! Construction draws, for every output dimension, a dictionary of
//! `dict_size` sparse random +-1 atoms over the k-mer alphabet. `compute`
//! then greedily explains the histogram: at each of `tuple_len` steps it
//! selects the unused atom with the largest absolute correlation to the
//! residual, records its index, and subtracts its projection. The sketch is
//! the `embed_dim x tuple_len` table of selected atom indices, compared by
//! 2-D Hamming distance: similar histograms tend to select the same atoms
//! in the same order.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};

use crate::dist::hamming2d;
use crate::error::{Result, SketchError};
use crate::sketch::{check_alphabet, Sketch, Sketcher};

/// One sparse dictionary atom: (k-mer code, sign) pairs.
type Atom = Vec<(u64, f64)>;

pub struct OmpSketch {
    embed_dim: usize,
    sig_len: u64,
    tuple_len: usize,
    atom_sparsity: usize,
    /// `embed_dim` dictionaries of `dict_size` atoms each.
    dictionaries: Vec<Vec<Atom>>,
}

impl OmpSketch {
    pub fn new(
        embed_dim: usize,
        sig_len: u64,
        dict_size: usize,
        atom_sparsity: usize,
        tuple_len: usize,
        seed: u64,
    ) -> Result<Self> {
        if embed_dim == 0 {
            return Err(SketchError::Config(
                "omp: embed_dim must be positive".into(),
            ));
        }
        if sig_len == 0 {
            return Err(SketchError::Config("omp: sig_len must be positive".into()));
        }
        if tuple_len == 0 || dict_size < tuple_len {
            return Err(SketchError::Config(format!(
                "omp: need 1 <= tuple_len <= dict_size, got tuple_len {} and dict_size {}",
                tuple_len, dict_size
            )));
        }
        let sparsity = atom_sparsity.min(usize::try_from(sig_len).unwrap_or(usize::MAX));
        if sparsity == 0 {
            return Err(SketchError::Config(
                "omp: atom_sparsity must be positive".into(),
            ));
        }
        let index_domain = usize::try_from(sig_len).map_err(|_| {
            SketchError::Config(format!(
                "omp: k-mer alphabet of size {} is too large to sample atoms from",
                sig_len
            ))
        })?;

        let mut rng = StdRng::seed_from_u64(seed);
        let dictionaries = (0..embed_dim)
            .map(|_| {
                (0..dict_size)
                    .map(|_| {
                        index::sample(&mut rng, index_domain, sparsity)
                            .iter()
                            .map(|i| {
                                let sign = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
                                (i as u64, sign)
                            })
                            .collect()
                    })
                    .collect()
            })
            .collect();
        Ok(OmpSketch {
            embed_dim,
            sig_len,
            tuple_len,
            atom_sparsity: sparsity,
            dictionaries,
        })
    }

    pub fn embed_dim(&self) -> usize {
        self.embed_dim
    }

    /// Greedy pursuit over one dictionary. Ties and the all-zero histogram
    /// resolve to the lowest unused atom index, so the output is fully
    /// deterministic.
    fn pursue(&self, dict: &[Atom], histogram: &HashMap<u64, f64>) -> Vec<i64> {
        let mut residual = histogram.clone();
        let mut used = vec![false; dict.len()];
        let mut row = Vec::with_capacity(self.tuple_len);
        for _ in 0..self.tuple_len {
            let mut best: Option<(usize, f64)> = None;
            for (ai, atom) in dict.iter().enumerate() {
                if used[ai] {
                    continue;
                }
                let score: f64 = atom
                    .iter()
                    .map(|(code, sign)| sign * residual.get(code).copied().unwrap_or(0.0))
                    .sum();
                let strength = score.abs();
                match best {
                    Some((_, s)) if s >= strength => {}
                    _ => best = Some((ai, strength)),
                }
            }
            // dict_size >= tuple_len guarantees an unused atom remains.
            let (ai, _) = best.expect("dictionary exhausted");
            used[ai] = true;
            row.push(ai as i64);

            let atom = &dict[ai];
            let score: f64 = atom
                .iter()
                .map(|(code, sign)| sign * residual.get(code).copied().unwrap_or(0.0))
                .sum();
            let coeff = score / self.atom_sparsity as f64;
            for (code, sign) in atom {
                *residual.entry(*code).or_insert(0.0) -= coeff * sign;
            }
        }
        row
    }
}

impl Sketcher for OmpSketch {
    fn name(&self) -> &'static str {
        "OMP"
    }

    fn compute(&self, kmer_seq: &[u64]) -> Result<Sketch> {
        check_alphabet(kmer_seq, self.sig_len)?;
        let mut histogram: HashMap<u64, f64> = HashMap::new();
        for &c in kmer_seq {
            *histogram.entry(c).or_insert(0.0) += 1.0;
        }
        let rows = self
            .dictionaries
            .iter()
            .map(|dict| self.pursue(dict, &histogram))
            .collect();
        Ok(Sketch::Rows(rows))
    }

    fn distance(&self, a: &Sketch, b: &Sketch) -> Result<u64> {
        hamming2d(a.as_rows()?, b.as_rows()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sketcher() -> OmpSketch {
        OmpSketch::new(8, 64, 16, 8, 3, 11).unwrap()
    }

    #[test]
    fn output_shape_is_embed_dim_by_tuple_len() {
        let omp = sketcher();
        let sketch = omp.compute(&[0, 1, 2, 3, 4, 5]).unwrap();
        let rows = sketch.as_rows().unwrap();
        assert_eq!(rows.len(), 8);
        assert!(rows.iter().all(|r| r.len() == 3));
    }

    #[test]
    fn deterministic_for_fixed_instance() {
        let omp = sketcher();
        let seq = vec![0, 5, 5, 9, 31, 63];
        assert_eq!(omp.compute(&seq).unwrap(), omp.compute(&seq).unwrap());
    }

    #[test]
    fn rows_select_distinct_atoms() {
        let omp = sketcher();
        let sketch = omp.compute(&[3, 3, 3, 17, 42]).unwrap();
        for row in sketch.as_rows().unwrap() {
            let mut seen = row.clone();
            seen.sort_unstable();
            seen.dedup();
            assert_eq!(seen.len(), row.len());
        }
    }

    #[test]
    fn empty_input_is_defined() {
        let omp = sketcher();
        // All correlations are zero, so pursuit falls back to the lowest
        // unused indices; crucially this is identical across calls.
        let a = omp.compute(&[]).unwrap();
        let b = omp.compute(&[]).unwrap();
        assert_eq!(a, b);
        assert_eq!(omp.distance(&a, &b).unwrap(), 0);
    }

    #[test]
    fn identical_inputs_have_zero_distance() {
        let omp = sketcher();
        let a = omp.compute(&[1, 2, 3, 4]).unwrap();
        let b = omp.compute(&[1, 2, 3, 4]).unwrap();
        assert_eq!(omp.distance(&a, &b).unwrap(), 0);
    }

    #[test]
    fn rejects_dict_smaller_than_tuple() {
        assert!(OmpSketch::new(4, 64, 2, 4, 3, 0).is_err());
    }
}
