//! Multiplicity-sensitive MinHash.
//!
//! Plain MinHash cannot tell `[a, b]` from `[a, a, b, b]`. The weighted
//! variant gives every occurrence of a k-mer its own slot in an enlarged
//! hash domain: the n-th occurrence of code `c` hashes as `c + n * sig_len`.
//! Two sequences then agree on a component only when they share both the
//! k-mer and its repeat count, which separates sequences with identical
//! content but different repeat structure.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::dist::hamming;
use crate::error::{Result, SketchError};
use crate::sketch::{check_alphabet, table_len, Sketch, Sketcher};

pub struct WeightedMinHash {
    embed_dim: usize,
    sig_len: u64,
    /// Upper bound on the number of occurrences of any single k-mer,
    /// i.e. on sequence length. Sizes the enlarged hash domain.
    max_len: usize,
    /// `embed_dim` permutations of `[0, sig_len * max_len)`.
    perms: Vec<Vec<i64>>,
}

impl WeightedMinHash {
    pub fn new(embed_dim: usize, sig_len: u64, max_len: usize, seed: u64) -> Result<Self> {
        if embed_dim == 0 {
            return Err(SketchError::Config(
                "weighted minhash: embed_dim must be positive".into(),
            ));
        }
        if max_len == 0 {
            return Err(SketchError::Config(
                "weighted minhash: max_len must be positive".into(),
            ));
        }
        let domain = sig_len.checked_mul(max_len as u64).ok_or_else(|| {
            SketchError::Config(format!(
                "weighted minhash: hash domain sig_len * max_len = {} * {} overflows",
                sig_len, max_len
            ))
        })?;
        let len = table_len(domain, "weighted minhash")?;
        let mut rng = StdRng::seed_from_u64(seed);
        let perms = (0..embed_dim)
            .map(|_| {
                let mut perm: Vec<i64> = (0..len as i64).collect();
                perm.shuffle(&mut rng);
                perm
            })
            .collect();
        Ok(WeightedMinHash {
            embed_dim,
            sig_len,
            max_len,
            perms,
        })
    }

    pub fn embed_dim(&self) -> usize {
        self.embed_dim
    }
}

impl Sketcher for WeightedMinHash {
    fn name(&self) -> &'static str {
        "WMH"
    }

    fn compute(&self, kmer_seq: &[u64]) -> Result<Sketch> {
        check_alphabet(kmer_seq, self.sig_len)?;

        // Occurrence-indexed hash slots; the order of occurrences within
        // the sequence does not matter, only how many there are.
        let mut occurrences: HashMap<u64, usize> = HashMap::new();
        let mut slots = Vec::with_capacity(kmer_seq.len());
        for &c in kmer_seq {
            let occ = occurrences.entry(c).or_insert(0);
            if *occ >= self.max_len {
                return Err(SketchError::InvalidInput(format!(
                    "k-mer code {} occurs more than max_len = {} times",
                    c, self.max_len
                )));
            }
            slots.push((c + *occ as u64 * self.sig_len) as usize);
            *occ += 1;
        }

        let sketch = self
            .perms
            .iter()
            .map(|perm| slots.iter().map(|&s| perm[s]).min().unwrap_or(0))
            .collect();
        Ok(Sketch::Flat(sketch))
    }

    fn distance(&self, a: &Sketch, b: &Sketch) -> Result<u64> {
        hamming(a.as_flat()?, b.as_flat()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_for_fixed_instance() {
        let wmh = WeightedMinHash::new(8, 64, 16, 5).unwrap();
        let seq = vec![0, 1, 1, 2, 3];
        assert_eq!(wmh.compute(&seq).unwrap(), wmh.compute(&seq).unwrap());
    }

    #[test]
    fn invariant_under_permutation() {
        let wmh = WeightedMinHash::new(8, 64, 16, 5).unwrap();
        let a = vec![0, 1, 1, 2, 3];
        let b = vec![3, 1, 2, 1, 0];
        assert_eq!(wmh.compute(&a).unwrap(), wmh.compute(&b).unwrap());
    }

    #[test]
    fn sensitive_to_multiplicity() {
        // Same k-mer set, different repeat structure. Plain MinHash would
        // collide; the weighted variant must not (with these parameters the
        // doubled occurrences hash into fresh slots in every component).
        let wmh = WeightedMinHash::new(64, 64, 16, 5).unwrap();
        let once = vec![0, 1, 2, 3, 4, 5];
        let twice = vec![0, 0, 1, 1, 2, 2, 3, 3, 4, 4, 5, 5];
        assert_ne!(wmh.compute(&once).unwrap(), wmh.compute(&twice).unwrap());
    }

    #[test]
    fn empty_input_is_all_zeros() {
        let wmh = WeightedMinHash::new(4, 64, 16, 0).unwrap();
        assert_eq!(wmh.compute(&[]).unwrap(), Sketch::Flat(vec![0; 4]));
    }

    #[test]
    fn rejects_overlong_repeat_run() {
        let wmh = WeightedMinHash::new(4, 8, 2, 0).unwrap();
        assert!(matches!(
            wmh.compute(&[7, 7, 7]),
            Err(SketchError::InvalidInput(_))
        ));
    }

    #[test]
    fn rejects_zero_dimensions() {
        assert!(WeightedMinHash::new(0, 8, 4, 0).is_err());
        assert!(WeightedMinHash::new(4, 8, 0, 0).is_err());
    }
}
