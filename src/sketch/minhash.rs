//! Classic MinHash over the k-mer set of a sequence.
//!
//! Each of the `embed_dim` output components applies an independent random
//! permutation of the k-mer alphabet and keeps the minimum permuted value
//! seen in the sequence. Only set membership matters: position and
//! multiplicity of k-mers do not influence the result, so sequences with
//! the same k-mer set always collide.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::dist::hamming;
use crate::error::{Result, SketchError};
use crate::sketch::{check_alphabet, table_len, Sketch, Sketcher};

pub struct MinHash {
    embed_dim: usize,
    sig_len: u64,
    /// `embed_dim` permutations of `[0, sig_len)`, fixed at construction.
    perms: Vec<Vec<i64>>,
}

impl MinHash {
    /// `sig_len` is the alphabet of the *input* to the sketch, i.e. the
    /// k-mer alphabet `sig_len^kmer_size`, not the raw symbol alphabet.
    pub fn new(embed_dim: usize, sig_len: u64, seed: u64) -> Result<Self> {
        if embed_dim == 0 {
            return Err(SketchError::Config(
                "minhash: embed_dim must be positive".into(),
            ));
        }
        let len = table_len(sig_len, "minhash")?;
        let mut rng = StdRng::seed_from_u64(seed);
        let perms = (0..embed_dim)
            .map(|_| {
                let mut perm: Vec<i64> = (0..len as i64).collect();
                perm.shuffle(&mut rng);
                perm
            })
            .collect();
        Ok(MinHash {
            embed_dim,
            sig_len,
            perms,
        })
    }

    pub fn embed_dim(&self) -> usize {
        self.embed_dim
    }
}

impl Sketcher for MinHash {
    fn name(&self) -> &'static str {
        "MH"
    }

    /// An empty k-mer sequence yields the all-zero sketch rather than an
    /// error, so degenerate sequences still participate in a batch.
    fn compute(&self, kmer_seq: &[u64]) -> Result<Sketch> {
        check_alphabet(kmer_seq, self.sig_len)?;
        let sketch = self
            .perms
            .iter()
            .map(|perm| {
                kmer_seq
                    .iter()
                    .map(|&c| perm[c as usize])
                    .min()
                    .unwrap_or(0)
            })
            .collect();
        Ok(Sketch::Flat(sketch))
    }

    fn distance(&self, a: &Sketch, b: &Sketch) -> Result<u64> {
        hamming(a.as_flat()?, b.as_flat()?)
    }
}
