//! Run configuration for a sketching experiment.
//!
//! The core never parses command-line arguments itself; the binary builds a
//! [`RunConfig`] from clap and hands it over. Validation happens once, up
//! front, so every downstream constructor can rely on positive dimensions.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SketchError};

/// Parameters for one evaluation run: sequence generation, k-mer encoding
/// and the per-method sketch extras.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Number of sequences to generate and compare.
    pub num_seqs: usize,
    /// Target length of each generated sequence.
    pub seq_len: usize,
    /// Alphabet size of the raw sequences (e.g. 4 for DNA-like data).
    pub sig_len: usize,
    /// Sliding-window width for k-mer encoding.
    pub kmer_size: usize,

    /// Output width of every sketch method.
    pub embed_dim: usize,
    /// Subsequence length for the tensor sketches and row width of the
    /// sparse-projection sketch.
    pub tuple_len: usize,
    /// Window width (in k-mer positions) of the sliding tensor sketch.
    pub window_size: usize,
    /// Step between consecutive windows of the sliding tensor sketch.
    pub stride: usize,
    /// Atoms per output dimension in the sparse-projection dictionary.
    pub omp_dict_size: usize,
    /// Non-zero entries per sparse-projection atom.
    pub omp_atom_sparsity: usize,

    /// Per-symbol probability of a point mutation when deriving one
    /// sequence from the previous one.
    pub mutation_rate: f64,
    /// Probability of applying a block permutation after point mutation.
    pub block_mutation_rate: f64,
    /// Block-count range for the block permutation.
    pub min_num_blocks: usize,
    pub max_num_blocks: usize,
    /// Pad or truncate every generated sequence back to `seq_len`.
    pub fix_len: bool,

    /// Seed for all pseudo-random state in the run.
    pub seed: u64,
}

impl RunConfig {
    /// Checks every field the sketch constructors depend on. Called once by
    /// the evaluator; individual constructors still re-check their own
    /// dimensions so they stay safe when used standalone.
    pub fn validate(&self) -> Result<()> {
        if self.num_seqs < 2 {
            return Err(SketchError::Config(format!(
                "num_seqs must be at least 2 to form a pair, got {}",
                self.num_seqs
            )));
        }
        if self.seq_len == 0 {
            return Err(SketchError::Config("seq_len must be positive".into()));
        }
        if self.sig_len == 0 {
            return Err(SketchError::Config("sig_len must be positive".into()));
        }
        if self.sig_len > 256 {
            return Err(SketchError::Config(format!(
                "sig_len {} exceeds the symbol range (sequences are byte-valued)",
                self.sig_len
            )));
        }
        if self.kmer_size == 0 {
            return Err(SketchError::Config("kmer_size must be positive".into()));
        }
        if self.embed_dim == 0 {
            return Err(SketchError::Config("embed_dim must be positive".into()));
        }
        if self.tuple_len == 0 {
            return Err(SketchError::Config("tuple_len must be positive".into()));
        }
        if self.window_size == 0 {
            return Err(SketchError::Config("window_size must be positive".into()));
        }
        if self.stride == 0 {
            return Err(SketchError::Config("stride must be positive".into()));
        }
        if self.stride > self.embed_dim {
            return Err(SketchError::Config(format!(
                "stride ({}) must not exceed embed_dim ({}): the sliding \
                 sketch uses embed_dim / stride components per window",
                self.stride, self.embed_dim
            )));
        }
        if self.omp_dict_size == 0 || self.omp_atom_sparsity == 0 {
            return Err(SketchError::Config(
                "omp_dict_size and omp_atom_sparsity must be positive".into(),
            ));
        }
        if self.omp_dict_size < self.tuple_len {
            return Err(SketchError::Config(format!(
                "omp_dict_size ({}) must be at least tuple_len ({}) so every \
                 pursuit step can select a fresh atom",
                self.omp_dict_size, self.tuple_len
            )));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(SketchError::Config(format!(
                "mutation_rate must lie in [0, 1], got {}",
                self.mutation_rate
            )));
        }
        if !(0.0..=1.0).contains(&self.block_mutation_rate) {
            return Err(SketchError::Config(format!(
                "block_mutation_rate must lie in [0, 1], got {}",
                self.block_mutation_rate
            )));
        }
        if self.min_num_blocks < 2 || self.min_num_blocks > self.max_num_blocks {
            return Err(SketchError::Config(format!(
                "block range [{}, {}] is invalid: need 2 <= min <= max",
                self.min_num_blocks, self.max_num_blocks
            )));
        }
        Ok(())
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            num_seqs: 20,
            seq_len: 256,
            sig_len: 4,
            kmer_size: 3,
            embed_dim: 64,
            tuple_len: 3,
            window_size: 32,
            stride: 8,
            omp_dict_size: 32,
            omp_atom_sparsity: 8,
            mutation_rate: 0.1,
            block_mutation_rate: 0.2,
            min_num_blocks: 2,
            max_num_blocks: 4,
            fix_len: true,
            seed: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(RunConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_zero_embed_dim() {
        let cfg = RunConfig {
            embed_dim: 0,
            ..RunConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(SketchError::Config(_))));
    }

    #[test]
    fn rejects_stride_wider_than_embed_dim() {
        let cfg = RunConfig {
            embed_dim: 4,
            stride: 8,
            ..RunConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_out_of_range_mutation_rate() {
        let cfg = RunConfig {
            mutation_rate: 1.5,
            ..RunConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
