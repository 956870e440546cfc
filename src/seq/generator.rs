//! Synthetic sequence generator.
//!
//! Produces a family of related sequences for evaluation: the first
//! sequence is uniform random, and each subsequent one is derived from its
//! predecessor by per-symbol point mutation (insert, delete or substitute)
//! followed by an optional block permutation that shuffles equally sized
//! chunks of the sequence. The block step disrupts global order while
//! leaving local structure intact, which is exactly the regime where the
//! sliding tensor sketch is expected to beat the global one.

use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::config::RunConfig;
use crate::seq::{Sequence, Symbol};

/// Owns the generator state for one run. Unlike the sketch parameter
/// objects, `SeqGen` mutates its RNG on every call; it is a data source,
/// not a read-only parameter set.
#[derive(Debug)]
pub struct SeqGen {
    sig_len: usize,
    seq_len: usize,
    num_seqs: usize,
    mutation_rate: f64,
    block_mutation_rate: f64,
    min_num_blocks: usize,
    max_num_blocks: usize,
    fix_len: bool,
    rng: StdRng,
}

impl SeqGen {
    pub fn new(cfg: &RunConfig) -> Self {
        SeqGen {
            sig_len: cfg.sig_len,
            seq_len: cfg.seq_len,
            num_seqs: cfg.num_seqs,
            mutation_rate: cfg.mutation_rate,
            block_mutation_rate: cfg.block_mutation_rate,
            min_num_blocks: cfg.min_num_blocks,
            max_num_blocks: cfg.max_num_blocks,
            fix_len: cfg.fix_len,
            rng: StdRng::seed_from_u64(cfg.seed),
        }
    }

    fn random_symbol(&mut self) -> Symbol {
        self.rng.random_range(0..self.sig_len) as Symbol
    }

    fn gen_seq(&mut self) -> Sequence {
        (0..self.seq_len).map(|_| self.random_symbol()).collect()
    }

    /// Copies `reference` symbol by symbol; each position mutates with
    /// probability `mutation_rate`, split evenly between insertion,
    /// deletion and substitution. Substitution always picks a symbol
    /// different from the original, and an insertion does not consume the
    /// reference position.
    fn point_mutate(&mut self, reference: &[Symbol]) -> Sequence {
        let mut out = Vec::with_capacity(reference.len() + reference.len() / 8);
        let mut i = 0;
        while i < reference.len() {
            if self.rng.random_bool(self.mutation_rate) {
                match self.rng.random_range(0..3) {
                    0 => {
                        // Insert, then revisit the same reference symbol.
                        let c = self.random_symbol();
                        out.push(c);
                        continue;
                    }
                    1 => {} // Delete: emit nothing.
                    _ if self.sig_len > 1 => {
                        let c = self.rng.random_range(0..self.sig_len - 1) as Symbol;
                        out.push(if c >= reference[i] { c + 1 } else { c });
                    }
                    // Unary alphabet: substitution cannot change anything.
                    _ => out.push(reference[i]),
                }
            } else {
                out.push(reference[i]);
            }
            i += 1;
        }
        out
    }

    /// With probability `block_mutation_rate`, splits the sequence into a
    /// random number of equally sized blocks and permutes them. The
    /// sequence is padded with random symbols until its length divides the
    /// block count.
    fn block_permute(&mut self, seq: &mut Sequence) {
        if !self.rng.random_bool(self.block_mutation_rate) {
            return;
        }
        let num_blocks = self
            .rng
            .random_range(self.min_num_blocks..=self.max_num_blocks);
        while seq.len() % num_blocks != 0 {
            let c = self.random_symbol();
            seq.push(c);
        }
        let mut perm: Vec<usize> = (0..num_blocks).collect();
        perm.shuffle(&mut self.rng);

        let block_size = seq.len() / num_blocks;
        let mut out = vec![0 as Symbol; seq.len()];
        for (pi, &target) in perm.iter().enumerate() {
            let src = &seq[pi * block_size..(pi + 1) * block_size];
            out[target * block_size..(target + 1) * block_size].copy_from_slice(src);
        }
        *seq = out;
    }

    /// Pads with random symbols or truncates so the sequence is exactly
    /// `seq_len` long.
    fn make_fix_len(&mut self, seq: &mut Sequence) {
        while seq.len() < self.seq_len {
            let c = self.random_symbol();
            seq.push(c);
        }
        seq.truncate(self.seq_len);
    }

    /// Generates the full family of `num_seqs` sequences, each derived from
    /// the previous one, so pair distance loosely tracks index distance.
    pub fn gen_seqs(&mut self) -> Vec<Sequence> {
        let mut seqs = Vec::with_capacity(self.num_seqs);
        seqs.push(self.gen_seq());
        for si in 1..self.num_seqs {
            let mut next = self.point_mutate(&seqs[si - 1]);
            self.block_permute(&mut next);
            if self.fix_len {
                self.make_fix_len(&mut next);
            }
            debug!("generated sequence {} of length {}", si, next.len());
            seqs.push(next);
        }
        seqs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> RunConfig {
        RunConfig {
            num_seqs: 5,
            seq_len: 100,
            sig_len: 4,
            seed: 7,
            ..RunConfig::default()
        }
    }

    #[test]
    fn generates_requested_count_and_alphabet() {
        let cfg = small_config();
        let seqs = SeqGen::new(&cfg).gen_seqs();
        assert_eq!(seqs.len(), 5);
        for seq in &seqs {
            assert!(seq.iter().all(|&c| (c as usize) < cfg.sig_len));
        }
    }

    #[test]
    fn fix_len_pins_every_length() {
        let cfg = RunConfig {
            fix_len: true,
            mutation_rate: 0.5,
            ..small_config()
        };
        for seq in SeqGen::new(&cfg).gen_seqs() {
            assert_eq!(seq.len(), cfg.seq_len);
        }
    }

    #[test]
    fn same_seed_reproduces_the_family() {
        let cfg = small_config();
        let a = SeqGen::new(&cfg).gen_seqs();
        let b = SeqGen::new(&cfg).gen_seqs();
        assert_eq!(a, b);
    }

    #[test]
    fn zero_rates_copy_the_first_sequence() {
        let cfg = RunConfig {
            mutation_rate: 0.0,
            block_mutation_rate: 0.0,
            ..small_config()
        };
        let seqs = SeqGen::new(&cfg).gen_seqs();
        for seq in &seqs[1..] {
            assert_eq!(seq, &seqs[0]);
        }
    }
}
