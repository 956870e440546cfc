//! Positional-radix k-mer encoding.
//!
//! Every sliding window of `kmer_size` symbols is packed into a single
//! integer code `sum(seq[i + j] * sig_len^j)`, so the k-mer codes form a new
//! sequence over the enlarged alphabet `sig_len^kmer_size`. The sketchers
//! all operate on that enlarged alphabet.

use crate::error::{Result, SketchError};
use crate::seq::{KmerSequence, Symbol};

/// K-mer encoding parameters. Construction checks that the enlarged
/// alphabet `sig_len^kmer_size` is representable, so `encode` can never
/// silently wrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KmerParams {
    kmer_size: usize,
    sig_len: usize,
    ksig_len: u64,
}

impl KmerParams {
    pub fn new(kmer_size: usize, sig_len: usize) -> Result<Self> {
        if kmer_size == 0 {
            return Err(SketchError::Config("kmer_size must be positive".into()));
        }
        if sig_len == 0 {
            return Err(SketchError::Config("sig_len must be positive".into()));
        }
        let base = u64::try_from(sig_len)
            .map_err(|_| SketchError::Config(format!("sig_len {} does not fit u64", sig_len)))?;
        let exp = u32::try_from(kmer_size).map_err(|_| {
            SketchError::Config(format!("kmer_size {} is too large", kmer_size))
        })?;
        let ksig_len = base.checked_pow(exp).ok_or_else(|| {
            SketchError::Config(format!(
                "k-mer alphabet sig_len^kmer_size = {}^{} overflows u64",
                sig_len, kmer_size
            ))
        })?;
        Ok(KmerParams {
            kmer_size,
            sig_len,
            ksig_len,
        })
    }

    pub fn kmer_size(&self) -> usize {
        self.kmer_size
    }

    pub fn sig_len(&self) -> usize {
        self.sig_len
    }

    /// Size of the k-mer alphabet, `sig_len^kmer_size`.
    pub fn ksig_len(&self) -> u64 {
        self.ksig_len
    }

    /// Encodes a sequence into its k-mer code sequence.
    ///
    /// Output length is `seq.len() - kmer_size + 1`. A sequence shorter than
    /// `kmer_size` yields an empty k-mer sequence rather than an error; the
    /// sketchers all define their output on empty input, so short sequences
    /// degrade gracefully instead of aborting a batch.
    ///
    /// Symbols outside `[0, sig_len)` are an `InvalidInput` error.
    pub fn encode(&self, seq: &[Symbol]) -> Result<KmerSequence> {
        if let Some(&bad) = seq.iter().find(|&&c| c as usize >= self.sig_len) {
            return Err(SketchError::InvalidInput(format!(
                "symbol {} is outside the alphabet [0, {})",
                bad, self.sig_len
            )));
        }
        if seq.len() < self.kmer_size {
            return Ok(Vec::new());
        }

        let base = self.sig_len as u64;
        // Radix weight of the last window position, sig_len^(kmer_size - 1).
        let top = base.pow(self.kmer_size as u32 - 1);

        let mut codes = Vec::with_capacity(seq.len() - self.kmer_size + 1);
        let mut code: u64 = seq[..self.kmer_size]
            .iter()
            .rev()
            .fold(0, |acc, &c| acc * base + c as u64);
        codes.push(code);
        for i in self.kmer_size..seq.len() {
            // Roll the window: drop position i - kmer_size, shift, append.
            code = (code - seq[i - self.kmer_size] as u64) / base + seq[i] as u64 * top;
            codes.push(code);
        }
        Ok(codes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_positional_radix() {
        let params = KmerParams::new(2, 4).unwrap();
        // code_i = seq[i] + 4 * seq[i + 1]
        let codes = params.encode(&[0, 1, 2, 3]).unwrap();
        assert_eq!(codes, vec![4, 9, 14]);
    }

    #[test]
    fn kmer_size_one_is_identity() {
        let params = KmerParams::new(1, 6).unwrap();
        let codes = params.encode(&[0, 1, 2, 3, 4, 5]).unwrap();
        assert_eq!(codes, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn rolling_update_matches_naive() {
        let params = KmerParams::new(3, 5).unwrap();
        let seq: Vec<u8> = vec![4, 0, 3, 1, 1, 2, 4, 0, 2];
        let codes = params.encode(&seq).unwrap();
        for (i, &code) in codes.iter().enumerate() {
            let naive: u64 = (0..3).map(|j| seq[i + j] as u64 * 5u64.pow(j as u32)).sum();
            assert_eq!(code, naive);
        }
    }

    #[test]
    fn short_sequence_yields_empty() {
        let params = KmerParams::new(4, 4).unwrap();
        assert!(params.encode(&[0, 1, 2]).unwrap().is_empty());
        assert!(params.encode(&[]).unwrap().is_empty());
    }

    #[test]
    fn rejects_out_of_alphabet_symbol() {
        let params = KmerParams::new(2, 4).unwrap();
        assert!(matches!(
            params.encode(&[0, 4]),
            Err(SketchError::InvalidInput(_))
        ));
    }

    #[test]
    fn rejects_overflowing_alphabet() {
        // 4^40 > u64::MAX would not overflow, but 16^16 = 2^64 does.
        assert!(matches!(
            KmerParams::new(16, 16),
            Err(SketchError::Config(_))
        ));
        assert!(KmerParams::new(31, 4).is_ok());
    }

    #[test]
    fn rejects_zero_parameters() {
        assert!(KmerParams::new(0, 4).is_err());
        assert!(KmerParams::new(3, 0).is_err());
    }
}
