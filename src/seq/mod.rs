//! Sequence representation and preprocessing.
//!
//! Sequences are plain vectors of small non-negative integers in
//! `[0, sig_len)`; the crate never deals in raw text or FASTA records. This
//! module holds the k-mer encoder and the synthetic mutation generator that
//! produces related sequence families for evaluation.

pub mod generator;
pub mod kmer;

pub use generator::SeqGen;
pub use kmer::KmerParams;

/// A single sequence symbol. Alphabets are small (DNA-like), so `u8` is
/// plenty; k-mer codes get their own wider type in [`kmer`].
pub type Symbol = u8;

/// An immutable sequence over `[0, sig_len)`.
pub type Sequence = Vec<Symbol>;

/// A k-mer encoded sequence: one `u64` code per sliding window.
pub type KmerSequence = Vec<u64>;
