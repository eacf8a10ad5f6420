//! Nucleotide complement used for reverse-strand output
//!
//! Only the four unambiguous bases are complemented (A↔T, C↔G), preserving
//! case. Everything else, including IUPAC ambiguity codes, `N`, and the
//! spacer bytes inserted between quality lines, passes through unchanged.
//!
//! # Examples
//!
//! ```
//! use fasta_extract::operations::{complement_base, reverse_complement};
//!
//! assert_eq!(complement_base(b'a'), b't');
//! assert_eq!(reverse_complement(b"ACGTn"), b"nACGT");
//! ```

/// Lookup table for the 4-symbol complement
const COMPLEMENT_TABLE: [u8; 256] = {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = i as u8; // Default: preserve character
        i += 1;
    }

    table[b'A' as usize] = b'T';
    table[b'T' as usize] = b'A';
    table[b'G' as usize] = b'C';
    table[b'C' as usize] = b'G';
    table[b'a' as usize] = b't';
    table[b't' as usize] = b'a';
    table[b'g' as usize] = b'c';
    table[b'c' as usize] = b'g';

    table
};

/// Complement a single base
#[inline]
pub fn complement_base(base: u8) -> u8 {
    COMPLEMENT_TABLE[base as usize]
}

/// Reverse complement a sequence into a new vector
pub fn reverse_complement(seq: &[u8]) -> Vec<u8> {
    seq.iter().rev().map(|&b| complement_base(b)).collect()
}
