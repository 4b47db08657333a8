//! Nucleotide letters and the table code space.
//!
//! Tables are indexed by codes 0..=4: the four defined bases in the order
//! A, C, G, T, then [`GAP`] for an ambiguous or missing base.

use crate::error::{Error, Invalid, Location, Result};

#[cfg(test)]
mod test;

pub const A: u8 = 0;
pub const C: u8 = 1;
pub const G: u8 = 2;
pub const T: u8 = 3;

/// No defined base. Doubles as the out-of-range index guard in every table.
pub const GAP: u8 = 4;

/// Size of the code space along one table axis.
pub const CODES: usize = 5;

pub const fn encode(letter: u8) -> Option<u8> {
    match letter {
        b'A' => Some(A),
        b'C' => Some(C),
        b'G' => Some(G),
        b'T' => Some(T),
        b'N' | b'_' => Some(GAP),
        _ => None,
    }
}

pub const fn decode(code: u8) -> u8 {
    match code {
        A => b'A',
        C => b'C',
        G => b'G',
        T => b'T',
        _ => b'N',
    }
}

/// Encode a letter that must name one of the four defined bases.
pub fn encode_defined(letter: u8, at: &Location) -> Result<u8> {
    match encode(letter) {
        Some(code) if code != GAP => Ok(code),
        _ => Err(Error::UnknownBase {
            at: at.clone(),
            base: letter as char,
        }),
    }
}

/// Encode an exact-length run of defined bases.
pub fn encode_sequence<const N: usize>(seq: &[u8], at: &Location) -> Result<[u8; N]> {
    if seq.len() != N {
        return Err(Error::invalid(
            at.clone(),
            Invalid::SequenceLength {
                expected: N,
                found: seq.len(),
            },
        ));
    }

    let mut codes = [0; N];
    for (code, &letter) in codes.iter_mut().zip(seq) {
        *code = encode_defined(letter, at)?;
    }
    Ok(codes)
}
