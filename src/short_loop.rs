//! Sequence-specific hairpin penalties for triloops and tetraloops.
//!
//! The alignment engine looks these up by exact sequence, so records keep
//! file order only to make the generated output reproducible.

use std::collections::hash_map::Entry;

use rustc_hash::FxHashMap as HashMap;
use tracing::warn;

use crate::base;
use crate::error::{Error, Invalid, Result};
use crate::loader::{ExceptionRow, Table};
use crate::util::ByteStr;


/// One exact loop sequence and the value overriding the length penalty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShortLoop<const N: usize> {
    pub seq: [u8; N],
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShortLoops<const N: usize> {
    pub entropies: Vec<ShortLoop<N>>,
    pub enthalpies: Vec<ShortLoop<N>>,
}

pub type Triloops = ShortLoops<3>;
pub type Tetraloops = ShortLoops<4>;

impl<const N: usize> ShortLoops<N> {
    pub fn build(entropy: &Table<ExceptionRow>, enthalpy: &Table<ExceptionRow>) -> Result<Self> {
        let entropies = records(entropy)?;
        let enthalpies = records(enthalpy)?;

        if entropies.len() != enthalpies.len() {
            let (longer, shorter) = if entropy.len() > enthalpy.len() {
                (entropy, enthalpy)
            } else {
                (enthalpy, entropy)
            };
            return Err(Error::invalid(
                longer.location_of(&longer.rows[shorter.len()]),
                Invalid::ExceptionCount {
                    entropy: entropies.len(),
                    enthalpy: enthalpies.len(),
                },
            ));
        }

        Ok(Self {
            entropies,
            enthalpies,
        })
    }

    /// Number of records per channel; the consumer's array bound.
    pub fn len(&self) -> usize {
        self.enthalpies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enthalpies.is_empty()
    }
}

fn records<const N: usize>(table: &Table<ExceptionRow>) -> Result<Vec<ShortLoop<N>>> {
    let mut first_seen: HashMap<[u8; N], usize> = HashMap::default();

    table
        .rows
        .iter()
        .map(|row| {
            let at = table.location_of(row);
            let seq = base::encode_sequence::<N>(row.value.sequence.as_bytes(), &at)?;

            match first_seen.entry(seq) {
                Entry::Occupied(first) => warn!(
                    %at,
                    sequence = %ByteStr(seq.map(base::decode)),
                    first = *first.get(),
                    "loop sequence listed twice"
                ),
                Entry::Vacant(slot) => {
                    slot.insert(row.line);
                }
            }

            Ok(ShortLoop {
                seq,
                value: row.value.value,
            })
        })
        .collect()
}
