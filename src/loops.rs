//! Interior, bulge and hairpin loop penalties by loop length.

use tracing::debug;

use crate::ThermoPair;
use crate::error::{Error, Invalid, Result};
use crate::loader::{LoopRow, Table};


/// Longest loop with an explicit parameter.
pub const MAX_LOOP: usize = 30;

/// Penalties for loop lengths `1..=MAX_LOOP`, stored at `length - 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct LoopEnergy([ThermoPair; MAX_LOOP]);

impl LoopEnergy {
    pub fn get(&self, length: usize) -> Option<ThermoPair> {
        self.0.get(length.checked_sub(1)?).copied()
    }

    pub fn entropies(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().map(|p| p.entropy)
    }

    pub fn enthalpies(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().map(|p| p.enthalpy)
    }
}

impl From<[ThermoPair; MAX_LOOP]> for LoopEnergy {
    fn from(value: [ThermoPair; MAX_LOOP]) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoopTables {
    pub interior: LoopEnergy,
    pub bulge: LoopEnergy,
    pub hairpin: LoopEnergy,
}

impl LoopTables {
    /// Place rows by their length key; file order does not matter.
    pub fn build(entropy: &Table<LoopRow>, enthalpy: &Table<LoopRow>) -> Result<Self> {
        let [s_interior, s_bulge, s_hairpin] = columns(entropy)?;
        let [h_interior, h_bulge, h_hairpin] = columns(enthalpy)?;

        let pair = |s: [f64; MAX_LOOP], h: [f64; MAX_LOOP]| {
            LoopEnergy::from(std::array::from_fn(|i| ThermoPair::new(s[i], h[i])))
        };

        Ok(Self {
            interior: pair(s_interior, h_interior),
            bulge: pair(s_bulge, h_bulge),
            hairpin: pair(s_hairpin, h_hairpin),
        })
    }
}

/// Interior, bulge and hairpin columns of one file.
fn columns(table: &Table<LoopRow>) -> Result<[[f64; MAX_LOOP]; 3]> {
    let mut columns = [[0.0; MAX_LOOP]; 3];
    let mut seen = [false; MAX_LOOP];

    for row in &table.rows {
        let LoopRow {
            length,
            interior,
            bulge,
            hairpin,
        } = row.value;

        let slot = usize::try_from(length)
            .ok()
            .filter(|l| (1..=MAX_LOOP).contains(l))
            .map(|l| l - 1)
            .ok_or_else(|| {
                Error::invalid(table.location_of(row), Invalid::LengthOutOfRange(length))
            })?;

        if std::mem::replace(&mut seen[slot], true) {
            return Err(Error::invalid(
                table.location_of(row),
                Invalid::DuplicateLength(slot + 1),
            ));
        }

        columns[0][slot] = interior;
        columns[1][slot] = bulge;
        columns[2][slot] = hairpin;
    }

    if let Some(slot) = seen.iter().position(|&s| !s) {
        return Err(Error::invalid(table.location(), Invalid::MissingLength(slot + 1)));
    }

    debug!(file = %table.file, "filled loop lengths");
    Ok(columns)
}
