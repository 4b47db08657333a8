#![doc = include_str!("../README.md")]

mod util;

pub mod base;
pub mod config;
pub mod dense;
pub mod emit;
pub mod error;
pub mod loader;
pub mod loops;
pub mod short_loop;

use std::path::Path;

use tracing::info;

pub use config::{FileNames, Inputs, ParamDir, Source, Sources};
pub use dense::Grid;
pub use emit::CSource;
pub use error::{Error, Result};
pub use loops::{LoopEnergy, LoopTables};
pub use short_loop::{ShortLoop, Tetraloops, Triloops};

#[cfg(test)]
mod test;

/// An entropy (ΔS) and enthalpy (ΔH) value for one table cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermoPair {
    pub entropy: f64,
    pub enthalpy: f64,
}

impl ThermoPair {
    /// A forbidden combination.
    pub const SENTINEL: Self = Self::new(-1.0, f64::INFINITY);

    /// A combination that contributes nothing. The entropy is kept off zero
    /// because the engine divides by it.
    pub const NEUTRAL: Self = Self::new(0.00000000001, 0.0);

    pub const fn new(entropy: f64, enthalpy: f64) -> Self {
        Self { entropy, enthalpy }
    }

    /// The pair itself, or [`Self::SENTINEL`] if either value is infinite.
    pub fn checked(self) -> Self {
        if self.entropy.is_infinite() || self.enthalpy.is_infinite() {
            Self::SENTINEL
        } else {
            self
        }
    }

    pub fn is_sentinel(&self) -> bool {
        *self == Self::SENTINEL
    }
}

/// Every table the alignment engine needs, fully built.
#[derive(Debug, Clone, PartialEq)]
pub struct ThermoTables {
    pub terminal_at: Grid<2>,
    pub stack: Grid<4>,
    pub stack_mismatch: Grid<4>,
    pub terminal_mismatch: Grid<4>,
    pub terminal_mismatch2: Grid<4>,
    pub dangle3: Grid<3>,
    pub dangle5: Grid<3>,
    pub loops: LoopTables,
    pub triloops: Triloops,
    pub tetraloops: Tetraloops,
}

impl ThermoTables {
    pub fn build(inputs: &Inputs) -> Result<Self> {
        let four = |layout: &dense::Layout<4>, c: &config::Channels<f64>| {
            layout.build((&c.entropy).into(), (&c.enthalpy).into())
        };

        let (dangle3, dangle5) =
            dense::build_dangles(&inputs.dangle.entropy, &inputs.dangle.enthalpy)?;

        let tables = Self {
            terminal_at: dense::terminal_at_penalty(),
            stack: four(&dense::STACK, &inputs.stack)?,
            stack_mismatch: four(&dense::STACK, &inputs.stack_mismatch)?,
            terminal_mismatch: four(&dense::TERMINAL_MISMATCH, &inputs.terminal_mismatch)?,
            terminal_mismatch2: four(&dense::TERMINAL_MISMATCH, &inputs.terminal_mismatch2)?,
            dangle3,
            dangle5,
            loops: LoopTables::build(&inputs.loops.entropy, &inputs.loops.enthalpy)?,
            triloops: Triloops::build(&inputs.triloops.entropy, &inputs.triloops.enthalpy)?,
            tetraloops: Tetraloops::build(
                &inputs.tetraloops.entropy,
                &inputs.tetraloops.enthalpy,
            )?,
        };

        info!(
            triloops = tables.triloops.len(),
            tetraloops = tables.tetraloops.len(),
            "compiled thermodynamic tables"
        );
        Ok(tables)
    }

    pub fn load(source: &impl Source, names: &FileNames) -> Result<Self> {
        Self::build(&names.load(source)?)
    }

    pub fn to_c_source(&self) -> String {
        CSource(self).to_string()
    }
}

/// Compile the conventionally named parameter files in `dir`.
pub fn compile(dir: impl AsRef<Path>) -> Result<ThermoTables> {
    ThermoTables::load(&ParamDir::new(dir), &FileNames::default())
}
