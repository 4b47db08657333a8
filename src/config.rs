//! Which files feed which tables, and where they are read from.

use std::io;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap as HashMap;

use crate::error::{Error, Result};
use crate::loader::{self, ExceptionRow, LoopRow, RowSchema, Table};

/// Somewhere parameter text can be read by file name.
pub trait Source {
    fn table<R: RowSchema>(&self, name: &str) -> Result<Table<R>>;
}

/// A directory of parameter files, e.g. `primer3_config/`.
#[derive(Debug, Clone)]
pub struct ParamDir(pub PathBuf);

impl ParamDir {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self(dir.as_ref().to_owned())
    }
}

impl Source for ParamDir {
    fn table<R: RowSchema>(&self, name: &str) -> Result<Table<R>> {
        loader::read(&self.0.join(name))
    }
}

/// Parameter text held in memory, keyed by file name.
#[derive(Debug, Clone, Default)]
pub struct Sources(HashMap<String, String>);

impl Sources {
    pub fn insert(&mut self, name: impl Into<String>, text: impl Into<String>) -> &mut Self {
        self.0.insert(name.into(), text.into());
        self
    }
}

impl Source for Sources {
    fn table<R: RowSchema>(&self, name: &str) -> Result<Table<R>> {
        let text = self.0.get(name).ok_or_else(|| Error::Io {
            path: PathBuf::from(name),
            source: io::Error::new(io::ErrorKind::NotFound, "no such source"),
        })?;
        loader::parse(name, text)
    }
}

/// The entropy and enthalpy files of one table family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelFiles {
    pub entropy: String,
    pub enthalpy: String,
}

impl ChannelFiles {
    fn named(entropy: &str, enthalpy: &str) -> Self {
        Self {
            entropy: entropy.to_owned(),
            enthalpy: enthalpy.to_owned(),
        }
    }

    fn load<R: RowSchema>(&self, source: &impl Source) -> Result<Channels<R>> {
        Ok(Channels {
            entropy: source.table(&self.entropy)?,
            enthalpy: source.table(&self.enthalpy)?,
        })
    }
}

/// Parsed entropy and enthalpy rows of one table family.
#[derive(Debug, Clone, PartialEq)]
pub struct Channels<R> {
    pub entropy: Table<R>,
    pub enthalpy: Table<R>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNames {
    pub stack: ChannelFiles,
    pub stack_mismatch: ChannelFiles,
    pub terminal_mismatch: ChannelFiles,
    pub terminal_mismatch2: ChannelFiles,
    pub dangle: ChannelFiles,
    pub loops: ChannelFiles,
    pub triloops: ChannelFiles,
    pub tetraloops: ChannelFiles,
}

impl Default for FileNames {
    fn default() -> Self {
        Self {
            stack: ChannelFiles::named("stack.ds", "stack.dh"),
            stack_mismatch: ChannelFiles::named("stackmm.ds", "stackmm.dh"),
            terminal_mismatch: ChannelFiles::named("tstack_tm_inf.ds", "tstack.dh"),
            terminal_mismatch2: ChannelFiles::named("tstack2.ds", "tstack2.dh"),
            dangle: ChannelFiles::named("dangle.ds", "dangle.dh"),
            loops: ChannelFiles::named("loops.ds", "loops.dh"),
            triloops: ChannelFiles::named("triloop.ds", "triloop.dh"),
            tetraloops: ChannelFiles::named("tetraloop.ds", "tetraloop.dh"),
        }
    }
}

/// Every input table, parsed but not yet built.
#[derive(Debug, Clone, PartialEq)]
pub struct Inputs {
    pub stack: Channels<f64>,
    pub stack_mismatch: Channels<f64>,
    pub terminal_mismatch: Channels<f64>,
    pub terminal_mismatch2: Channels<f64>,
    pub dangle: Channels<f64>,
    pub loops: Channels<LoopRow>,
    pub triloops: Channels<ExceptionRow>,
    pub tetraloops: Channels<ExceptionRow>,
}

impl FileNames {
    /// Read every file, one at a time, in a fixed order.
    pub fn load(&self, source: &impl Source) -> Result<Inputs> {
        Ok(Inputs {
            stack: self.stack.load(source)?,
            stack_mismatch: self.stack_mismatch.load(source)?,
            terminal_mismatch: self.terminal_mismatch.load(source)?,
            terminal_mismatch2: self.terminal_mismatch2.load(source)?,
            dangle: self.dangle.load(source)?,
            loops: self.loops.load(source)?,
            triloops: self.triloops.load(source)?,
            tetraloops: self.tetraloops.load(source)?,
        })
    }

    /// All file names, entropy before enthalpy.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        [
            &self.stack,
            &self.stack_mismatch,
            &self.terminal_mismatch,
            &self.terminal_mismatch2,
            &self.dangle,
            &self.loops,
            &self.triloops,
            &self.tetraloops,
        ]
        .into_iter()
        .flat_map(|c| [c.entropy.as_str(), c.enthalpy.as_str()])
    }
}
