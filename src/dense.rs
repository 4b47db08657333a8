//! Dense tables indexed by base codes.
//!
//! A table over `D` base positions holds a cell for every coordinate in
//! `{0..=4}^D`. Coordinates are walked in lexicographic order (first index
//! slowest) and each one either takes the next value pair from the input
//! or a fixed pair decided by the table's [`Layout`]. Coordinates touching
//! [`GAP`] never consume input.

use std::ops::{Index, IndexMut};

use tracing::debug;

use crate::ThermoPair;
use crate::base::{A, CODES, GAP, T};
use crate::error::{Error, Invalid, Location, Result};
use crate::loader::{Row, Table};


/// A fully populated `5^D` table of entropy/enthalpy pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<const D: usize> {
    cells: Box<[ThermoPair]>,
}

impl<const D: usize> Grid<D> {
    pub const LEN: usize = CODES.pow(D as u32);

    pub fn filled(pair: ThermoPair) -> Self {
        Self {
            cells: vec![pair; Self::LEN].into_boxed_slice(),
        }
    }

    /// Cells in lexicographic coordinate order.
    pub fn cells(&self) -> &[ThermoPair] {
        &self.cells
    }

    pub fn iter(&self) -> impl Iterator<Item = ([u8; D], ThermoPair)> + '_ {
        coordinates::<D>().zip(self.cells.iter().copied())
    }

    pub fn entropies(&self) -> impl Iterator<Item = f64> + '_ {
        self.cells.iter().map(|p| p.entropy)
    }

    pub fn enthalpies(&self) -> impl Iterator<Item = f64> + '_ {
        self.cells.iter().map(|p| p.enthalpy)
    }

    fn offset(coord: [u8; D]) -> usize {
        coord.iter().fold(0, |acc, &c| {
            debug_assert!((c as usize) < CODES);
            acc * CODES + c as usize
        })
    }
}

impl<const D: usize> Index<[u8; D]> for Grid<D> {
    type Output = ThermoPair;

    fn index(&self, coord: [u8; D]) -> &Self::Output {
        &self.cells[Self::offset(coord)]
    }
}

impl<const D: usize> IndexMut<[u8; D]> for Grid<D> {
    fn index_mut(&mut self, coord: [u8; D]) -> &mut Self::Output {
        &mut self.cells[Self::offset(coord)]
    }
}

/// Every coordinate of a `5^D` table, first index varying slowest.
pub fn coordinates<const D: usize>() -> impl Iterator<Item = [u8; D]> {
    (0..Grid::<D>::LEN).map(|mut n| {
        let mut coord = [0; D];
        for slot in coord.iter_mut().rev() {
            *slot = (n % CODES) as u8;
            n /= CODES;
        }
        coord
    })
}

/// What a coordinate holds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell {
    /// Take the next pair from the input.
    Read,
    Fixed(ThermoPair),
}

/// How a family of tables maps its input stream onto cells.
#[derive(Clone, Copy)]
pub struct Layout<const D: usize> {
    pub rule: fn([u8; D]) -> Cell,
    /// Where the value for a walked coordinate is stored.
    pub place: fn([u8; D]) -> [u8; D],
}

/// Perfect-match and internal-mismatch stacks: any gap is forbidden.
pub const STACK: Layout<4> = Layout {
    rule: any_gap::<4>,
    place: identity::<4>,
};

/// Terminal mismatches: a gap in a paired slot (0 or 2) is forbidden, a gap
/// in an overhanging slot (1 or 3) is neutral.
pub const TERMINAL_MISMATCH: Layout<4> = Layout {
    rule: terminal_mismatch,
    place: identity::<4>,
};

/// 3' dangling ends: the walk's second and third indices are swapped on
/// placement.
pub const DANGLE_3: Layout<3> = Layout {
    rule: any_gap::<3>,
    place: transpose_last,
};

pub const DANGLE_5: Layout<3> = Layout {
    rule: any_gap::<3>,
    place: identity::<3>,
};

/// Rows per half of a dangling-end file; the 5' half follows the 3' half.
pub const DANGLE_ROWS: usize = 64;

/// Terminal A/T closing-pair penalty.
pub const AT_PENALTY: ThermoPair = ThermoPair::new(6.9, 2200.0);

fn any_gap<const D: usize>(coord: [u8; D]) -> Cell {
    if coord.contains(&GAP) {
        Cell::Fixed(ThermoPair::SENTINEL)
    } else {
        Cell::Read
    }
}

fn terminal_mismatch([i, j, k, l]: [u8; 4]) -> Cell {
    if i == GAP || k == GAP {
        Cell::Fixed(ThermoPair::SENTINEL)
    } else if j == GAP || l == GAP {
        Cell::Fixed(ThermoPair::NEUTRAL)
    } else {
        Cell::Read
    }
}

fn identity<const D: usize>(coord: [u8; D]) -> [u8; D] {
    coord
}

fn transpose_last([i, j, k]: [u8; 3]) -> [u8; 3] {
    [i, k, j]
}

/// A run of single-value rows from one file.
#[derive(Debug, Clone, Copy)]
pub struct Stream<'a> {
    pub file: &'a str,
    pub rows: &'a [Row<f64>],
}

impl<'a> From<&'a Table<f64>> for Stream<'a> {
    fn from(table: &'a Table<f64>) -> Self {
        Self {
            file: &table.file,
            rows: &table.rows,
        }
    }
}

impl<'a> Stream<'a> {
    fn split_at(self, mid: usize) -> (Self, Self) {
        let (head, tail) = self.rows.split_at(mid);
        (
            Self { rows: head, ..self },
            Self { rows: tail, ..self },
        )
    }

    /// A row-count error, pointing at the first surplus row if there is one.
    fn row_count(&self, expected: usize) -> Error {
        let at = match self.rows.get(expected) {
            Some(extra) => Location::line(self.file, extra.line),
            None => Location::file(self.file),
        };
        Error::invalid(
            at,
            Invalid::RowCount {
                expected,
                found: self.rows.len(),
            },
        )
    }
}

impl<const D: usize> Layout<D> {
    /// Number of coordinates that read from the input.
    pub fn required(&self) -> usize {
        coordinates::<D>()
            .filter(|&c| (self.rule)(c) == Cell::Read)
            .count()
    }

    /// Walk every coordinate and fill the grid from `values`.
    ///
    /// Returns the grid and the final cursor, or `None` if `values` runs out
    /// before every reading coordinate is filled.
    pub fn fill(&self, values: &[ThermoPair]) -> Option<(Grid<D>, usize)> {
        let mut grid = Grid::filled(ThermoPair::SENTINEL);
        let mut cursor = 0;

        for coord in coordinates::<D>() {
            let pair = match (self.rule)(coord) {
                Cell::Fixed(pair) => pair,
                Cell::Read => {
                    let pair = values.get(cursor)?.checked();
                    cursor += 1;
                    pair
                }
            };
            grid[(self.place)(coord)] = pair;
        }

        Some((grid, cursor))
    }

    /// Build one table from parallel entropy and enthalpy streams.
    ///
    /// Both streams must hold exactly one row per reading coordinate.
    pub fn build(&self, entropy: Stream<'_>, enthalpy: Stream<'_>) -> Result<Grid<D>> {
        let pairs: Vec<ThermoPair> = entropy
            .rows
            .iter()
            .zip(enthalpy.rows)
            .map(|(s, h)| ThermoPair::new(s.value, h.value))
            .collect();

        let Some((grid, cursor)) = self.fill(&pairs) else {
            let required = self.required();
            let short = if entropy.rows.len() < required {
                entropy
            } else {
                enthalpy
            };
            return Err(short.row_count(required));
        };

        for stream in [entropy, enthalpy] {
            if stream.rows.len() != cursor {
                return Err(stream.row_count(cursor));
            }
        }

        debug!(entropy = entropy.file, enthalpy = enthalpy.file, rows = cursor, "filled table");
        Ok(grid)
    }
}

/// Build the 3' and 5' dangling-end tables from one pair of files.
///
/// Each file holds the 3' rows followed by the 5' rows.
pub fn build_dangles(entropy: &Table<f64>, enthalpy: &Table<f64>) -> Result<(Grid<3>, Grid<3>)> {
    let entropy = Stream::from(entropy);
    let enthalpy = Stream::from(enthalpy);

    for stream in [entropy, enthalpy] {
        if stream.rows.len() != 2 * DANGLE_ROWS {
            return Err(stream.row_count(2 * DANGLE_ROWS));
        }
    }

    let (entropy3, entropy5) = entropy.split_at(DANGLE_ROWS);
    let (enthalpy3, enthalpy5) = enthalpy.split_at(DANGLE_ROWS);

    Ok((
        DANGLE_3.build(entropy3, enthalpy3)?,
        DANGLE_5.build(entropy5, enthalpy5)?,
    ))
}

/// The 5x5 terminal A/T penalty matrix: A-T and T-A carry [`AT_PENALTY`],
/// everything else is neutral.
pub fn terminal_at_penalty() -> Grid<2> {
    let mut grid = Grid::filled(ThermoPair::NEUTRAL);
    grid[[A, T]] = AT_PENALTY;
    grid[[T, A]] = AT_PENALTY;
    grid
}
