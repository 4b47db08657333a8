//! Render compiled tables as a C source file.
//!
//! Names, shapes and declaration order are what the alignment engine
//! compiles against; changing any of them breaks the consumer.

use std::fmt::{Display, Formatter, Result};

use crate::ThermoTables;
use crate::base::CODES;
use crate::short_loop::ShortLoop;
use crate::util::CDouble;


const INCLUDES: &str = "#include <math.h>\n#include <stdio.h>\n#include \"thal.h\"\n\n";

const INFINITY_DEFINITION: &str = "
# ifdef INTEGER
const double _INFINITY = 999999.0;
# else
# ifdef INFINITY
const double _INFINITY = INFINITY;
# else
const double _INFINITY = 1.0 / 0.0;
# endif
# endif

";

/// The generated file for a set of tables.
pub struct CSource<'a>(pub &'a ThermoTables);

impl Display for CSource<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let t = self.0;

        banner(f)?;
        f.write_str(INCLUDES)?;
        f.write_str(INFINITY_DEFINITION)?;

        matrix(f, "atpS", t.terminal_at.entropies())?;
        matrix(f, "atpH", t.terminal_at.enthalpies())?;

        for (prefix, grid) in [
            ("stack", &t.stack),
            ("stackint2", &t.stack_mismatch),
            ("tstack", &t.terminal_mismatch),
            ("tstack2", &t.terminal_mismatch2),
        ] {
            let entropies: Vec<f64> = grid.entropies().collect();
            let enthalpies: Vec<f64> = grid.enthalpies().collect();
            table(f, &format!("{prefix}Entropies"), 4, &entropies)?;
            table(f, &format!("{prefix}Enthalpies"), 4, &enthalpies)?;
        }

        for (suffix, grid) in [("3", &t.dangle3), ("5", &t.dangle5)] {
            let entropies: Vec<f64> = grid.entropies().collect();
            let enthalpies: Vec<f64> = grid.enthalpies().collect();
            table(f, &format!("dangleEntropies{suffix}"), 3, &entropies)?;
            table(f, &format!("dangleEnthalpies{suffix}"), 3, &enthalpies)?;
        }

        for (prefix, energy) in [
            ("interior", &t.loops.interior),
            ("bulge", &t.loops.bulge),
            ("hairpin", &t.loops.hairpin),
        ] {
            row(f, &format!("{prefix}LoopEntropies"), energy.entropies())?;
            row(f, &format!("{prefix}LoopEnthalpies"), energy.enthalpies())?;
        }

        writeln!(f, "static int numTriloops = {};", t.triloops.len())?;
        writeln!(f, "static int numTetraloops = {};", t.tetraloops.len())?;

        records(f, "triloop", "defaultTriloopEntropies", &t.triloops.entropies)?;
        records(f, "triloop", "defaultTriloopEnthalpies", &t.triloops.enthalpies)?;
        records(f, "tetraloop", "defaultTetraloopEntropies", &t.tetraloops.entropies)?;
        records(f, "tetraloop", "defaultTetraloopEnthalpies", &t.tetraloops.enthalpies)?;

        for (kind, name) in [("triloop", "Triloop"), ("tetraloop", "Tetraloop")] {
            for channel in ["Entropies", "Enthalpies"] {
                writeln!(
                    f,
                    "static struct {kind} *{kind}{channel} = default{name}{channel};"
                )?;
            }
        }

        Ok(())
    }
}

fn banner(f: &mut Formatter<'_>) -> Result {
    f.write_str(
        "/*
This file is generated by thalgen from the thermodynamic parameter tables.
Edit the parameter tables and regenerate it rather than editing it by hand.

Globals initialized in this file:
const double _INFINITY;
static double atpS[5][5]; AT penalty
static double atpH[5][5]; AT penalty
static int numTriloops; hairpin triloop penalties
static int numTetraloops; hairpin tetraloop penalties
static double dangleEntropies3[5][5][5]; 3' dangling ends
static double dangleEnthalpies3[5][5][5]; 3' dangling ends
static double dangleEntropies5[5][5][5]; 5' dangling ends
static double dangleEnthalpies5[5][5][5]; 5' dangling ends
static double stackEntropies[5][5][5][5]; perfect match pairs
static double stackEnthalpies[5][5][5][5]; perfect match pairs
static double stackint2Entropies[5][5][5][5]; internal mismatches
static double stackint2Enthalpies[5][5][5][5]; internal mismatches
static double interiorLoopEntropies[30]; interior loops
static double bulgeLoopEntropies[30]; bulge loops
static double hairpinLoopEntropies[30]; hairpin loops
static double interiorLoopEnthalpies[30]; interior loops
static double bulgeLoopEnthalpies[30]; bulge loops
static double hairpinLoopEnthalpies[30]; hairpin loops
static double tstackEntropies[5][5][5][5]; terminal mismatches
static double tstackEnthalpies[5][5][5][5]; terminal mismatches
static double tstack2Entropies[5][5][5][5]; internal terminal mismatches
static double tstack2Enthalpies[5][5][5][5]; internal terminal mismatches
static struct triloop* triloopEntropies; triloop penalties by sequence
static struct triloop* triloopEnthalpies; triloop penalties by sequence
static struct tetraloop* tetraloopEntropies; tetraloop penalties by sequence
static struct tetraloop* tetraloopEnthalpies; tetraloop penalties by sequence
*/

",
    )
}

fn join<I>(f: &mut Formatter<'_>, values: I, sep: &str) -> Result
where
    I: IntoIterator<Item = f64>,
{
    for (i, v) in values.into_iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{}", CDouble(v))?;
    }
    Ok(())
}

/// 5x5 matrix, one row per line.
fn matrix(f: &mut Formatter<'_>, name: &str, values: impl Iterator<Item = f64>) -> Result {
    let values: Vec<f64> = values.collect();
    write!(f, "static double {name}[{n}][{n}] = {{", n = CODES)?;
    for (i, line) in values.chunks(CODES).enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        f.write_str("\n\t{")?;
        join(f, line.iter().copied(), ", ")?;
        f.write_str("}")?;
    }
    f.write_str("};\n\n")
}

/// Separator between the sub-blocks of a block of the given rank.
fn separator(rank: usize) -> &'static str {
    match rank {
        1 => ", ",
        2 => ",\n\t",
        _ => ",\n\n\t",
    }
}

fn block(f: &mut Formatter<'_>, rank: usize, values: &[f64]) -> Result {
    f.write_str("{")?;
    children(f, rank, values)?;
    f.write_str("}")
}

fn children(f: &mut Formatter<'_>, rank: usize, values: &[f64]) -> Result {
    if rank == 1 {
        return join(f, values.iter().copied(), separator(1));
    }
    for (i, child) in values.chunks(values.len() / CODES).enumerate() {
        if i > 0 {
            f.write_str(separator(rank))?;
        }
        block(f, rank - 1, child)?;
    }
    Ok(())
}

/// A `rank`-index table, innermost rows of five values.
fn table(f: &mut Formatter<'_>, name: &str, rank: usize, values: &[f64]) -> Result {
    let dims = format!("[{}]", CODES).repeat(rank);
    write!(f, "static double {name}{dims} = {{\n\t")?;
    children(f, rank, values)?;
    f.write_str("};\n\n")
}

/// A flat array, five values per line.
fn row(f: &mut Formatter<'_>, name: &str, values: impl Iterator<Item = f64>) -> Result {
    let values: Vec<f64> = values.collect();
    write!(f, "static double {name}[{}] = {{", values.len())?;
    for (i, v) in values.iter().enumerate() {
        if i % CODES == 0 {
            f.write_str("\n\t")?;
        }
        write!(f, "{}", CDouble(*v))?;
        if i + 1 != values.len() {
            f.write_str(", ")?;
        }
    }
    f.write_str("};\n\n")
}

fn records<const N: usize>(
    f: &mut Formatter<'_>,
    kind: &str,
    name: &str,
    loops: &[ShortLoop<N>],
) -> Result {
    writeln!(f, "static struct {kind} {name}[] = {{")?;
    if loops.is_empty() {
        // A C array needs at least one initializer; the count above is 0.
        return f.write_str("\t{0}};\n\n");
    }
    for (i, ShortLoop { seq, value }) in loops.iter().enumerate() {
        let codes: Vec<String> = seq.iter().map(u8::to_string).collect();
        write!(f, "\t{{{{{}}}, {}}}", codes.join(","), CDouble(*value))?;
        f.write_str(if i + 1 == loops.len() { "};\n" } else { "," })?;
        f.write_str("\n")?;
    }
    Ok(())
}
