//! End-to-end compiles over synthetic parameter files.

use approx::assert_relative_eq;

use crate::base::{self, A, C, G, GAP, T};
use crate::{Error, FileNames, ThermoPair, ThermoTables, compile};

/// `4^rank` labelled rows, one per gap-free coordinate in lexicographic order.
fn labelled(rank: u32, value: impl Fn(usize) -> String) -> String {
    (0..4usize.pow(rank))
        .map(|n| {
            let label: String = (0..rank)
                .rev()
                .map(|d| base::decode((n / 4usize.pow(d) % 4) as u8) as char)
                .collect();
            format!("{label}\t{}\n", value(n))
        })
        .collect()
}

fn loops(scale: f64) -> String {
    let mut text = String::from("# length interior bulge hairpin\n");
    for l in (1..=30).rev() {
        let hairpin = if l < 3 {
            "inf".to_owned()
        } else {
            format!("{:.1}", scale * l as f64)
        };
        text += &format!("{l}\t{:.1}\t{:.1}\t{hairpin}\n", scale * l as f64, -scale);
    }
    text
}

pub(crate) fn fixtures() -> Vec<(&'static str, String)> {
    let dangle = |offset: f64| {
        labelled(3, |n| format!("{:.1}", n as f64 + offset))
            + &labelled(3, |n| format!("{:.1}", n as f64 + offset + 64.0))
    };

    vec![
        (
            "stack.ds",
            "# perfect match stacks\n".to_owned()
                + &labelled(4, |n| format!("{:.2}", -(n as f64) - 0.25)),
        ),
        (
            "stack.dh",
            labelled(4, |n| if n == 5 { "inf".into() } else { format!("{:.1}", -(n as f64) * 100.0) }),
        ),
        ("stackmm.ds", labelled(4, |n| format!("{:.2}", n as f64 / 4.0))),
        ("stackmm.dh", labelled(4, |n| format!("{:.1}", n as f64 * 10.0))),
        ("tstack_tm_inf.ds", labelled(4, |n| format!("{:.1}", n as f64))),
        ("tstack.dh", labelled(4, |n| format!("{:.1}", n as f64))),
        ("tstack2.ds", labelled(4, |n| format!("{:.1}", n as f64 + 0.5))),
        ("tstack2.dh", labelled(4, |n| format!("{:.1}", n as f64 + 0.5))),
        ("dangle.ds", dangle(0.0)),
        ("dangle.dh", dangle(1000.0)),
        ("loops.ds", loops(-1.0)),
        ("loops.dh", loops(100.0)),
        ("triloop.ds", "# triloops\nAAA\t-1.5\nCGT\t-2.5\n".to_owned()),
        ("triloop.dh", "AAA\t-1500.0\nCGT\t-2500.0\n".to_owned()),
        ("tetraloop.ds", "GAAA\t-3.0\nGCAA\t-3.5\nTTTT\t1.0\n".to_owned()),
        ("tetraloop.dh", "GAAA\t-3000.0\nGCAA\t-3500.0\nTTTT\t1000.0\n".to_owned()),
    ]
}

pub(crate) fn sources() -> crate::Sources {
    let mut sources = crate::Sources::default();
    for (name, text) in fixtures() {
        sources.insert(name, text);
    }
    sources
}

pub(crate) fn tables() -> ThermoTables {
    ThermoTables::load(&sources(), &FileNames::default()).unwrap()
}

#[test]
fn fixtures_cover_every_file() {
    let names: Vec<&str> = fixtures().iter().map(|(n, _)| *n).collect();
    assert_eq!(names, FileNames::default().iter().collect::<Vec<_>>());
}

#[test]
fn compile_from_memory() {
    let t = tables();

    assert_eq!(t.stack[[A, A, A, A]], ThermoPair::new(-0.25, 0.0));
    assert_eq!(t.stack[[A, A, C, A]], ThermoPair::new(-4.25, -400.0));
    assert!(t.stack[[A, A, C, C]].is_sentinel());
    assert!(t.stack[[A, GAP, C, C]].is_sentinel());

    assert_relative_eq!(t.stack_mismatch[[T, T, T, T]].entropy, 255.0 / 4.0);
    assert_eq!(t.terminal_mismatch[[A, GAP, A, A]], ThermoPair::NEUTRAL);
    assert!(t.terminal_mismatch2[[GAP, A, A, A]].is_sentinel());
    assert_relative_eq!(t.terminal_mismatch2[[A, A, A, C]].enthalpy, 1.5);

    // (C, G, T) is walked as the 27th gap-free (i, j, k); 3' stores it at (i, k, j).
    let n = 16.0 + 2.0 * 4.0 + 3.0;
    assert_relative_eq!(t.dangle3[[C, T, G]].entropy, n);
    assert_relative_eq!(t.dangle5[[C, G, T]].enthalpy, n + 1064.0);

    assert_eq!(t.loops.hairpin.get(1).unwrap().entropy, f64::INFINITY);
    assert_relative_eq!(t.loops.interior.get(7).unwrap().enthalpy, 700.0);
    assert_relative_eq!(t.loops.bulge.get(30).unwrap().entropy, 1.0);

    assert_eq!(t.triloops.len(), 2);
    assert_eq!(t.tetraloops.len(), 3);
    assert_eq!(t.tetraloops.entropies[1].seq, [G, C, A, A]);
}

#[test]
fn paired_tables_keep_sentinels_consistent() {
    let t = tables();
    let fours = [
        &t.stack,
        &t.stack_mismatch,
        &t.terminal_mismatch,
        &t.terminal_mismatch2,
    ];

    for grid in fours {
        for (coord, pair) in grid.iter() {
            assert_eq!(pair.entropy == -1.0, pair.enthalpy.is_infinite(), "{coord:?}");
        }
    }
    for grid in [&t.dangle3, &t.dangle5] {
        for (coord, pair) in grid.iter() {
            assert_eq!(pair.is_sentinel(), pair.enthalpy.is_infinite(), "{coord:?}");
        }
    }
    for (coord, pair) in t.stack.iter() {
        if coord.contains(&GAP) {
            assert!(pair.is_sentinel());
        }
    }
}

#[test]
fn compile_from_directory_matches_memory() {
    let dir = tempfile::tempdir().unwrap();
    for (name, text) in fixtures() {
        std::fs::write(dir.path().join(name), text).unwrap();
    }

    assert_eq!(compile(dir.path()).unwrap(), tables());
}

#[test]
fn missing_file_aborts() {
    let dir = tempfile::tempdir().unwrap();
    for (name, text) in fixtures().into_iter().filter(|(n, _)| *n != "loops.dh") {
        std::fs::write(dir.path().join(name), text).unwrap();
    }

    match compile(dir.path()).unwrap_err() {
        Error::Io { path, .. } => assert!(path.ends_with("loops.dh")),
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn any_bad_row_aborts_the_compile() {
    let mut sources = sources();
    sources.insert("tetraloop.dh", "GAAA\t-3000.0\nGCXA\t-3500.0\nTTTT\t1000.0\n");
    let err = ThermoTables::load(&sources, &FileNames::default()).unwrap_err();
    assert_eq!(err.to_string(), "tetraloop.dh:2: unknown base 'X'");

    let mut sources = crate::test::sources();
    sources.insert("stack.ds", labelled(4, |_| "1.0".into()) + "AAAA\t2.0\n");
    let err = ThermoTables::load(&sources, &FileNames::default()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "stack.ds:257: row-count mismatch: expected 256 rows, found 257"
    );
}
