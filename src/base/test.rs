use super::*;

#[test]
fn codes_round_trip_for_defined_bases() {
    for letter in *b"ACGT" {
        let code = encode(letter).unwrap();
        assert!(code < GAP);
        assert_eq!(decode(code), letter);
    }
}

#[test]
fn gap_letters() {
    assert_eq!(encode(b'N'), Some(GAP));
    assert_eq!(encode(b'_'), Some(GAP));
    assert_eq!(encode(b'a'), None);
    assert_eq!(encode(b'U'), None);
}

#[test]
fn defined_base_rejects_gap() {
    let at = Location::line("triloop.ds", 3);
    assert_eq!(encode_defined(b'G', &at).unwrap(), G);

    let err = encode_defined(b'N', &at).unwrap_err();
    assert!(matches!(err, Error::UnknownBase { base: 'N', .. }));
    assert_eq!(err.to_string(), "triloop.ds:3: unknown base 'N'");
}

#[test]
fn sequence_length_is_checked_before_letters() {
    let at = Location::line("triloop.ds", 1);

    assert_eq!(encode_sequence::<3>(b"ACT", &at).unwrap(), [A, C, T]);

    let err = encode_sequence::<3>(b"XXXXX", &at).unwrap_err();
    assert!(matches!(
        err,
        Error::Validation {
            kind: Invalid::SequenceLength {
                expected: 3,
                found: 5
            },
            ..
        }
    ));

    let err = encode_sequence::<4>(b"GAXA", &at).unwrap_err();
    assert!(matches!(err, Error::UnknownBase { base: 'X', .. }));
}
