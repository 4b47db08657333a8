use std::fmt::Display;

#[derive(Debug, Default)]
pub struct ByteStr<B>(pub B);

impl<B: AsRef<[u8]>> Display for ByteStr<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .as_ref()
                .iter()
                .map(|&b| b as char)
                .collect::<String>()
        )
    }
}

/// A double as a C literal. Infinities use the generated `_INFINITY` constant.
#[derive(Debug, Clone, Copy)]
pub struct CDouble(pub f64);

impl Display for CDouble {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let v = self.0;
        if v.is_infinite() {
            let sign = if v < 0.0 { "-" } else { "" };
            write!(f, "{sign}_INFINITY")
        } else {
            // Debug keeps the `.0` on integral values and switches to
            // exponent form for tiny magnitudes, so 1e-11 stays exact.
            write!(f, "{v:?}")
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn c_doubles() {
        assert_eq!(CDouble(-1.0).to_string(), "-1.0");
        assert_eq!(CDouble(2200.0).to_string(), "2200.0");
        assert_eq!(CDouble(-21.3).to_string(), "-21.3");
        assert_eq!(CDouble(0.00000000001).to_string(), "1e-11");
        assert_eq!(CDouble(f64::INFINITY).to_string(), "_INFINITY");
        assert_eq!(CDouble(f64::NEG_INFINITY).to_string(), "-_INFINITY");
    }

    #[test]
    fn byte_str() {
        assert_eq!(ByteStr(*b"GAAA").to_string(), "GAAA");
    }
}
