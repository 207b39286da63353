//! Human-readable byte counts.

/// Unit system used by [format_bytes].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Base {
    /// Powers of 1024 (`KiB`, `MiB`, ...).
    #[default]
    Binary,
    /// Powers of 1000 (`kB`, `MB`, ...).
    Decimal,
}

impl Base {
    fn step(self) -> u64 {
        match self {
            Base::Binary => 1024,
            Base::Decimal => 1000,
        }
    }

    fn suffixes(self) -> &'static [&'static str; 7] {
        match self {
            Base::Binary => &["B", "KiB", "MiB", "GiB", "TiB", "PiB", "EiB"],
            Base::Decimal => &["B", "kB", "MB", "GB", "TB", "PB", "EB"],
        }
    }
}

/// Renders `bytes` in the largest unit of `base` in which the value is at least one.
///
/// Counts below one step are printed as whole bytes (`"512 B"`). Larger counts are printed
/// with two decimals (`"1.50 KiB"`).
pub fn format_bytes(bytes: u64, base: Base) -> String {
    let step = base.step();
    let suffixes = base.suffixes();
    if bytes < step {
        return format!("{bytes} B");
    }
    let mut unit = 0;
    let mut divisor = 1u64;
    while unit + 1 < suffixes.len() && bytes / divisor >= step {
        divisor *= step;
        unit += 1;
    }
    format!("{:.2} {}", bytes as f64 / divisor as f64, suffixes[unit])
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0, Base::Binary, "0 B")]
    #[test_case(1023, Base::Binary, "1023 B")]
    #[test_case(1024, Base::Binary, "1.00 KiB")]
    #[test_case(1536, Base::Binary, "1.50 KiB")]
    #[test_case(5 * 1024 * 1024, Base::Binary, "5.00 MiB")]
    #[test_case(u64::MAX, Base::Binary, "16.00 EiB")]
    #[test_case(999, Base::Decimal, "999 B")]
    #[test_case(1000, Base::Decimal, "1.00 kB")]
    #[test_case(1_250_000, Base::Decimal, "1.25 MB")]
    #[test_case(2_000_000_000_000, Base::Decimal, "2.00 TB")]
    fn test_format_bytes(bytes: u64, base: Base, expected: &str) {
        assert_eq!(format_bytes(bytes, base), expected);
    }

    #[test]
    fn test_default_base() {
        assert_eq!(format_bytes(2048, Base::default()), "2.00 KiB");
    }
}
