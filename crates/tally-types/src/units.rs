//! Unit-aware integer conversion.
//!
//! Converts a 64-bit quantity between the unit symbols the system
//! recognizes: the decimal SI prefixes from pico to peta and the binary
//! prefixes from kibi to pebi, with the empty string as the base unit.
//! Conversion is pure and deterministic; division truncates toward zero.

use tally_error::UnitError;

/// Unit symbols the converter recognizes, smallest to largest
pub const KNOWN_UNITS: &[&str] = &[
    "p", "n", "u", "m", "", "k", "M", "G", "T", "P", "Ki", "Mi", "Gi", "Ti", "Pi",
];

// Each unit's magnitude as a ratio to the base unit. Sub-unity prefixes
// carry the denominator so everything stays in integer arithmetic.
fn ratio(unit: &str) -> Option<(i128, i128)> {
    let r = match unit {
        "p" => (1, 1_000_000_000_000),
        "n" => (1, 1_000_000_000),
        "u" => (1, 1_000_000),
        "m" => (1, 1_000),
        "" => (1, 1),
        "k" => (1_000, 1),
        "M" => (1_000_000, 1),
        "G" => (1_000_000_000, 1),
        "T" => (1_000_000_000_000, 1),
        "P" => (1_000_000_000_000_000, 1),
        "Ki" => (1 << 10, 1),
        "Mi" => (1 << 20, 1),
        "Gi" => (1 << 30, 1),
        "Ti" => (1i128 << 40, 1),
        "Pi" => (1i128 << 50, 1),
        _ => return None,
    };
    Some(r)
}

/// Convert `value` from `from` units to `to` units.
///
/// Total over [`KNOWN_UNITS`]; an unrecognized symbol or a result that
/// does not fit in `i64` is an error. Like-to-like conversion returns the
/// value unchanged.
pub fn convert(from: &str, to: &str, value: i64) -> Result<i64, UnitError> {
    if from == to {
        return Ok(value);
    }
    let (from_num, from_den) =
        ratio(from).ok_or_else(|| UnitError::UnknownUnit(from.to_string()))?;
    let (to_num, to_den) = ratio(to).ok_or_else(|| UnitError::UnknownUnit(to.to_string()))?;

    let overflow = || UnitError::Overflow {
        from: from.to_string(),
        to: to.to_string(),
        value,
    };

    // value * (from/to) with the ratio kept as numerator/denominator
    let numerator = from_num.checked_mul(to_den).ok_or_else(overflow)?;
    let denominator = from_den.checked_mul(to_num).ok_or_else(overflow)?;
    let scaled = i128::from(value)
        .checked_mul(numerator)
        .ok_or_else(overflow)?
        / denominator;
    i64::try_from(scaled).map_err(|_| overflow())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        assert_eq!(convert("Mi", "Mi", 1024).unwrap(), 1024);
        assert_eq!(convert("", "", 7).unwrap(), 7);
    }

    #[test]
    fn test_binary_prefixes() {
        assert_eq!(convert("Ki", "Mi", 2048).unwrap(), 2);
        assert_eq!(convert("Mi", "Ki", 2).unwrap(), 2048);
        assert_eq!(convert("Gi", "Mi", 3).unwrap(), 3072);
    }

    #[test]
    fn test_decimal_prefixes() {
        assert_eq!(convert("k", "M", 5000).unwrap(), 5);
        assert_eq!(convert("G", "k", 1).unwrap(), 1_000_000);
        assert_eq!(convert("m", "", 2500).unwrap(), 2);
    }

    #[test]
    fn test_mixed_prefixes() {
        // 1 Mi = 1048576 base, in k that is 1048
        assert_eq!(convert("Mi", "k", 1).unwrap(), 1048);
    }

    #[test]
    fn test_truncates_toward_zero() {
        assert_eq!(convert("Ki", "Mi", 1023).unwrap(), 0);
        assert_eq!(convert("Ki", "Mi", -1023).unwrap(), 0);
    }

    #[test]
    fn test_total_over_known_unit_pairs() {
        // Every recognized symbol converts to every other; zero avoids
        // tripping the legitimate magnitude overflow on extreme pairs.
        for from in KNOWN_UNITS {
            for to in KNOWN_UNITS {
                assert_eq!(convert(from, to, 0).unwrap(), 0, "{} -> {}", from, to);
            }
        }
    }

    #[test]
    fn test_unknown_unit() {
        assert!(matches!(
            convert("Zi", "Mi", 1),
            Err(UnitError::UnknownUnit(u)) if u == "Zi"
        ));
        assert!(matches!(
            convert("Mi", "Zi", 1),
            Err(UnitError::UnknownUnit(u)) if u == "Zi"
        ));
    }

    #[test]
    fn test_overflow() {
        assert!(matches!(
            convert("Pi", "p", i64::MAX),
            Err(UnitError::Overflow { .. })
        ));
    }

    #[test]
    fn test_negative_values() {
        assert_eq!(convert("Gi", "Mi", -2).unwrap(), -2048);
    }
}
