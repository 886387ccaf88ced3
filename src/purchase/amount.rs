//! Conversion of human token amounts to the smallest on-chain unit.

use thiserror::Error;

/// Errors converting a token amount.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("Invalid amount '{0}': expected a non-negative decimal number")]
    Invalid(String),

    #[error("Amount '{amount}' overflows with {decimals} decimals")]
    Overflow { amount: String, decimals: u32 },
}

/// Convert `amount` whole tokens to the smallest unit: `floor(amount * 10^decimals)`.
///
/// Parsing is exact; fractional digits beyond `decimals` are truncated.
pub fn to_smallest_unit(amount: &str, decimals: u32) -> Result<u128, AmountError> {
    let trimmed = amount.trim();
    let invalid = || AmountError::Invalid(amount.to_string());
    let overflow = || AmountError::Overflow {
        amount: amount.to_string(),
        decimals,
    };

    let (whole, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));
    let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !is_digits(whole) || !is_digits(fraction) {
        return Err(invalid());
    }

    let scale = 10u128.checked_pow(decimals).ok_or_else(overflow)?;

    let whole_units = if whole.is_empty() {
        0
    } else {
        // Digits only, so a parse failure can only be overflow.
        whole.parse::<u128>().map_err(|_| overflow())?
    };
    let mut smallest = whole_units.checked_mul(scale).ok_or_else(overflow)?;

    let kept: String = fraction.chars().take(decimals as usize).collect();
    if !kept.is_empty() {
        let padded = format!("{:0<width$}", kept, width = decimals as usize);
        let fractional_units = padded.parse::<u128>().map_err(|_| overflow())?;
        smallest = smallest.checked_add(fractional_units).ok_or_else(overflow)?;
    }

    Ok(smallest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_amounts() {
        assert_eq!(to_smallest_unit("1", 10), Ok(10_000_000_000));
        assert_eq!(to_smallest_unit("1", 12), Ok(1_000_000_000_000));
        assert_eq!(to_smallest_unit("0", 10), Ok(0));
        assert_eq!(to_smallest_unit("7", 0), Ok(7));
    }

    #[test]
    fn test_fractional_amounts() {
        assert_eq!(to_smallest_unit("0.5", 10), Ok(5_000_000_000));
        assert_eq!(to_smallest_unit("1.25", 12), Ok(1_250_000_000_000));
        assert_eq!(to_smallest_unit(".1", 1), Ok(1));
        assert_eq!(to_smallest_unit("2.", 2), Ok(200));
    }

    #[test]
    fn test_excess_precision_floors() {
        assert_eq!(to_smallest_unit("0.123456789019", 10), Ok(1_234_567_890));
        assert_eq!(to_smallest_unit("0.00000000001", 10), Ok(0));
        assert_eq!(to_smallest_unit("1.9", 0), Ok(1));
    }

    #[test]
    fn test_invalid_amounts() {
        for bad in ["", ".", "-1", "abc", "1e3", "1.2.3", "+1", "1,5"] {
            assert_eq!(
                to_smallest_unit(bad, 10),
                Err(AmountError::Invalid(bad.to_string())),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_overflow() {
        let huge = "340282366920938463463374607431768211455";
        assert!(matches!(
            to_smallest_unit(huge, 1),
            Err(AmountError::Overflow { decimals: 1, .. })
        ));
        assert!(matches!(
            to_smallest_unit("1", 40),
            Err(AmountError::Overflow { .. })
        ));
    }

    #[test]
    fn test_surrounding_whitespace() {
        assert_eq!(to_smallest_unit(" 2 ", 3), Ok(2_000));
    }
}
