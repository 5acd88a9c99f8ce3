//! Numeric literal parsers.
//!
//! Pure conversions from pre-scanned numerals to values. The raw scanner
//! guarantees the digit classes, so non-digit input is a caller bug: it is
//! caught by `debug_assert!` and yields `None` in release builds.
//!
//! | function                         | accepts                         | on overflow      |
//! |----------------------------------|---------------------------------|------------------|
//! | [`try_parse_decimal_i64`]        | `[0-9]+`                        | `None` above 2^63 |
//! | [`try_parse_hexadecimal_i64`]    | `[0-9a-fA-F]+`                  | `None` above 16 significant digits |
//! | [`wrapping_parse_hexadecimal_i64`] | `[0-9a-fA-F]+`                | wraps modulo 2^64 |
//! | [`try_parse_decimal_f64`]        | decimal real with optional `e`  | `None` if infinite |
//! | [`parse_hexadecimal_f64`]        | hex mantissa + binary exponent  | `None` if infinite |

/// Decimal integer. Succeeds iff the value is at most 2^63; 2^63 itself is
/// reinterpreted as `i64::MIN` (two's complement).
pub fn try_parse_decimal_i64(digits: &str) -> Option<i64> {
    debug_assert!(
        !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()),
        "not a decimal digit run: {digits:?}"
    );
    if digits.is_empty() {
        return None;
    }
    let mut value: u64 = 0;
    for b in digits.bytes() {
        if !b.is_ascii_digit() {
            return None;
        }
        value = value
            .checked_mul(10)?
            .checked_add(u64::from(b - b'0'))?;
    }
    if value > 1 << 63 {
        return None;
    }
    #[allow(
        clippy::cast_possible_wrap,
        reason = "2^63 deliberately reinterprets as i64::MIN"
    )]
    Some(value as i64)
}

/// Hexadecimal integer of at most 16 significant digits (leading zeros are
/// free). The bit pattern is reinterpreted as signed.
pub fn try_parse_hexadecimal_i64(digits: &str) -> Option<i64> {
    let significant = digits.trim_start_matches('0');
    if significant.len() > 16 {
        return None;
    }
    parse_hex_bits(digits)
}

/// Hexadecimal integer of any length, wrapping modulo 2^64.
pub fn wrapping_parse_hexadecimal_i64(digits: &str) -> Option<i64> {
    parse_hex_bits(digits)
}

fn parse_hex_bits(digits: &str) -> Option<i64> {
    debug_assert!(
        !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_hexdigit()),
        "not a hexadecimal digit run: {digits:?}"
    );
    if digits.is_empty() {
        return None;
    }
    let mut bits: u64 = 0;
    for b in digits.bytes() {
        bits = bits.wrapping_mul(16).wrapping_add(u64::from(hex_value(b)?));
    }
    #[allow(
        clippy::cast_possible_wrap,
        reason = "hex literals denote a bit pattern"
    )]
    Some(bits as i64)
}

/// Decimal real (`12`, `1.5`, `.5`, `5.`, `1e-3`), correctly rounded to
/// nearest. `None` when the value overflows to infinity.
pub fn try_parse_decimal_f64(text: &str) -> Option<f64> {
    debug_assert!(
        text.bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-')),
        "not a decimal numeral: {text:?}"
    );
    text.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Hexadecimal real: `mantissa` is hex digits with an optional `.`, the
/// value is `mantissa * 2^exponent`.
///
/// The first 16 significant digits are kept exactly; later digits only feed
/// a sticky bit. Rounding is to nearest, ties to even, with gradual
/// underflow into subnormals. `None` when the value overflows to infinity.
pub fn parse_hexadecimal_f64(mantissa: &str, exponent: i32) -> Option<f64> {
    debug_assert!(
        mantissa.bytes().all(|b| b.is_ascii_hexdigit() || b == b'.'),
        "not a hexadecimal mantissa: {mantissa:?}"
    );

    let mut significand: u64 = 0;
    let mut significant_digits = 0u32;
    let mut sticky = false;
    let mut exp2 = i64::from(exponent);
    let mut in_fraction = false;

    for b in mantissa.bytes() {
        if b == b'.' {
            in_fraction = true;
            continue;
        }
        let digit = hex_value(b)?;
        if in_fraction {
            exp2 -= 4;
        }
        if significand == 0 && digit == 0 {
            continue;
        }
        if significant_digits < 16 {
            significand = significand * 16 + u64::from(digit);
            significant_digits += 1;
        } else {
            sticky |= digit != 0;
            exp2 += 4;
        }
    }

    if significand == 0 {
        return Some(0.0);
    }

    let bit_len = i64::from(64 - significand.leading_zeros());
    let top = exp2 + bit_len - 1;
    if top > 1023 {
        return None;
    }

    // Exponent of the lowest kept bit: 53 bits for normals, fixed at 2^-1074
    // for subnormals.
    let mut lsb = (top - 52).max(-1074);
    let shift = lsb - exp2;
    let mut kept = if shift <= 0 {
        significand << (-shift)
    } else if shift > 64 {
        0
    } else {
        round_shift(significand, shift, sticky)
    };

    if kept == 1 << 53 {
        kept >>= 1;
        lsb += 1;
    }
    if kept == 0 {
        return Some(0.0);
    }
    if lsb + i64::from(64 - kept.leading_zeros()) - 1 > 1023 {
        return None;
    }
    Some(scale_by_power_of_two(kept, lsb))
}

/// `significand >> shift`, rounded to nearest even with `sticky` standing
/// for nonzero bits below the significand. `shift` is in `1..=64`.
fn round_shift(significand: u64, shift: i64, sticky: bool) -> u64 {
    let (kept, rest) = if shift == 64 {
        (0, significand)
    } else {
        (significand >> shift, significand & ((1 << shift) - 1))
    };
    let half = 1u64 << (shift - 1);
    let round_up = rest > half || (rest == half && (sticky || kept & 1 == 1));
    kept + u64::from(round_up)
}

/// `kept * 2^lsb` where the product is exactly representable.
#[allow(
    clippy::cast_precision_loss,
    reason = "kept has at most 53 significant bits"
)]
fn scale_by_power_of_two(kept: u64, lsb: i64) -> f64 {
    let value = kept as f64;
    if lsb >= -1022 {
        value * power_of_two(lsb)
    } else {
        // Two steps so the intermediate stays normal and exact.
        value * power_of_two(-1022) * power_of_two(lsb + 1022)
    }
}

/// `2^k` for `k` in the normal exponent range.
#[allow(
    clippy::cast_sign_loss,
    reason = "k + 1023 is positive for normal exponents"
)]
fn power_of_two(k: i64) -> f64 {
    debug_assert!((-1022..=1023).contains(&k));
    f64::from_bits(((k + 1023) as u64) << 52)
}

#[inline]
fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
