//! Decimal rendering of table cells.
//!
//! Cells use the shortest digits that round-trip (closest to the exact
//! value when several qualify, as `ryu` picks them), laid out the way the
//! modelling tools that consume these tables print floats:
//!
//! ```text
//! 300.0     0.5     0.0001     1e-05     1.5e+16     -0.0     nan     inf
//! ```
//!
//! Fixed notation is used for decimal exponents in `[-4, 16)`, always with at
//! least one fractional digit. Anything else is scientific with a signed,
//! at least two-digit exponent.

/// Smallest decimal exponent printed in fixed notation.
const FIXED_MIN_EXP: i32 = -4;
/// First decimal exponent printed in scientific notation.
const FIXED_MAX_EXP: i32 = 16;

/// Render `value` as a table cell.
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_owned();
    }

    let mut buf = ryu::Buffer::new();
    let repr = buf.format_finite(value);
    let (sign, repr) = match repr.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", repr),
    };
    let (digits, exp) = decompose(repr);

    if (FIXED_MIN_EXP..FIXED_MAX_EXP).contains(&exp) {
        format!("{sign}{}", fixed(&digits, exp))
    } else {
        format!("{sign}{}", scientific(&digits, exp))
    }
}

/// Split an unsigned `ryu` rendering ("0.0001", "1.5e-7", "300.0") into its
/// significant digits and the decimal exponent of the first digit.
fn decompose(repr: &str) -> (String, i32) {
    let (mantissa, exp) = match repr.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (repr, 0),
    };
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let all = format!("{int_part}{frac_part}");
    let trimmed = all.trim_start_matches('0');
    let digits = trimmed.trim_end_matches('0');
    if digits.is_empty() {
        return ("0".to_owned(), 0);
    }
    let leading = all.len() - trimmed.len();
    let point = i32::try_from(int_part.len()).unwrap_or(0) - i32::try_from(leading).unwrap_or(0);
    (digits.to_owned(), point - 1 + exp)
}

fn fixed(digits: &str, exp: i32) -> String {
    let magnitude = usize::try_from(exp.unsigned_abs()).unwrap_or(0);
    if exp < 0 {
        let zeros = "0".repeat(magnitude - 1);
        return format!("0.{zeros}{digits}");
    }
    let int_len = magnitude + 1;
    if digits.len() > int_len {
        format!("{}.{}", &digits[..int_len], &digits[int_len..])
    } else {
        format!("{digits}{}.0", "0".repeat(int_len - digits.len()))
    }
}

fn scientific(digits: &str, exp: i32) -> String {
    let (lead, rest) = digits.split_at(1);
    let exp_sign = if exp < 0 { '-' } else { '+' };
    let frac = if rest.is_empty() {
        String::new()
    } else {
        format!(".{rest}")
    };
    format!("{lead}{frac}e{exp_sign}{:02}", exp.unsigned_abs())
}
