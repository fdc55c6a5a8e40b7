//! ECMAScript-compatible number rendering.

use crate::error::CanonicalizeError;

/// Render a finite `f64` the way ECMAScript's `Number::toString` does:
/// shortest round-trip digits, plain decimal notation while the decimal
/// exponent stays in `(-7, 21]`, and `e+NN` / `e-NN` notation outside it.
///
/// # Errors
///
/// Returns [`CanonicalizeError::InvalidNumber`] for NaN and infinities.
pub fn format_f64(x: f64) -> Result<String, CanonicalizeError> {
    if !x.is_finite() {
        return Err(CanonicalizeError::InvalidNumber);
    }
    if x == 0.0 {
        // Covers -0.0 as well: both canonicalise to "0".
        return Ok("0".to_owned());
    }

    // `{:e}` gives the shortest round-trip digits in scientific form,
    // e.g. "3.333333333333333e8" or "2e-3".
    let sci = format!("{:e}", x.abs());
    let (mantissa, exp) = sci
        .split_once('e')
        .ok_or(CanonicalizeError::InvalidNumber)?;
    let exp: i64 = exp.parse().map_err(|_| CanonicalizeError::InvalidNumber)?;
    let digits: String = mantissa.chars().filter(|&c| c != '.').collect();

    let k = i64::try_from(digits.len()).map_err(|_| CanonicalizeError::InvalidNumber)?;
    // x = digits · 10^(n - k), with the decimal point after position n.
    let n = exp + 1;

    let mut out = String::new();
    if x < 0.0 {
        out.push('-');
    }
    if k <= n && n <= 21 {
        out.push_str(&digits);
        for _ in 0..(n - k) {
            out.push('0');
        }
    } else if 0 < n && n <= 21 {
        let split = usize::try_from(n).map_err(|_| CanonicalizeError::InvalidNumber)?;
        out.push_str(&digits[..split]);
        out.push('.');
        out.push_str(&digits[split..]);
    } else if -6 < n && n <= 0 {
        out.push_str("0.");
        for _ in 0..(-n) {
            out.push('0');
        }
        out.push_str(&digits);
    } else {
        out.push_str(&digits[..1]);
        if digits.len() > 1 {
            out.push('.');
            out.push_str(&digits[1..]);
        }
        out.push('e');
        if n - 1 >= 0 {
            out.push('+');
        }
        out.push_str(&(n - 1).to_string());
    }
    Ok(out)
}
