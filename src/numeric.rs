//! Lenient number parsing for tag values.
//!
//! Tag values are free text, so a numeric comparison reads the longest
//! numeric prefix and ignores whatever follows (`"1999 (remaster)"` is 1999).
//! Text without any numeric prefix reads as zero.

fn is_c_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0b' | '\x0c' | '\r')
}

/// Splits an optional sign off the front, after leading whitespace.
fn split_sign(text: &str) -> (bool, &str) {
    let text = text.trim_start_matches(is_c_space);
    if let Some(rest) = text.strip_prefix('-') {
        (true, rest)
    } else {
        (false, text.strip_prefix('+').unwrap_or(text))
    }
}

/// Base 10 integer prefix of `text`, saturating at the `i64` bounds.
///
/// # Examples
///
/// ```
/// use tagfilter::numeric::parse_integer_prefix;
///
/// assert_eq!(parse_integer_prefix("  42abc"), 42);
/// assert_eq!(parse_integer_prefix("-7/12"), -7);
/// assert_eq!(parse_integer_prefix("abc"), 0);
/// ```
pub fn parse_integer_prefix(text: &str) -> i64 {
    let (negative, rest) = split_sign(text);

    let mut value: i64 = 0;
    for c in rest.chars() {
        let Some(digit) = c.to_digit(10) else {
            break;
        };
        let digit = i64::from(digit);
        value = if negative {
            value.saturating_mul(10).saturating_sub(digit)
        } else {
            value.saturating_mul(10).saturating_add(digit)
        };
    }
    value
}

/// Decimal floating point prefix of `text`.
///
/// Accepts digits with an optional fraction and exponent, as well as `inf`,
/// `infinity` and `nan` in any case.
///
/// # Examples
///
/// ```
/// use tagfilter::numeric::parse_float_prefix;
///
/// assert_eq!(parse_float_prefix("7.5 stars"), 7.5);
/// assert_eq!(parse_float_prefix("1e3x"), 1000.0);
/// assert_eq!(parse_float_prefix("-.5"), -0.5);
/// assert_eq!(parse_float_prefix("n/a"), 0.0);
/// ```
pub fn parse_float_prefix(text: &str) -> f64 {
    let (negative, rest) = split_sign(text);
    let sign = if negative { -1.0 } else { 1.0 };

    let lower = rest.get(..8).unwrap_or(rest).to_ascii_lowercase();
    if lower.starts_with("inf") {
        return sign * f64::INFINITY;
    }
    if lower.starts_with("nan") {
        return f64::NAN;
    }

    let chars: Vec<char> = rest.chars().collect();
    let mut end = 0;
    let mut digits = 0;

    while end < chars.len() && chars[end].is_ascii_digit() {
        end += 1;
        digits += 1;
    }
    if end < chars.len() && chars[end] == '.' {
        end += 1;
        while end < chars.len() && chars[end].is_ascii_digit() {
            end += 1;
            digits += 1;
        }
    }
    if digits == 0 {
        return 0.0;
    }

    // Exponent only counts when at least one digit follows it
    if end < chars.len() && matches!(chars[end], 'e' | 'E') {
        let mut exp_end = end + 1;
        if exp_end < chars.len() && matches!(chars[exp_end], '+' | '-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < chars.len() && chars[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    let prefix: String = chars[..end].iter().collect();
    prefix.parse::<f64>().map(|n| sign * n).unwrap_or(0.0)
}
