//! Implicit conversions the evaluator relies on.
//!
//! These are the "natural" coercions: they never fail. Values that have no
//! sensible numeric or textual reading (containers, functions, the unknown
//! sentinel) read as `0` or the empty string.

use std::borrow::Cow;

use crate::value::{format_float, Special, Value};

/// Reads a value as an integer.
pub fn to_number(v: &Value) -> i64 {
    match v {
        Value::Number(n) => *n,
        Value::String(s) => str_to_number(s),
        Value::Float(f) => *f as i64,
        Value::Special(s) => match s {
            Special::True => 1,
            Special::False | Special::Null => 0,
        },
        Value::List(_) | Value::Dict(_) | Value::Func(_) | Value::Unknown => 0,
    }
}

/// Reads a value as a float; non-floats go through [`to_number`].
pub fn to_float(v: &Value) -> f64 {
    match v {
        Value::Float(f) => *f,
        other => to_number(other) as f64,
    }
}

/// Reads a value as text.
pub fn to_text(v: &Value) -> Cow<'_, str> {
    match v {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        Value::Number(n) => Cow::Owned(n.to_string()),
        Value::Float(f) => Cow::Owned(format_float(*f)),
        Value::Special(s) => Cow::Borrowed(s.name()),
        Value::Func(func) => Cow::Borrowed(func.name()),
        Value::List(_) | Value::Dict(_) | Value::Unknown => Cow::Borrowed(""),
    }
}

/// Operand kinds a float target can absorb.
pub fn is_numeric_operand(v: &Value) -> bool {
    matches!(v, Value::Number(_) | Value::Float(_) | Value::String(_))
}

/// Parses the leading integer of `s`.
///
/// Accepts an optional `-`, then `0x`/`0X` hex, `0b`/`0B` binary, a leading
/// `0` for octal, or plain decimal. Parsing stops at the first character that
/// is not a digit of the radix; no digits at all reads as 0. Out-of-range
/// values saturate.
pub fn str_to_number(s: &str) -> i64 {
    let bytes = s.as_bytes();
    let (neg, rest) = match bytes.split_first() {
        Some((b'-', tail)) => (true, tail),
        _ => (false, bytes),
    };

    let prefixed = |marks: &[u8], radix: u32| {
        rest.len() > 2
            && rest[0] == b'0'
            && marks.contains(&rest[1])
            && (rest[2] as char).is_digit(radix)
    };
    let (radix, digits) = if prefixed(b"xX".as_slice(), 16) {
        (16, &rest[2..])
    } else if prefixed(b"bB".as_slice(), 2) {
        (2, &rest[2..])
    } else if rest.len() > 1 && rest[0] == b'0' && rest[1].is_ascii_digit() {
        let octal = rest.iter().take_while(|c| c.is_ascii_digit()).all(|c| *c <= b'7');
        (if octal { 8 } else { 10 }, rest)
    } else {
        (10, rest)
    };

    let limit: u64 = if neg { i64::MAX as u64 + 1 } else { i64::MAX as u64 };
    let mut n: u64 = 0;
    for &c in digits {
        let Some(d) = (c as char).to_digit(radix) else { break };
        n = match n.checked_mul(radix as u64).and_then(|n| n.checked_add(d as u64)) {
            Some(n) if n <= limit => n,
            _ => return if neg { i64::MIN } else { i64::MAX },
        };
    }
    if neg {
        0i64.wrapping_sub(n as i64)
    } else {
        n as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_prefix() {
        assert_eq!(str_to_number("456"), 456);
        assert_eq!(str_to_number("6bar"), 6);
        assert_eq!(str_to_number("foo"), 0);
        assert_eq!(str_to_number("-8"), -8);
        assert_eq!(str_to_number("+8"), 0);
        assert_eq!(str_to_number(" 12"), 0);
        assert_eq!(str_to_number(""), 0);
    }

    #[test]
    fn radix_prefixes() {
        assert_eq!(str_to_number("0xf1"), 241);
        assert_eq!(str_to_number("0XFF"), 255);
        assert_eq!(str_to_number("0b101"), 5);
        assert_eq!(str_to_number("0100"), 64);
        assert_eq!(str_to_number("-010"), -8);
        assert_eq!(str_to_number("0189"), 189);
        assert_eq!(str_to_number("0x"), 0);
        assert_eq!(str_to_number("0b2"), 0);
    }

    #[test]
    fn saturates_on_overflow() {
        assert_eq!(str_to_number("99999999999999999999"), i64::MAX);
        assert_eq!(str_to_number("-99999999999999999999"), i64::MIN);
        assert_eq!(str_to_number("-9223372036854775808"), i64::MIN);
        assert_eq!(str_to_number("9223372036854775807"), i64::MAX);
    }

    #[test]
    fn scalar_readings() {
        assert_eq!(to_number(&Value::Special(Special::True)), 1);
        assert_eq!(to_number(&Value::Special(Special::Null)), 0);
        assert_eq!(to_number(&Value::Float(-2.9)), -2);
        assert_eq!(to_float(&Value::str("3")), 3.0);
        assert_eq!(to_text(&Value::Number(-12)), "-12");
        assert_eq!(to_text(&Value::Special(Special::False)), "v:false");
        assert_eq!(to_text(&Value::null_list()), "");
    }
}
