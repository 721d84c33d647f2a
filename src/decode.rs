//! Turning an option's text value into a typed value.
//!
//! Decoding never fails. Malformed numbers decode to zero, the way reading
//! a number from a stream does, so check the raw text with
//! [`Scanner::value`][crate::Scanner::value] if that matters.

use std::path::PathBuf;

/// Types an option value can be decoded into.
///
/// `value` is the cached value of an option, where `None` means the option
/// has no value (a flag, or an optional option that was not given one).
pub trait FromArg: Sized {
    /// Decode the value.
    fn from_arg(value: Option<&str>) -> Self;
}

/// The value verbatim. No value decodes to an empty string.
impl FromArg for String {
    fn from_arg(value: Option<&str>) -> Self {
        value.unwrap_or_default().to_owned()
    }
}

impl FromArg for PathBuf {
    fn from_arg(value: Option<&str>) -> Self {
        PathBuf::from(value.unwrap_or_default())
    }
}

/// The first character, or `'\0'`.
impl FromArg for char {
    fn from_arg(value: Option<&str>) -> Self {
        value.and_then(|text| text.chars().next()).unwrap_or('\0')
    }
}

/// A present option is `true` unless its value says otherwise
/// (`0`, `false`, `no` or `off`).
impl FromArg for bool {
    fn from_arg(value: Option<&str>) -> Self {
        match value {
            None => true,
            Some(text) => {
                let text = text.trim();
                !(text == "0"
                    || text.eq_ignore_ascii_case("false")
                    || text.eq_ignore_ascii_case("no")
                    || text.eq_ignore_ascii_case("off"))
            }
        }
    }
}

impl<T: FromArg> FromArg for Option<T> {
    fn from_arg(value: Option<&str>) -> Self {
        value.map(|text| T::from_arg(Some(text)))
    }
}

macro_rules! integer_from_arg {
    ($($ty:ty)*) => {$(
        impl FromArg for $ty {
            fn from_arg(value: Option<&str>) -> Self {
                value
                    .and_then(|text| integer_prefix(text).parse().ok())
                    .unwrap_or_default()
            }
        }
    )*};
}

macro_rules! float_from_arg {
    ($($ty:ty)*) => {$(
        impl FromArg for $ty {
            fn from_arg(value: Option<&str>) -> Self {
                value
                    .and_then(|text| float_prefix(text).parse().ok())
                    .unwrap_or_default()
            }
        }
    )*};
}

integer_from_arg!(i8 i16 i32 i64 i128 isize u8 u16 u32 u64 u128 usize);
float_from_arg!(f32 f64);

/// Count the ASCII digits at the start of `bytes`.
fn digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Count an optional leading `+` or `-`.
fn sign(bytes: &[u8]) -> usize {
    match bytes.first() {
        Some(b'+') | Some(b'-') => 1,
        _ => 0,
    }
}

/// The leading `[+-]digits` of `text`, after leading whitespace.
fn integer_prefix(text: &str) -> &str {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = sign(bytes);
    end += digits(&bytes[end..]);
    &text[..end]
}

/// The leading `[+-]digits[.digits][e[+-]digits]` of `text`, after leading
/// whitespace.
fn float_prefix(text: &str) -> &str {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = sign(bytes);
    let whole = digits(&bytes[end..]);
    end += whole;
    let mut fraction = 0;
    if bytes.get(end) == Some(&b'.') {
        fraction = digits(&bytes[end + 1..]);
        if whole + fraction > 0 {
            end += 1 + fraction;
        }
    }
    if whole + fraction == 0 {
        return "";
    }
    if let Some(b'e') | Some(b'E') = bytes.get(end) {
        let exp_sign = sign(&bytes[end + 1..]);
        let exp_digits = digits(&bytes[end + 1 + exp_sign..]);
        if exp_digits > 0 {
            end += 1 + exp_sign + exp_digits;
        }
    }
    &text[..end]
}

/// The type to decode a value as, for [`Value::decode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Keep the text.
    Text,
    /// A signed integer.
    Integer,
    /// A floating point number.
    Float,
}

/// A decoded option value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The option has no value.
    Empty,
    /// The value as written.
    Text(String),
    /// The value read as an integer.
    Integer(i64),
    /// The value read as a float.
    Float(f64),
}

impl Value {
    /// Decode a cached value as `kind`.
    pub fn decode(value: Option<&str>, kind: Kind) -> Value {
        if value.is_none() {
            return Value::Empty;
        }
        match kind {
            Kind::Text => Value::Text(String::from_arg(value)),
            Kind::Integer => Value::Integer(i64::from_arg(value)),
            Kind::Float => Value::Float(f64::from_arg(value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers() {
        assert_eq!(i32::from_arg(Some("47401")), 47401);
        assert_eq!(i32::from_arg(Some("-10")), -10);
        assert_eq!(i32::from_arg(Some("+7")), 7);
        assert_eq!(i32::from_arg(Some("  12")), 12);
        assert_eq!(i32::from_arg(Some("12abc")), 12);
        assert_eq!(i32::from_arg(Some("abc")), 0);
        assert_eq!(i32::from_arg(Some("")), 0);
        assert_eq!(i32::from_arg(Some("-")), 0);
        assert_eq!(i32::from_arg(None), 0);
        assert_eq!(u8::from_arg(Some("300")), 0);
        assert_eq!(u32::from_arg(Some("-5")), 0);
        assert_eq!(usize::from_arg(Some("8 9")), 8);
    }

    #[test]
    fn test_floats() {
        assert_eq!(f64::from_arg(Some("2.5")), 2.5);
        assert_eq!(f64::from_arg(Some("-.5")), -0.5);
        assert_eq!(f64::from_arg(Some("3.")), 3.0);
        assert_eq!(f64::from_arg(Some("1e3x")), 1000.0);
        assert_eq!(f64::from_arg(Some("1e")), 1.0);
        assert_eq!(f64::from_arg(Some("2.5E-1")), 0.25);
        assert_eq!(f32::from_arg(Some(".")), 0.0);
        assert_eq!(f32::from_arg(Some("nope")), 0.0);
        assert_eq!(f32::from_arg(None), 0.0);
    }

    #[test]
    fn test_text() {
        assert_eq!(String::from_arg(Some("441 S Dunn St")), "441 S Dunn St");
        assert_eq!(String::from_arg(None), "");
        assert_eq!(PathBuf::from_arg(Some("notes.txt")), PathBuf::from("notes.txt"));
        assert_eq!(char::from_arg(Some("µs")), 'µ');
        assert_eq!(char::from_arg(None), '\0');
        assert_eq!(Option::<u16>::from_arg(Some("80")), Some(80));
        assert_eq!(Option::<u16>::from_arg(None), None);
    }

    #[test]
    fn test_bool() {
        assert!(bool::from_arg(None));
        assert!(bool::from_arg(Some("yes")));
        assert!(bool::from_arg(Some("")));
        assert!(!bool::from_arg(Some("0")));
        assert!(!bool::from_arg(Some("False")));
        assert!(!bool::from_arg(Some("off")));
    }

    #[test]
    fn test_value() {
        assert_eq!(Value::decode(None, Kind::Integer), Value::Empty);
        assert_eq!(Value::decode(Some("47401"), Kind::Integer), Value::Integer(47401));
        assert_eq!(
            Value::decode(Some("47401"), Kind::Text),
            Value::Text("47401".into())
        );
        assert_eq!(Value::decode(Some("x"), Kind::Float), Value::Float(0.0));
    }
}
