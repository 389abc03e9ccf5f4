//! Conversion of raw strings into scalar field values.
//!
//! Every source other than the structured file formats hands the engine a raw
//! string: an INI value, an environment variable, a CLI flag value, a `default`
//! literal. [`Scalar::parse`] turns that string into the field's type.
//!
//! | kind | [`Style::Plain`] | [`Style::Cli`] |
//! |------|------------------|----------------|
//! | string | raw | raw |
//! | bool | `"true"` or `"yes"` | empty or `"yes"` |
//! | int / uint / float | parsed, error on failure | empty leaves the field untouched |
//!
//! The CLI rules account for flags given without a value: `-v` switches a bool on
//! and `--port` with nothing after it is ignored rather than rejected.

use std::fmt;

/// Underlying kind of a leaf field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    String,
    Bool,
    Int,
    Uint,
    Float,
    /// `Vec<String>`, filled one raw value at a time.
    List,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Kind::String => "string",
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Uint => "uint",
            Kind::Float => "float",
            Kind::List => "list",
        })
    }
}

/// Which rule set to coerce with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Plain,
    Cli,
}

pub type ParseFailure = Box<dyn std::error::Error + Send + Sync>;

/// A scalar type a leaf field can hold, directly or behind an `Option`.
pub trait Scalar: Sized {
    const KIND: Kind;

    /// Parse `raw`. `Ok(None)` means "no value supplied", the field stays as is.
    fn parse(raw: &str, style: Style) -> Result<Option<Self>, ParseFailure>;

    fn is_zero(&self) -> bool;
}

impl Scalar for String {
    const KIND: Kind = Kind::String;

    fn parse(raw: &str, _style: Style) -> Result<Option<Self>, ParseFailure> {
        Ok(Some(raw.to_string()))
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl Scalar for bool {
    const KIND: Kind = Kind::Bool;

    fn parse(raw: &str, style: Style) -> Result<Option<Self>, ParseFailure> {
        let value = match style {
            Style::Cli => raw.is_empty() || raw == "yes",
            Style::Plain => raw == "true" || raw == "yes",
        };
        Ok(Some(value))
    }

    fn is_zero(&self) -> bool {
        !*self
    }
}

macro_rules! number_scalar {
    ($kind:expr, $zero:literal, $($ty:ty),+) => {
        $(
            impl Scalar for $ty {
                const KIND: Kind = $kind;

                fn parse(raw: &str, style: Style) -> Result<Option<Self>, ParseFailure> {
                    if style == Style::Cli && raw.is_empty() {
                        return Ok(None);
                    }
                    Ok(Some(raw.parse::<$ty>()?))
                }

                fn is_zero(&self) -> bool {
                    *self == $zero
                }
            }
        )+
    };
}

number_scalar!(Kind::Int, 0, i8, i16, i32, i64, i128, isize);
number_scalar!(Kind::Uint, 0, u8, u16, u32, u64, u128, usize);
number_scalar!(Kind::Float, 0.0, f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_takes_raw() {
        assert_eq!(
            String::parse("a b", Style::Plain).unwrap(),
            Some("a b".to_string())
        );
        assert_eq!(String::parse("", Style::Cli).unwrap(), Some(String::new()));
    }

    #[test]
    fn plain_bool_accepts_true_and_yes() {
        assert_eq!(bool::parse("true", Style::Plain).unwrap(), Some(true));
        assert_eq!(bool::parse("yes", Style::Plain).unwrap(), Some(true));
        assert_eq!(bool::parse("TRUE", Style::Plain).unwrap(), Some(false));
        assert_eq!(bool::parse("", Style::Plain).unwrap(), Some(false));
        assert_eq!(bool::parse("1", Style::Plain).unwrap(), Some(false));
    }

    #[test]
    fn cli_bool_accepts_empty_and_yes() {
        assert_eq!(bool::parse("", Style::Cli).unwrap(), Some(true));
        assert_eq!(bool::parse("yes", Style::Cli).unwrap(), Some(true));
        assert_eq!(bool::parse("true", Style::Cli).unwrap(), Some(false));
    }

    #[test]
    fn integers_parse_base_ten() {
        assert_eq!(i32::parse("-42", Style::Plain).unwrap(), Some(-42));
        assert_eq!(u16::parse("9000", Style::Cli).unwrap(), Some(9000));
    }

    #[test]
    fn integer_failure_is_an_error() {
        assert!(i64::parse("nine", Style::Plain).is_err());
        assert!(u8::parse("-1", Style::Plain).is_err());
        assert!(u8::parse("256", Style::Plain).is_err());
        assert!(i32::parse("", Style::Plain).is_err());
    }

    #[test]
    fn cli_empty_number_is_no_value() {
        assert_eq!(i32::parse("", Style::Cli).unwrap(), None);
        assert_eq!(u64::parse("", Style::Cli).unwrap(), None);
        assert_eq!(f64::parse("", Style::Cli).unwrap(), None);
    }

    #[test]
    fn floats_parse_decimal() {
        assert_eq!(f64::parse("1.5", Style::Plain).unwrap(), Some(1.5));
        assert!(f32::parse("one", Style::Plain).is_err());
    }

    #[test]
    fn zero_values() {
        assert!(String::new().is_zero());
        assert!(!"x".to_string().is_zero());
        assert!(false.is_zero());
        assert!(0i32.is_zero());
        assert!(0u8.is_zero());
        assert!(0.0f64.is_zero());
        assert!(!0.5f32.is_zero());
    }
}
