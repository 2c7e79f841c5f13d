// Copyright (c) 2020 Google LLC All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::fmt;

/// The type a valued option's text is coerced to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// `true/1/yes/on` or `false/0/no/off`, case-insensitive.
    Bool,
    /// A signed 64-bit integer.
    Int,
    /// A 64-bit float.
    Double,
    /// Any text.
    Str,
    /// A single character, or its decimal / `0x` hex code point.
    Char,
}

impl ValueType {
    /// The name used in help text and coercion errors.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "integer",
            Self::Double => "float",
            Self::Str => "string",
            Self::Char => "char",
        }
    }
}

/// A typed option value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// A boolean.
    Bool(bool),
    /// An integer.
    Int(i64),
    /// A float.
    Double(f64),
    /// Text.
    Str(String),
    /// A character.
    Char(char),
}

impl Value {
    /// The type this value belongs to.
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Bool(_) => ValueType::Bool,
            Self::Int(_) => ValueType::Int,
            Self::Double(_) => ValueType::Double,
            Self::Str(_) => ValueType::Str,
            Self::Char(_) => ValueType::Char,
        }
    }

    /// Coerce raw command line text to `ty`.
    ///
    /// Returns `None` when the text is not a valid spelling of the type.
    pub fn coerce(ty: ValueType, text: &str) -> Option<Self> {
        match ty {
            ValueType::Bool => parse_bool(text).map(Self::Bool),
            ValueType::Int => text.parse().ok().map(Self::Int),
            ValueType::Double => text.parse().ok().map(Self::Double),
            ValueType::Str => Some(Self::Str(text.to_string())),
            ValueType::Char => parse_char(text).map(Self::Char),
        }
    }
}

fn parse_bool(text: &str) -> Option<bool> {
    match text.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_char(text: &str) -> Option<char> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        (Some(_), Some(_)) => {
            let code = match text.strip_prefix("0x") {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => text.parse().ok()?,
            };
            char::from_u32(code)
        }
        (None, _) => None,
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(i) => write!(f, "{}", i),
            // Keep a fractional part so floats read as floats in help text.
            Self::Double(d) if d.fract() == 0.0 && d.is_finite() => write!(f, "{:.1}", d),
            Self::Double(d) => write!(f, "{}", d),
            Self::Str(s) => write!(f, "{}", s),
            Self::Char(c) => write!(f, "'{}'", c),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Self::Double(d)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Self::Char(c)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

macro_rules! impl_value_from_integers {
    ($($ty:ty,)*) => {
        $(
            impl From<$ty> for Value {
                fn from(i: $ty) -> Self {
                    Self::Int(i64::from(i))
                }
            }
        )*
    }
}

impl_value_from_integers![i8, i16, i32, i64, u8, u16, u32,];

/// Types which can be read back out of a bound [`Value`].
///
/// Reading a value as a type it was not declared with yields `None`.
pub trait FromValue: Sized {
    /// Convert the value, or `None` if it holds a different type.
    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Double(d) => Some(*d),
            _ => None,
        }
    }
}

impl FromValue for char {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Char(c) => Some(*c),
            _ => None,
        }
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Str(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

macro_rules! impl_from_value_for_integers {
    ($($ty:ty,)*) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: &Value) -> Option<Self> {
                    match value {
                        Value::Int(i) => <$ty>::try_from(*i).ok(),
                        _ => None,
                    }
                }
            }
        )*
    }
}

impl_from_value_for_integers![i8, i16, i32, i64, u8, u16, u32, u64, usize, isize,];

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn bool_spellings() {
        for text in ["true", "1", "YES", "On"] {
            assert_eq!(Value::coerce(ValueType::Bool, text), Some(Value::Bool(true)));
        }
        for text in ["false", "0", "no", "OFF"] {
            assert_eq!(Value::coerce(ValueType::Bool, text), Some(Value::Bool(false)));
        }
        assert_eq!(Value::coerce(ValueType::Bool, "maybe"), None);
    }

    #[test]
    fn numbers() {
        assert_eq!(Value::coerce(ValueType::Int, "-42"), Some(Value::Int(-42)));
        assert_eq!(Value::coerce(ValueType::Int, "4.2"), None);
        assert_eq!(Value::coerce(ValueType::Int, "abc"), None);
        assert_eq!(Value::coerce(ValueType::Double, "2.5"), Some(Value::Double(2.5)));
        assert_eq!(Value::coerce(ValueType::Double, "x"), None);
    }

    #[test]
    fn chars() {
        assert_eq!(Value::coerce(ValueType::Char, ","), Some(Value::Char(',')));
        assert_eq!(Value::coerce(ValueType::Char, "58"), Some(Value::Char(':')));
        assert_eq!(Value::coerce(ValueType::Char, "0x2c"), Some(Value::Char(',')));
        assert_eq!(Value::coerce(ValueType::Char, ""), None);
        assert_eq!(Value::coerce(ValueType::Char, "ab"), None);
    }

    #[test]
    fn display_keeps_float_fraction() {
        assert_eq!(Value::Double(3.0).to_string(), "3.0");
        assert_eq!(Value::Double(0.25).to_string(), "0.25");
        assert_eq!(Value::Char(':').to_string(), "':'");
    }

    #[test]
    fn integer_reads_check_range() {
        assert_eq!(u8::from_value(&Value::Int(300)), None);
        assert_eq!(u8::from_value(&Value::Int(30)), Some(30));
        assert_eq!(i64::from_value(&Value::Str("3".into())), None);
    }
}
