//! Dynamic values and the [`GobEncode`] trait that maps Rust records onto
//! gob types.

use std::ffi::OsString;
use std::fmt;

use super::types::GobType;

/// Contents of a gob string.
///
/// Gob strings are byte strings: Go encodes whatever bytes a `string` holds,
/// UTF-8 or not. Values read from the environment keep their raw bytes here
/// so that distinct inputs never collapse into the same encoding.
///
/// # Examples
///
/// ```
/// use kash::gob::ByteString;
///
/// let scopes = ByteString::from("openid,,profile").split(b',');
/// assert_eq!(scopes, vec!["openid", "", "profile"]);
///
/// let raw = ByteString::from(vec![b'h', 0xff]);
/// assert_eq!(raw.as_bytes(), &[b'h', 0xff]);
/// assert_eq!(raw.to_string(), "h\u{fffd}");
/// ```
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ByteString(Vec<u8>);

impl ByteString {
    /// The empty string.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Raw bytes as they are written to the stream.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Split on every `separator` byte, keeping empty segments.
    ///
    /// An empty string yields one empty segment, never none.
    #[must_use]
    pub fn split(&self, separator: u8) -> Vec<Self> {
        self.0
            .split(|byte| *byte == separator)
            .map(|segment| Self(segment.to_vec()))
            .collect()
    }
}

impl From<&str> for ByteString {
    fn from(value: &str) -> Self {
        Self(value.as_bytes().to_vec())
    }
}

impl From<String> for ByteString {
    fn from(value: String) -> Self {
        Self(value.into_bytes())
    }
}

impl From<Vec<u8>> for ByteString {
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}

impl From<OsString> for ByteString {
    fn from(value: OsString) -> Self {
        Self(value.into_encoded_bytes())
    }
}

impl PartialEq<str> for ByteString {
    fn eq(&self, other: &str) -> bool {
        self.0 == other.as_bytes()
    }
}

impl PartialEq<&str> for ByteString {
    fn eq(&self, other: &&str) -> bool {
        self.0 == other.as_bytes()
    }
}

impl fmt::Debug for ByteString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&String::from_utf8_lossy(&self.0), f)
    }
}

/// Invalid UTF-8 sequences are shown as U+FFFD.
impl fmt::Display for ByteString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}

/// A value ready to be written against a [`GobType`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A boolean.
    Bool(bool),
    /// A signed integer of any Go width.
    Int(i64),
    /// An unsigned integer of any Go width.
    Uint(u64),
    /// A string of arbitrary bytes.
    String(ByteString),
    /// Slice elements, in order.
    Slice(Vec<Self>),
    /// Struct field values, in declaration order.
    Struct(Vec<Self>),
}

impl Value {
    /// Short name of the value's kind, used in mismatch errors.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Uint(_) => "uint",
            Self::String(_) => "string",
            Self::Slice(_) => "slice",
            Self::Struct(_) => "struct",
        }
    }

    /// Whether a struct field holding this value is left out of the stream.
    ///
    /// Nested structs are never omitted, even when every field is zero.
    #[must_use]
    pub fn is_omitted_as_field(&self) -> bool {
        match self {
            Self::Bool(flag) => !flag,
            Self::Int(number) => *number == 0,
            Self::Uint(number) => *number == 0,
            Self::String(text) => text.as_bytes().is_empty(),
            Self::Slice(items) => items.is_empty(),
            Self::Struct(_) => false,
        }
    }
}

/// Rust types with a fixed gob shape.
///
/// # Examples
///
/// ```
/// use kash::gob::{Field, GobEncode, GobType, StructType, Value};
///
/// struct Point {
///     x: i64,
///     y: i64,
/// }
///
/// impl GobEncode for Point {
///     fn gob_type() -> GobType {
///         GobType::Struct(StructType::new(
///             "Point",
///             vec![Field::new("X", GobType::Int), Field::new("Y", GobType::Int)],
///         ))
///     }
///
///     fn gob_value(&self) -> Value {
///         Value::Struct(vec![Value::Int(self.x), Value::Int(self.y)])
///     }
/// }
///
/// let point = Point { x: 22, y: 33 };
/// assert_eq!(point.gob_value(), Value::Struct(vec![Value::Int(22), Value::Int(33)]));
/// ```
pub trait GobEncode {
    /// Type descriptor transmitted ahead of the first value.
    fn gob_type() -> GobType;

    /// Current value, shaped to match [`GobEncode::gob_type`].
    fn gob_value(&self) -> Value;
}

impl GobEncode for bool {
    fn gob_type() -> GobType {
        GobType::Bool
    }

    fn gob_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl GobEncode for i64 {
    fn gob_type() -> GobType {
        GobType::Int
    }

    fn gob_value(&self) -> Value {
        Value::Int(*self)
    }
}

impl GobEncode for u64 {
    fn gob_type() -> GobType {
        GobType::Uint
    }

    fn gob_value(&self) -> Value {
        Value::Uint(*self)
    }
}

impl GobEncode for String {
    fn gob_type() -> GobType {
        GobType::String
    }

    fn gob_value(&self) -> Value {
        Value::String(ByteString::from(self.as_str()))
    }
}

impl GobEncode for ByteString {
    fn gob_type() -> GobType {
        GobType::String
    }

    fn gob_value(&self) -> Value {
        Value::String(self.clone())
    }
}

impl<T: GobEncode> GobEncode for Vec<T> {
    fn gob_type() -> GobType {
        GobType::Slice(Box::new(T::gob_type()))
    }

    fn gob_value(&self) -> Value {
        Value::Slice(self.iter().map(GobEncode::gob_value).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Value::Bool(false), true)]
    #[case(Value::Bool(true), false)]
    #[case(Value::Int(0), true)]
    #[case(Value::Int(-3), false)]
    #[case(Value::Uint(0), true)]
    #[case(Value::String(ByteString::new()), true)]
    #[case(Value::String("openid".into()), false)]
    #[case(Value::String(vec![0xff_u8].into()), false)]
    #[case(Value::Slice(Vec::new()), true)]
    #[case(Value::Slice(vec![Value::String(ByteString::new())]), false)]
    #[case(Value::Struct(Vec::new()), false)]
    fn zero_values_are_omitted_except_structs(#[case] value: Value, #[case] omitted: bool) {
        assert_eq!(value.is_omitted_as_field(), omitted);
    }

    #[rstest]
    fn vectors_map_to_slices_of_their_element_type() {
        let scopes = vec!["openid".to_owned(), String::new()];

        assert_eq!(
            Vec::<String>::gob_type(),
            GobType::Slice(Box::new(GobType::String))
        );
        assert_eq!(
            scopes.gob_value(),
            Value::Slice(vec![
                Value::String("openid".into()),
                Value::String(ByteString::new()),
            ])
        );
    }

    #[rstest]
    #[case("", vec![""])]
    #[case("a,,b", vec!["a", "", "b"])]
    #[case("openid,", vec!["openid", ""])]
    fn split_keeps_empty_segments(#[case] raw: &str, #[case] expected: Vec<&str>) {
        assert_eq!(ByteString::from(raw).split(b','), expected);
    }

    #[rstest]
    fn split_keeps_bytes_that_are_not_utf8() {
        let raw = ByteString::from(vec![b'a', 0xff, b',', 0xfe]);

        assert_eq!(
            raw.split(b','),
            vec![
                ByteString::from(vec![b'a', 0xff]),
                ByteString::from(vec![0xfe_u8]),
            ]
        );
    }
}
