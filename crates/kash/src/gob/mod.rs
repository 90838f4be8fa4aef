//! Deterministic encoder for the Go `encoding/gob` stream format.
//!
//! Only the encoding direction is implemented, for booleans, integers,
//! strings, slices and structs. That is enough to reproduce the bytes a Go
//! program feeds into its hasher when it gob-encodes a token cache key.
//! Maps, pointers, interfaces and package-qualified type names are not
//! modelled.
//!
//! The stream is a sequence of length-prefixed messages. A message either
//! defines a type (negative id followed by a `wireType` value) or carries a
//! value (positive id followed by the value). Struct values list only their
//! non-zero fields, each prefixed with the distance from the previous field.

mod encoder;
mod types;
mod value;
mod wire;

pub use encoder::Encoder;
pub use types::{Field, GobType, StructType, TypeId, TypeRegistry};
pub use value::{ByteString, GobEncode, Value};
