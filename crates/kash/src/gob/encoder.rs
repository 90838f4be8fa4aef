//! Message framing and value encoding.

use std::collections::HashSet;
use std::io::Write;

use tracing::trace;

use super::types::{GobType, StructType, TypeId, TypeRegistry};
use super::value::{GobEncode, Value};
use super::wire::WireBuffer;
use crate::error::EncodeError;

/// Writes gob messages to an [`io::Write`](std::io::Write) sink.
///
/// Type definitions are sent once per encoder, ahead of the first value that
/// needs them. A fresh encoder therefore reproduces the exact stream a new Go
/// `gob.Encoder` would write for the same values.
///
/// # Examples
///
/// ```
/// use kash::gob::Encoder;
///
/// let mut encoder = Encoder::new(Vec::new());
/// encoder.encode(&"hi".to_owned()).expect("encode string");
///
/// assert_eq!(encoder.into_inner(), vec![0x05, 0x0c, 0x00, 0x02, b'h', b'i']);
/// ```
#[derive(Debug)]
pub struct Encoder<W> {
    writer: W,
    registry: TypeRegistry,
    sent: HashSet<TypeId>,
}

impl<W: Write> Encoder<W> {
    /// Create an encoder writing to `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            registry: TypeRegistry::new(),
            sent: HashSet::new(),
        }
    }

    /// Encode a value with a fixed gob shape.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError`] when the value does not match its declared
    /// type or the writer fails.
    pub fn encode<T: GobEncode>(&mut self, value: &T) -> Result<(), EncodeError> {
        self.encode_value(&T::gob_type(), &value.gob_value())
    }

    /// Encode a dynamic value against an explicit type.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError`] when `value` does not match `ty` or the writer
    /// fails.
    pub fn encode_value(&mut self, ty: &GobType, value: &Value) -> Result<(), EncodeError> {
        self.send_type(ty)?;
        let id = self.registry.id_of(ty)?;

        let mut message = WireBuffer::default();
        message.int(i64::from(id.get()));
        if let (GobType::Struct(definition), Value::Struct(fields)) = (ty, value) {
            write_struct(&mut message, definition, fields)?;
        } else {
            // Top-level non-structs carry a zero field delta and are always
            // sent, zero or not.
            message.uint(0);
            write_value(&mut message, ty, value)?;
        }
        self.write_message(&message)
    }

    /// Consume the encoder and return the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Send the definition of `ty` and of every type it reaches, parents
    /// before children, skipping builtins and types already sent.
    fn send_type(&mut self, ty: &GobType) -> Result<(), EncodeError> {
        if ty.builtin_id().is_some() {
            return Ok(());
        }
        let id = self.registry.id_of(ty)?;
        if !self.sent.insert(id) {
            return Ok(());
        }

        let mut message = WireBuffer::default();
        message.int(-i64::from(id.get()));
        self.registry.write_definition(&mut message, ty)?;
        self.write_message(&message)?;
        trace!(type_id = id.get(), type_name = %ty.name(), "sent gob type definition");

        match ty {
            GobType::Slice(element) => self.send_type(element),
            GobType::Struct(definition) => definition
                .fields()
                .iter()
                .try_for_each(|field| self.send_type(field.ty())),
            GobType::Bool | GobType::Int | GobType::Uint | GobType::String => Ok(()),
        }
    }

    fn write_message(&mut self, message: &WireBuffer) -> Result<(), EncodeError> {
        let mut header = WireBuffer::default();
        header.uint(message.len() as u64);
        self.writer.write_all(header.as_bytes())?;
        self.writer.write_all(message.as_bytes())?;
        Ok(())
    }
}

fn write_value(buffer: &mut WireBuffer, ty: &GobType, value: &Value) -> Result<(), EncodeError> {
    match (ty, value) {
        (GobType::Bool, Value::Bool(flag)) => buffer.bool(*flag),
        (GobType::Int, Value::Int(number)) => buffer.int(*number),
        (GobType::Uint, Value::Uint(number)) => buffer.uint(*number),
        (GobType::String, Value::String(text)) => buffer.string(text.as_bytes()),
        (GobType::Slice(element), Value::Slice(items)) => {
            buffer.uint(items.len() as u64);
            for item in items {
                write_value(buffer, element, item)?;
            }
        }
        (GobType::Struct(definition), Value::Struct(fields)) => {
            write_struct(buffer, definition, fields)?;
        }
        (expected, found) => return Err(mismatch(expected, found)),
    }
    Ok(())
}

/// Write `(delta, value)` pairs for every field not omitted as zero, then the
/// terminating zero delta.
fn write_struct(
    buffer: &mut WireBuffer,
    definition: &StructType,
    values: &[Value],
) -> Result<(), EncodeError> {
    if values.len() != definition.fields().len() {
        return Err(EncodeError::FieldCountMismatch {
            type_name: definition.name().to_owned(),
            expected: definition.fields().len(),
            actual: values.len(),
        });
    }

    let mut next_field = 0_usize;
    for (index, (field, value)) in definition.fields().iter().zip(values).enumerate() {
        ensure_kind(field.ty(), value)?;
        if value.is_omitted_as_field() {
            continue;
        }
        buffer.uint((index + 1 - next_field) as u64);
        next_field = index + 1;
        write_value(buffer, field.ty(), value)?;
    }
    buffer.uint(0);
    Ok(())
}

/// Reject a value whose outer kind differs from the field type, before the
/// zero-value check can hide it.
fn ensure_kind(ty: &GobType, value: &Value) -> Result<(), EncodeError> {
    let matches = matches!(
        (ty, value),
        (GobType::Bool, Value::Bool(_))
            | (GobType::Int, Value::Int(_))
            | (GobType::Uint, Value::Uint(_))
            | (GobType::String, Value::String(_))
            | (GobType::Slice(_), Value::Slice(_))
            | (GobType::Struct(_), Value::Struct(_))
    );
    if matches {
        Ok(())
    } else {
        Err(mismatch(ty, value))
    }
}

fn mismatch(expected: &GobType, found: &Value) -> EncodeError {
    EncodeError::TypeMismatch {
        expected: expected.name(),
        found: found.kind(),
    }
}
