//! Gob type descriptors and type-id allocation.
//!
//! Builtin types have fixed ids. User types (slices and structs) receive ids
//! from a [`TypeRegistry`] the first time they are reached, which mirrors the
//! allocation order of a freshly started Go process: a struct takes its id
//! before its fields are visited and a slice takes its id before its element.

use std::collections::HashMap;

use super::wire::WireBuffer;
use crate::error::EncodeError;

/// Id of the first type granted to user definitions.
const FIRST_USER_ID: i32 = 65;

/// Field delta selecting `wireType.SliceT`.
const WIRE_SLICE_DELTA: u64 = 2;
/// Field delta selecting `wireType.StructT`.
const WIRE_STRUCT_DELTA: u64 = 3;

/// Identifier the gob stream assigns to a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(i32);

impl TypeId {
    /// Builtin `bool`.
    pub const BOOL: Self = Self(1);
    /// Builtin `int` (every signed Go integer width).
    pub const INT: Self = Self(2);
    /// Builtin `uint` (every unsigned Go integer width).
    pub const UINT: Self = Self(3);
    /// Builtin `string`.
    pub const STRING: Self = Self(6);

    /// Raw id as written to the stream.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

/// Shape of a value in the gob stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GobType {
    /// Builtin boolean.
    Bool,
    /// Builtin signed integer.
    Int,
    /// Builtin unsigned integer.
    Uint,
    /// Builtin string.
    String,
    /// Slice of the boxed element type.
    Slice(Box<Self>),
    /// Named struct.
    Struct(StructType),
}

impl GobType {
    /// Name transmitted in the type's definition.
    ///
    /// Slices are named after their element, so `[]string` for a slice of
    /// strings. Go qualifies struct elements with their package (`[]pkg.Config`);
    /// package paths are not modelled, so a slice of structs only matches Go's
    /// bytes when the struct name is given with that qualifier.
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Bool => "bool".to_owned(),
            Self::Int => "int".to_owned(),
            Self::Uint => "uint".to_owned(),
            Self::String => "string".to_owned(),
            Self::Slice(element) => format!("[]{}", element.name()),
            Self::Struct(definition) => definition.name.clone(),
        }
    }

    /// Id of a builtin type, or `None` for types needing a definition.
    #[must_use]
    pub const fn builtin_id(&self) -> Option<TypeId> {
        match self {
            Self::Bool => Some(TypeId::BOOL),
            Self::Int => Some(TypeId::INT),
            Self::Uint => Some(TypeId::UINT),
            Self::String => Some(TypeId::STRING),
            Self::Slice(_) | Self::Struct(_) => None,
        }
    }
}

/// A named struct and its exported fields in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructType {
    name: String,
    fields: Vec<Field>,
}

impl StructType {
    /// Declare a struct type.
    #[must_use]
    pub fn new(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    /// Struct name as sent on the wire.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }
}

/// One struct field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    name: String,
    ty: GobType,
}

impl Field {
    /// Declare a field.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: GobType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    /// Field name as sent on the wire.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field type.
    #[must_use]
    pub const fn ty(&self) -> &GobType {
        &self.ty
    }
}

/// Assigns ids to user types and writes their wire definitions.
///
/// Types are identified by name; registering two different shapes under one
/// name is rejected. Go identifies types by their Go type instead, so two
/// same-named structs from different packages cannot share one stream here.
#[derive(Debug)]
pub struct TypeRegistry {
    next_id: i32,
    known: HashMap<String, (TypeId, GobType)>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self {
            next_id: FIRST_USER_ID,
            known: HashMap::new(),
        }
    }
}

impl TypeRegistry {
    /// Create a registry whose first user id is 65.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the id for `ty`, allocating ids for it and everything it
    /// reaches on first sight.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::ConflictingType`] when a different shape was
    /// already registered under the same name, and
    /// [`EncodeError::TypeIdExhausted`] when no ids remain.
    ///
    /// # Examples
    ///
    /// ```
    /// use kash::gob::{GobType, TypeId, TypeRegistry};
    ///
    /// let mut registry = TypeRegistry::new();
    /// let strings = GobType::Slice(Box::new(GobType::String));
    ///
    /// assert_eq!(registry.id_of(&GobType::Bool).expect("builtin"), TypeId::BOOL);
    /// assert_eq!(registry.id_of(&strings).expect("slice").get(), 65);
    /// assert_eq!(registry.id_of(&strings).expect("slice again").get(), 65);
    /// ```
    pub fn id_of(&mut self, ty: &GobType) -> Result<TypeId, EncodeError> {
        if let Some(id) = ty.builtin_id() {
            return Ok(id);
        }
        let name = ty.name();
        if let Some((id, known)) = self.known.get(&name) {
            return if known == ty {
                Ok(*id)
            } else {
                Err(EncodeError::ConflictingType { name })
            };
        }

        let id = self.allocate()?;
        self.known.insert(name, (id, ty.clone()));
        match ty {
            GobType::Slice(element) => {
                self.id_of(element)?;
            }
            GobType::Struct(definition) => {
                for field in definition.fields() {
                    self.id_of(field.ty())?;
                }
            }
            GobType::Bool | GobType::Int | GobType::Uint | GobType::String => {}
        }
        Ok(id)
    }

    fn allocate(&mut self) -> Result<TypeId, EncodeError> {
        let id = TypeId(self.next_id);
        self.next_id = self
            .next_id
            .checked_add(1)
            .ok_or(EncodeError::TypeIdExhausted)?;
        Ok(id)
    }

    /// Write the `wireType` value describing `ty`.
    ///
    /// Builtin types have no definition and write nothing.
    pub(crate) fn write_definition(
        &mut self,
        buffer: &mut WireBuffer,
        ty: &GobType,
    ) -> Result<(), EncodeError> {
        match ty {
            GobType::Slice(element) => {
                let id = self.id_of(ty)?;
                let element_id = self.id_of(element)?;
                buffer.uint(WIRE_SLICE_DELTA);
                // sliceType { CommonType, Elem }
                buffer.uint(1);
                write_named_id(buffer, &ty.name(), id);
                buffer.uint(1);
                buffer.int(i64::from(element_id.get()));
                buffer.uint(0);
            }
            GobType::Struct(definition) => {
                let id = self.id_of(ty)?;
                buffer.uint(WIRE_STRUCT_DELTA);
                // structType { CommonType, Field []*fieldType }
                buffer.uint(1);
                write_named_id(buffer, definition.name(), id);
                if !definition.fields().is_empty() {
                    buffer.uint(1);
                    buffer.uint(definition.fields().len() as u64);
                    for field in definition.fields() {
                        let field_id = self.id_of(field.ty())?;
                        write_named_id(buffer, field.name(), field_id);
                    }
                }
                buffer.uint(0);
            }
            GobType::Bool | GobType::Int | GobType::Uint | GobType::String => return Ok(()),
        }
        // end of wireType
        buffer.uint(0);
        Ok(())
    }
}

/// Write a `{ Name string; Id typeId }` struct, the layout shared by
/// `CommonType` and `fieldType`.
fn write_named_id(buffer: &mut WireBuffer, name: &str, id: TypeId) {
    let id_delta = if name.is_empty() {
        2
    } else {
        buffer.uint(1);
        buffer.string(name.as_bytes());
        1
    };
    buffer.uint(id_delta);
    buffer.int(i64::from(id.get()));
    buffer.uint(0);
}
