//! Heap object variants.

use std::fmt;

use crate::{NativeFunction, Value};

/// Index of an object in its runtime's arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ObjectRef(u32);

impl ObjectRef {
    #[inline]
    pub const fn from_raw(index: u32) -> Self {
        ObjectRef(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Variant tag of an [`Object`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ObjectKind {
    String,
    Symbol,
    List,
    NativeFunction,
}

impl ObjectKind {
    pub fn name(self) -> &'static str {
        match self {
            ObjectKind::String => "string",
            ObjectKind::Symbol => "symbol",
            ObjectKind::List => "list",
            ObjectKind::NativeFunction => "native function",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A heap object.
///
/// Lists are both program code and data: the parser produces them and the
/// evaluator walks them.
#[derive(Debug)]
pub enum Object {
    String(String),
    /// Symbols compare by name, never by identity.
    Symbol(Box<str>),
    List(Vec<Value>),
    NativeFunction(NativeFunction),
}

impl Object {
    pub fn kind(&self) -> ObjectKind {
        match self {
            Object::String(_) => ObjectKind::String,
            Object::Symbol(_) => ObjectKind::Symbol,
            Object::List(_) => ObjectKind::List,
            Object::NativeFunction(_) => ObjectKind::NativeFunction,
        }
    }

    /// Estimated payload bytes charged to the memory provider.
    pub(crate) fn payload_bytes(&self) -> usize {
        match self {
            Object::String(text) => text.len(),
            Object::Symbol(name) => name.len(),
            Object::List(items) => items.len() * std::mem::size_of::<Value>(),
            Object::NativeFunction(native) => native.name().len(),
        }
    }
}
