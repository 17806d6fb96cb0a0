//! Symbol binding table.

use rustc_hash::FxHashMap;

use crate::{HostRef, ObjectRef};

/// Maps symbol names to objects.
///
/// A list bound here is a user-defined callable; a native function is a
/// host callable. Each binding holds a [`HostRef`], so bound objects
/// always have a nonzero host count.
#[derive(Default, Debug)]
pub struct Bindings {
    table: FxHashMap<Box<str>, HostRef>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name`, returning the previous binding if any.
    pub fn define(&mut self, name: &str, object: HostRef) -> Option<HostRef> {
        self.table.insert(name.into(), object)
    }

    pub fn lookup(&self, name: &str) -> Option<ObjectRef> {
        self.table.get(name).map(HostRef::object)
    }

    pub fn get(&self, name: &str) -> Option<&HostRef> {
        self.table.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<HostRef> {
        self.table.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.table.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.table.keys().map(AsRef::as_ref)
    }
}
