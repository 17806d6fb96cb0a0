//! Counted host handles.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::{ObjectKind, ObjectRef, RuntimeId};

/// Shared per-object header holding the host reference count.
#[derive(Debug)]
pub(crate) struct ObjectHeader {
    pub kind: ObjectKind,
    pub owner: RuntimeId,
    pub host_refs: AtomicUsize,
}

/// A counted reference to an object, held by host code.
///
/// Creating or cloning a handle increments the object's host count;
/// dropping one decrements it. Counts are informational: objects live
/// until their runtime is dropped.
pub struct HostRef {
    object: ObjectRef,
    header: Arc<ObjectHeader>,
}

impl HostRef {
    pub(crate) fn new(object: ObjectRef, header: Arc<ObjectHeader>) -> Self {
        header.host_refs.fetch_add(1, Ordering::Relaxed);
        HostRef { object, header }
    }

    #[inline]
    pub fn object(&self) -> ObjectRef {
        self.object
    }

    /// The handle as an unquoted value.
    #[inline]
    pub fn value(&self) -> crate::Value {
        crate::Value::Object(self.object)
    }

    #[inline]
    pub fn kind(&self) -> ObjectKind {
        self.header.kind
    }

    /// Runtime that created the object.
    #[inline]
    pub fn owner(&self) -> RuntimeId {
        self.header.owner
    }

    /// Current host reference count of the object, this handle included.
    pub fn count(&self) -> usize {
        self.header.host_refs.load(Ordering::Relaxed)
    }
}

impl Clone for HostRef {
    fn clone(&self) -> Self {
        HostRef::new(self.object, Arc::clone(&self.header))
    }
}

impl Drop for HostRef {
    fn drop(&mut self) {
        self.header.host_refs.fetch_sub(1, Ordering::Relaxed);
    }
}

impl fmt::Debug for HostRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HostRef({:?} {}, refs={})", self.object, self.kind(), self.count())
    }
}

impl PartialEq for HostRef {
    fn eq(&self, other: &Self) -> bool {
        self.object == other.object && self.owner() == other.owner()
    }
}

impl Eq for HostRef {}

/// A scoped batch of protected objects.
///
/// Each object is protected at most once however often it is added.
/// Dropping the set (on any exit path, early error returns included)
/// releases each member exactly once.
#[derive(Default, Debug)]
pub struct HostRefSet {
    members: FxHashMap<(RuntimeId, ObjectRef), HostRef>,
}

impl HostRefSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Protect the object behind `handle`. Returns `false` if it already was.
    pub fn add(&mut self, handle: &HostRef) -> bool {
        let key = (handle.owner(), handle.object());
        if self.members.contains_key(&key) {
            return false;
        }
        self.members.insert(key, handle.clone());
        true
    }

    pub fn contains(&self, handle: &HostRef) -> bool {
        self.members
            .contains_key(&(handle.owner(), handle.object()))
    }

    /// Stop protecting one object early. Returns whether it was a member.
    pub fn release(&mut self, handle: &HostRef) -> bool {
        self.members
            .remove(&(handle.owner(), handle.object()))
            .is_some()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
