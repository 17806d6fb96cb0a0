//! Object arena and allocation accounting.

use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::Arc;

use kel_ir::Span;

use crate::errors::{out_of_memory, type_mismatch, EvalError, EvalResult};
use crate::host_ref::ObjectHeader;
use crate::memory::{CountingPool, Refused};
use crate::{
    HostRef, MemoryProvider, NativeCall, NativeFn, NativeFunction, Object, ObjectKind, ObjectRef,
    SystemProvider, Value,
};

/// Identifies the runtime that created an object.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct RuntimeId(u32);

static NEXT_RUNTIME_ID: AtomicU32 = AtomicU32::new(0);

impl RuntimeId {
    fn fresh() -> Self {
        RuntimeId(NEXT_RUNTIME_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Fixed bookkeeping charged per object on top of its payload.
const OBJECT_OVERHEAD: usize = std::mem::size_of::<Slot>();

struct Slot {
    header: Arc<ObjectHeader>,
    object: Object,
    span: Option<Span>,
}

/// Owner of every object created for one embedding.
///
/// Allocation goes through a counting pool in front of the host's
/// [`MemoryProvider`]. Objects are freed together when the runtime drops.
pub struct Runtime {
    id: RuntimeId,
    slots: Vec<Slot>,
    pool: CountingPool,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime {
    /// A runtime with no memory limit.
    pub fn new() -> Self {
        Self::with_provider(SystemProvider)
    }

    pub fn with_provider(provider: impl MemoryProvider + 'static) -> Self {
        Runtime {
            id: RuntimeId::fresh(),
            slots: Vec::new(),
            pool: CountingPool::new(Box::new(provider)),
        }
    }

    pub fn id(&self) -> RuntimeId {
        self.id
    }

    /// Bytes currently charged to the memory provider.
    pub fn allocated_bytes(&self) -> usize {
        self.pool.allocated()
    }

    /// Highest value `allocated_bytes` has reached.
    pub fn peak_bytes(&self) -> usize {
        self.pool.peak()
    }

    pub fn object_count(&self) -> usize {
        self.slots.len()
    }

    /// Whether `handle` refers to an object of this runtime.
    pub fn owns(&self, handle: &HostRef) -> bool {
        handle.owner() == self.id && handle.object().index() < self.slots.len()
    }

    fn charge(&mut self, bytes: usize) -> Result<(), EvalError> {
        self.pool.charge(bytes).map_err(
            |Refused {
                 requested,
                 in_use,
                 limit,
             }| out_of_memory(requested, in_use, limit),
        )
    }

    fn alloc(&mut self, object: Object) -> Result<HostRef, EvalError> {
        let index = u32::try_from(self.slots.len()).map_err(|_| {
            out_of_memory(OBJECT_OVERHEAD, self.pool.allocated(), Some(u32::MAX as usize))
        })?;
        self.charge(OBJECT_OVERHEAD + object.payload_bytes())?;
        let header = Arc::new(ObjectHeader {
            kind: object.kind(),
            owner: self.id,
            host_refs: AtomicUsize::new(0),
        });
        let r = ObjectRef::from_raw(index);
        let handle = HostRef::new(r, Arc::clone(&header));
        self.slots.push(Slot {
            header,
            object,
            span: None,
        });
        tracing::trace!(object = ?r, kind = %handle.kind(), "allocated object");
        Ok(handle)
    }

    pub fn alloc_string(&mut self, text: impl Into<String>) -> Result<HostRef, EvalError> {
        self.alloc(Object::String(text.into()))
    }

    pub fn alloc_symbol(&mut self, name: &str) -> Result<HostRef, EvalError> {
        self.alloc(Object::Symbol(name.into()))
    }

    pub fn alloc_list(&mut self, items: Vec<Value>) -> Result<HostRef, EvalError> {
        self.alloc(Object::List(items))
    }

    pub fn alloc_native<F>(&mut self, name: &str, callback: F) -> Result<HostRef, EvalError>
    where
        F: Fn(&mut NativeCall<'_>) -> EvalResult + Send + Sync + 'static,
    {
        self.alloc_native_fn(name, Arc::new(callback))
    }

    /// Like [`alloc_native`](Self::alloc_native), for callbacks that are
    /// already shared or are not closures.
    pub fn alloc_native_fn(
        &mut self,
        name: &str,
        callback: Arc<dyn NativeFn>,
    ) -> Result<HostRef, EvalError> {
        self.alloc(Object::NativeFunction(NativeFunction::new(name, callback)))
    }

    pub fn object(&self, r: ObjectRef) -> Option<&Object> {
        self.slots.get(r.index()).map(|slot| &slot.object)
    }

    pub fn kind(&self, r: ObjectRef) -> Option<ObjectKind> {
        self.object(r).map(Object::kind)
    }

    pub fn string(&self, r: ObjectRef) -> Option<&str> {
        match self.object(r)? {
            Object::String(text) => Some(text),
            _ => None,
        }
    }

    pub fn symbol(&self, r: ObjectRef) -> Option<&str> {
        match self.object(r)? {
            Object::Symbol(name) => Some(name),
            _ => None,
        }
    }

    pub fn list(&self, r: ObjectRef) -> Option<&[Value]> {
        match self.object(r)? {
            Object::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn native(&self, r: ObjectRef) -> Option<&NativeFunction> {
        match self.object(r)? {
            Object::NativeFunction(native) => Some(native),
            _ => None,
        }
    }

    /// Append to a list object, charging the growth to the provider.
    pub fn list_push(&mut self, list: ObjectRef, value: Value) -> Result<(), EvalError> {
        match self.kind(list) {
            Some(ObjectKind::List) => {}
            Some(kind) => return Err(type_mismatch("list", kind.name())),
            None => return Err(type_mismatch("list", "dangling reference")),
        }
        self.charge(std::mem::size_of::<Value>())?;
        if let Some(Slot {
            object: Object::List(items),
            ..
        }) = self.slots.get_mut(list.index())
        {
            items.push(value);
        }
        Ok(())
    }

    /// A new counted handle to an existing object.
    pub fn host_ref(&self, r: ObjectRef) -> Option<HostRef> {
        self.slots
            .get(r.index())
            .map(|slot| HostRef::new(r, Arc::clone(&slot.header)))
    }

    /// Host reference count of an object.
    pub fn host_ref_count(&self, r: ObjectRef) -> Option<usize> {
        self.slots
            .get(r.index())
            .map(|slot| slot.header.host_refs.load(Ordering::Relaxed))
    }

    /// Record where an object came from in source text.
    pub fn set_span(&mut self, r: ObjectRef, span: Span) {
        if let Some(slot) = self.slots.get_mut(r.index()) {
            slot.span = Some(span);
        }
    }

    pub fn span_of(&self, r: ObjectRef) -> Option<Span> {
        self.slots.get(r.index()).and_then(|slot| slot.span)
    }

    /// Variant name of an object value, or the scalar tag name.
    pub fn type_name(&self, value: Value) -> &'static str {
        match value.object().and_then(|r| self.kind(r)) {
            Some(kind) => kind.name(),
            None => value.tag_name(),
        }
    }
}

impl Drop for Runtime {
    fn drop(&mut self) {
        tracing::debug!(
            objects = self.slots.len(),
            bytes = self.pool.allocated(),
            peak = self.pool.peak(),
            "releasing runtime arena"
        );
        self.pool.release_all();
    }
}

impl std::fmt::Debug for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime")
            .field("id", &self.id)
            .field("objects", &self.slots.len())
            .field("pool", &self.pool)
            .finish()
    }
}
