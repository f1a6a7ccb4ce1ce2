//! Reference-counted object heap with live-object accounting.
//!
//! Objects are shared through `ObjRef` handles. The heap counts objects
//! that are still alive: the counter goes down exactly once, when the last
//! handle to an object drops. A completion value, a binding or an operand
//! stack slot that is leaked or released twice shows up as a wrong count.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use super::value::Name;

/// Handle to a heap-allocated object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(pub usize);

#[derive(Clone, Debug, Default)]
struct LiveCounter(Rc<Cell<usize>>);

impl LiveCounter {
    fn inc(&self) {
        self.0.set(self.0.get() + 1);
    }

    fn dec(&self) {
        let n = self.0.get();
        debug_assert!(n > 0, "object released more often than allocated");
        self.0.set(n.saturating_sub(1));
    }

    fn get(&self) -> usize {
        self.0.get()
    }
}

pub struct Object {
    id: ObjectId,
    tag: Name,
    live: LiveCounter,
}

impl Drop for Object {
    fn drop(&mut self) {
        self.live.dec();
        tracing::trace!(target: "tern::heap", id = self.id.0, tag = %self.tag, "release object");
    }
}

#[derive(Clone)]
pub struct ObjRef(Rc<Object>);

impl ObjRef {
    pub fn id(&self) -> ObjectId {
        self.0.id
    }

    pub fn tag(&self) -> &str {
        &self.0.tag
    }

    /// Number of handles currently sharing this object.
    pub fn ref_count(&self) -> usize {
        Rc::strong_count(&self.0)
    }

    pub fn ptr_eq(&self, other: &ObjRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ObjRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjRef({}#{}, rc={})", self.0.tag, self.0.id.0, self.ref_count())
    }
}

#[derive(Debug, Default)]
pub struct Heap {
    next_id: usize,
    live: LiveCounter,
}

impl Heap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, tag: Name) -> ObjRef {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        self.live.inc();
        tracing::trace!(target: "tern::heap", id = id.0, tag = %tag, "alloc object");
        ObjRef(Rc::new(Object {
            id,
            tag,
            live: self.live.clone(),
        }))
    }

    /// Objects allocated and not yet released.
    pub fn live_objects(&self) -> usize {
        self.live.get()
    }

    /// Objects allocated over the heap's lifetime.
    pub fn allocated(&self) -> usize {
        self.next_id
    }
}
