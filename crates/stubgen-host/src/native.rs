//! Native component handle
//!
//! The media core is created lazily on first access and lives until it is
//! explicitly released. [`CoreSlot`] holds the handle; the process-wide slot
//! behind [`core`] and [`release`] is one instance of it.

use std::sync::atomic::{AtomicUsize, Ordering};

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use stubgen_engine::{
    object_ref, MethodDescriptor, Object, ObjectRef, PropertyDescriptor, RuntimeError,
    TypeDescriptor, TypeRef, Value,
};

use crate::records::{RecordList, RECORD_LIST};

/// Type name of the media core.
pub const MEDIA_CORE: &str = "MediaCore";

const LISTS: [&str; 3] = ["Highlights", "Exclusions", "CaptionHighlights"];

/// The native media component.
///
/// Owns one record list per kind. `Init` may be called more than once; every
/// call is counted.
pub struct MediaCore {
    init_count: i64,
    flags: i64,
    lists: [ObjectRef; 3],
}

impl MediaCore {
    pub fn new() -> Self {
        Self {
            init_count: 0,
            flags: 0,
            lists: LISTS.map(|kind| object_ref(RecordList::new(kind))),
        }
    }

    /// Members a wrapper of the core may forward to.
    pub fn descriptor() -> TypeDescriptor {
        let mut descriptor = TypeDescriptor::new(MEDIA_CORE)
            .with_method(MethodDescriptor::new("Init").param("flags", TypeRef::Int))
            .with_property(PropertyDescriptor::new("Initialized", TypeRef::Bool).readable())
            .with_property(PropertyDescriptor::new("InitCount", TypeRef::Int).readable());
        for list in LISTS {
            descriptor.add_property(
                PropertyDescriptor::new(list, TypeRef::named(RECORD_LIST)).readable(),
            );
        }
        descriptor
    }

    fn list(&self, name: &str) -> Option<&ObjectRef> {
        LISTS
            .iter()
            .position(|kind| *kind == name)
            .map(|i| &self.lists[i])
    }
}

impl Default for MediaCore {
    fn default() -> Self {
        Self::new()
    }
}

impl Object for MediaCore {
    fn type_name(&self) -> &str {
        MEDIA_CORE
    }

    fn get(&self, name: &str) -> Result<Value, RuntimeError> {
        match name {
            "Initialized" => Ok(Value::Bool(self.init_count > 0)),
            "InitCount" => Ok(Value::Int(self.init_count)),
            _ => self
                .list(name)
                .map(|list| Value::Object(list.clone()))
                .ok_or_else(|| RuntimeError::missing_member(MEDIA_CORE, name)),
        }
    }

    fn set(&mut self, name: &str, _value: Value) -> Result<(), RuntimeError> {
        Err(RuntimeError::missing_member(MEDIA_CORE, name))
    }

    fn invoke(&mut self, name: &str, args: &mut [Value]) -> Result<Value, RuntimeError> {
        if name == "Init" {
            RuntimeError::check_arity(name, 1, args)?;
            self.flags = args[0].as_int()?;
            self.init_count += 1;
            log::debug!("media core initialized (flags {:#x})", self.flags);
            return Ok(Value::Null);
        }
        match name.strip_prefix("get_") {
            Some(property) => {
                RuntimeError::check_arity(name, 0, args)?;
                self.get(property)
            }
            None => Err(RuntimeError::missing_member(MEDIA_CORE, name)),
        }
    }

    fn display(&self) -> String {
        format!("{}(init={})", MEDIA_CORE, self.init_count)
    }
}

/// A lazily filled slot holding at most one media core.
#[derive(Default)]
pub struct CoreSlot {
    slot: Mutex<Option<ObjectRef>>,
    creations: AtomicUsize,
}

impl CoreSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// The core, created and initialized on first access.
    pub fn get(&self) -> Result<ObjectRef, RuntimeError> {
        let mut slot = self.slot.lock();
        if let Some(core) = slot.as_ref() {
            return Ok(core.clone());
        }

        let core = object_ref(MediaCore::new());
        core.write().invoke("Init", &mut [Value::Int(0)])?;
        self.creations.fetch_add(1, Ordering::SeqCst);
        log::info!("created media core");
        *slot = Some(core.clone());
        Ok(core)
    }

    /// Check if a core is currently held.
    pub fn is_live(&self) -> bool {
        self.slot.lock().is_some()
    }

    /// Drop the held core. Returns `false` if the slot was already empty.
    pub fn release(&self) -> bool {
        let released = self.slot.lock().take().is_some();
        if released {
            log::info!("released media core");
        }
        released
    }

    /// How many cores this slot has created.
    pub fn creations(&self) -> usize {
        self.creations.load(Ordering::SeqCst)
    }
}

static CORE: Lazy<CoreSlot> = Lazy::new(CoreSlot::new);

/// The process-wide media core.
pub fn core() -> Result<ObjectRef, RuntimeError> {
    CORE.get()
}

/// Release the process-wide media core; the next [`core`] call creates a new one.
pub fn release() -> bool {
    CORE.release()
}
