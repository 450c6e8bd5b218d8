//! Host layer for generated wrappers
//!
//! Provides the objects wrappers are generated for in practice and the glue
//! to wrap them in one call:
//! - [`MediaCore`]: the native component, reached through the process-wide
//!   [`core`] handle and dropped with [`release`]
//! - [`RecordList`]: highlight, exclusion and caption highlight lists
//! - [`RecordListExt`]: record helpers over wrapped record lists

#![warn(rust_2018_idioms)]

pub mod error;
pub mod extensions;
pub mod native;
pub mod records;

pub use error::{HostError, HostResult};
pub use extensions::RecordListExt;
pub use native::{core, release, CoreSlot, MediaCore, MEDIA_CORE};
pub use records::{Record, RecordList, MODE_APPEND, MODE_REPLACE, RECORD_LIST};

use stubgen_engine::{ObjectRef, StubGenerator, Wrapper};

/// Generate and compile a wrapper for the generator's target and wrap `source` in it.
pub fn wrap(generator: &StubGenerator, source: ObjectRef) -> HostResult<Wrapper> {
    let artifact = generator.compile()?;
    let class_name = generator.options().wrapper_name(&generator.target().name);
    let class = artifact
        .class(&class_name)
        .ok_or_else(|| HostError::MissingClass {
            artifact: artifact.name().to_string(),
            class: class_name.clone(),
        })?;
    Ok(class.instantiate(source)?)
}

/// Wrap the process-wide media core.
pub fn wrap_core() -> HostResult<Wrapper> {
    let generator =
        StubGenerator::new(MediaCore::descriptor()).with_related(RecordList::descriptor());
    wrap(&generator, core()?)
}

/// Wrap a record list.
pub fn wrap_records(list: ObjectRef) -> HostResult<Wrapper> {
    wrap(&StubGenerator::new(RecordList::descriptor()), list)
}
