//! Per-declaration caches of reified generic information.
//!
//! A repository owns a parsed signature tree and a factory. Each accessor reifies its part of
//! the tree on first call, memoizes the result and hands out clones. Failures are not memoized:
//! a later call retries.

use std::sync::OnceLock;

use crate::error::Result;

mod class;
mod constructor;
mod field;
mod generic_decl;
mod method;

pub use class::ClassRepository;
pub use constructor::ConstructorRepository;
pub use field::FieldRepository;
pub use generic_decl::GenericDeclRepository;
pub use method::MethodRepository;

/// Concurrent callers may both compute; the first published value wins and is returned to all.
fn memoize<T: Clone>(
    cell: &OnceLock<T>,
    what: &'static str,
    compute: impl FnOnce() -> Result<T>,
) -> Result<T> {
    if let Some(value) = cell.get() {
        return Ok(value.clone());
    }
    tracing::trace!(target: "jsig.reflect", what, "reifying generic info");
    let value = compute()?;
    Ok(cell.get_or_init(|| value).clone())
}
