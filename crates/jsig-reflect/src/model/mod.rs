//! An in-memory declaration model: classes, methods, constructors and fields built from
//! class-file data (names, descriptors and optional `Signature` attributes).
//!
//! Declarations without a signature report their erased types. Declarations are shared as
//! `Arc`s; the type objects they cache refer back to them weakly, so dropping the last `Arc`
//! frees the declaration.

mod class;
mod class_path;
mod executable;
mod field;

pub use class::{ClassInfo, ClassInfoBuilder, Enclosing};
pub use class_path::ClassPath;
pub use executable::{ConstructorInfo, ConstructorInfoBuilder, MethodInfo, MethodInfoBuilder};
pub use field::FieldInfo;
