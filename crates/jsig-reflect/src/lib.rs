//! Reification of Java generic signatures.
//!
//! A [`Reifier`] walks a signature tree from `jsig_tree` and asks a [`GenericsFactory`] to build
//! one value per node. [`CoreReflectionFactory`] builds [`Type`]s, resolving class names through
//! a [`ClassLoader`] and type variables through the [`Scope`] chain of a declaration.
//! [`TypeNameFactory`] only renders names. Repositories cache the reified parts of one
//! declaration's signature.

#![forbid(unsafe_code)]

mod core_factory;
mod decl;
mod error;
mod factory;
mod name_factory;
mod reifier;
mod scope;
mod types;

pub mod model;
pub mod repository;

pub use crate::core_factory::CoreReflectionFactory;
pub use crate::decl::{
    ClassDecl, ClassLoader, DeclKind, ExecutableDecl, GenericDecl, WeakGenericDecl,
};
pub use crate::error::{ReifyError, Result};
pub use crate::factory::GenericsFactory;
pub use crate::name_factory::TypeNameFactory;
pub use crate::reifier::Reifier;
pub use crate::repository::{
    ClassRepository, ConstructorRepository, FieldRepository, GenericDeclRepository,
    MethodRepository,
};
pub use crate::scope::{scope_for, DeclScope, DummyScope, Scope};
pub use crate::types::{
    ClassRef, GenericArrayType, ParameterizedType, Type, TypeVariable, WildcardType,
    OBJECT_BINARY_NAME,
};

pub use jsig_config::{MissingClassPolicy, ReflectConfig, UnresolvedTypeVariablePolicy};
