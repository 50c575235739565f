//! The declaration model the scope chain and the core reflection factory read from.
//!
//! Declarations are supplied by the caller (see [`crate::model`] for an in-memory
//! implementation). They must be immutable once shared: scopes cache what they derive from them.

use std::fmt;
use std::sync::{Arc, Weak};

use crate::types::{ClassRef, TypeVariable};

/// Resolves binary class names (`java.util.Map$Entry`) to loaded classes.
pub trait ClassLoader: Send + Sync {
    fn load_class(&self, binary_name: &str) -> Option<ClassRef>;

    /// Number of formal type parameters `binary_name` declares, when known. Used to reject
    /// parameterized types with the wrong number of arguments.
    fn type_parameter_count(&self, binary_name: &str) -> Option<usize> {
        let _ = binary_name;
        None
    }
}

pub trait ClassDecl: Send + Sync {
    fn binary_name(&self) -> &str;

    /// Own formal type parameters, in declaration order.
    fn type_parameters(&self) -> Vec<Arc<TypeVariable>>;

    /// The method whose body declares this (local or anonymous) class.
    fn enclosing_method(&self) -> Option<Arc<dyn ExecutableDecl>>;

    /// The constructor whose body declares this (local or anonymous) class.
    fn enclosing_constructor(&self) -> Option<Arc<dyn ExecutableDecl>>;

    fn enclosing_class(&self) -> Option<Arc<dyn ClassDecl>>;

    fn class_loader(&self) -> Arc<dyn ClassLoader>;
}

/// A method or constructor.
pub trait ExecutableDecl: Send + Sync {
    fn name(&self) -> &str;

    fn type_parameters(&self) -> Vec<Arc<TypeVariable>>;

    fn declaring_class(&self) -> Arc<dyn ClassDecl>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeclKind {
    Class,
    Method,
    Constructor,
}

/// Anything that can declare type parameters.
#[derive(Clone)]
pub enum GenericDecl {
    Class(Arc<dyn ClassDecl>),
    Method(Arc<dyn ExecutableDecl>),
    Constructor(Arc<dyn ExecutableDecl>),
}

impl GenericDecl {
    pub fn kind(&self) -> DeclKind {
        match self {
            GenericDecl::Class(_) => DeclKind::Class,
            GenericDecl::Method(_) => DeclKind::Method,
            GenericDecl::Constructor(_) => DeclKind::Constructor,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            GenericDecl::Class(class) => class.binary_name(),
            GenericDecl::Method(exec) | GenericDecl::Constructor(exec) => exec.name(),
        }
    }

    pub fn type_parameters(&self) -> Vec<Arc<TypeVariable>> {
        match self {
            GenericDecl::Class(class) => class.type_parameters(),
            GenericDecl::Method(exec) | GenericDecl::Constructor(exec) => exec.type_parameters(),
        }
    }

    /// The loader of the class this declaration belongs to.
    pub fn class_loader(&self) -> Arc<dyn ClassLoader> {
        match self {
            GenericDecl::Class(class) => class.class_loader(),
            GenericDecl::Method(exec) | GenericDecl::Constructor(exec) => {
                exec.declaring_class().class_loader()
            }
        }
    }

    pub fn downgrade(&self) -> WeakGenericDecl {
        match self {
            GenericDecl::Class(class) => WeakGenericDecl::Class(Arc::downgrade(class)),
            GenericDecl::Method(exec) => WeakGenericDecl::Method(Arc::downgrade(exec)),
            GenericDecl::Constructor(exec) => WeakGenericDecl::Constructor(Arc::downgrade(exec)),
        }
    }

    pub fn ptr_eq(&self, other: &GenericDecl) -> bool {
        match (self, other) {
            (GenericDecl::Class(a), GenericDecl::Class(b)) => Arc::ptr_eq(a, b),
            (GenericDecl::Method(a), GenericDecl::Method(b))
            | (GenericDecl::Constructor(a), GenericDecl::Constructor(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for GenericDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenericDecl")
            .field("kind", &self.kind())
            .field("name", &self.name())
            .finish()
    }
}

/// A non-owning [`GenericDecl`]. Type objects hold these so that caching them inside a
/// declaration does not keep the declaration alive.
#[derive(Clone)]
pub enum WeakGenericDecl {
    Class(Weak<dyn ClassDecl>),
    Method(Weak<dyn ExecutableDecl>),
    Constructor(Weak<dyn ExecutableDecl>),
}

impl WeakGenericDecl {
    pub fn kind(&self) -> DeclKind {
        match self {
            WeakGenericDecl::Class(_) => DeclKind::Class,
            WeakGenericDecl::Method(_) => DeclKind::Method,
            WeakGenericDecl::Constructor(_) => DeclKind::Constructor,
        }
    }

    pub fn upgrade(&self) -> Option<GenericDecl> {
        Some(match self {
            WeakGenericDecl::Class(class) => GenericDecl::Class(class.upgrade()?),
            WeakGenericDecl::Method(exec) => GenericDecl::Method(exec.upgrade()?),
            WeakGenericDecl::Constructor(exec) => GenericDecl::Constructor(exec.upgrade()?),
        })
    }

    pub fn ptr_eq(&self, other: &WeakGenericDecl) -> bool {
        match (self, other) {
            (WeakGenericDecl::Class(a), WeakGenericDecl::Class(b)) => Weak::ptr_eq(a, b),
            (WeakGenericDecl::Method(a), WeakGenericDecl::Method(b))
            | (WeakGenericDecl::Constructor(a), WeakGenericDecl::Constructor(b)) => {
                Weak::ptr_eq(a, b)
            }
            _ => false,
        }
    }
}

impl fmt::Debug for WeakGenericDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.upgrade() {
            Some(decl) => decl.fmt(f),
            None => f
                .debug_struct("WeakGenericDecl")
                .field("kind", &self.kind())
                .field("dropped", &true)
                .finish(),
        }
    }
}
