//! Lexical lookup of type-variable names.
//!
//! A method or constructor scope encloses in its declaring class. A class scope encloses in its
//! enclosing method, else its enclosing constructor, else its enclosing class, else
//! [`DummyScope`], which resolves nothing.

use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::decl::{ClassDecl, DeclKind, ExecutableDecl, GenericDecl};
use crate::types::TypeVariable;

pub trait Scope: Send + Sync {
    /// The variable `name` resolves to here or in an enclosing scope.
    fn lookup(&self, name: &str) -> Option<Arc<TypeVariable>>;
}

/// The outermost scope.
#[derive(Clone, Copy, Debug, Default)]
pub struct DummyScope;

impl Scope for DummyScope {
    fn lookup(&self, _name: &str) -> Option<Arc<TypeVariable>> {
        None
    }
}

/// The scope introduced by a class, method or constructor.
///
/// The enclosing scope is computed on first use and then reused.
pub struct DeclScope {
    decl: GenericDecl,
    enclosing: OnceLock<Arc<dyn Scope>>,
}

impl DeclScope {
    pub fn new(decl: GenericDecl) -> Self {
        Self {
            decl,
            enclosing: OnceLock::new(),
        }
    }

    pub fn class(class: Arc<dyn ClassDecl>) -> Self {
        Self::new(GenericDecl::Class(class))
    }

    pub fn method(method: Arc<dyn ExecutableDecl>) -> Self {
        Self::new(GenericDecl::Method(method))
    }

    pub fn constructor(constructor: Arc<dyn ExecutableDecl>) -> Self {
        Self::new(GenericDecl::Constructor(constructor))
    }

    pub fn decl(&self) -> &GenericDecl {
        &self.decl
    }

    pub fn kind(&self) -> DeclKind {
        self.decl.kind()
    }

    pub fn enclosing_scope(&self) -> &Arc<dyn Scope> {
        self.enclosing
            .get_or_init(|| self.compute_enclosing_scope())
    }

    fn compute_enclosing_scope(&self) -> Arc<dyn Scope> {
        match &self.decl {
            GenericDecl::Method(exec) | GenericDecl::Constructor(exec) => {
                Arc::new(DeclScope::class(exec.declaring_class()))
            }
            GenericDecl::Class(class) => {
                if let Some(method) = class.enclosing_method() {
                    Arc::new(DeclScope::method(method))
                } else if let Some(constructor) = class.enclosing_constructor() {
                    Arc::new(DeclScope::constructor(constructor))
                } else if let Some(outer) = class.enclosing_class() {
                    Arc::new(DeclScope::class(outer))
                } else {
                    Arc::new(DummyScope)
                }
            }
        }
    }
}

impl Scope for DeclScope {
    fn lookup(&self, name: &str) -> Option<Arc<TypeVariable>> {
        self.decl
            .type_parameters()
            .into_iter()
            .find(|tv| tv.name() == name)
            .or_else(|| self.enclosing_scope().lookup(name))
    }
}

impl fmt::Debug for DeclScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeclScope")
            .field("decl", &self.decl)
            .field("enclosing_computed", &self.enclosing.get().is_some())
            .finish()
    }
}

/// The scope `decl` introduces. The returned chain holds `decl` strongly, so callers keep it
/// only for the duration of a lookup.
pub fn scope_for(decl: &GenericDecl) -> Arc<dyn Scope> {
    Arc::new(DeclScope::new(decl.clone()))
}
