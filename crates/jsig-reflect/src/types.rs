//! Realized types produced by [`CoreReflectionFactory`].
//!
//! `Display` follows `java.lang.reflect.Type::getTypeName`: `java.util.Map<K, V>`,
//! `Outer<T>$Inner<U>`, `? extends T`, `T[]`.

use std::fmt;
use std::sync::Arc;

use jsig_tree::{BaseType, FieldType, FieldTypeSignature};

use crate::core_factory::CoreReflectionFactory;
use crate::decl::GenericDecl;
use crate::error::{ReifyError, Result};
use crate::name_factory::TypeNameFactory;
use crate::reifier::Reifier;

/// Binary name of `java.lang.Object`.
pub const OBJECT_BINARY_NAME: &str = "java.lang.Object";

/// A loaded, non-generic class: a primitive, `void`, a named class, or an array class.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ClassRef {
    Primitive(BaseType),
    Void,
    /// Binary name, e.g. `java.util.Map$Entry`.
    Object(Arc<str>),
    Array(Arc<ClassRef>),
}

impl ClassRef {
    pub fn object(binary_name: impl Into<Arc<str>>) -> Self {
        ClassRef::Object(binary_name.into())
    }

    pub fn array_of(component: ClassRef) -> Self {
        ClassRef::Array(Arc::new(component))
    }

    /// The erased class a descriptor names.
    pub fn from_field_type(ty: &FieldType) -> Self {
        match ty {
            FieldType::Base(base) => ClassRef::Primitive(*base),
            FieldType::Object(internal) => ClassRef::object(internal.replace('/', ".")),
            FieldType::Array(component) => ClassRef::array_of(ClassRef::from_field_type(component)),
        }
    }

    /// Binary name of a named class; `None` for primitives, `void` and arrays.
    pub fn binary_name(&self) -> Option<&str> {
        match self {
            ClassRef::Object(name) => Some(name),
            _ => None,
        }
    }

    pub fn is_object(&self) -> bool {
        self.binary_name() == Some(OBJECT_BINARY_NAME)
    }
}

impl fmt::Display for ClassRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassRef::Primitive(base) => f.write_str(base.java_name()),
            ClassRef::Void => f.write_str("void"),
            ClassRef::Object(name) => f.write_str(name),
            ClassRef::Array(component) => write!(f, "{component}[]"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Type {
    Class(ClassRef),
    Parameterized(Arc<ParameterizedType>),
    GenericArray(Arc<GenericArrayType>),
    TypeVariable(Arc<TypeVariable>),
    Wildcard(Arc<WildcardType>),
    /// A class name that was not looked up (or could not be, under a deferring policy).
    Named(Arc<str>),
    /// A type-variable name no enclosing scope declares.
    UnresolvedTypeVariable(Arc<str>),
}

impl Type {
    pub fn class(binary_name: impl Into<Arc<str>>) -> Self {
        Type::Class(ClassRef::object(binary_name))
    }

    pub fn object() -> Self {
        Type::class(OBJECT_BINARY_NAME)
    }

    pub fn as_class(&self) -> Option<&ClassRef> {
        match self {
            Type::Class(class) => Some(class),
            _ => None,
        }
    }

    pub fn as_parameterized(&self) -> Option<&ParameterizedType> {
        match self {
            Type::Parameterized(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_type_variable(&self) -> Option<&Arc<TypeVariable>> {
        match self {
            Type::TypeVariable(tv) => Some(tv),
            _ => None,
        }
    }

    pub fn into_type_variable(self) -> Option<Arc<TypeVariable>> {
        match self {
            Type::TypeVariable(tv) => Some(tv),
            _ => None,
        }
    }

    pub fn as_wildcard(&self) -> Option<&WildcardType> {
        match self {
            Type::Wildcard(w) => Some(w),
            _ => None,
        }
    }

    pub fn as_generic_array(&self) -> Option<&GenericArrayType> {
        match self {
            Type::GenericArray(a) => Some(a),
            _ => None,
        }
    }

    /// The class name a raw type refers to, for `Class` and `Named` types.
    pub(crate) fn raw_name(&self) -> Option<&str> {
        match self {
            Type::Class(class) => class.binary_name(),
            Type::Named(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Class(class) => class.fmt(f),
            Type::Parameterized(p) => p.fmt(f),
            Type::GenericArray(a) => write!(f, "{}[]", a.generic_component_type()),
            Type::TypeVariable(tv) => f.write_str(tv.name()),
            Type::Wildcard(w) => w.fmt(f),
            Type::Named(name) | Type::UnresolvedTypeVariable(name) => f.write_str(name),
        }
    }
}

/// `Raw<Args>`, optionally nested in an owner type.
#[derive(Clone, Debug, PartialEq)]
pub struct ParameterizedType {
    raw_type: Type,
    actual_type_arguments: Vec<Type>,
    owner_type: Option<Type>,
}

impl ParameterizedType {
    pub(crate) fn new(
        raw_type: Type,
        actual_type_arguments: Vec<Type>,
        owner_type: Option<Type>,
    ) -> Self {
        Self {
            raw_type,
            actual_type_arguments,
            owner_type,
        }
    }

    pub fn raw_type(&self) -> &Type {
        &self.raw_type
    }

    /// Binary name of the raw type.
    pub fn raw_name(&self) -> &str {
        self.raw_type.raw_name().unwrap_or_default()
    }

    pub fn actual_type_arguments(&self) -> &[Type] {
        &self.actual_type_arguments
    }

    pub fn owner_type(&self) -> Option<&Type> {
        self.owner_type.as_ref()
    }
}

impl fmt::Display for ParameterizedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let raw = self.raw_name();
        match &self.owner_type {
            Some(owner) => {
                write!(f, "{owner}$")?;
                let nested = owner
                    .raw_name()
                    .or_else(|| owner.as_parameterized().map(ParameterizedType::raw_name))
                    .and_then(|owner_raw| {
                        raw.strip_prefix(owner_raw)
                            .and_then(|rest| rest.strip_prefix(['$', '.']))
                    })
                    .unwrap_or_else(|| simple_name(raw));
                f.write_str(nested)?;
            }
            None => f.write_str(raw)?,
        }

        if let Some((first, rest)) = self.actual_type_arguments.split_first() {
            write!(f, "<{first}")?;
            for arg in rest {
                write!(f, ", {arg}")?;
            }
            f.write_str(">")?;
        }
        Ok(())
    }
}

fn simple_name(binary_name: &str) -> &str {
    binary_name
        .rfind(['$', '.'])
        .map(|idx| &binary_name[idx + 1..])
        .unwrap_or(binary_name)
}

/// An array whose component is not a plain class, e.g. `T[]` or `List<String>[]`.
#[derive(Clone, Debug, PartialEq)]
pub struct GenericArrayType {
    component: Type,
}

impl GenericArrayType {
    pub(crate) fn new(component: Type) -> Self {
        Self { component }
    }

    pub fn generic_component_type(&self) -> &Type {
        &self.component
    }
}

/// A declared type parameter.
///
/// Bounds are kept as signature trees and reified on every [`TypeVariable::bounds`] call: a
/// cached bound such as `Comparable<T>` would contain this variable and never be freed.
#[derive(Clone, Debug)]
pub struct TypeVariable {
    name: Arc<str>,
    bounds: Arc<[FieldTypeSignature]>,
    factory: CoreReflectionFactory,
}

impl TypeVariable {
    pub(crate) fn new(
        name: impl Into<Arc<str>>,
        bounds: Arc<[FieldTypeSignature]>,
        factory: CoreReflectionFactory,
    ) -> Self {
        Self {
            name: name.into(),
            bounds,
            factory,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bound_signatures(&self) -> &[FieldTypeSignature] {
        &self.bounds
    }

    /// The class, method or constructor declaring this variable, if it is still alive.
    pub fn generic_declaration(&self) -> Option<GenericDecl> {
        self.factory.declaration().upgrade()
    }

    pub fn bounds(&self) -> Result<Vec<Type>> {
        let _decl = self
            .generic_declaration()
            .ok_or(ReifyError::DeclarationDropped {
                what: "type variable bounds",
            })?;
        let reifier = Reifier::make(&self.factory);
        self.bounds
            .iter()
            .map(|bound| reifier.reify_field_type(bound))
            .collect()
    }
}

impl PartialEq for TypeVariable {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self
                .factory
                .declaration()
                .ptr_eq(other.factory.declaration())
    }
}

/// `?`, `? extends U` or `? super L`. Bounds are reified on demand.
#[derive(Clone, Debug)]
pub struct WildcardType {
    upper_bounds: Arc<[FieldTypeSignature]>,
    lower_bounds: Arc<[FieldTypeSignature]>,
    factory: CoreReflectionFactory,
}

impl WildcardType {
    pub(crate) fn new(
        upper_bounds: Arc<[FieldTypeSignature]>,
        lower_bounds: Arc<[FieldTypeSignature]>,
        factory: CoreReflectionFactory,
    ) -> Self {
        Self {
            upper_bounds,
            lower_bounds,
            factory,
        }
    }

    pub fn upper_bound_signatures(&self) -> &[FieldTypeSignature] {
        &self.upper_bounds
    }

    pub fn lower_bound_signatures(&self) -> &[FieldTypeSignature] {
        &self.lower_bounds
    }

    /// Upper bounds; `java.lang.Object` when none was declared.
    pub fn upper_bounds(&self) -> Result<Vec<Type>> {
        if self.upper_bounds.is_empty() {
            return Ok(vec![Type::object()]);
        }
        self.reify(&self.upper_bounds, "wildcard upper bounds")
    }

    pub fn lower_bounds(&self) -> Result<Vec<Type>> {
        self.reify(&self.lower_bounds, "wildcard lower bounds")
    }

    fn reify(&self, bounds: &[FieldTypeSignature], what: &'static str) -> Result<Vec<Type>> {
        if bounds.is_empty() {
            return Ok(Vec::new());
        }
        let _decl = self
            .factory
            .declaration()
            .upgrade()
            .ok_or(ReifyError::DeclarationDropped { what })?;
        let reifier = Reifier::make(&self.factory);
        bounds
            .iter()
            .map(|bound| reifier.reify_field_type(bound))
            .collect()
    }
}

impl PartialEq for WildcardType {
    fn eq(&self, other: &Self) -> bool {
        self.upper_bounds == other.upper_bounds
            && self.lower_bounds == other.lower_bounds
            && self
                .factory
                .declaration()
                .ptr_eq(other.factory.declaration())
    }
}

impl fmt::Display for WildcardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Bottom-free by construction in `CoreReflectionFactory::make_wildcard`.
        let name = TypeNameFactory
            .wildcard_name(&self.upper_bounds, &self.lower_bounds)
            .map_err(|_| fmt::Error)?;
        f.write_str(&name)
    }
}
