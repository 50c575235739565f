//! Parser-independent tree model for Java generic signatures (JVMS 4.7.9.1).
//!
//! Nodes are immutable once built. Payloads are shared through `Arc` so a node can be cloned
//! cheaply into a lazily evaluated type variable or wildcard.

use std::sync::Arc;

use crate::descriptor::BaseType;

/// Internal name of `java.lang.Object`, the implicit upper bound of `*` and `-X` wildcards.
pub const OBJECT_INTERNAL_NAME: &str = "java/lang/Object";

/// A reference type signature, or the bottom sentinel used for "no lower bound".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldTypeSignature {
    Class(ClassTypeSignature),
    Array(ArrayTypeSignature),
    TypeVariable(TypeVariableSignature),
    Wildcard(Wildcard),
    /// Never reified. Only meaningful as the lone lower bound handed to [`Wildcard::make`].
    Bottom,
}

impl FieldTypeSignature {
    /// Whether [`FieldTypeSignature::Bottom`] occurs anywhere in this node, including type
    /// arguments, array components and wildcard bounds.
    pub fn contains_bottom(&self) -> bool {
        match self {
            FieldTypeSignature::Bottom => true,
            FieldTypeSignature::TypeVariable(_) => false,
            FieldTypeSignature::Class(class) => class
                .path()
                .iter()
                .flat_map(SimpleClassTypeSignature::type_arguments)
                .any(FieldTypeSignature::contains_bottom),
            FieldTypeSignature::Array(array) => match array.component_type() {
                TypeSignature::Base(_) => false,
                TypeSignature::Field(component) => component.contains_bottom(),
            },
            FieldTypeSignature::Wildcard(wildcard) => wildcard
                .upper_bounds()
                .iter()
                .chain(wildcard.lower_bounds())
                .any(FieldTypeSignature::contains_bottom),
        }
    }
}

/// Any type that can appear as a field, parameter or array component.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeSignature {
    Base(BaseType),
    Field(FieldTypeSignature),
}

/// A method's result: `V` or a type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReturnType {
    Void,
    Type(TypeSignature),
}

/// One segment of a (possibly nested) class type, e.g. `Inner<TU;>` in
/// `Lcom/example/Outer<TT;>.Inner<TU;>;`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SimpleClassTypeSignature {
    name: Arc<str>,
    dollar: bool,
    type_arguments: Arc<[FieldTypeSignature]>,
}

impl SimpleClassTypeSignature {
    /// `dollar` records that this segment joins its predecessor with `$` (a binary nested-class
    /// name) rather than `.`.
    pub fn make(
        name: impl Into<Arc<str>>,
        dollar: bool,
        type_arguments: Vec<FieldTypeSignature>,
    ) -> Self {
        Self {
            name: name.into(),
            dollar,
            type_arguments: type_arguments.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dollar(&self) -> bool {
        self.dollar
    }

    pub fn type_arguments(&self) -> &[FieldTypeSignature] {
        &self.type_arguments
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassTypeSignature {
    path: Arc<[SimpleClassTypeSignature]>,
}

impl ClassTypeSignature {
    /// Panics if `path` is empty.
    pub fn make(path: Vec<SimpleClassTypeSignature>) -> Self {
        assert!(!path.is_empty(), "class type signature needs at least one path segment");
        Self { path: path.into() }
    }

    /// A single-segment class type without type arguments.
    pub fn simple(name: impl Into<Arc<str>>) -> Self {
        Self::make(vec![SimpleClassTypeSignature::make(name, false, Vec::new())])
    }

    /// A single-segment class type with type arguments.
    pub fn generic(name: impl Into<Arc<str>>, type_arguments: Vec<FieldTypeSignature>) -> Self {
        Self::make(vec![SimpleClassTypeSignature::make(
            name,
            false,
            type_arguments,
        )])
    }

    pub fn path(&self) -> &[SimpleClassTypeSignature] {
        &self.path
    }

    /// Whether this is `java/lang/Object` (or its dotted form) without type arguments.
    pub fn is_object(&self) -> bool {
        match &*self.path {
            [only] => {
                only.type_arguments.is_empty()
                    && (&*only.name == OBJECT_INTERNAL_NAME || &*only.name == "java.lang.Object")
            }
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArrayTypeSignature {
    component: Arc<TypeSignature>,
}

impl ArrayTypeSignature {
    pub fn make(component: TypeSignature) -> Self {
        Self {
            component: Arc::new(component),
        }
    }

    pub fn component_type(&self) -> &TypeSignature {
        &self.component
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeVariableSignature {
    identifier: Arc<str>,
}

impl TypeVariableSignature {
    pub fn make(identifier: impl Into<Arc<str>>) -> Self {
        Self {
            identifier: identifier.into(),
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Wildcard {
    upper_bounds: Arc<[FieldTypeSignature]>,
    lower_bounds: Arc<[FieldTypeSignature]>,
}

impl Wildcard {
    /// A lower bound consisting solely of [`FieldTypeSignature::Bottom`] means "no lower bound"
    /// and is stored as an empty array.
    pub fn make(
        upper_bounds: Vec<FieldTypeSignature>,
        lower_bounds: Vec<FieldTypeSignature>,
    ) -> Self {
        let lower_bounds = match lower_bounds.as_slice() {
            [FieldTypeSignature::Bottom] => Vec::new(),
            _ => lower_bounds,
        };
        Self {
            upper_bounds: upper_bounds.into(),
            lower_bounds: lower_bounds.into(),
        }
    }

    /// `*`
    pub fn unbounded() -> Self {
        Self::make(vec![object()], vec![FieldTypeSignature::Bottom])
    }

    /// `+bound`
    pub fn extends(bound: FieldTypeSignature) -> Self {
        Self::make(vec![bound], vec![FieldTypeSignature::Bottom])
    }

    /// `-bound`
    pub fn super_of(bound: FieldTypeSignature) -> Self {
        Self::make(vec![object()], vec![bound])
    }

    pub fn upper_bounds(&self) -> &[FieldTypeSignature] {
        &self.upper_bounds
    }

    pub fn lower_bounds(&self) -> &[FieldTypeSignature] {
        &self.lower_bounds
    }

    /// Shared handles to the bound arrays, for consumers that reify bounds later.
    pub fn bound_arrays(&self) -> (Arc<[FieldTypeSignature]>, Arc<[FieldTypeSignature]>) {
        (self.upper_bounds.clone(), self.lower_bounds.clone())
    }

    pub fn is_unbounded(&self) -> bool {
        self.lower_bounds.is_empty()
            && matches!(&*self.upper_bounds, [FieldTypeSignature::Class(c)] if c.is_object())
    }
}

fn object() -> FieldTypeSignature {
    FieldTypeSignature::Class(ClassTypeSignature::simple(OBJECT_INTERNAL_NAME))
}

/// A declared type parameter: `T:Ljava/lang/Object;`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FormalTypeParameter {
    name: Arc<str>,
    bounds: Arc<[FieldTypeSignature]>,
}

impl FormalTypeParameter {
    pub fn make(name: impl Into<Arc<str>>, bounds: Vec<FieldTypeSignature>) -> Self {
        Self {
            name: name.into(),
            bounds: bounds.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bounds(&self) -> &[FieldTypeSignature] {
        &self.bounds
    }

    pub fn bound_array(&self) -> Arc<[FieldTypeSignature]> {
        self.bounds.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassSignature {
    formal_type_parameters: Arc<[FormalTypeParameter]>,
    superclass: ClassTypeSignature,
    superinterfaces: Arc<[ClassTypeSignature]>,
}

impl ClassSignature {
    pub fn make(
        formal_type_parameters: Vec<FormalTypeParameter>,
        superclass: ClassTypeSignature,
        superinterfaces: Vec<ClassTypeSignature>,
    ) -> Self {
        Self {
            formal_type_parameters: formal_type_parameters.into(),
            superclass,
            superinterfaces: superinterfaces.into(),
        }
    }

    pub fn formal_type_parameters(&self) -> &[FormalTypeParameter] {
        &self.formal_type_parameters
    }

    pub fn superclass(&self) -> &ClassTypeSignature {
        &self.superclass
    }

    pub fn superinterfaces(&self) -> &[ClassTypeSignature] {
        &self.superinterfaces
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodTypeSignature {
    formal_type_parameters: Arc<[FormalTypeParameter]>,
    parameter_types: Arc<[TypeSignature]>,
    return_type: ReturnType,
    exception_types: Arc<[FieldTypeSignature]>,
}

impl MethodTypeSignature {
    pub fn make(
        formal_type_parameters: Vec<FormalTypeParameter>,
        parameter_types: Vec<TypeSignature>,
        return_type: ReturnType,
        exception_types: Vec<FieldTypeSignature>,
    ) -> Self {
        Self {
            formal_type_parameters: formal_type_parameters.into(),
            parameter_types: parameter_types.into(),
            return_type,
            exception_types: exception_types.into(),
        }
    }

    pub fn formal_type_parameters(&self) -> &[FormalTypeParameter] {
        &self.formal_type_parameters
    }

    pub fn parameter_types(&self) -> &[TypeSignature] {
        &self.parameter_types
    }

    pub fn return_type(&self) -> &ReturnType {
        &self.return_type
    }

    pub fn exception_types(&self) -> &[FieldTypeSignature] {
        &self.exception_types
    }
}

/// Signatures that declare formal type parameters.
pub trait GenericSignature {
    fn formal_type_parameters(&self) -> &[FormalTypeParameter];
}

impl GenericSignature for ClassSignature {
    fn formal_type_parameters(&self) -> &[FormalTypeParameter] {
        ClassSignature::formal_type_parameters(self)
    }
}

impl GenericSignature for MethodTypeSignature {
    fn formal_type_parameters(&self) -> &[FormalTypeParameter] {
        MethodTypeSignature::formal_type_parameters(self)
    }
}

impl From<ClassTypeSignature> for FieldTypeSignature {
    fn from(value: ClassTypeSignature) -> Self {
        FieldTypeSignature::Class(value)
    }
}

impl From<ArrayTypeSignature> for FieldTypeSignature {
    fn from(value: ArrayTypeSignature) -> Self {
        FieldTypeSignature::Array(value)
    }
}

impl From<TypeVariableSignature> for FieldTypeSignature {
    fn from(value: TypeVariableSignature) -> Self {
        FieldTypeSignature::TypeVariable(value)
    }
}

impl From<Wildcard> for FieldTypeSignature {
    fn from(value: Wildcard) -> Self {
        FieldTypeSignature::Wildcard(value)
    }
}

impl From<FieldTypeSignature> for TypeSignature {
    fn from(value: FieldTypeSignature) -> Self {
        TypeSignature::Field(value)
    }
}

impl From<BaseType> for TypeSignature {
    fn from(value: BaseType) -> Self {
        TypeSignature::Base(value)
    }
}

impl From<TypeSignature> for ReturnType {
    fn from(value: TypeSignature) -> Self {
        ReturnType::Type(value)
    }
}
