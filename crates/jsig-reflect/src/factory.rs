use std::sync::Arc;

use jsig_tree::{BaseType, FieldTypeSignature};

use crate::error::Result;

/// Builds the result values of reification.
///
/// The [`crate::Reifier`] walks a signature tree and calls one constructor per node. Class names
/// are passed in internal form (`java/util/Map$Entry`); factories decide how to present them.
pub trait GenericsFactory {
    type Type: Clone;

    /// A type variable with its (unreified) bounds.
    fn make_type_variable(&self, name: &str, bounds: Arc<[FieldTypeSignature]>) -> Self::Type;

    /// A wildcard with its (unreified) bounds. An empty lower bound means none; any other
    /// occurrence of `Bottom` in the bounds is malformed.
    fn make_wildcard(
        &self,
        upper_bounds: Arc<[FieldTypeSignature]>,
        lower_bounds: Arc<[FieldTypeSignature]>,
    ) -> Result<Self::Type>;

    /// Resolves a class name.
    fn make_named_type(&self, name: &str) -> Result<Self::Type>;

    /// A class name that is not resolved until its value is used.
    fn make_deferred_named_type(&self, name: &str) -> Self::Type;

    /// `raw<type_arguments>`, nested in `owner` when the class type has several segments.
    fn make_parameterized_type(
        &self,
        raw: Self::Type,
        type_arguments: Vec<Self::Type>,
        owner: Option<Self::Type>,
    ) -> Result<Self::Type>;

    fn make_array_type(&self, component: Self::Type) -> Self::Type;

    /// Resolves a type-variable reference against the scope of the declaration being reified.
    fn find_type_variable(&self, name: &str) -> Result<Self::Type>;

    fn make_byte(&self) -> Self::Type;
    fn make_boolean(&self) -> Self::Type;
    fn make_short(&self) -> Self::Type;
    fn make_char(&self) -> Self::Type;
    fn make_int(&self) -> Self::Type;
    fn make_long(&self) -> Self::Type;
    fn make_float(&self) -> Self::Type;
    fn make_double(&self) -> Self::Type;
    fn make_void(&self) -> Self::Type;

    fn make_base_type(&self, base: BaseType) -> Self::Type {
        match base {
            BaseType::Byte => self.make_byte(),
            BaseType::Boolean => self.make_boolean(),
            BaseType::Short => self.make_short(),
            BaseType::Char => self.make_char(),
            BaseType::Int => self.make_int(),
            BaseType::Long => self.make_long(),
            BaseType::Float => self.make_float(),
            BaseType::Double => self.make_double(),
        }
    }
}
