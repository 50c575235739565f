use std::sync::Arc;

use jsig_tree::{FieldTypeSignature, ReturnType, TypeSignature};

use crate::error::Result;
use crate::factory::GenericsFactory;
use crate::reifier::Reifier;

/// Renders signatures as Java source-like type names without resolving anything.
///
/// `Ljava/util/Map<TK;+Ljava/lang/Number;>;` becomes `java.util.Map<K, ? extends
/// java.lang.Number>`. Nested classes render as `Outer<T>.Inner`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TypeNameFactory;

impl TypeNameFactory {
    /// Fails only with [`crate::ReifyError::BottomSignature`] when `Bottom` appears where a type is
    /// required.
    pub fn type_name(&self, sig: &TypeSignature) -> Result<String> {
        Reifier::make(self).reify_type(sig)
    }

    pub fn field_type_name(&self, sig: &FieldTypeSignature) -> Result<String> {
        Reifier::make(self).reify_field_type(sig)
    }

    pub fn return_type_name(&self, ret: &ReturnType) -> Result<String> {
        Reifier::make(self).reify_return_type(ret)
    }

    pub(crate) fn wildcard_name(
        &self,
        upper_bounds: &[FieldTypeSignature],
        lower_bounds: &[FieldTypeSignature],
    ) -> Result<String> {
        if !lower_bounds.is_empty() {
            return Ok(format!("? super {}", self.join_bounds(lower_bounds)?));
        }
        match upper_bounds {
            [] => Ok("?".to_string()),
            [FieldTypeSignature::Class(class)] if class.is_object() => Ok("?".to_string()),
            bounds => Ok(format!("? extends {}", self.join_bounds(bounds)?)),
        }
    }

    fn join_bounds(&self, bounds: &[FieldTypeSignature]) -> Result<String> {
        let names = bounds
            .iter()
            .map(|bound| self.field_type_name(bound))
            .collect::<Result<Vec<_>>>()?;
        Ok(names.join(" & "))
    }
}

impl GenericsFactory for TypeNameFactory {
    type Type = String;

    fn make_type_variable(&self, name: &str, _bounds: Arc<[FieldTypeSignature]>) -> String {
        name.to_string()
    }

    fn make_wildcard(
        &self,
        upper_bounds: Arc<[FieldTypeSignature]>,
        lower_bounds: Arc<[FieldTypeSignature]>,
    ) -> Result<String> {
        self.wildcard_name(&upper_bounds, &lower_bounds)
    }

    fn make_named_type(&self, name: &str) -> Result<String> {
        Ok(self.make_deferred_named_type(name))
    }

    fn make_deferred_named_type(&self, name: &str) -> String {
        name.replace('/', ".")
    }

    fn make_parameterized_type(
        &self,
        raw: String,
        type_arguments: Vec<String>,
        owner: Option<String>,
    ) -> Result<String> {
        let mut name = match owner {
            Some(owner) => {
                let simple = raw.rsplit(['$', '.']).next().unwrap_or(&raw);
                format!("{owner}.{simple}")
            }
            None => raw,
        };
        if !type_arguments.is_empty() {
            name.push('<');
            name.push_str(&type_arguments.join(", "));
            name.push('>');
        }
        Ok(name)
    }

    fn make_array_type(&self, component: String) -> String {
        component + "[]"
    }

    fn find_type_variable(&self, name: &str) -> Result<String> {
        Ok(name.to_string())
    }

    fn make_byte(&self) -> String {
        "byte".to_string()
    }

    fn make_boolean(&self) -> String {
        "boolean".to_string()
    }

    fn make_short(&self) -> String {
        "short".to_string()
    }

    fn make_char(&self) -> String {
        "char".to_string()
    }

    fn make_int(&self) -> String {
        "int".to_string()
    }

    fn make_long(&self) -> String {
        "long".to_string()
    }

    fn make_float(&self) -> String {
        "float".to_string()
    }

    fn make_double(&self) -> String {
        "double".to_string()
    }

    fn make_void(&self) -> String {
        "void".to_string()
    }
}

#[cfg(test)]
mod tests {
    use jsig_tree::{
        ArrayTypeSignature, BaseType, ClassTypeSignature, SimpleClassTypeSignature,
        TypeVariableSignature, Wildcard,
    };
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::ReifyError;

    fn class(name: &str) -> FieldTypeSignature {
        ClassTypeSignature::simple(name).into()
    }

    fn tv(name: &str) -> FieldTypeSignature {
        TypeVariableSignature::make(name).into()
    }

    #[test]
    fn renders_map_with_wildcards() {
        let sig = ClassTypeSignature::generic(
            "java/util/Map",
            vec![
                tv("K"),
                Wildcard::extends(class("java/lang/Number")).into(),
            ],
        );
        assert_eq!(
            TypeNameFactory.field_type_name(&sig.into()).unwrap(),
            "java.util.Map<K, ? extends java.lang.Number>"
        );
    }

    #[test]
    fn wildcard_shapes() {
        let names = TypeNameFactory;
        assert_eq!(names.field_type_name(&Wildcard::unbounded().into()).unwrap(), "?");
        assert_eq!(
            names.field_type_name(&Wildcard::super_of(tv("T")).into()).unwrap(),
            "? super T"
        );
        assert_eq!(
            names
                .field_type_name(&Wildcard::extends(class("java/lang/Object")).into())
                .unwrap(),
            "?"
        );
    }

    #[test]
    fn renders_nested_arrays_and_primitives() {
        let int_matrix = TypeSignature::Field(
            ArrayTypeSignature::make(TypeSignature::Field(
                ArrayTypeSignature::make(TypeSignature::Base(BaseType::Int)).into(),
            ))
            .into(),
        );
        assert_eq!(TypeNameFactory.type_name(&int_matrix).unwrap(), "int[][]");
        assert_eq!(
            TypeNameFactory.return_type_name(&ReturnType::Void).unwrap(),
            "void"
        );
    }

    #[test]
    fn renders_inner_class_of_parameterized_outer() {
        let sig = ClassTypeSignature::make(vec![
            SimpleClassTypeSignature::make("com/example/Outer", false, vec![tv("T")]),
            SimpleClassTypeSignature::make("Inner", true, vec![]),
        ]);
        assert_eq!(
            TypeNameFactory.field_type_name(&sig.into()).unwrap(),
            "com.example.Outer<T>.Inner"
        );
    }

    #[test]
    fn bottom_bounds_are_errors_not_blank_names() {
        let names = TypeNameFactory;
        let doubled = Wildcard::make(
            vec![],
            vec![FieldTypeSignature::Bottom, FieldTypeSignature::Bottom],
        );
        assert_eq!(
            names.field_type_name(&doubled.into()),
            Err(ReifyError::BottomSignature)
        );

        let list_of_bottom =
            ClassTypeSignature::generic("java/util/List", vec![FieldTypeSignature::Bottom]);
        assert_eq!(
            names.field_type_name(&list_of_bottom.into()),
            Err(ReifyError::BottomSignature)
        );
    }
}
