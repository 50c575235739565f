use std::fmt;
use std::sync::Arc;

use jsig_config::{MissingClassPolicy, ReflectConfig, UnresolvedTypeVariablePolicy};
use jsig_tree::{BaseType, FieldTypeSignature};

use crate::decl::{ClassLoader, GenericDecl, WeakGenericDecl};
use crate::error::{ReifyError, Result};
use crate::factory::GenericsFactory;
use crate::scope::{scope_for, Scope};
use crate::types::{
    ClassRef, GenericArrayType, ParameterizedType, Type, TypeVariable, WildcardType,
};

/// Builds [`Type`]s for one generic declaration.
///
/// Class names are resolved through the declaration's loader and type variables through its
/// scope. The declaration is held weakly: the factory is stored inside every type variable and
/// wildcard it creates, and those are cached by the declaration.
#[derive(Clone)]
pub struct CoreReflectionFactory {
    decl: WeakGenericDecl,
    loader: Arc<dyn ClassLoader>,
    config: ReflectConfig,
}

impl CoreReflectionFactory {
    pub fn make(decl: &GenericDecl, config: ReflectConfig) -> Self {
        Self::from_weak(decl.downgrade(), decl.class_loader(), config)
    }

    /// For declarations that build their factory before an owning handle to them exists.
    pub fn from_weak(
        decl: WeakGenericDecl,
        loader: Arc<dyn ClassLoader>,
        config: ReflectConfig,
    ) -> Self {
        Self {
            decl,
            loader,
            config,
        }
    }

    pub fn declaration(&self) -> &WeakGenericDecl {
        &self.decl
    }

    pub fn class_loader(&self) -> &Arc<dyn ClassLoader> {
        &self.loader
    }

    pub fn config(&self) -> ReflectConfig {
        self.config
    }
}

impl fmt::Debug for CoreReflectionFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoreReflectionFactory")
            .field("decl", &self.decl)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn binary_name(name: &str) -> String {
    name.replace('/', ".")
}

impl GenericsFactory for CoreReflectionFactory {
    type Type = Type;

    fn make_type_variable(&self, name: &str, bounds: Arc<[FieldTypeSignature]>) -> Type {
        Type::TypeVariable(Arc::new(TypeVariable::new(name, bounds, self.clone())))
    }

    fn make_wildcard(
        &self,
        upper_bounds: Arc<[FieldTypeSignature]>,
        lower_bounds: Arc<[FieldTypeSignature]>,
    ) -> Result<Type> {
        if upper_bounds
            .iter()
            .chain(lower_bounds.iter())
            .any(FieldTypeSignature::contains_bottom)
        {
            return Err(ReifyError::BottomSignature);
        }
        Ok(Type::Wildcard(Arc::new(WildcardType::new(
            upper_bounds,
            lower_bounds,
            self.clone(),
        ))))
    }

    fn make_named_type(&self, name: &str) -> Result<Type> {
        let name = binary_name(name);
        if let Some(class) = self.loader.load_class(&name) {
            return Ok(Type::Class(class));
        }
        match self.config.missing_classes {
            MissingClassPolicy::Error => Err(ReifyError::TypeNotPresent { name }),
            MissingClassPolicy::Defer => {
                tracing::debug!(
                    target: "jsig.reflect",
                    class = %name,
                    "class not found; keeping it as a named type"
                );
                Ok(self.make_deferred_named_type(&name))
            }
        }
    }

    fn make_deferred_named_type(&self, name: &str) -> Type {
        Type::Named(binary_name(name).into())
    }

    fn make_parameterized_type(
        &self,
        raw: Type,
        type_arguments: Vec<Type>,
        owner: Option<Type>,
    ) -> Result<Type> {
        let Some(raw_name) = raw.raw_name() else {
            return Err(ReifyError::InvalidRawType(raw.to_string()));
        };
        if let Some(expected) = self.loader.type_parameter_count(raw_name) {
            if expected != type_arguments.len() {
                return Err(ReifyError::MalformedParameterizedType {
                    raw: raw_name.to_string(),
                    expected,
                    found: type_arguments.len(),
                });
            }
        }
        Ok(Type::Parameterized(Arc::new(ParameterizedType::new(
            raw,
            type_arguments,
            owner,
        ))))
    }

    fn make_array_type(&self, component: Type) -> Type {
        match component {
            Type::Class(class) => Type::Class(ClassRef::array_of(class)),
            component => Type::GenericArray(Arc::new(GenericArrayType::new(component))),
        }
    }

    /// Builds a fresh scope chain per lookup. A cached chain would hold the declaration
    /// strongly from inside its own repository; repository results are memoized, so each
    /// reference is looked up once per accessor anyway.
    fn find_type_variable(&self, name: &str) -> Result<Type> {
        let decl = self
            .decl
            .upgrade()
            .ok_or(ReifyError::DeclarationDropped {
                what: "type variable reference",
            })?;
        if let Some(tv) = scope_for(&decl).lookup(name) {
            return Ok(Type::TypeVariable(tv));
        }

        match self.config.unresolved_type_variables {
            UnresolvedTypeVariablePolicy::Ignore => {
                tracing::debug!(
                    target: "jsig.reflect",
                    type_variable = name,
                    decl = decl.name(),
                    "type variable not declared in any enclosing scope"
                );
                Ok(Type::UnresolvedTypeVariable(name.into()))
            }
            UnresolvedTypeVariablePolicy::Error => Err(ReifyError::UnresolvedTypeVariable {
                name: name.to_string(),
            }),
        }
    }

    fn make_byte(&self) -> Type {
        Type::Class(ClassRef::Primitive(BaseType::Byte))
    }

    fn make_boolean(&self) -> Type {
        Type::Class(ClassRef::Primitive(BaseType::Boolean))
    }

    fn make_short(&self) -> Type {
        Type::Class(ClassRef::Primitive(BaseType::Short))
    }

    fn make_char(&self) -> Type {
        Type::Class(ClassRef::Primitive(BaseType::Char))
    }

    fn make_int(&self) -> Type {
        Type::Class(ClassRef::Primitive(BaseType::Int))
    }

    fn make_long(&self) -> Type {
        Type::Class(ClassRef::Primitive(BaseType::Long))
    }

    fn make_float(&self) -> Type {
        Type::Class(ClassRef::Primitive(BaseType::Float))
    }

    fn make_double(&self) -> Type {
        Type::Class(ClassRef::Primitive(BaseType::Double))
    }

    fn make_void(&self) -> Type {
        Type::Class(ClassRef::Void)
    }
}
