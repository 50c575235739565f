use std::fmt;
use std::sync::{Arc, OnceLock, Weak};

use jsig_tree::{parse_method_descriptor, MethodDescriptor, MethodTypeSignature, SignatureParser};

use super::ClassInfo;
use crate::core_factory::CoreReflectionFactory;
use crate::decl::{ClassDecl, ExecutableDecl, WeakGenericDecl};
use crate::error::Result;
use crate::repository::{ConstructorRepository, MethodRepository};
use crate::types::{ClassRef, Type, TypeVariable};

/// The parts of a method or constructor read before it is built.
struct Parts {
    declaring_class: Arc<ClassInfo>,
    name: String,
    descriptor: MethodDescriptor,
    exceptions: Vec<String>,
    signature: Option<MethodTypeSignature>,
}

impl Parts {
    fn new(
        declaring_class: &Arc<ClassInfo>,
        name: String,
        descriptor: &str,
    ) -> jsig_tree::Result<Self> {
        Ok(Self {
            declaring_class: declaring_class.clone(),
            name,
            descriptor: parse_method_descriptor(descriptor)?,
            exceptions: Vec::new(),
            signature: None,
        })
    }

    fn factory(&self, decl: WeakGenericDecl) -> CoreReflectionFactory {
        CoreReflectionFactory::from_weak(
            decl,
            self.declaring_class.loader().clone(),
            self.declaring_class.config(),
        )
    }

    fn erased_parameter_types(&self) -> Vec<Type> {
        self.descriptor
            .params
            .iter()
            .map(|param| Type::Class(ClassRef::from_field_type(param)))
            .collect()
    }

    fn erased_exception_types(&self) -> Vec<Type> {
        self.exceptions
            .iter()
            .map(|name| Type::class(name.replace('/', ".")))
            .collect()
    }
}

impl fmt::Debug for Parts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parts")
            .field("declaring_class", &self.declaring_class.name())
            .field("name", &self.name)
            .field("descriptor", &self.descriptor)
            .field("exceptions", &self.exceptions)
            .field("signature", &self.signature.as_ref().map(ToString::to_string))
            .finish()
    }
}

fn type_variables(types: Vec<Type>) -> Vec<Arc<TypeVariable>> {
    types.into_iter().filter_map(Type::into_type_variable).collect()
}

macro_rules! executable_builder {
    ($builder:ident, $info:ident) => {
        pub struct $builder {
            parts: Parts,
        }

        impl $builder {
            /// Erased thrown types, by binary or internal name.
            pub fn exceptions<I, S>(mut self, names: I) -> Self
            where
                I: IntoIterator<Item = S>,
                S: Into<String>,
            {
                self.parts.exceptions = names.into_iter().map(Into::into).collect();
                self
            }

            pub fn signature(mut self, signature: MethodTypeSignature) -> Self {
                self.parts.signature = Some(signature);
                self
            }

            pub fn parse_signature(
                self,
                signature: &str,
                parser: &dyn SignatureParser,
            ) -> jsig_tree::Result<Self> {
                Ok(self.signature(parser.parse_method_signature(signature)?))
            }

            pub fn build(self) -> Arc<$info> {
                Arc::new_cyclic(|this| $info {
                    this: this.clone(),
                    parts: self.parts,
                    repository: OnceLock::new(),
                })
            }
        }
    };
}

executable_builder!(MethodInfoBuilder, MethodInfo);
executable_builder!(ConstructorInfoBuilder, ConstructorInfo);

pub struct MethodInfo {
    this: Weak<MethodInfo>,
    parts: Parts,
    repository: OnceLock<MethodRepository<CoreReflectionFactory>>,
}

impl MethodInfo {
    /// Fails when `descriptor` is not a method descriptor.
    pub fn builder(
        declaring_class: &Arc<ClassInfo>,
        name: impl Into<String>,
        descriptor: &str,
    ) -> jsig_tree::Result<MethodInfoBuilder> {
        Ok(MethodInfoBuilder {
            parts: Parts::new(declaring_class, name.into(), descriptor)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.parts.name
    }

    pub fn declaring_class(&self) -> &Arc<ClassInfo> {
        &self.parts.declaring_class
    }

    pub fn descriptor(&self) -> &MethodDescriptor {
        &self.parts.descriptor
    }

    pub fn signature(&self) -> Option<&MethodTypeSignature> {
        self.parts.signature.as_ref()
    }

    fn repository(&self) -> Option<&MethodRepository<CoreReflectionFactory>> {
        let signature = self.parts.signature.as_ref()?;
        Some(self.repository.get_or_init(|| {
            let this: Weak<dyn ExecutableDecl> = self.this.clone();
            let factory = self.parts.factory(WeakGenericDecl::Method(this));
            MethodRepository::new(signature.clone(), factory)
        }))
    }

    pub fn type_parameters(&self) -> Vec<Arc<TypeVariable>> {
        self.repository()
            .map(|repo| type_variables(repo.type_parameters()))
            .unwrap_or_default()
    }

    pub fn generic_parameter_types(&self) -> Result<Vec<Type>> {
        match self.repository() {
            Some(repo) => repo.parameter_types(),
            None => Ok(self.parts.erased_parameter_types()),
        }
    }

    pub fn generic_return_type(&self) -> Result<Type> {
        match self.repository() {
            Some(repo) => repo.return_type(),
            None => Ok(Type::Class(
                self.parts
                    .descriptor
                    .return_type
                    .as_ref()
                    .map(ClassRef::from_field_type)
                    .unwrap_or(ClassRef::Void),
            )),
        }
    }

    /// The erased exceptions unless the signature declares thrown types.
    pub fn generic_exception_types(&self) -> Result<Vec<Type>> {
        match self.repository() {
            Some(repo) if !repo.tree().exception_types().is_empty() => repo.exception_types(),
            _ => Ok(self.parts.erased_exception_types()),
        }
    }
}

impl ExecutableDecl for MethodInfo {
    fn name(&self) -> &str {
        &self.parts.name
    }

    fn type_parameters(&self) -> Vec<Arc<TypeVariable>> {
        MethodInfo::type_parameters(self)
    }

    fn declaring_class(&self) -> Arc<dyn ClassDecl> {
        self.parts.declaring_class.clone()
    }
}

impl fmt::Debug for MethodInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MethodInfo").field(&self.parts).finish()
    }
}

pub struct ConstructorInfo {
    this: Weak<ConstructorInfo>,
    parts: Parts,
    repository: OnceLock<ConstructorRepository<CoreReflectionFactory>>,
}

impl ConstructorInfo {
    pub const NAME: &'static str = "<init>";

    pub fn builder(
        declaring_class: &Arc<ClassInfo>,
        descriptor: &str,
    ) -> jsig_tree::Result<ConstructorInfoBuilder> {
        Ok(ConstructorInfoBuilder {
            parts: Parts::new(declaring_class, Self::NAME.to_string(), descriptor)?,
        })
    }

    pub fn declaring_class(&self) -> &Arc<ClassInfo> {
        &self.parts.declaring_class
    }

    pub fn descriptor(&self) -> &MethodDescriptor {
        &self.parts.descriptor
    }

    pub fn signature(&self) -> Option<&MethodTypeSignature> {
        self.parts.signature.as_ref()
    }

    fn repository(&self) -> Option<&ConstructorRepository<CoreReflectionFactory>> {
        let signature = self.parts.signature.as_ref()?;
        Some(self.repository.get_or_init(|| {
            let this: Weak<dyn ExecutableDecl> = self.this.clone();
            let factory = self.parts.factory(WeakGenericDecl::Constructor(this));
            ConstructorRepository::new(signature.clone(), factory)
        }))
    }

    pub fn type_parameters(&self) -> Vec<Arc<TypeVariable>> {
        self.repository()
            .map(|repo| type_variables(repo.type_parameters()))
            .unwrap_or_default()
    }

    pub fn generic_parameter_types(&self) -> Result<Vec<Type>> {
        match self.repository() {
            Some(repo) => repo.parameter_types(),
            None => Ok(self.parts.erased_parameter_types()),
        }
    }

    pub fn generic_exception_types(&self) -> Result<Vec<Type>> {
        match self.repository() {
            Some(repo) if !repo.tree().exception_types().is_empty() => repo.exception_types(),
            _ => Ok(self.parts.erased_exception_types()),
        }
    }
}

impl ExecutableDecl for ConstructorInfo {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn type_parameters(&self) -> Vec<Arc<TypeVariable>> {
        ConstructorInfo::type_parameters(self)
    }

    fn declaring_class(&self) -> Arc<dyn ClassDecl> {
        self.parts.declaring_class.clone()
    }
}

impl fmt::Debug for ConstructorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ConstructorInfo").field(&self.parts).finish()
    }
}
