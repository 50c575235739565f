use std::fmt;
use std::sync::{Arc, OnceLock, Weak};

use jsig_config::ReflectConfig;
use jsig_tree::{ClassSignature, SignatureParser};

use super::{ConstructorInfo, MethodInfo};
use crate::core_factory::CoreReflectionFactory;
use crate::decl::{ClassDecl, ClassLoader, ExecutableDecl, GenericDecl, WeakGenericDecl};
use crate::error::Result;
use crate::repository::ClassRepository;
use crate::types::{Type, TypeVariable, OBJECT_BINARY_NAME};

/// Where a nested, local or anonymous class is declared.
#[derive(Clone)]
pub enum Enclosing {
    Class(Arc<ClassInfo>),
    Method(Arc<MethodInfo>),
    Constructor(Arc<ConstructorInfo>),
}

impl fmt::Debug for Enclosing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Enclosing::Class(class) => f.debug_tuple("Class").field(&class.name()).finish(),
            Enclosing::Method(method) => f.debug_tuple("Method").field(&method.name()).finish(),
            Enclosing::Constructor(ctor) => f
                .debug_tuple("Constructor")
                .field(&ctor.declaring_class().name())
                .finish(),
        }
    }
}

/// A class as read from a class file: its erased supertypes and, when present, its generic
/// signature.
pub struct ClassInfo {
    this: Weak<ClassInfo>,
    name: String,
    loader: Arc<dyn ClassLoader>,
    config: ReflectConfig,
    interface: bool,
    superclass: Option<String>,
    interfaces: Vec<String>,
    signature: Option<ClassSignature>,
    enclosing: Option<Enclosing>,
    repository: OnceLock<ClassRepository<CoreReflectionFactory>>,
}

pub struct ClassInfoBuilder {
    name: String,
    loader: Arc<dyn ClassLoader>,
    config: ReflectConfig,
    interface: bool,
    superclass: Option<String>,
    interfaces: Vec<String>,
    signature: Option<ClassSignature>,
    enclosing: Option<Enclosing>,
}

impl ClassInfoBuilder {
    pub fn config(mut self, config: ReflectConfig) -> Self {
        self.config = config;
        self
    }

    pub fn interface(mut self) -> Self {
        self.interface = true;
        self.superclass = None;
        self
    }

    /// Erased superclass, by binary name. Defaults to `java.lang.Object`, except for
    /// `java.lang.Object` itself.
    pub fn superclass(mut self, binary_name: impl Into<String>) -> Self {
        self.superclass = Some(binary_name.into());
        self
    }

    pub fn no_superclass(mut self) -> Self {
        self.superclass = None;
        self
    }

    pub fn interfaces<I, S>(mut self, binary_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interfaces = binary_names.into_iter().map(Into::into).collect();
        self
    }

    pub fn signature(mut self, signature: ClassSignature) -> Self {
        self.signature = Some(signature);
        self
    }

    pub fn parse_signature(
        self,
        signature: &str,
        parser: &dyn SignatureParser,
    ) -> jsig_tree::Result<Self> {
        Ok(self.signature(parser.parse_class_signature(signature)?))
    }

    pub fn enclosed_by(mut self, enclosing: Enclosing) -> Self {
        self.enclosing = Some(enclosing);
        self
    }

    pub fn build(self) -> Arc<ClassInfo> {
        Arc::new_cyclic(|this| ClassInfo {
            this: this.clone(),
            name: self.name,
            loader: self.loader,
            config: self.config,
            interface: self.interface,
            superclass: self.superclass,
            interfaces: self.interfaces,
            signature: self.signature,
            enclosing: self.enclosing,
            repository: OnceLock::new(),
        })
    }
}

impl ClassInfo {
    pub fn builder(
        binary_name: impl Into<String>,
        loader: Arc<dyn ClassLoader>,
    ) -> ClassInfoBuilder {
        let name = binary_name.into();
        let superclass = (name != OBJECT_BINARY_NAME).then(|| OBJECT_BINARY_NAME.to_string());
        ClassInfoBuilder {
            name,
            loader,
            config: ReflectConfig::default(),
            interface: false,
            superclass,
            interfaces: Vec::new(),
            signature: None,
            enclosing: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_interface(&self) -> bool {
        self.interface
    }

    pub fn loader(&self) -> &Arc<dyn ClassLoader> {
        &self.loader
    }

    pub fn config(&self) -> ReflectConfig {
        self.config
    }

    pub fn signature(&self) -> Option<&ClassSignature> {
        self.signature.as_ref()
    }

    pub fn enclosing(&self) -> Option<&Enclosing> {
        self.enclosing.as_ref()
    }

    pub fn generic_decl(self: &Arc<Self>) -> GenericDecl {
        GenericDecl::Class(self.clone())
    }

    fn repository(&self) -> Option<&ClassRepository<CoreReflectionFactory>> {
        let signature = self.signature.as_ref()?;
        Some(self.repository.get_or_init(|| {
            let this: Weak<dyn ClassDecl> = self.this.clone();
            let factory = CoreReflectionFactory::from_weak(
                WeakGenericDecl::Class(this),
                self.loader.clone(),
                self.config,
            );
            ClassRepository::new(signature.clone(), factory)
        }))
    }

    pub fn type_parameters(&self) -> Vec<Arc<TypeVariable>> {
        self.repository()
            .map(|repo| {
                repo.type_parameters()
                    .into_iter()
                    .filter_map(Type::into_type_variable)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// `None` for interfaces and `java.lang.Object`.
    pub fn generic_superclass(&self) -> Result<Option<Type>> {
        if self.interface {
            return Ok(None);
        }
        match self.repository() {
            Some(repo) => repo.superclass().map(Some),
            None => Ok(self.superclass.as_deref().map(Type::class)),
        }
    }

    pub fn generic_interfaces(&self) -> Result<Vec<Type>> {
        match self.repository() {
            Some(repo) => repo.superinterfaces(),
            None => Ok(self
                .interfaces
                .iter()
                .map(|name| Type::class(name.as_str()))
                .collect()),
        }
    }
}

impl ClassDecl for ClassInfo {
    fn binary_name(&self) -> &str {
        &self.name
    }

    fn type_parameters(&self) -> Vec<Arc<TypeVariable>> {
        ClassInfo::type_parameters(self)
    }

    fn enclosing_method(&self) -> Option<Arc<dyn ExecutableDecl>> {
        match &self.enclosing {
            Some(Enclosing::Method(method)) => Some(method.clone() as Arc<dyn ExecutableDecl>),
            _ => None,
        }
    }

    fn enclosing_constructor(&self) -> Option<Arc<dyn ExecutableDecl>> {
        match &self.enclosing {
            Some(Enclosing::Constructor(ctor)) => Some(ctor.clone() as Arc<dyn ExecutableDecl>),
            _ => None,
        }
    }

    fn enclosing_class(&self) -> Option<Arc<dyn ClassDecl>> {
        let class = match self.enclosing.as_ref()? {
            Enclosing::Class(class) => class.clone(),
            Enclosing::Method(method) => method.declaring_class().clone(),
            Enclosing::Constructor(ctor) => ctor.declaring_class().clone(),
        };
        Some(class as Arc<dyn ClassDecl>)
    }

    fn class_loader(&self) -> Arc<dyn ClassLoader> {
        self.loader.clone()
    }
}

impl fmt::Debug for ClassInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassInfo")
            .field("name", &self.name)
            .field("interface", &self.interface)
            .field("superclass", &self.superclass)
            .field("interfaces", &self.interfaces)
            .field("signature", &self.signature.as_ref().map(ToString::to_string))
            .field("enclosing", &self.enclosing)
            .finish_non_exhaustive()
    }
}
