use std::fmt;
use std::sync::{Arc, OnceLock};

use jsig_tree::{parse_field_descriptor, FieldType, SignatureParser, TypeSignature};

use super::ClassInfo;
use crate::core_factory::CoreReflectionFactory;
use crate::error::Result;
use crate::repository::FieldRepository;
use crate::types::{ClassRef, Type};

/// A field. Type variables in its signature resolve against the declaring class.
pub struct FieldInfo {
    declaring_class: Arc<ClassInfo>,
    name: String,
    descriptor: FieldType,
    signature: Option<TypeSignature>,
    repository: OnceLock<FieldRepository<CoreReflectionFactory>>,
}

impl FieldInfo {
    pub fn new(
        declaring_class: &Arc<ClassInfo>,
        name: impl Into<String>,
        descriptor: &str,
    ) -> jsig_tree::Result<Self> {
        Ok(Self {
            declaring_class: declaring_class.clone(),
            name: name.into(),
            descriptor: parse_field_descriptor(descriptor)?,
            signature: None,
            repository: OnceLock::new(),
        })
    }

    pub fn with_signature(mut self, signature: TypeSignature) -> Self {
        self.signature = Some(signature);
        self
    }

    pub fn parse_signature(
        self,
        signature: &str,
        parser: &dyn SignatureParser,
    ) -> jsig_tree::Result<Self> {
        Ok(self.with_signature(parser.parse_field_signature(signature)?))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn declaring_class(&self) -> &Arc<ClassInfo> {
        &self.declaring_class
    }

    pub fn descriptor(&self) -> &FieldType {
        &self.descriptor
    }

    pub fn signature(&self) -> Option<&TypeSignature> {
        self.signature.as_ref()
    }

    pub fn generic_type(&self) -> Result<Type> {
        let Some(signature) = self.signature.as_ref() else {
            return Ok(Type::Class(ClassRef::from_field_type(&self.descriptor)));
        };
        self.repository
            .get_or_init(|| {
                let factory = CoreReflectionFactory::make(
                    &self.declaring_class.generic_decl(),
                    self.declaring_class.config(),
                );
                FieldRepository::new(signature.clone(), factory)
            })
            .generic_type()
    }
}

impl fmt::Debug for FieldInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldInfo")
            .field("declaring_class", &self.declaring_class.name())
            .field("name", &self.name)
            .field("descriptor", &self.descriptor)
            .field("signature", &self.signature.as_ref().map(ToString::to_string))
            .finish_non_exhaustive()
    }
}
