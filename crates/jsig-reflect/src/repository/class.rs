use std::fmt;
use std::sync::OnceLock;

use jsig_tree::{ClassSignature, SignatureParser};

use super::{memoize, GenericDeclRepository};
use crate::error::Result;
use crate::factory::GenericsFactory;

pub struct ClassRepository<F: GenericsFactory> {
    decl: GenericDeclRepository<ClassSignature, F>,
    superclass: OnceLock<F::Type>,
    superinterfaces: OnceLock<Vec<F::Type>>,
}

impl<F: GenericsFactory> ClassRepository<F> {
    pub fn new(tree: ClassSignature, factory: F) -> Self {
        Self {
            decl: GenericDeclRepository::new(tree, factory),
            superclass: OnceLock::new(),
            superinterfaces: OnceLock::new(),
        }
    }

    /// Parses a `Signature` attribute of a class.
    pub fn parse(
        signature: &str,
        parser: &dyn SignatureParser,
        factory: F,
    ) -> jsig_tree::Result<Self> {
        Ok(Self::new(parser.parse_class_signature(signature)?, factory))
    }

    pub fn tree(&self) -> &ClassSignature {
        self.decl.tree()
    }

    pub fn factory(&self) -> &F {
        self.decl.factory()
    }

    pub fn type_parameters(&self) -> Vec<F::Type> {
        self.decl.type_parameters()
    }

    pub fn superclass(&self) -> Result<F::Type> {
        memoize(&self.superclass, "superclass", || {
            self.decl.reifier().reify_class_type(self.tree().superclass())
        })
    }

    pub fn superinterfaces(&self) -> Result<Vec<F::Type>> {
        memoize(&self.superinterfaces, "superinterfaces", || {
            self.decl
                .reifier()
                .reify_class_types(self.tree().superinterfaces())
        })
    }
}

impl<F: GenericsFactory> fmt::Debug for ClassRepository<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassRepository")
            .field("decl", &self.decl)
            .finish_non_exhaustive()
    }
}
