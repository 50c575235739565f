use std::fmt;
use std::sync::OnceLock;

use jsig_tree::{MethodTypeSignature, SignatureParser};

use super::{memoize, GenericDeclRepository};
use crate::error::Result;
use crate::factory::GenericsFactory;

/// Parameter and exception types of a constructor. Methods reuse it for those parts of their
/// signature.
pub struct ConstructorRepository<F: GenericsFactory> {
    decl: GenericDeclRepository<MethodTypeSignature, F>,
    parameter_types: OnceLock<Vec<F::Type>>,
    exception_types: OnceLock<Vec<F::Type>>,
}

impl<F: GenericsFactory> ConstructorRepository<F> {
    pub fn new(tree: MethodTypeSignature, factory: F) -> Self {
        Self {
            decl: GenericDeclRepository::new(tree, factory),
            parameter_types: OnceLock::new(),
            exception_types: OnceLock::new(),
        }
    }

    pub fn parse(
        signature: &str,
        parser: &dyn SignatureParser,
        factory: F,
    ) -> jsig_tree::Result<Self> {
        Ok(Self::new(parser.parse_method_signature(signature)?, factory))
    }

    pub fn tree(&self) -> &MethodTypeSignature {
        self.decl.tree()
    }

    pub fn factory(&self) -> &F {
        self.decl.factory()
    }

    pub(super) fn decl(&self) -> &GenericDeclRepository<MethodTypeSignature, F> {
        &self.decl
    }

    pub fn type_parameters(&self) -> Vec<F::Type> {
        self.decl.type_parameters()
    }

    pub fn parameter_types(&self) -> Result<Vec<F::Type>> {
        memoize(&self.parameter_types, "parameter types", || {
            self.decl.reifier().reify_all(self.tree().parameter_types())
        })
    }

    pub fn exception_types(&self) -> Result<Vec<F::Type>> {
        memoize(&self.exception_types, "exception types", || {
            self.decl
                .reifier()
                .reify_field_types(self.tree().exception_types())
        })
    }
}

impl<F: GenericsFactory> fmt::Debug for ConstructorRepository<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstructorRepository")
            .field("decl", &self.decl)
            .finish_non_exhaustive()
    }
}
