use std::fmt;
use std::sync::OnceLock;

use jsig_tree::{MethodTypeSignature, SignatureParser};

use super::{memoize, ConstructorRepository};
use crate::error::Result;
use crate::factory::GenericsFactory;

/// A [`ConstructorRepository`] plus the return type.
pub struct MethodRepository<F: GenericsFactory> {
    constructor: ConstructorRepository<F>,
    return_type: OnceLock<F::Type>,
}

impl<F: GenericsFactory> MethodRepository<F> {
    pub fn new(tree: MethodTypeSignature, factory: F) -> Self {
        Self {
            constructor: ConstructorRepository::new(tree, factory),
            return_type: OnceLock::new(),
        }
    }

    pub fn parse(
        signature: &str,
        parser: &dyn SignatureParser,
        factory: F,
    ) -> jsig_tree::Result<Self> {
        Ok(Self::new(parser.parse_method_signature(signature)?, factory))
    }

    pub fn as_constructor(&self) -> &ConstructorRepository<F> {
        &self.constructor
    }

    pub fn tree(&self) -> &MethodTypeSignature {
        self.constructor.tree()
    }

    pub fn factory(&self) -> &F {
        self.constructor.factory()
    }

    pub fn type_parameters(&self) -> Vec<F::Type> {
        self.constructor.type_parameters()
    }

    pub fn parameter_types(&self) -> Result<Vec<F::Type>> {
        self.constructor.parameter_types()
    }

    pub fn exception_types(&self) -> Result<Vec<F::Type>> {
        self.constructor.exception_types()
    }

    pub fn return_type(&self) -> Result<F::Type> {
        memoize(&self.return_type, "return type", || {
            self.constructor
                .decl()
                .reifier()
                .reify_return_type(self.tree().return_type())
        })
    }
}

impl<F: GenericsFactory> fmt::Debug for MethodRepository<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodRepository")
            .field("constructor", &self.constructor)
            .finish_non_exhaustive()
    }
}
