use std::fmt;
use std::sync::OnceLock;

use jsig_tree::{SignatureParser, TypeSignature};

use super::memoize;
use crate::error::Result;
use crate::factory::GenericsFactory;
use crate::reifier::Reifier;

/// The generic type of a field. Fields declare no type parameters.
pub struct FieldRepository<F: GenericsFactory> {
    tree: TypeSignature,
    factory: F,
    generic_type: OnceLock<F::Type>,
}

impl<F: GenericsFactory> FieldRepository<F> {
    pub fn new(tree: TypeSignature, factory: F) -> Self {
        Self {
            tree,
            factory,
            generic_type: OnceLock::new(),
        }
    }

    pub fn parse(
        signature: &str,
        parser: &dyn SignatureParser,
        factory: F,
    ) -> jsig_tree::Result<Self> {
        Ok(Self::new(parser.parse_field_signature(signature)?, factory))
    }

    pub fn tree(&self) -> &TypeSignature {
        &self.tree
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    pub fn generic_type(&self) -> Result<F::Type> {
        memoize(&self.generic_type, "field type", || {
            Reifier::make(&self.factory).reify_type(&self.tree)
        })
    }
}

impl<F: GenericsFactory> fmt::Debug for FieldRepository<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRepository")
            .field("tree", &self.tree)
            .finish_non_exhaustive()
    }
}
