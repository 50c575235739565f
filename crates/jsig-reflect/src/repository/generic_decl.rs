use std::fmt;
use std::sync::OnceLock;

use jsig_tree::GenericSignature;

use crate::factory::GenericsFactory;
use crate::reifier::Reifier;

/// Formal type parameters of a class, method or constructor signature.
pub struct GenericDeclRepository<S, F: GenericsFactory> {
    tree: S,
    factory: F,
    type_parameters: OnceLock<Vec<F::Type>>,
}

impl<S: GenericSignature, F: GenericsFactory> GenericDeclRepository<S, F> {
    pub fn new(tree: S, factory: F) -> Self {
        Self {
            tree,
            factory,
            type_parameters: OnceLock::new(),
        }
    }

    pub fn tree(&self) -> &S {
        &self.tree
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    pub fn reifier(&self) -> Reifier<'_, F> {
        Reifier::make(&self.factory)
    }

    /// Never fails: bounds stay unreified until asked for.
    pub fn type_parameters(&self) -> Vec<F::Type> {
        self.type_parameters
            .get_or_init(|| {
                self.reifier()
                    .reify_formal_type_parameters(self.tree.formal_type_parameters())
            })
            .clone()
    }
}

impl<S: fmt::Debug, F: GenericsFactory> fmt::Debug for GenericDeclRepository<S, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenericDeclRepository")
            .field("tree", &self.tree)
            .field("type_parameters_reified", &self.type_parameters.get().is_some())
            .finish_non_exhaustive()
    }
}
