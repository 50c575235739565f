use thiserror::Error;

pub type Result<T, E = ReifyError> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReifyError {
    /// A named class could not be found by the declaration's loader.
    #[error("type {name} not present")]
    TypeNotPresent { name: String },

    #[error("type variable {name} is not declared in any enclosing scope")]
    UnresolvedTypeVariable { name: String },

    #[error("malformed parameterized type {raw}: expected {expected} type arguments, found {found}")]
    MalformedParameterizedType {
        raw: String,
        expected: usize,
        found: usize,
    },

    /// The raw type of a parameterized type was not a class.
    #[error("{0} cannot be the raw type of a parameterized type")]
    InvalidRawType(String),

    #[error("the bottom signature cannot be reified")]
    BottomSignature,

    /// The declaration a lazily reified type belongs to no longer exists.
    #[error("generic declaration was dropped before {what} could be reified")]
    DeclarationDropped { what: &'static str },

    #[error(transparent)]
    Signature(#[from] jsig_tree::Error),
}
