#![forbid(unsafe_code)]

mod descriptor;
mod display;
mod error;
mod parse;
mod signature;

pub use crate::descriptor::{parse_field_descriptor, parse_method_descriptor};
pub use crate::descriptor::{BaseType, FieldType, MethodDescriptor};
pub use crate::error::{Error, Result};
pub use crate::parse::SignatureParser;
pub use crate::signature::{
    ArrayTypeSignature, ClassSignature, ClassTypeSignature, FieldTypeSignature,
    FormalTypeParameter, GenericSignature, MethodTypeSignature, ReturnType,
    SimpleClassTypeSignature, TypeSignature, TypeVariableSignature, Wildcard,
    OBJECT_INTERNAL_NAME,
};
