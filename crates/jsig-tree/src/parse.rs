use crate::error::Result;
use crate::signature::{ClassSignature, MethodTypeSignature, TypeSignature};

/// Turns signature text into trees.
///
/// The grammar parser lives outside this workspace; repositories accept any implementation.
/// Implementations report malformed input as [`crate::Error::InvalidSignature`].
pub trait SignatureParser {
    fn parse_class_signature(&self, signature: &str) -> Result<ClassSignature>;

    fn parse_method_signature(&self, signature: &str) -> Result<MethodTypeSignature>;

    /// Field signatures are parsed as type signatures so that a primitive field type can share
    /// the same path.
    fn parse_field_signature(&self, signature: &str) -> Result<TypeSignature>;
}
