pub mod builder;
mod cursor;
pub mod class_signature;
pub mod descriptor;
pub mod error;
pub mod method_signature;
pub mod names;
pub mod parser;
pub mod primitive;
pub mod type_argument;
pub mod type_parameter;
pub mod type_signature;

pub use builder::BuilderState;
pub use class_signature::{ClassSignature, ClassSignatureBuilder};
pub use descriptor::{validate_type_descriptor, MethodDescriptor};
pub use error::{BuilderStateError, Result, SignatureError};
pub use method_signature::{MethodSignature, MethodSignatureBuilder};
pub use names::{validate_internal_name, validate_simple_name};
pub use parser::TypeContext;
pub use primitive::PrimitiveType;
pub use type_argument::{TypeArgument, Variance};
pub use type_parameter::{TypeParameter, TypeParameterBuilder};
pub use type_signature::{ClassElement, ClassTypeBuilder, Kind, TypeSignature};

/// Parse `text` as a type signature valid in `context`.
pub fn parse_type_signature(text: &str, context: TypeContext) -> Result<TypeSignature> {
    parser::parse_type_signature(text, context)
}
