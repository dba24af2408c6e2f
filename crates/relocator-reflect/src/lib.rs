pub mod call_site;
pub mod class_ref;
pub mod descriptors;
pub mod error;
#[doc(hidden)]
pub mod internal;
pub mod mappings;
pub mod member;
pub mod method_type_ref;
pub mod reference;
pub mod slot;
pub mod string_ref;

pub use call_site::{CallSiteValues, ConstantValue};
pub use class_ref::ClassRef;
pub use descriptors::ParameterDescriptors;
pub use error::{ReflectError, Result};
pub use mappings::ReflectionMappings;
pub use member::{FieldRef, MemberRef, MethodRef};
pub use method_type_ref::MethodTypeRef;
pub use reference::{FieldReference, MethodReference, ResolvedField, ResolvedMethod, ResolvedTarget};
pub use slot::ParamSlot;
pub use string_ref::StringRef;
