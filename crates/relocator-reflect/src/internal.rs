//! Access to the expression trees behind the public reference types.
//!
//! For analysis code that needs to walk a reference rather than evaluate
//! it. Not part of the stable surface.

pub use crate::class_ref::ClassRepr;
pub use crate::method_type_ref::MethodTypeRepr;
pub use crate::string_ref::StringRepr;

pub trait Representation {
    type Repr;

    fn repr(&self) -> &Self::Repr;
}
