use relocator_signature::PrimitiveType;

use crate::call_site::CallSiteValues;
use crate::descriptors::{ParameterDescriptors, CLASS};
use crate::error::Result;
use crate::internal::Representation;
use crate::slot::ParamSlot;
use crate::string_ref::StringRef;

/// A class computed at a call site.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassRef(ClassRepr);

#[doc(hidden)]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClassRepr {
    /// A binary or internal class name (`java.lang.String`, `[I`).
    Named(StringRef),
    /// A field descriptor (`Ljava/lang/String;`, `I`).
    Descriptor(StringRef),
    /// A `Class` instance passed at the call.
    Param(ParamSlot),
}

impl ClassRef {
    pub const VOID: ClassRef = ClassRef::primitive(PrimitiveType::Void);
    pub const BYTE: ClassRef = ClassRef::primitive(PrimitiveType::Byte);
    pub const CHAR: ClassRef = ClassRef::primitive(PrimitiveType::Char);
    pub const DOUBLE: ClassRef = ClassRef::primitive(PrimitiveType::Double);
    pub const FLOAT: ClassRef = ClassRef::primitive(PrimitiveType::Float);
    pub const INT: ClassRef = ClassRef::primitive(PrimitiveType::Int);
    pub const LONG: ClassRef = ClassRef::primitive(PrimitiveType::Long);
    pub const SHORT: ClassRef = ClassRef::primitive(PrimitiveType::Short);
    pub const BOOLEAN: ClassRef = ClassRef::primitive(PrimitiveType::Boolean);

    /// The receiver of the call, which must be a `Class`.
    pub const RECEIVER: ClassRef = ClassRef(ClassRepr::Param(ParamSlot::Receiver));

    pub const fn primitive(primitive: PrimitiveType) -> Self {
        ClassRef(ClassRepr::Descriptor(StringRef::constant_static(primitive.descriptor())))
    }

    pub fn named(name: StringRef) -> Self {
        ClassRef(ClassRepr::Named(name))
    }

    /// Shorthand for `named(StringRef::constant(name))`.
    pub fn named_constant(name: impl Into<String>) -> Self {
        Self::named(StringRef::constant(name))
    }

    pub fn descriptor(descriptor: StringRef) -> Self {
        ClassRef(ClassRepr::Descriptor(descriptor))
    }

    /// The `Class` argument at `index`; `-1` denotes the receiver.
    pub fn param(index: i32) -> Result<Self> {
        Ok(Self::slot(ParamSlot::from_index(index)?))
    }

    pub const fn slot(slot: ParamSlot) -> Self {
        ClassRef(ClassRepr::Param(slot))
    }

    pub fn check_usable(&self, descriptors: &ParameterDescriptors) -> Result<()> {
        match &self.0 {
            ClassRepr::Named(name) | ClassRepr::Descriptor(name) => name.check_usable(descriptors),
            ClassRepr::Param(slot) => descriptors.require(*slot, CLASS),
        }
    }

    /// The class as a field descriptor, or `None` if any input is unknown.
    pub fn resolve(&self, values: &CallSiteValues) -> Option<String> {
        match &self.0 {
            ClassRepr::Named(name) => {
                let name = name.resolve(values)?.replace('.', "/");
                if name.is_empty() {
                    None
                } else if name.starts_with('[') {
                    Some(name)
                } else {
                    Some(format!("L{};", name))
                }
            }
            ClassRepr::Descriptor(descriptor) => {
                let descriptor = descriptor.resolve(values)?.replace('.', "/");
                (!descriptor.is_empty()).then_some(descriptor)
            }
            ClassRepr::Param(slot) => values.get(*slot)?.as_class().map(str::to_string),
        }
    }
}

impl Representation for ClassRef {
    type Repr = ClassRepr;

    fn repr(&self) -> &ClassRepr {
        &self.0
    }
}

impl std::fmt::Display for ClassRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            ClassRepr::Named(name) => write!(f, "ClassRef(name={})", name.data()),
            ClassRepr::Descriptor(descriptor) => {
                write!(f, "ClassRef(descriptor={})", descriptor.data())
            }
            ClassRepr::Param(slot) => write!(f, "ClassRef(instance={})", slot),
        }
    }
}
