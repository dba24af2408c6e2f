use crate::call_site::CallSiteValues;
use crate::class_ref::ClassRef;
use crate::descriptors::{ParameterDescriptors, CLASS_ARRAY, METHOD_TYPE};
use crate::error::Result;
use crate::internal::Representation;
use crate::slot::ParamSlot;
use crate::string_ref::StringRef;

/// A method type computed at a call site.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodTypeRef(MethodTypeRepr);

#[doc(hidden)]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MethodTypeRepr {
    /// Parameter part only, `(...)`.
    PartialDescriptor(StringRef),
    /// `(...)ret`.
    FullDescriptor(StringRef),
    /// A `Class[]` of parameter types; the return type is unknown.
    ParameterTypes(ParamSlot),
    /// A `Class[]` of parameter types plus a declared return type.
    ParameterAndReturnTypes(ParamSlot, Box<ClassRef>),
    /// A `MethodType` instance passed at the call.
    Param(ParamSlot),
}

impl MethodTypeRef {
    /// The receiver as a `MethodType`.
    pub const RECEIVER: MethodTypeRef = MethodTypeRef(MethodTypeRepr::Param(ParamSlot::Receiver));
    /// The receiver as a `Class[]` of parameter types.
    pub const RECEIVER_PARAMETER_TYPES: MethodTypeRef =
        MethodTypeRef(MethodTypeRepr::ParameterTypes(ParamSlot::Receiver));

    pub fn partial_descriptor(descriptor: StringRef) -> Self {
        MethodTypeRef(MethodTypeRepr::PartialDescriptor(descriptor))
    }

    pub fn full_descriptor(descriptor: StringRef) -> Self {
        MethodTypeRef(MethodTypeRepr::FullDescriptor(descriptor))
    }

    /// Shorthand for `full_descriptor(StringRef::constant(descriptor))`.
    pub fn full_descriptor_constant(descriptor: impl Into<String>) -> Self {
        Self::full_descriptor(StringRef::constant(descriptor))
    }

    /// Parameter types from the `Class[]` argument at `index`; `-1` denotes the receiver.
    pub fn parameter_types(index: i32) -> Result<Self> {
        Ok(MethodTypeRef(MethodTypeRepr::ParameterTypes(
            ParamSlot::from_index(index)?,
        )))
    }

    pub fn parameter_and_return_types(index: i32, returns: ClassRef) -> Result<Self> {
        Ok(MethodTypeRef(MethodTypeRepr::ParameterAndReturnTypes(
            ParamSlot::from_index(index)?,
            Box::new(returns),
        )))
    }

    /// The `MethodType` argument at `index`; `-1` denotes the receiver.
    pub fn param(index: i32) -> Result<Self> {
        Ok(MethodTypeRef(MethodTypeRepr::Param(ParamSlot::from_index(
            index,
        )?)))
    }

    pub fn check_usable(&self, descriptors: &ParameterDescriptors) -> Result<()> {
        match &self.0 {
            MethodTypeRepr::PartialDescriptor(descriptor)
            | MethodTypeRepr::FullDescriptor(descriptor) => descriptor.check_usable(descriptors),
            MethodTypeRepr::ParameterTypes(slot) => descriptors.require(*slot, CLASS_ARRAY),
            MethodTypeRepr::ParameterAndReturnTypes(slot, returns) => {
                descriptors.require(*slot, CLASS_ARRAY)?;
                returns.check_usable(descriptors)
            }
            MethodTypeRepr::Param(slot) => descriptors.require(*slot, METHOD_TYPE),
        }
    }

    /// The method type as a descriptor: `(...)` when only the parameters
    /// are known, `(...)ret` otherwise. `None` if any input is unknown.
    pub fn resolve(&self, values: &CallSiteValues) -> Option<String> {
        match &self.0 {
            MethodTypeRepr::PartialDescriptor(descriptor) => descriptor
                .resolve(values)
                .filter(|text| text.ends_with(')')),
            MethodTypeRepr::FullDescriptor(descriptor) => descriptor
                .resolve(values)
                .filter(|text| !text.is_empty() && !text.ends_with(')')),
            MethodTypeRepr::ParameterTypes(slot) => parameter_list(values, *slot),
            MethodTypeRepr::ParameterAndReturnTypes(slot, returns) => {
                let mut descriptor = parameter_list(values, *slot)?;
                descriptor.push_str(&returns.resolve(values)?);
                Some(descriptor)
            }
            MethodTypeRepr::Param(slot) => values.get(*slot)?.as_method_type().map(str::to_string),
        }
    }
}

fn parameter_list(values: &CallSiteValues, slot: ParamSlot) -> Option<String> {
    let classes = values.get(slot)?.as_class_array()?;
    Some(format!("({})", classes.concat()))
}

impl Representation for MethodTypeRef {
    type Repr = MethodTypeRepr;

    fn repr(&self) -> &MethodTypeRepr {
        &self.0
    }
}

impl std::fmt::Display for MethodTypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            MethodTypeRepr::PartialDescriptor(descriptor)
            | MethodTypeRepr::FullDescriptor(descriptor) => {
                write!(f, "MethodTypeRef(descriptor={})", descriptor.data())
            }
            MethodTypeRepr::ParameterTypes(slot) => write!(f, "MethodTypeRef(params={})", slot),
            MethodTypeRepr::ParameterAndReturnTypes(slot, returns) => {
                write!(f, "MethodTypeRef(params={}, return={})", slot, returns)
            }
            MethodTypeRepr::Param(slot) => write!(f, "MethodTypeRef(instance={})", slot),
        }
    }
}
