use std::borrow::Cow;

use crate::call_site::CallSiteValues;
use crate::descriptors::{ParameterDescriptors, STRING};
use crate::error::Result;
use crate::internal::Representation;
use crate::slot::ParamSlot;

/// A string computed at a call site: a constant, a `String` argument, or
/// a concatenation of those.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StringRef(StringRepr);

#[doc(hidden)]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StringRepr {
    Param(ParamSlot),
    Constant(Cow<'static, str>),
    Joined(Vec<StringRef>),
}

impl StringRef {
    /// The receiver of the call, which must be a `String`.
    pub const RECEIVER: StringRef = StringRef(StringRepr::Param(ParamSlot::Receiver));

    /// The argument at `index`; `-1` denotes the receiver.
    pub fn param(index: i32) -> Result<Self> {
        Ok(Self::slot(ParamSlot::from_index(index)?))
    }

    pub const fn slot(slot: ParamSlot) -> Self {
        StringRef(StringRepr::Param(slot))
    }

    pub fn constant(value: impl Into<String>) -> Self {
        StringRef(StringRepr::Constant(Cow::Owned(value.into())))
    }

    pub(crate) const fn constant_static(value: &'static str) -> Self {
        StringRef(StringRepr::Constant(Cow::Borrowed(value)))
    }

    /// Concatenation of `parts`, in order.
    pub fn joined(parts: impl IntoIterator<Item = StringRef>) -> Self {
        StringRef(StringRepr::Joined(parts.into_iter().collect()))
    }

    /// The constant text, if this reference is a plain constant.
    pub fn as_constant(&self) -> Option<&str> {
        match &self.0 {
            StringRepr::Constant(value) => Some(&**value),
            _ => None,
        }
    }

    /// Check every slot this reference reads holds a `String`.
    pub fn check_usable(&self, descriptors: &ParameterDescriptors) -> Result<()> {
        match &self.0 {
            StringRepr::Param(slot) => descriptors.require(*slot, STRING),
            StringRepr::Constant(_) => Ok(()),
            StringRepr::Joined(parts) => parts
                .iter()
                .try_for_each(|part| part.check_usable(descriptors)),
        }
    }

    /// The concrete string, or `None` if any input is unknown.
    pub fn resolve(&self, values: &CallSiteValues) -> Option<String> {
        match &self.0 {
            StringRepr::Param(slot) => values.get(*slot)?.as_string().map(str::to_string),
            StringRepr::Constant(value) => Some(value.to_string()),
            StringRepr::Joined(parts) => parts.iter().map(|part| part.resolve(values)).collect(),
        }
    }

    /// The body of the rendering, without the `StringRef(...)` wrapper.
    pub(crate) fn data(&self) -> String {
        match &self.0 {
            StringRepr::Param(slot) => slot.to_string(),
            StringRepr::Constant(value) => format!("'{}'", value),
            StringRepr::Joined(parts) => parts
                .iter()
                .map(StringRef::data)
                .collect::<Vec<_>>()
                .join(" + "),
        }
    }
}

impl Representation for StringRef {
    type Repr = StringRepr;

    fn repr(&self) -> &StringRepr {
        &self.0
    }
}

impl std::fmt::Display for StringRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "StringRef({})", self.data())
    }
}
