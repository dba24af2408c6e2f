use crate::error::{ReflectError, Result};
use crate::reference::{FieldReference, MethodReference};
use crate::slot::ParamSlot;

pub(crate) const STRING: &str = "Ljava/lang/String;";
pub(crate) const CLASS: &str = "Ljava/lang/Class;";
pub(crate) const CLASS_ARRAY: &str = "[Ljava/lang/Class;";
pub(crate) const METHOD_TYPE: &str = "Ljava/lang/invoke/MethodType;";

/// Static types available at a call of a mapped member: the receiver and
/// each parameter, as field descriptors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDescriptors {
    receiver: String,
    parameters: Vec<String>,
}

impl ParameterDescriptors {
    pub fn new(receiver: impl Into<String>, parameters: Vec<String>) -> Self {
        Self {
            receiver: receiver.into(),
            parameters,
        }
    }

    pub fn for_method(reference: &MethodReference) -> Self {
        Self::new(
            format!("L{};", reference.owner()),
            reference.descriptor().parameters().map(str::to_string).collect(),
        )
    }

    /// Fields take no parameters; only the receiver is available.
    pub fn for_field(reference: &FieldReference) -> Self {
        Self::new(format!("L{};", reference.owner()), Vec::new())
    }

    pub fn get(&self, slot: ParamSlot) -> Option<&str> {
        match slot {
            ParamSlot::Receiver => Some(self.receiver.as_str()),
            ParamSlot::Index(index) => self.parameters.get(usize::from(index)).map(String::as_str),
        }
    }

    /// Fail unless `slot` exists and has exactly the descriptor `expected`.
    pub fn require(&self, slot: ParamSlot, expected: &'static str) -> Result<()> {
        match self.get(slot) {
            Some(actual) if actual == expected => Ok(()),
            actual => Err(ReflectError::ParameterMismatch {
                slot,
                expected,
                actual: actual.map(str::to_string),
            }),
        }
    }
}
