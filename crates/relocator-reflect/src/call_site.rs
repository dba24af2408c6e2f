use crate::slot::ParamSlot;

/// A value known at a call site, as recovered by constant propagation.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstantValue {
    Int(i32),
    Long(i64),
    String(String),
    /// A `Class` constant, as a field descriptor (`Ljava/lang/String;`, `I`, `[J`).
    Class(String),
    /// A `MethodType` constant, as a method descriptor.
    MethodType(String),
    /// An array literal whose elements are all known.
    Array(Vec<ConstantValue>),
}

impl ConstantValue {
    pub fn as_string(&self) -> Option<&str> {
        match self {
            ConstantValue::String(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn as_class(&self) -> Option<&str> {
        match self {
            ConstantValue::Class(descriptor) => Some(descriptor.as_str()),
            _ => None,
        }
    }

    pub fn as_method_type(&self) -> Option<&str> {
        match self {
            ConstantValue::MethodType(descriptor) => Some(descriptor.as_str()),
            _ => None,
        }
    }

    /// Element descriptors of an array made only of class constants.
    pub fn as_class_array(&self) -> Option<Vec<&str>> {
        match self {
            ConstantValue::Array(values) => values.iter().map(ConstantValue::as_class).collect(),
            _ => None,
        }
    }
}

/// The receiver and arguments of one call, each either known or unknown.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallSiteValues {
    receiver: Option<ConstantValue>,
    parameters: Vec<Option<ConstantValue>>,
}

impl CallSiteValues {
    pub fn new(parameters: Vec<Option<ConstantValue>>) -> Self {
        Self {
            receiver: None,
            parameters,
        }
    }

    pub fn with_receiver(mut self, receiver: ConstantValue) -> Self {
        self.receiver = Some(receiver);
        self
    }

    /// The value in `slot`; `None` when unknown or absent.
    pub fn get(&self, slot: ParamSlot) -> Option<&ConstantValue> {
        match slot {
            ParamSlot::Receiver => self.receiver.as_ref(),
            ParamSlot::Index(index) => self.parameters.get(usize::from(index))?.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_slot() {
        let values = CallSiteValues::new(vec![
            Some(ConstantValue::String("a.B".to_string())),
            None,
        ])
        .with_receiver(ConstantValue::Class("Ljava/lang/Object;".to_string()));

        assert_eq!(values.get(ParamSlot::Index(0)).and_then(ConstantValue::as_string), Some("a.B"));
        assert_eq!(values.get(ParamSlot::Index(1)), None);
        assert_eq!(values.get(ParamSlot::Index(7)), None);
        assert_eq!(
            values.get(ParamSlot::Receiver).and_then(ConstantValue::as_class),
            Some("Ljava/lang/Object;")
        );
    }

    #[test]
    fn class_array_requires_every_element() {
        let classes = ConstantValue::Array(vec![
            ConstantValue::Class("I".to_string()),
            ConstantValue::Class("Ljava/lang/String;".to_string()),
        ]);
        assert_eq!(classes.as_class_array(), Some(vec!["I", "Ljava/lang/String;"]));

        let mixed = ConstantValue::Array(vec![
            ConstantValue::Class("I".to_string()),
            ConstantValue::Int(3),
        ]);
        assert_eq!(mixed.as_class_array(), None);
    }
}
