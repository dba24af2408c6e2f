use crate::error::{ReflectError, Result};

/// Where a reference reads its input from at a call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ParamSlot {
    /// The receiver (`this`) of the call.
    Receiver,
    /// A positional argument. The JVM caps parameter slots at 16 bits.
    Index(u16),
}

impl ParamSlot {
    /// Index-based lookup kept for callers that use `-1` for the receiver.
    pub fn from_index(index: i32) -> Result<Self> {
        match index {
            -1 => Ok(ParamSlot::Receiver),
            _ => u16::try_from(index)
                .map(ParamSlot::Index)
                .map_err(|_| ReflectError::IndexOutOfRange(i64::from(index))),
        }
    }

    pub fn is_receiver(self) -> bool {
        self == ParamSlot::Receiver
    }
}

impl std::fmt::Display for ParamSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamSlot::Receiver => f.write_str("this"),
            ParamSlot::Index(index) => write!(f, "param#{}", index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minus_one_is_receiver() {
        assert_eq!(ParamSlot::from_index(-1).unwrap(), ParamSlot::Receiver);
        assert_eq!(ParamSlot::from_index(0).unwrap(), ParamSlot::Index(0));
        assert_eq!(ParamSlot::from_index(65535).unwrap(), ParamSlot::Index(65535));
    }

    #[test]
    fn out_of_range_indices() {
        for index in [-2, i32::MIN, 65536] {
            assert_eq!(
                ParamSlot::from_index(index).unwrap_err(),
                ReflectError::IndexOutOfRange(i64::from(index))
            );
        }
    }

    #[test]
    fn display_names() {
        assert_eq!(ParamSlot::Receiver.to_string(), "this");
        assert_eq!(ParamSlot::Index(2).to_string(), "param#2");
    }
}
