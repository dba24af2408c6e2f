/// The eight JVM primitive types plus `void`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Void,
    Byte,
    Char,
    Double,
    Float,
    Int,
    Long,
    Short,
    Boolean,
}

impl PrimitiveType {
    pub const ALL: [PrimitiveType; 9] = [
        PrimitiveType::Void,
        PrimitiveType::Byte,
        PrimitiveType::Char,
        PrimitiveType::Double,
        PrimitiveType::Float,
        PrimitiveType::Int,
        PrimitiveType::Long,
        PrimitiveType::Short,
        PrimitiveType::Boolean,
    ];

    /// The one-letter descriptor (`V`, `B`, `C`, `D`, `F`, `I`, `J`, `S`, `Z`).
    pub const fn descriptor(self) -> &'static str {
        match self {
            PrimitiveType::Void => "V",
            PrimitiveType::Byte => "B",
            PrimitiveType::Char => "C",
            PrimitiveType::Double => "D",
            PrimitiveType::Float => "F",
            PrimitiveType::Int => "I",
            PrimitiveType::Long => "J",
            PrimitiveType::Short => "S",
            PrimitiveType::Boolean => "Z",
        }
    }

    /// Look up a value (non-void) primitive by its descriptor letter.
    pub fn from_value_descriptor(ch: char) -> Option<Self> {
        match ch {
            'B' => Some(PrimitiveType::Byte),
            'C' => Some(PrimitiveType::Char),
            'D' => Some(PrimitiveType::Double),
            'F' => Some(PrimitiveType::Float),
            'I' => Some(PrimitiveType::Int),
            'J' => Some(PrimitiveType::Long),
            'S' => Some(PrimitiveType::Short),
            'Z' => Some(PrimitiveType::Boolean),
            _ => None,
        }
    }

    /// Java source keyword, for human-readable output.
    pub fn keyword(self) -> &'static str {
        match self {
            PrimitiveType::Void => "void",
            PrimitiveType::Byte => "byte",
            PrimitiveType::Char => "char",
            PrimitiveType::Double => "double",
            PrimitiveType::Float => "float",
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "long",
            PrimitiveType::Short => "short",
            PrimitiveType::Boolean => "boolean",
        }
    }
}

impl std::fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.descriptor())
    }
}
