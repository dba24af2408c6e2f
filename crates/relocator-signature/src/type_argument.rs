use crate::error::{Result, SignatureError};
use crate::type_signature::{Kind, TypeSignature};

/// Variance marker of a type argument (`+`, `-`, or none).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variance {
    /// `+T`, i.e. `? extends T`
    Covariant,
    /// `-T`, i.e. `? super T`
    Contravariant,
    /// `T`
    Invariant,
}

impl Variance {
    /// The prefix written before the argument's type.
    pub fn marker(self) -> &'static str {
        match self {
            Variance::Covariant => "+",
            Variance::Contravariant => "-",
            Variance::Invariant => "",
        }
    }
}

/// A type argument of a parameterized class type: `*` or a
/// variance-tagged reference type.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TypeArgument(ArgumentRepr);

#[derive(Clone, PartialEq, Eq, Hash)]
enum ArgumentRepr {
    Wildcard,
    Bounded {
        signature: TypeSignature,
        variance: Variance,
    },
}

impl TypeArgument {
    /// The unbounded wildcard `*`.
    pub const WILDCARD: TypeArgument = TypeArgument(ArgumentRepr::Wildcard);

    /// A bounded argument. Primitive types (including `void`) are rejected;
    /// arrays of primitives are reference types and are accepted.
    pub fn of(signature: TypeSignature, variance: Variance) -> Result<Self> {
        if signature.kind() == Kind::Primitive {
            return Err(SignatureError::invalid_argument(format!(
                "primitive '{}' is not allowed as a type argument",
                signature
            )));
        }
        Ok(TypeArgument(ArgumentRepr::Bounded {
            signature,
            variance,
        }))
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self.0, ArgumentRepr::Wildcard)
    }

    /// The bound type; `None` for the wildcard.
    pub fn signature(&self) -> Option<&TypeSignature> {
        match &self.0 {
            ArgumentRepr::Wildcard => None,
            ArgumentRepr::Bounded { signature, .. } => Some(signature),
        }
    }

    /// The variance. The wildcard reports `Covariant` since `*` means `? extends Object`.
    pub fn variance(&self) -> Variance {
        match &self.0 {
            ArgumentRepr::Wildcard => Variance::Covariant,
            ArgumentRepr::Bounded { variance, .. } => *variance,
        }
    }

    pub(crate) fn write_to(&self, out: &mut String) {
        match &self.0 {
            ArgumentRepr::Wildcard => out.push('*'),
            ArgumentRepr::Bounded {
                signature,
                variance,
            } => {
                out.push_str(variance.marker());
                signature.write_to(out);
            }
        }
    }
}

impl std::fmt::Display for TypeArgument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut text = String::new();
        self.write_to(&mut text);
        f.write_str(&text)
    }
}

impl std::fmt::Debug for TypeArgument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TypeArgument({})", self)
    }
}
