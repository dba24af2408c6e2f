use relocator_signature::{ClassSignature, MethodSignature, SignatureError, TypeParameter, TypeSignature};

/// Which grammar production a command-line argument is parsed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SignatureKind {
    /// A type signature, `void` included
    Type,
    /// A class signature (`Signature` attribute of a class)
    Class,
    /// A method signature (`Signature` attribute of a method)
    Method,
    /// A single formal type parameter
    Param,
}

impl SignatureKind {
    pub fn label(self) -> &'static str {
        match self {
            SignatureKind::Type => "type signature",
            SignatureKind::Class => "class signature",
            SignatureKind::Method => "method signature",
            SignatureKind::Param => "type parameter",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedSignature {
    Type(TypeSignature),
    Class(ClassSignature),
    Method(MethodSignature),
    Param(TypeParameter),
}

impl ParsedSignature {
    pub fn parse(kind: SignatureKind, text: &str) -> Result<Self, SignatureError> {
        tracing::debug!(kind = kind.label(), text, "parsing");
        Ok(match kind {
            SignatureKind::Type => ParsedSignature::Type(TypeSignature::parse(text)?),
            SignatureKind::Class => ParsedSignature::Class(ClassSignature::parse(text)?),
            SignatureKind::Method => ParsedSignature::Method(MethodSignature::parse(text)?),
            SignatureKind::Param => ParsedSignature::Param(TypeParameter::parse(text)?),
        })
    }

    pub fn kind(&self) -> SignatureKind {
        match self {
            ParsedSignature::Type(_) => SignatureKind::Type,
            ParsedSignature::Class(_) => SignatureKind::Class,
            ParsedSignature::Method(_) => SignatureKind::Method,
            ParsedSignature::Param(_) => SignatureKind::Param,
        }
    }

    /// Distinct internal class names in first-seen order.
    pub fn class_names(&self) -> Vec<&str> {
        match self {
            ParsedSignature::Type(sig) => sig.class_names(),
            ParsedSignature::Class(sig) => sig.class_names(),
            ParsedSignature::Method(sig) => sig.class_names(),
            ParsedSignature::Param(param) => param.class_names(),
        }
    }
}

impl std::fmt::Display for ParsedSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParsedSignature::Type(sig) => write!(f, "{}", sig),
            ParsedSignature::Class(sig) => write!(f, "{}", sig),
            ParsedSignature::Method(sig) => write!(f, "{}", sig),
            ParsedSignature::Param(param) => write!(f, "{}", param),
        }
    }
}
