//! Concrete member references: the keys of the mapping table and the
//! results of resolving a reflective reference.

use relocator_signature::{
    validate_internal_name, validate_simple_name, validate_type_descriptor, MethodDescriptor,
    TypeContext,
};

use crate::error::Result;

/// A method by owner, name and descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodReference {
    owner: String,
    name: String,
    descriptor: MethodDescriptor,
}

impl MethodReference {
    /// `owner` may use dots or slashes as package separators.
    pub fn new(owner: &str, name: &str, descriptor: &str) -> Result<Self> {
        let owner = owner.replace('.', "/");
        validate_internal_name(&owner)?;
        if !matches!(name, "<init>" | "<clinit>") {
            validate_simple_name(name, "method name")?;
        }
        Ok(Self {
            owner,
            name: name.to_string(),
            descriptor: MethodDescriptor::parse(descriptor)?,
        })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn descriptor(&self) -> &MethodDescriptor {
        &self.descriptor
    }
}

impl std::fmt::Display for MethodReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "method {}.{}{}", self.owner, self.name, self.descriptor)
    }
}

/// A field by owner, name and descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldReference {
    owner: String,
    name: String,
    descriptor: String,
}

impl FieldReference {
    pub fn new(owner: &str, name: &str, descriptor: &str) -> Result<Self> {
        let owner = owner.replace('.', "/");
        validate_internal_name(&owner)?;
        validate_simple_name(name, "field name")?;
        validate_type_descriptor(descriptor, TypeContext::Value)?;
        Ok(Self {
            owner,
            name: name.to_string(),
            descriptor: descriptor.to_string(),
        })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }
}

impl std::fmt::Display for FieldReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "field {}.{}:{}", self.owner, self.name, self.descriptor)
    }
}

/// A field reference recovered from call-site values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResolvedField {
    /// Type unknown.
    Partial { owner: String, name: String },
    Full {
        owner: String,
        name: String,
        descriptor: String,
    },
}

/// A method reference recovered from call-site values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResolvedMethod {
    /// Any overload.
    Typeless { owner: String, name: String },
    /// Parameters known, return type unknown: `parameters` is `(...)`.
    Partial {
        owner: String,
        name: String,
        parameters: String,
    },
    Full {
        owner: String,
        name: String,
        descriptor: String,
    },
}

/// The outcome of resolving a mapping.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResolvedTarget {
    /// A class, as a field descriptor.
    Class(String),
    Field(ResolvedField),
    Method(ResolvedMethod),
}

impl std::fmt::Display for ResolvedTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolvedTarget::Class(descriptor) => write!(f, "class {}", descriptor),
            ResolvedTarget::Field(ResolvedField::Partial { owner, name }) => {
                write!(f, "field {}.{}", owner, name)
            }
            ResolvedTarget::Field(ResolvedField::Full {
                owner,
                name,
                descriptor,
            }) => write!(f, "field {}.{}:{}", owner, name, descriptor),
            ResolvedTarget::Method(ResolvedMethod::Typeless { owner, name }) => {
                write!(f, "method {}.{}", owner, name)
            }
            ResolvedTarget::Method(ResolvedMethod::Partial {
                owner,
                name,
                parameters,
            }) => write!(f, "method {}.{}{}", owner, name, parameters),
            ResolvedTarget::Method(ResolvedMethod::Full {
                owner,
                name,
                descriptor,
            }) => write!(f, "method {}.{}{}", owner, name, descriptor),
        }
    }
}
