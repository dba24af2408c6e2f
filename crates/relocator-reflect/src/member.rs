use crate::call_site::CallSiteValues;
use crate::class_ref::ClassRef;
use crate::descriptors::ParameterDescriptors;
use crate::error::Result;
use crate::method_type_ref::MethodTypeRef;
use crate::reference::{ResolvedField, ResolvedMethod, ResolvedTarget};
use crate::string_ref::StringRef;

/// A field looked up reflectively, e.g. by `Class.getField(name)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldRef {
    pub owner: ClassRef,
    pub name: StringRef,
    /// `None` when the lookup does not constrain the field type.
    pub field_type: Option<ClassRef>,
}

impl FieldRef {
    pub fn new(owner: ClassRef, name: StringRef, field_type: Option<ClassRef>) -> Self {
        Self {
            owner,
            name,
            field_type,
        }
    }

    pub fn check_usable(&self, descriptors: &ParameterDescriptors) -> Result<()> {
        self.owner.check_usable(descriptors)?;
        self.name.check_usable(descriptors)?;
        match &self.field_type {
            Some(field_type) => field_type.check_usable(descriptors),
            None => Ok(()),
        }
    }

    pub fn resolve(&self, values: &CallSiteValues) -> Option<ResolvedField> {
        let owner = object_owner(self.owner.resolve(values)?)?;
        let name = self.name.resolve(values)?;
        Some(match self.field_type.as_ref().and_then(|t| t.resolve(values)) {
            None => ResolvedField::Partial { owner, name },
            Some(descriptor) => ResolvedField::Full {
                owner,
                name,
                descriptor,
            },
        })
    }
}

impl std::fmt::Display for FieldRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FieldRef(owner={}, name={}", self.owner, self.name)?;
        if let Some(field_type) = &self.field_type {
            write!(f, ", type={}", field_type)?;
        }
        f.write_str(")")
    }
}

/// A method looked up reflectively, e.g. by `Class.getMethod(name, types)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodRef {
    pub owner: ClassRef,
    pub name: StringRef,
    /// `None` when the lookup does not constrain the method type.
    pub method_type: Option<MethodTypeRef>,
}

impl MethodRef {
    pub fn new(owner: ClassRef, name: StringRef, method_type: Option<MethodTypeRef>) -> Self {
        Self {
            owner,
            name,
            method_type,
        }
    }

    pub fn check_usable(&self, descriptors: &ParameterDescriptors) -> Result<()> {
        self.owner.check_usable(descriptors)?;
        self.name.check_usable(descriptors)?;
        match &self.method_type {
            Some(method_type) => method_type.check_usable(descriptors),
            None => Ok(()),
        }
    }

    pub fn resolve(&self, values: &CallSiteValues) -> Option<ResolvedMethod> {
        let owner = object_owner(self.owner.resolve(values)?)?;
        let name = self.name.resolve(values)?;
        Some(match self.method_type.as_ref().and_then(|t| t.resolve(values)) {
            None => ResolvedMethod::Typeless { owner, name },
            Some(parameters) if parameters.ends_with(')') => ResolvedMethod::Partial {
                owner,
                name,
                parameters,
            },
            Some(descriptor) => ResolvedMethod::Full {
                owner,
                name,
                descriptor,
            },
        })
    }
}

impl std::fmt::Display for MethodRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MethodRef(owner={}, name={}", self.owner, self.name)?;
        if let Some(method_type) = &self.method_type {
            write!(f, ", type={}", method_type)?;
        }
        f.write_str(")")
    }
}

/// Internal name of an object class descriptor; `None` for primitives and arrays.
fn object_owner(descriptor: String) -> Option<String> {
    descriptor
        .strip_prefix('L')
        .and_then(|rest| rest.strip_suffix(';'))
        .map(str::to_string)
}

/// What a mapped member call produces.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MemberRef {
    Class(ClassRef),
    Field(FieldRef),
    Method(MethodRef),
}

impl MemberRef {
    pub fn check_usable(&self, descriptors: &ParameterDescriptors) -> Result<()> {
        match self {
            MemberRef::Class(class) => class.check_usable(descriptors),
            MemberRef::Field(field) => field.check_usable(descriptors),
            MemberRef::Method(method) => method.check_usable(descriptors),
        }
    }

    pub fn resolve(&self, values: &CallSiteValues) -> Option<ResolvedTarget> {
        match self {
            MemberRef::Class(class) => class.resolve(values).map(ResolvedTarget::Class),
            MemberRef::Field(field) => field.resolve(values).map(ResolvedTarget::Field),
            MemberRef::Method(method) => method.resolve(values).map(ResolvedTarget::Method),
        }
    }
}

impl std::fmt::Display for MemberRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MemberRef::Class(class) => write!(f, "{}", class),
            MemberRef::Field(field) => write!(f, "{}", field),
            MemberRef::Method(method) => write!(f, "{}", method),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::call_site::ConstantValue;

    fn class_array(descriptors: &[&str]) -> ConstantValue {
        ConstantValue::Array(
            descriptors
                .iter()
                .map(|d| ConstantValue::Class(d.to_string()))
                .collect(),
        )
    }

    #[test]
    fn get_method_resolves_to_partial_reference() {
        let method = MethodRef::new(
            ClassRef::RECEIVER,
            StringRef::param(0).unwrap(),
            Some(MethodTypeRef::parameter_types(1).unwrap()),
        );
        let values = CallSiteValues::new(vec![
            Some(ConstantValue::String("run".to_string())),
            Some(class_array(&["I"])),
        ])
        .with_receiver(ConstantValue::Class("Lcom/example/Task;".to_string()));

        assert_eq!(
            method.resolve(&values),
            Some(ResolvedMethod::Partial {
                owner: "com/example/Task".to_string(),
                name: "run".to_string(),
                parameters: "(I)".to_string(),
            })
        );
    }

    #[test]
    fn unknown_type_falls_back_to_typeless() {
        let method = MethodRef::new(
            ClassRef::named_constant("a.B"),
            StringRef::constant("m"),
            Some(MethodTypeRef::parameter_types(0).unwrap()),
        );
        assert_eq!(
            method.resolve(&CallSiteValues::default()),
            Some(ResolvedMethod::Typeless {
                owner: "a/B".to_string(),
                name: "m".to_string(),
            })
        );
    }

    #[test]
    fn full_method_type() {
        let method = MethodRef::new(
            ClassRef::named_constant("a/B"),
            StringRef::constant("m"),
            Some(MethodTypeRef::full_descriptor_constant("(J)V")),
        );
        assert_eq!(
            MemberRef::Method(method).resolve(&CallSiteValues::default()),
            Some(ResolvedTarget::Method(ResolvedMethod::Full {
                owner: "a/B".to_string(),
                name: "m".to_string(),
                descriptor: "(J)V".to_string(),
            }))
        );
    }

    #[test]
    fn primitive_and_array_owners_do_not_resolve() {
        let field = FieldRef::new(ClassRef::INT, StringRef::constant("x"), None);
        assert_eq!(field.resolve(&CallSiteValues::default()), None);
        let array_owner = FieldRef::new(ClassRef::named_constant("[I"), StringRef::constant("x"), None);
        assert_eq!(array_owner.resolve(&CallSiteValues::default()), None);
    }

    #[test]
    fn field_with_type() {
        let field = FieldRef::new(
            ClassRef::named_constant("a/B"),
            StringRef::constant("count"),
            Some(ClassRef::INT),
        );
        assert_eq!(
            field.resolve(&CallSiteValues::default()),
            Some(ResolvedField::Full {
                owner: "a/B".to_string(),
                name: "count".to_string(),
                descriptor: "I".to_string(),
            })
        );
        assert_eq!(
            field.to_string(),
            "FieldRef(owner=ClassRef(name='a/B'), name=StringRef('count'), type=ClassRef(descriptor='I'))"
        );
    }
}
