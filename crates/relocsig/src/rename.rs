//! Rebuild signatures with their class names replaced.
//!
//! Only the outermost name of each class type is looked up; inner class
//! segments are simple names and follow their outer class.

use std::collections::BTreeMap;

use relocator_signature::{
    ClassSignature, ClassTypeBuilder, Kind, MethodSignature, Result, TypeParameter,
    TypeParameterBuilder, TypeSignature,
};

use crate::signature::ParsedSignature;

pub struct Renamer<'a> {
    map: &'a BTreeMap<String, String>,
}

impl<'a> Renamer<'a> {
    pub fn new(map: &'a BTreeMap<String, String>) -> Self {
        Self { map }
    }

    fn name<'n>(&'n self, name: &'n str) -> &'n str {
        match self.map.get(name) {
            Some(renamed) => {
                tracing::debug!(from = name, to = %renamed, "renaming class");
                renamed
            }
            None => name,
        }
    }

    pub fn signature(&self, parsed: &ParsedSignature) -> Result<ParsedSignature> {
        Ok(match parsed {
            ParsedSignature::Type(sig) => ParsedSignature::Type(self.type_signature(sig)?),
            ParsedSignature::Class(sig) => ParsedSignature::Class(self.class_signature(sig)?),
            ParsedSignature::Method(sig) => ParsedSignature::Method(self.method_signature(sig)?),
            ParsedSignature::Param(param) => ParsedSignature::Param(self.type_parameter(param)?),
        })
    }

    pub fn type_signature(&self, sig: &TypeSignature) -> Result<TypeSignature> {
        match sig.kind() {
            Kind::Primitive | Kind::TypeVariable => Ok(sig.clone()),
            Kind::Array => self
                .type_signature(&sig.element_type())?
                .array(sig.array_dimensions()),
            Kind::Class => {
                let elements = sig.class_elements()?;
                let mut builder = ClassTypeBuilder::new(self.name(sig.root_class_name()?))?;
                for (index, element) in elements.iter().enumerate() {
                    if index > 0 {
                        builder.inner_class(element.name())?;
                    }
                    for argument in element.type_arguments() {
                        match argument.signature() {
                            None => builder.add_wildcard()?,
                            Some(bound) => builder
                                .add_type_argument_with(self.type_signature(bound)?, argument.variance())?,
                        };
                    }
                }
                builder.build()
            }
        }
    }

    pub fn type_parameter(&self, param: &TypeParameter) -> Result<TypeParameter> {
        let mut builder = TypeParameterBuilder::new(param.name())?;
        if let Some(bound) = param.class_bound() {
            builder.class_bound(self.type_signature(bound)?)?;
        }
        for bound in param.interface_bounds() {
            builder.add_interface_bound(self.type_signature(bound)?)?;
        }
        builder.build()
    }

    pub fn class_signature(&self, sig: &ClassSignature) -> Result<ClassSignature> {
        let mut builder = ClassSignature::builder();
        for param in sig.type_parameters() {
            builder.add_type_param(self.type_parameter(param)?)?;
        }
        builder.super_class(self.type_signature(sig.super_class())?)?;
        for interface in sig.super_interfaces() {
            builder.add_interface(self.type_signature(interface)?)?;
        }
        builder.build()
    }

    pub fn method_signature(&self, sig: &MethodSignature) -> Result<MethodSignature> {
        let mut builder = MethodSignature::builder();
        for param in sig.type_parameters() {
            builder.add_type_param(self.type_parameter(param)?)?;
        }
        for param in sig.value_parameters() {
            builder.add_value_param(self.type_signature(param)?)?;
        }
        builder.returns(self.type_signature(sig.returns())?)?;
        for thrown in sig.throws_types() {
            builder.add_throws(self.type_signature(thrown)?)?;
        }
        builder.build()
    }
}

/// Parse `old=new` pairs given on the command line.
pub fn parse_mapping(pair: &str) -> std::result::Result<(String, String), String> {
    let (old, new) = pair
        .split_once('=')
        .ok_or_else(|| format!("expected OLD=NEW, got '{}'", pair))?;
    for name in [old, new] {
        relocator_signature::validate_internal_name(name).map_err(|e| e.to_string())?;
    }
    Ok((old.to_string(), new.to_string()))
}
