use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

use crate::builder::{require, set_once, BuilderState};
use crate::error::{Result, SignatureError};
use crate::parser;
use crate::type_parameter::{write_type_parameters, TypeParameter};
use crate::type_signature::{Kind, TypeSignature};

/// The `Signature` attribute of a class: type parameters, the super class
/// and the super interfaces.
#[derive(Clone)]
pub struct ClassSignature {
    type_parameters: Box<[TypeParameter]>,
    super_class: TypeSignature,
    super_interfaces: Box<[TypeSignature]>,
    text: OnceLock<String>,
}

impl ClassSignature {
    pub fn parse(text: &str) -> Result<Self> {
        parser::parse_class_signature(text)
    }

    pub fn builder() -> ClassSignatureBuilder {
        ClassSignatureBuilder::default()
    }

    pub fn type_parameters(&self) -> &[TypeParameter] {
        &self.type_parameters
    }

    pub fn super_class(&self) -> &TypeSignature {
        &self.super_class
    }

    pub fn super_interfaces(&self) -> &[TypeSignature] {
        &self.super_interfaces
    }

    /// Canonical text, rendered once.
    pub fn as_str(&self) -> &str {
        self.text.get_or_init(|| {
            let mut out = String::new();
            write_type_parameters(&mut out, &self.type_parameters);
            self.super_class.write_to(&mut out);
            for interface in self.super_interfaces.iter() {
                interface.write_to(&mut out);
            }
            out
        })
    }

    pub fn class_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        for param in self.type_parameters.iter() {
            param.collect_class_names(&mut names);
        }
        self.super_class.collect_class_names(&mut names);
        for interface in self.super_interfaces.iter() {
            interface.collect_class_names(&mut names);
        }
        names
    }
}

impl PartialEq for ClassSignature {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for ClassSignature {}

impl Hash for ClassSignature {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl std::fmt::Display for ClassSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Debug for ClassSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ClassSignature").field(&self.as_str()).finish()
    }
}

fn check_class(signature: &TypeSignature, what: &str) -> Result<()> {
    if signature.kind() != Kind::Class {
        return Err(SignatureError::invalid_argument(format!(
            "{} must be a class type, got '{}'",
            what, signature
        )));
    }
    Ok(())
}

#[derive(Debug, Default)]
pub struct ClassSignatureBuilder {
    type_parameters: Vec<TypeParameter>,
    super_class: Option<TypeSignature>,
    super_interfaces: Vec<TypeSignature>,
    state: BuilderState,
}

impl ClassSignatureBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_type_param(&mut self, param: TypeParameter) -> Result<&mut Self> {
        self.state.ensure_open()?;
        self.type_parameters.push(param);
        Ok(self)
    }

    pub fn super_class(&mut self, super_class: TypeSignature) -> Result<&mut Self> {
        self.state.ensure_open()?;
        check_class(&super_class, "super class")?;
        set_once(&mut self.super_class, super_class, "super class")?;
        Ok(self)
    }

    pub fn add_interface(&mut self, interface: TypeSignature) -> Result<&mut Self> {
        self.state.ensure_open()?;
        check_class(&interface, "super interface")?;
        self.super_interfaces.push(interface);
        Ok(self)
    }

    /// False once `build` has succeeded.
    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    pub fn build(&mut self) -> Result<ClassSignature> {
        self.build_with_text(None)
    }

    pub(crate) fn build_with_text(&mut self, text: Option<&str>) -> Result<ClassSignature> {
        self.state.ensure_open()?;
        let super_class = require(&self.super_class, "super class")?;
        self.state.finish();
        let signature = ClassSignature {
            type_parameters: std::mem::take(&mut self.type_parameters).into_boxed_slice(),
            super_class,
            super_interfaces: std::mem::take(&mut self.super_interfaces).into_boxed_slice(),
            text: text.map(str::to_string).map(OnceLock::from).unwrap_or_default(),
        };
        tracing::debug!(signature = %signature, "built class signature");
        Ok(signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BuilderStateError;

    fn class(name: &str) -> TypeSignature {
        TypeSignature::class_of(name).unwrap()
    }

    #[test]
    fn renders_in_declaration_order() {
        let param = TypeParameter::of("T", class("java/lang/Object")).unwrap();
        let signature = ClassSignature::builder()
            .add_type_param(param)
            .unwrap()
            .super_class(class("java/lang/Object"))
            .unwrap()
            .add_interface(class("java/lang/Runnable"))
            .unwrap()
            .add_interface(class("java/io/Serializable"))
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(
            signature.as_str(),
            "<T:Ljava/lang/Object;>Ljava/lang/Object;Ljava/lang/Runnable;Ljava/io/Serializable;"
        );
        assert_eq!(signature.super_interfaces().len(), 2);
        assert_eq!(
            signature.class_names(),
            vec!["java/lang/Object", "java/lang/Runnable", "java/io/Serializable"]
        );
    }

    #[test]
    fn super_class_is_required_and_single() {
        let mut builder = ClassSignature::builder();
        assert_eq!(
            builder.build().unwrap_err(),
            SignatureError::Builder(BuilderStateError::MissingRequired("super class"))
        );
        builder.super_class(class("a/B")).unwrap();
        assert_eq!(
            builder.super_class(class("a/C")).unwrap_err(),
            SignatureError::Builder(BuilderStateError::AlreadySet("super class"))
        );
    }

    #[test]
    fn super_types_must_be_classes() {
        let mut builder = ClassSignature::builder();
        assert!(builder.super_class(TypeSignature::INT).is_err());
        let var = TypeSignature::type_variable("T").unwrap();
        assert!(builder.add_interface(var).is_err());
        let array = class("a/B").array(1).unwrap();
        assert!(builder.add_interface(array).is_err());
    }

    #[test]
    fn second_build_fails() {
        let mut builder = ClassSignature::builder();
        builder.super_class(class("a/B")).unwrap();
        let first = builder.build().unwrap();
        assert_eq!(first.as_str(), "La/B;");
        assert_eq!(
            builder.build().unwrap_err(),
            SignatureError::Builder(BuilderStateError::AlreadyBuilt)
        );
    }
}
