use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

use crate::builder::{require, set_once, BuilderState};
use crate::error::{Result, SignatureError};
use crate::parser;
use crate::type_parameter::{write_type_parameters, TypeParameter};
use crate::type_signature::{Kind, TypeSignature};

/// The `Signature` attribute of a method:
/// `<typeParams>(valueParams)return^throws...`.
#[derive(Clone)]
pub struct MethodSignature {
    type_parameters: Box<[TypeParameter]>,
    value_parameters: Box<[TypeSignature]>,
    returns: TypeSignature,
    throws_types: Box<[TypeSignature]>,
    text: OnceLock<String>,
}

impl MethodSignature {
    pub fn parse(text: &str) -> Result<Self> {
        parser::parse_method_signature(text)
    }

    pub fn builder() -> MethodSignatureBuilder {
        MethodSignatureBuilder::default()
    }

    pub fn type_parameters(&self) -> &[TypeParameter] {
        &self.type_parameters
    }

    pub fn value_parameters(&self) -> &[TypeSignature] {
        &self.value_parameters
    }

    pub fn returns(&self) -> &TypeSignature {
        &self.returns
    }

    pub fn throws_types(&self) -> &[TypeSignature] {
        &self.throws_types
    }

    pub fn as_str(&self) -> &str {
        self.text.get_or_init(|| {
            let mut out = String::new();
            write_type_parameters(&mut out, &self.type_parameters);
            out.push('(');
            for param in self.value_parameters.iter() {
                param.write_to(&mut out);
            }
            out.push(')');
            self.returns.write_to(&mut out);
            for thrown in self.throws_types.iter() {
                out.push('^');
                thrown.write_to(&mut out);
            }
            out
        })
    }

    pub fn class_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        for param in self.type_parameters.iter() {
            param.collect_class_names(&mut names);
        }
        let types = self
            .value_parameters
            .iter()
            .chain(std::iter::once(&self.returns))
            .chain(self.throws_types.iter());
        for signature in types {
            signature.collect_class_names(&mut names);
        }
        names
    }
}

impl PartialEq for MethodSignature {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for MethodSignature {}

impl Hash for MethodSignature {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl std::fmt::Display for MethodSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Debug for MethodSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("MethodSignature").field(&self.as_str()).finish()
    }
}

#[derive(Debug, Default)]
pub struct MethodSignatureBuilder {
    type_parameters: Vec<TypeParameter>,
    value_parameters: Vec<TypeSignature>,
    returns: Option<TypeSignature>,
    throws_types: Vec<TypeSignature>,
    state: BuilderState,
}

impl MethodSignatureBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_type_param(&mut self, param: TypeParameter) -> Result<&mut Self> {
        self.state.ensure_open()?;
        self.type_parameters.push(param);
        Ok(self)
    }

    pub fn add_value_param(&mut self, param: TypeSignature) -> Result<&mut Self> {
        self.state.ensure_open()?;
        if param == TypeSignature::VOID {
            return Err(SignatureError::invalid_argument(
                "void is not allowed as a value parameter",
            ));
        }
        self.value_parameters.push(param);
        Ok(self)
    }

    pub fn returns(&mut self, returns: TypeSignature) -> Result<&mut Self> {
        self.state.ensure_open()?;
        set_once(&mut self.returns, returns, "return type")?;
        Ok(self)
    }

    pub fn add_throws(&mut self, thrown: TypeSignature) -> Result<&mut Self> {
        self.state.ensure_open()?;
        if thrown.kind() == Kind::Primitive {
            return Err(SignatureError::invalid_argument(format!(
                "primitive '{}' is not allowed as a thrown type",
                thrown
            )));
        }
        self.throws_types.push(thrown);
        Ok(self)
    }

    /// False once `build` has succeeded.
    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    pub fn build(&mut self) -> Result<MethodSignature> {
        self.build_with_text(None)
    }

    pub(crate) fn build_with_text(&mut self, text: Option<&str>) -> Result<MethodSignature> {
        self.state.ensure_open()?;
        let returns = require(&self.returns, "return type")?;
        self.state.finish();
        let signature = MethodSignature {
            type_parameters: std::mem::take(&mut self.type_parameters).into_boxed_slice(),
            value_parameters: std::mem::take(&mut self.value_parameters).into_boxed_slice(),
            returns,
            throws_types: std::mem::take(&mut self.throws_types).into_boxed_slice(),
            text: text.map(str::to_string).map(OnceLock::from).unwrap_or_default(),
        };
        tracing::debug!(signature = %signature, "built method signature");
        Ok(signature)
    }
}
