use crate::builder::{set_once, BuilderState};
use crate::error::{BuilderStateError, Result, SignatureError};
use crate::names::validate_simple_name;
use crate::parser;
use crate::type_signature::{Kind, TypeSignature};

/// A declared type variable, `name:classBound(:interfaceBound)*`.
///
/// At least one bound is always present. The class bound may be absent
/// (`T::Ljava/lang/Comparable;`) when only interface bounds are declared.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeParameter {
    name: String,
    class_bound: Option<TypeSignature>,
    interface_bounds: Box<[TypeSignature]>,
}

impl TypeParameter {
    /// A type parameter with a single class bound.
    pub fn of(name: &str, class_bound: TypeSignature) -> Result<Self> {
        let mut builder = TypeParameterBuilder::new(name)?;
        builder.class_bound(class_bound)?;
        builder.build()
    }

    pub fn parse(text: &str) -> Result<Self> {
        parser::parse_type_parameter(text)
    }

    pub fn builder(name: &str) -> Result<TypeParameterBuilder> {
        TypeParameterBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn class_bound(&self) -> Option<&TypeSignature> {
        self.class_bound.as_ref()
    }

    pub fn interface_bounds(&self) -> &[TypeSignature] {
        &self.interface_bounds
    }

    /// Every bound, class bound first.
    pub fn bounds(&self) -> impl Iterator<Item = &TypeSignature> {
        self.class_bound.iter().chain(self.interface_bounds.iter())
    }

    pub fn class_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_class_names(&mut names);
        names
    }

    pub(crate) fn collect_class_names<'a>(&'a self, names: &mut Vec<&'a str>) {
        for bound in self.bounds() {
            bound.collect_class_names(names);
        }
    }

    pub(crate) fn write_to(&self, out: &mut String) {
        out.push_str(&self.name);
        out.push(':');
        if let Some(class_bound) = &self.class_bound {
            class_bound.write_to(out);
        }
        for bound in self.interface_bounds.iter() {
            out.push(':');
            bound.write_to(out);
        }
    }
}

/// Render a `<...>` type parameter block; nothing when `params` is empty.
pub(crate) fn write_type_parameters(out: &mut String, params: &[TypeParameter]) {
    if params.is_empty() {
        return;
    }
    out.push('<');
    for param in params {
        param.write_to(out);
    }
    out.push('>');
}

impl std::fmt::Display for TypeParameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut text = String::new();
        self.write_to(&mut text);
        f.write_str(&text)
    }
}

fn check_bound(bound: &TypeSignature, what: &str) -> Result<()> {
    if bound.kind() == Kind::Primitive {
        return Err(SignatureError::invalid_argument(format!(
            "primitive '{}' is not allowed for {}",
            bound, what
        )));
    }
    Ok(())
}

#[derive(Debug)]
pub struct TypeParameterBuilder {
    name: String,
    class_bound: Option<TypeSignature>,
    interface_bounds: Vec<TypeSignature>,
    state: BuilderState,
}

impl TypeParameterBuilder {
    pub fn new(name: &str) -> Result<Self> {
        validate_simple_name(name, "type parameter name")?;
        Ok(Self {
            name: name.to_string(),
            class_bound: None,
            interface_bounds: Vec::new(),
            state: BuilderState::Open,
        })
    }

    pub fn class_bound(&mut self, bound: TypeSignature) -> Result<&mut Self> {
        self.state.ensure_open()?;
        check_bound(&bound, "class bound")?;
        set_once(&mut self.class_bound, bound, "class bound")?;
        Ok(self)
    }

    pub fn add_interface_bound(&mut self, bound: TypeSignature) -> Result<&mut Self> {
        self.state.ensure_open()?;
        check_bound(&bound, "interface bound")?;
        self.interface_bounds.push(bound);
        Ok(self)
    }

    /// False once `build` has succeeded.
    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    pub fn build(&mut self) -> Result<TypeParameter> {
        self.state.ensure_open()?;
        if self.class_bound.is_none() && self.interface_bounds.is_empty() {
            return Err(BuilderStateError::MissingRequired("bound").into());
        }
        self.state.finish();
        tracing::debug!(name = %self.name, "built type parameter");
        Ok(TypeParameter {
            name: std::mem::take(&mut self.name),
            class_bound: self.class_bound.take(),
            interface_bounds: std::mem::take(&mut self.interface_bounds).into_boxed_slice(),
        })
    }
}
