use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock};

use crate::builder::BuilderState;
use crate::error::{Result, SignatureError};
use crate::names::{validate_internal_name, validate_simple_name};
use crate::parser::{self, TypeContext};
use crate::primitive::PrimitiveType;
use crate::type_argument::{TypeArgument, Variance};

/// Shape of a [`TypeSignature`].
///
/// A signature is `Array` whenever its array dimension is non-zero,
/// whatever its element is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Array,
    Primitive,
    /// A reference to a declared type variable (`TT;`).
    TypeVariable,
    Class,
}

/// A JVM type signature: a primitive, a type variable reference, or a
/// (possibly nested, possibly parameterized) class type, optionally
/// wrapped in array dimensions.
///
/// Values are immutable and cheap to clone. Equality and hashing follow
/// the canonical text returned by [`TypeSignature::as_str`].
#[derive(Clone)]
pub struct TypeSignature(Repr);

#[derive(Clone)]
enum Repr {
    Primitive(PrimitiveType),
    Composite(Arc<Composite>),
}

struct Composite {
    dimensions: usize,
    base: Base,
    /// Canonical text, rendered on first request.
    text: OnceLock<String>,
}

#[derive(Clone)]
enum Base {
    /// Only ever wrapped with a non-zero dimension.
    Primitive(PrimitiveType),
    Variable(Arc<str>),
    Class(Arc<[ClassElement]>),
}

/// One segment of a class type: the outermost class or a nested class,
/// with the type arguments applied to it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassElement {
    name: String,
    arguments: Box<[TypeArgument]>,
}

impl ClassElement {
    /// Internal name for the root element, simple name for nested ones.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_arguments(&self) -> &[TypeArgument] {
        &self.arguments
    }
}

impl TypeSignature {
    pub const VOID: TypeSignature = TypeSignature(Repr::Primitive(PrimitiveType::Void));
    pub const BYTE: TypeSignature = TypeSignature(Repr::Primitive(PrimitiveType::Byte));
    pub const CHAR: TypeSignature = TypeSignature(Repr::Primitive(PrimitiveType::Char));
    pub const DOUBLE: TypeSignature = TypeSignature(Repr::Primitive(PrimitiveType::Double));
    pub const FLOAT: TypeSignature = TypeSignature(Repr::Primitive(PrimitiveType::Float));
    pub const INT: TypeSignature = TypeSignature(Repr::Primitive(PrimitiveType::Int));
    pub const LONG: TypeSignature = TypeSignature(Repr::Primitive(PrimitiveType::Long));
    pub const SHORT: TypeSignature = TypeSignature(Repr::Primitive(PrimitiveType::Short));
    pub const BOOLEAN: TypeSignature = TypeSignature(Repr::Primitive(PrimitiveType::Boolean));

    pub const fn primitive(primitive: PrimitiveType) -> Self {
        TypeSignature(Repr::Primitive(primitive))
    }

    /// Parse a type signature. `void` is accepted at the top level.
    pub fn parse(text: &str) -> Result<Self> {
        parser::parse_type_signature(text, TypeContext::Voidable)
    }

    /// Reference to the type variable `name` (`T<name>;`).
    pub fn type_variable(name: &str) -> Result<Self> {
        validate_simple_name(name, "type variable name")?;
        Ok(Self::composite(0, Base::Variable(Arc::from(name))))
    }

    /// The raw (non-parameterized) class type `L<internal_name>;`.
    pub fn class_of(internal_name: &str) -> Result<Self> {
        ClassTypeBuilder::new(internal_name)?.build()
    }

    /// A type variable reference whose name was already validated.
    pub(crate) fn variable_array(name: &str, dimensions: usize) -> Self {
        Self::composite(dimensions, Base::Variable(Arc::from(name)))
    }

    fn composite(dimensions: usize, base: Base) -> Self {
        TypeSignature(Repr::Composite(Arc::new(Composite {
            dimensions,
            base,
            text: OnceLock::new(),
        })))
    }

    pub fn kind(&self) -> Kind {
        match &self.0 {
            Repr::Primitive(_) => Kind::Primitive,
            Repr::Composite(c) if c.dimensions > 0 => Kind::Array,
            Repr::Composite(c) => match c.base {
                Base::Primitive(_) => Kind::Array,
                Base::Variable(_) => Kind::TypeVariable,
                Base::Class(_) => Kind::Class,
            },
        }
    }

    pub fn array_dimensions(&self) -> usize {
        match &self.0 {
            Repr::Primitive(_) => 0,
            Repr::Composite(c) => c.dimensions,
        }
    }

    /// This signature wrapped in `dimensions` more array levels.
    ///
    /// `array(0)` returns an equal value. Class element lists are shared,
    /// not copied; the canonical text of the result is rendered lazily.
    pub fn array(&self, dimensions: usize) -> Result<Self> {
        if dimensions == 0 {
            return Ok(self.clone());
        }
        match &self.0 {
            Repr::Primitive(PrimitiveType::Void) => Err(SignatureError::invalid_argument(
                "void cannot be an array element",
            )),
            Repr::Primitive(p) => Ok(Self::composite(dimensions, Base::Primitive(*p))),
            Repr::Composite(c) => {
                let total = c
                    .dimensions
                    .checked_add(dimensions)
                    .ok_or_else(|| SignatureError::invalid_argument("too many array dimensions"))?;
                Ok(Self::composite(total, c.base.clone()))
            }
        }
    }

    /// The innermost element type, with every array dimension removed.
    pub fn element_type(&self) -> Self {
        match &self.0 {
            Repr::Composite(c) if c.dimensions > 0 => match &c.base {
                Base::Primitive(p) => Self::primitive(*p),
                base => Self::composite(0, base.clone()),
            },
            _ => self.clone(),
        }
    }

    /// The primitive type, if this is a bare primitive (not an array of one).
    pub fn as_primitive(&self) -> Option<PrimitiveType> {
        match &self.0 {
            Repr::Primitive(p) => Some(*p),
            Repr::Composite(_) => None,
        }
    }

    /// Name of the referenced type variable, if this is one (not an array of one).
    pub fn type_variable_name(&self) -> Option<&str> {
        match &self.0 {
            Repr::Composite(c) if c.dimensions == 0 => match &c.base {
                Base::Variable(name) => Some(&**name),
                _ => None,
            },
            _ => None,
        }
    }

    /// All class segments, root first. Class kind only.
    pub fn class_elements(&self) -> Result<&[ClassElement]> {
        match &self.0 {
            Repr::Composite(c) if c.dimensions == 0 => match &c.base {
                Base::Class(elements) => Ok(&elements[..]),
                _ => Err(self.wrong_kind()),
            },
            _ => Err(self.wrong_kind()),
        }
    }

    fn wrong_kind(&self) -> SignatureError {
        SignatureError::WrongKind { actual: self.kind() }
    }

    pub fn root_class_name(&self) -> Result<&str> {
        Ok(self.class_element(0)?.name())
    }

    /// Number of nested classes after the root class.
    pub fn inner_class_count(&self) -> Result<usize> {
        Ok(self.class_elements()?.len() - 1)
    }

    /// Name of the class at `index`: 0 is the root class (internal name),
    /// 1.. are the nested classes (simple names) in declaration order.
    pub fn inner_class_name(&self, index: usize) -> Result<&str> {
        Ok(self.class_element(index)?.name())
    }

    /// Type arguments of the class at `index` (0 is the root class).
    pub fn type_arguments(&self, index: usize) -> Result<&[TypeArgument]> {
        Ok(self.class_element(index)?.type_arguments())
    }

    fn class_element(&self, index: usize) -> Result<&ClassElement> {
        let elements = self.class_elements()?;
        elements.get(index).ok_or(SignatureError::IndexOutOfRange {
            index,
            len: elements.len(),
        })
    }

    /// Canonical text, rendered once and memoized.
    pub fn as_str(&self) -> &str {
        match &self.0 {
            Repr::Primitive(p) => p.descriptor(),
            Repr::Composite(c) => c.text.get_or_init(|| {
                let mut text = String::new();
                c.render(&mut text);
                text
            }),
        }
    }

    pub(crate) fn write_to(&self, out: &mut String) {
        match &self.0 {
            Repr::Primitive(p) => out.push_str(p.descriptor()),
            Repr::Composite(c) => match c.text.get() {
                Some(text) => out.push_str(text),
                None => c.render(out),
            },
        }
    }

    /// Seed the memoized text with input that is known to be canonical.
    pub(crate) fn with_text(self, text: Option<&str>) -> Self {
        if let (Repr::Composite(c), Some(text)) = (&self.0, text) {
            let _ = c.text.set(text.to_string());
        }
        self
    }

    /// Call `visit` with the element list of every class type in this
    /// signature, outermost first, then those inside its type arguments.
    /// Array dimensions are looked through.
    pub fn for_each_class<'a>(&'a self, visit: &mut dyn FnMut(&'a [ClassElement])) {
        let Repr::Composite(c) = &self.0 else {
            return;
        };
        if let Base::Class(elements) = &c.base {
            visit(&elements[..]);
            for element in elements.iter() {
                for argument in element.arguments.iter() {
                    if let Some(signature) = argument.signature() {
                        signature.for_each_class(visit);
                    }
                }
            }
        }
    }

    /// Root internal names of every class this signature mentions, in
    /// first-occurrence order.
    pub fn class_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_class_names(&mut names);
        names
    }

    pub(crate) fn collect_class_names<'a>(&'a self, names: &mut Vec<&'a str>) {
        self.for_each_class(&mut |elements: &'a [ClassElement]| push_unique(names, &elements[0].name));
    }
}

pub(crate) fn push_unique<'a>(names: &mut Vec<&'a str>, name: &'a str) {
    if !names.contains(&name) {
        names.push(name);
    }
}

impl Composite {
    fn render(&self, out: &mut String) {
        for _ in 0..self.dimensions {
            out.push('[');
        }
        match &self.base {
            Base::Primitive(p) => out.push_str(p.descriptor()),
            Base::Variable(name) => {
                out.push('T');
                out.push_str(name);
                out.push(';');
            }
            Base::Class(elements) => {
                out.push('L');
                for (i, element) in elements.iter().enumerate() {
                    if i != 0 {
                        out.push('.');
                    }
                    out.push_str(&element.name);
                    write_arguments(out, &element.arguments);
                }
                out.push(';');
            }
        }
    }
}

fn write_arguments(out: &mut String, arguments: &[TypeArgument]) {
    if arguments.is_empty() {
        return;
    }
    out.push('<');
    for argument in arguments {
        argument.write_to(out);
    }
    out.push('>');
}

impl PartialEq for TypeSignature {
    fn eq(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (Repr::Primitive(a), Repr::Primitive(b)) => a == b,
            (Repr::Composite(a), Repr::Composite(b)) => {
                Arc::ptr_eq(a, b) || self.as_str() == other.as_str()
            }
            _ => false,
        }
    }
}

impl Eq for TypeSignature {}

impl Hash for TypeSignature {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl std::fmt::Display for TypeSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Debug for TypeSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("TypeSignature").field(&self.as_str()).finish()
    }
}

/// Incremental construction of a class type signature.
///
/// Starts at the root class; each [`inner_class`](Self::inner_class)
/// closes the current segment and opens a nested one. Type arguments
/// attach to the segment currently open.
#[derive(Debug)]
pub struct ClassTypeBuilder {
    elements: Vec<ClassElement>,
    name: String,
    arguments: Vec<TypeArgument>,
    state: BuilderState,
}

impl ClassTypeBuilder {
    pub fn new(internal_name: &str) -> Result<Self> {
        validate_internal_name(internal_name)?;
        Ok(Self {
            elements: Vec::new(),
            name: internal_name.to_string(),
            arguments: Vec::new(),
            state: BuilderState::Open,
        })
    }

    fn finish_element(&mut self) {
        let name = std::mem::take(&mut self.name);
        let arguments = std::mem::take(&mut self.arguments).into_boxed_slice();
        self.elements.push(ClassElement { name, arguments });
    }

    pub fn inner_class(&mut self, simple_name: &str) -> Result<&mut Self> {
        self.state.ensure_open()?;
        validate_simple_name(simple_name, "inner class name")?;
        self.finish_element();
        self.name = simple_name.to_string();
        Ok(self)
    }

    pub fn add_argument(&mut self, argument: TypeArgument) -> Result<&mut Self> {
        self.state.ensure_open()?;
        self.arguments.push(argument);
        Ok(self)
    }

    pub fn add_wildcard(&mut self) -> Result<&mut Self> {
        self.add_argument(TypeArgument::WILDCARD)
    }

    /// Add an invariant type argument.
    pub fn add_type_argument(&mut self, signature: TypeSignature) -> Result<&mut Self> {
        self.add_type_argument_with(signature, Variance::Invariant)
    }

    pub fn add_type_argument_with(
        &mut self,
        signature: TypeSignature,
        variance: Variance,
    ) -> Result<&mut Self> {
        self.state.ensure_open()?;
        self.add_argument(TypeArgument::of(signature, variance)?)
    }

    /// False once `build` has succeeded.
    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    pub fn build(&mut self) -> Result<TypeSignature> {
        self.build_array(0)
    }

    /// Build the class type wrapped in `dimensions` array levels.
    pub fn build_array(&mut self, dimensions: usize) -> Result<TypeSignature> {
        self.build_with_text(dimensions, None)
    }

    pub(crate) fn build_with_text(
        &mut self,
        dimensions: usize,
        text: Option<&str>,
    ) -> Result<TypeSignature> {
        self.state.ensure_open()?;
        self.finish_element();
        self.state.finish();
        let elements: Arc<[ClassElement]> = std::mem::take(&mut self.elements).into();
        Ok(TypeSignature::composite(dimensions, Base::Class(elements)).with_text(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BuilderStateError;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(signature: &TypeSignature) -> u64 {
        let mut hasher = DefaultHasher::new();
        signature.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn primitives_are_primitive_kind() {
        for prim in PrimitiveType::ALL {
            let sig = TypeSignature::primitive(prim);
            assert_eq!(sig.kind(), Kind::Primitive);
            assert_eq!(sig.array_dimensions(), 0);
            assert_eq!(sig.as_primitive(), Some(prim));
            assert_eq!(sig.as_str(), prim.descriptor());
        }
        assert_eq!(TypeSignature::INT, TypeSignature::primitive(PrimitiveType::Int));
        assert_ne!(TypeSignature::INT, TypeSignature::LONG);
    }

    #[test]
    fn class_of_array_of_two() {
        let map = TypeSignature::class_of("java/util/Map").unwrap();
        let array = map.array(2).unwrap();
        assert_eq!(array.as_str(), "[[Ljava/util/Map;");
        assert_eq!(array.array_dimensions(), 2);
        assert_eq!(array.kind(), Kind::Array);
        assert_eq!(map.kind(), Kind::Class);
    }

    #[test]
    fn array_accumulates_dimensions() {
        let ints = TypeSignature::INT.array(1).unwrap().array(2).unwrap();
        assert_eq!(ints.as_str(), "[[[I");
        assert_eq!(ints.array_dimensions(), 3);
        assert_eq!(ints.element_type(), TypeSignature::INT);

        let var = TypeSignature::type_variable("T").unwrap().array(1).unwrap();
        assert_eq!(var.as_str(), "[TT;");
        assert_eq!(var.kind(), Kind::Array);
        assert_eq!(var.element_type().kind(), Kind::TypeVariable);
    }

    #[test]
    fn array_zero_is_same_value() {
        let list = TypeSignature::class_of("java/util/List").unwrap();
        assert_eq!(list.array(0).unwrap(), list);
        assert_eq!(TypeSignature::VOID.array(0).unwrap(), TypeSignature::VOID);
    }

    #[test]
    fn void_array_is_rejected() {
        let err = TypeSignature::VOID.array(1).unwrap_err();
        assert!(matches!(err, SignatureError::InvalidArgument(_)));
    }

    #[test]
    fn array_dimension_overflow_is_rejected() {
        let array = TypeSignature::class_of("a/B").unwrap().array(1).unwrap();
        let err = array.array(usize::MAX).unwrap_err();
        assert!(matches!(err, SignatureError::InvalidArgument(_)));
        assert_eq!(array.array_dimensions(), 1);
    }

    #[test]
    fn class_accessors_fail_for_other_kinds() {
        let err = TypeSignature::INT.root_class_name().unwrap_err();
        assert_eq!(err, SignatureError::WrongKind { actual: Kind::Primitive });

        let array = TypeSignature::class_of("a/B").unwrap().array(1).unwrap();
        assert_eq!(
            array.inner_class_count().unwrap_err(),
            SignatureError::WrongKind { actual: Kind::Array }
        );
        let var = TypeSignature::type_variable("T").unwrap();
        assert!(var.type_arguments(0).is_err());
    }

    #[test]
    fn builder_with_inner_classes() {
        let string = TypeSignature::class_of("java/lang/String").unwrap();
        let integer = TypeSignature::class_of("java/lang/Integer").unwrap();
        let sig = ClassTypeBuilder::new("test/Outer")
            .unwrap()
            .add_type_argument(string.clone())
            .unwrap()
            .inner_class("Inner")
            .unwrap()
            .add_type_argument_with(integer.clone(), Variance::Contravariant)
            .unwrap()
            .add_wildcard()
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(
            sig.as_str(),
            "Ltest/Outer<Ljava/lang/String;>.Inner<-Ljava/lang/Integer;*>;"
        );
        assert_eq!(sig.root_class_name().unwrap(), "test/Outer");
        assert_eq!(sig.inner_class_count().unwrap(), 1);
        assert_eq!(sig.inner_class_name(0).unwrap(), "test/Outer");
        assert_eq!(sig.inner_class_name(1).unwrap(), "Inner");
        assert_eq!(sig.type_arguments(0).unwrap().len(), 1);
        assert_eq!(sig.type_arguments(1).unwrap().len(), 2);
        assert_eq!(
            sig.inner_class_name(2).unwrap_err(),
            SignatureError::IndexOutOfRange { index: 2, len: 2 }
        );
    }

    #[test]
    fn builder_is_single_use() {
        let mut builder = ClassTypeBuilder::new("a/B").unwrap();
        builder.build().unwrap();
        let already = SignatureError::Builder(BuilderStateError::AlreadyBuilt);
        assert_eq!(builder.build().unwrap_err(), already);
        assert_eq!(builder.add_wildcard().unwrap_err(), already);
        assert_eq!(builder.inner_class("C").unwrap_err(), already);
    }

    #[test]
    fn builder_validates_names_and_arguments() {
        assert!(ClassTypeBuilder::new("a//b").is_err());
        let mut builder = ClassTypeBuilder::new("a/B").unwrap();
        assert!(builder.inner_class("c/D").is_err());
        assert!(matches!(
            builder.add_type_argument(TypeSignature::BOOLEAN).unwrap_err(),
            SignatureError::InvalidArgument(_)
        ));
        assert_eq!(builder.build().unwrap().as_str(), "La/B;");
    }

    #[test]
    fn equality_follows_canonical_text() {
        let built = TypeSignature::class_of("java/lang/String").unwrap();
        let parsed = TypeSignature::parse("Ljava/lang/String;").unwrap();
        assert_eq!(built, parsed);
        assert_eq!(hash_of(&built), hash_of(&parsed));
        assert_ne!(built, parsed.array(1).unwrap());
    }

    #[test]
    fn canonical_text_is_memoized() {
        let sig = TypeSignature::class_of("java/util/List").unwrap();
        let first = sig.as_str().as_ptr();
        let second = sig.as_str().as_ptr();
        assert_eq!(first, second);
        assert_eq!(sig.to_string(), "Ljava/util/List;");
    }

    #[test]
    fn class_names_include_arguments() {
        let sig = TypeSignature::parse(
            "Ljava/util/Map<Ljava/lang/String;Ljava/util/List<Ljava/lang/String;>;>.Entry<TK;>;",
        )
        .unwrap();
        assert_eq!(
            sig.class_names(),
            vec!["java/util/Map", "java/lang/String", "java/util/List"]
        );
        assert!(TypeSignature::INT.class_names().is_empty());
    }
}
