//! Recursive-descent parser for the generic signature grammar.
//!
//! Every value is assembled through the public builders, so the parser
//! never produces anything the builders would refuse. A builder refusal
//! is reported as a parse failure at the offset of the offending element.

use crate::class_signature::{ClassSignature, ClassSignatureBuilder};
use crate::cursor::Cursor;
use crate::error::{Result, SignatureError};
use crate::method_signature::{MethodSignature, MethodSignatureBuilder};
use crate::names::{read_identifier, read_internal_name};
use crate::primitive::PrimitiveType;
use crate::type_argument::Variance;
use crate::type_parameter::{TypeParameter, TypeParameterBuilder};
use crate::type_signature::{ClassTypeBuilder, Kind, TypeSignature};

/// Where a type appears, which decides the shapes it may take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeContext {
    /// Super class and super interfaces: a non-array class type.
    ClassOnly,
    /// Type arguments, bounds and thrown types. Primitives only as array elements.
    Reference,
    /// Method value parameters and fields: anything but `void`.
    Value,
    /// Method return types: anything, including `void`.
    Voidable,
}

impl TypeContext {
    pub(crate) fn allows_void(self) -> bool {
        self == TypeContext::Voidable
    }

    pub(crate) fn allows_primitive(self, dimensions: usize) -> bool {
        match self {
            TypeContext::ClassOnly => false,
            TypeContext::Reference => dimensions > 0,
            TypeContext::Value | TypeContext::Voidable => true,
        }
    }

    pub(crate) fn allows_variable(self) -> bool {
        self != TypeContext::ClassOnly
    }
}

/// Turn a construction failure into a parse failure at `offset`.
fn reframe(cursor: &Cursor<'_>, offset: usize, err: SignatureError) -> SignatureError {
    if err.is_malformed() {
        err
    } else {
        cursor.error_at(offset, err.to_string())
    }
}

pub(crate) fn parse_type_signature(text: &str, context: TypeContext) -> Result<TypeSignature> {
    tracing::trace!(text, ?context, "parsing type signature");
    let mut cursor = Cursor::new(text, "type signature");
    let signature = read_type_signature(&mut cursor, context)?;
    cursor.end()?;
    Ok(signature)
}

pub(crate) fn parse_type_parameter(text: &str) -> Result<TypeParameter> {
    tracing::trace!(text, "parsing type parameter");
    let mut cursor = Cursor::new(text, "type parameter");
    let param = read_type_parameter(&mut cursor)?;
    cursor.end()?;
    Ok(param)
}

pub(crate) fn parse_class_signature(text: &str) -> Result<ClassSignature> {
    tracing::trace!(text, "parsing class signature");
    let mut cursor = Cursor::new(text, "class signature");
    let mut builder = ClassSignatureBuilder::new();

    for param in read_type_parameters(&mut cursor)? {
        builder.add_type_param(param)?;
    }
    let start = cursor.offset();
    let super_class = read_type_signature(&mut cursor, TypeContext::ClassOnly)?;
    builder
        .super_class(super_class)
        .map_err(|e| reframe(&cursor, start, e))?;
    while !cursor.is_eof() {
        let start = cursor.offset();
        let interface = read_type_signature(&mut cursor, TypeContext::ClassOnly)?;
        builder
            .add_interface(interface)
            .map_err(|e| reframe(&cursor, start, e))?;
    }
    builder.build_with_text(cursor.whole_from(0))
}

pub(crate) fn parse_method_signature(text: &str) -> Result<MethodSignature> {
    tracing::trace!(text, "parsing method signature");
    let mut cursor = Cursor::new(text, "method signature");
    let mut builder = MethodSignatureBuilder::new();

    for param in read_type_parameters(&mut cursor)? {
        builder.add_type_param(param)?;
    }
    cursor.expect('(')?;
    while cursor.current()? != ')' {
        let param = read_type_signature(&mut cursor, TypeContext::Value)?;
        builder.add_value_param(param)?;
    }
    cursor.advance()?;
    let returns = read_type_signature(&mut cursor, TypeContext::Voidable)?;
    builder.returns(returns)?;
    while cursor.eat('^') {
        let thrown = read_type_signature(&mut cursor, TypeContext::Reference)?;
        builder.add_throws(thrown)?;
    }
    cursor.end()?;
    builder.build_with_text(cursor.whole_from(0))
}

/// `<` typeParameter+ `>`, or nothing.
fn read_type_parameters(cursor: &mut Cursor<'_>) -> Result<Vec<TypeParameter>> {
    let mut params = Vec::new();
    let start = cursor.offset();
    if !cursor.eat('<') {
        return Ok(params);
    }
    while !cursor.eat('>') {
        params.push(read_type_parameter(cursor)?);
    }
    if params.is_empty() {
        return Err(cursor.error_at(start, "empty parameters"));
    }
    Ok(params)
}

fn read_type_parameter(cursor: &mut Cursor<'_>) -> Result<TypeParameter> {
    let start = cursor.offset();
    read_identifier(cursor)?;
    let mut builder =
        TypeParameterBuilder::new(cursor.slice_from(start)).map_err(|e| reframe(cursor, start, e))?;
    cursor.expect(':')?;
    if cursor.current()? != ':' {
        let bound = read_type_signature(cursor, TypeContext::Reference)?;
        builder.class_bound(bound)?;
    }
    while cursor.eat(':') {
        let bound = read_type_signature(cursor, TypeContext::Reference)?;
        builder.add_interface_bound(bound)?;
    }
    builder.build().map_err(|e| reframe(cursor, start, e))
}

fn read_type_signature(cursor: &mut Cursor<'_>, context: TypeContext) -> Result<TypeSignature> {
    let start = cursor.offset();
    let mut dimensions = 0;
    while cursor.eat('[') {
        dimensions += 1;
    }
    let tag_offset = cursor.offset();
    let tag = cursor.advance()?;

    let signature = match tag {
        'V' if dimensions == 0 && context.allows_void() => TypeSignature::VOID,
        'T' if context.allows_variable() => {
            let name_start = cursor.offset();
            read_identifier(cursor)?;
            let name = cursor.slice_from(name_start);
            cursor.expect(';')?;
            TypeSignature::variable_array(name, dimensions).with_text(cursor.whole_from(start))
        }
        'L' => read_class_type(cursor, start, dimensions)?,
        _ => match PrimitiveType::from_value_descriptor(tag) {
            Some(primitive) if context.allows_primitive(dimensions) => {
                TypeSignature::primitive(primitive)
                    .array(dimensions)
                    .map_err(|e| reframe(cursor, start, e))?
                    .with_text(cursor.whole_from(start))
            }
            _ => return Err(cursor.error_at(tag_offset, format!("invalid tag: {}", tag))),
        },
    };

    if context == TypeContext::ClassOnly && signature.kind() != Kind::Class {
        return Err(cursor.error_at(start, "expected a class type"));
    }
    Ok(signature)
}

/// The rest of a class type after its `L` tag.
fn read_class_type(cursor: &mut Cursor<'_>, start: usize, dimensions: usize) -> Result<TypeSignature> {
    let name_start = cursor.offset();
    read_internal_name(cursor)?;
    let mut builder = ClassTypeBuilder::new(cursor.slice_from(name_start))
        .map_err(|e| reframe(cursor, name_start, e))?;
    read_type_arguments(cursor, &mut builder)?;
    while cursor.eat('.') {
        let inner_start = cursor.offset();
        read_identifier(cursor)?;
        builder
            .inner_class(cursor.slice_from(inner_start))
            .map_err(|e| reframe(cursor, inner_start, e))?;
        read_type_arguments(cursor, &mut builder)?;
    }
    cursor.expect(';')?;
    builder.build_with_text(dimensions, cursor.whole_from(start))
}

/// `<` typeArgument+ `>`, or nothing.
fn read_type_arguments(cursor: &mut Cursor<'_>, builder: &mut ClassTypeBuilder) -> Result<()> {
    let open = cursor.offset();
    if !cursor.eat('<') {
        return Ok(());
    }
    cursor.descend(open)?;
    let mut count = 0;
    loop {
        let start = cursor.offset();
        let variance = match cursor.current()? {
            '>' => {
                cursor.advance()?;
                if count == 0 {
                    return Err(cursor.error_at(open, "empty arguments"));
                }
                cursor.ascend();
                return Ok(());
            }
            '*' => {
                cursor.advance()?;
                builder.add_wildcard()?;
                count += 1;
                continue;
            }
            '+' => {
                cursor.advance()?;
                Variance::Covariant
            }
            '-' => {
                cursor.advance()?;
                Variance::Contravariant
            }
            _ => Variance::Invariant,
        };
        let argument = read_type_signature(cursor, TypeContext::Reference)?;
        builder
            .add_type_argument_with(argument, variance)
            .map_err(|e| reframe(cursor, start, e))?;
        count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_context_allows_primitive_arrays_only() {
        assert!(parse_type_signature("[I", TypeContext::Reference).is_ok());
        let err = parse_type_signature("I", TypeContext::Reference).unwrap_err();
        assert_eq!(err.offset(), Some(0));
        assert!(parse_type_signature("V", TypeContext::Reference).is_err());
    }

    #[test]
    fn value_context_rejects_void() {
        assert!(parse_type_signature("J", TypeContext::Value).is_ok());
        assert!(parse_type_signature("V", TypeContext::Value).is_err());
        assert!(parse_type_signature("[V", TypeContext::Voidable).is_err());
    }

    #[test]
    fn class_only_rejects_everything_else() {
        assert!(parse_type_signature("La/B;", TypeContext::ClassOnly).is_ok());
        for text in ["TT;", "I", "[La/B;"] {
            let err = parse_type_signature(text, TypeContext::ClassOnly).unwrap_err();
            assert!(err.is_malformed(), "{} should be rejected", text);
        }
    }

    #[test]
    fn empty_argument_list_is_malformed() {
        let err = parse_type_signature("La/B<>;", TypeContext::Voidable).unwrap_err();
        assert_eq!(err.offset(), Some(4));
        assert!(err.to_string().contains("empty arguments"), "got: {}", err);
    }

    #[test]
    fn primitive_argument_is_reported_at_its_tag() {
        let err = parse_type_signature("La/B<I>;", TypeContext::Voidable).unwrap_err();
        assert_eq!(err.offset(), Some(5));
    }

    #[test]
    fn parsed_class_seeds_canonical_text() {
        let text = "Ljava/util/Map<TK;+[TV;>.Entry<-La/B;*>;";
        let signature = parse_type_signature(text, TypeContext::Voidable).unwrap();
        assert_eq!(signature.as_str(), text);
        assert_eq!(signature.inner_class_name(1).unwrap(), "Entry");
        assert!(signature.type_arguments(1).unwrap()[1].is_wildcard());
    }

    #[test]
    fn empty_type_parameter_block_is_malformed() {
        let err = parse_method_signature("<>()V").unwrap_err();
        assert!(err.to_string().contains("empty parameters"), "got: {}", err);
    }

    #[test]
    fn method_signature_throws_and_trailing() {
        let signature = parse_method_signature("<T:Ljava/lang/Throwable;>()V^TT;").unwrap();
        assert_eq!(signature.throws_types().len(), 1);
        assert!(parse_method_signature("()VX").is_err());
        assert!(parse_method_signature("()V^I").is_err());
        assert!(parse_method_signature("(V)V").is_err());
    }

    fn nested_arguments(depth: usize) -> String {
        format!("{}La;{}", "La<".repeat(depth), ">;".repeat(depth))
    }

    #[test]
    fn nesting_within_bound_parses() {
        let text = nested_arguments(64);
        let signature = parse_type_signature(&text, TypeContext::Voidable).unwrap();
        assert_eq!(signature.as_str(), text);
    }

    #[test]
    fn nesting_past_bound_is_malformed() {
        let err = parse_type_signature(&nested_arguments(256), TypeContext::Voidable).unwrap_err();
        assert!(err.is_malformed());
        assert!(err.to_string().contains("nested too deeply"), "got: {}", err);
        assert_eq!(err.offset(), Some(255 * 3 + 2));
    }

    #[test]
    fn class_file_sized_nesting_fails_cleanly() {
        let text = nested_arguments(13_000);
        assert!(text.len() < 65_536);
        let err = parse_type_signature(&text, TypeContext::Voidable).unwrap_err();
        assert!(err.is_malformed());
    }
}
