//! Raw (non-generic) descriptors as found in `Code`, `Field` and `Method`
//! structures: no type arguments, no type variables.

use crate::cursor::Cursor;
use crate::error::Result;
use crate::names::read_internal_name;
use crate::parser::TypeContext;
use crate::primitive::PrimitiveType;

/// Check that `text` is a single field/type descriptor valid in `context`.
pub fn validate_type_descriptor(text: &str, context: TypeContext) -> Result<()> {
    let mut cursor = Cursor::new(text, "type descriptor");
    read_type_descriptor(&mut cursor, context)?;
    cursor.end()
}

fn read_type_descriptor(cursor: &mut Cursor<'_>, context: TypeContext) -> Result<()> {
    let start = cursor.offset();
    let mut dimensions = 0;
    while cursor.eat('[') {
        dimensions += 1;
    }
    let tag_offset = cursor.offset();
    match cursor.advance()? {
        'V' if dimensions == 0 && context.allows_void() => {}
        'L' => {
            read_internal_name(cursor)?;
            cursor.expect(';')?;
        }
        tag if PrimitiveType::from_value_descriptor(tag).is_some()
            && context.allows_primitive(dimensions) => {}
        tag => return Err(cursor.error_at(tag_offset, format!("invalid tag: {}", tag))),
    }
    if context == TypeContext::ClassOnly && dimensions > 0 {
        return Err(cursor.error_at(start, "expected a class type"));
    }
    Ok(())
}

/// A validated method descriptor, `(params)return`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodDescriptor {
    text: String,
    /// End offset (exclusive) of each parameter descriptor.
    parameter_ends: Box<[usize]>,
}

impl MethodDescriptor {
    pub fn parse(text: &str) -> Result<Self> {
        tracing::trace!(text, "parsing method descriptor");
        let mut cursor = Cursor::new(text, "method descriptor");
        cursor.expect('(')?;
        let mut ends = Vec::new();
        while cursor.current()? != ')' {
            read_type_descriptor(&mut cursor, TypeContext::Value)?;
            ends.push(cursor.offset());
        }
        cursor.advance()?;
        read_type_descriptor(&mut cursor, TypeContext::Voidable)?;
        cursor.end()?;
        Ok(Self {
            text: text.to_string(),
            parameter_ends: ends.into_boxed_slice(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn parameter_ends(&self) -> &[usize] {
        &self.parameter_ends
    }

    pub fn parameter_count(&self) -> usize {
        self.parameter_ends.len()
    }

    /// Descriptor of the parameter at `index`.
    pub fn parameter(&self, index: usize) -> Option<&str> {
        let end = *self.parameter_ends.get(index)?;
        let start = match index {
            0 => 1,
            _ => self.parameter_ends[index - 1],
        };
        Some(&self.text[start..end])
    }

    pub fn parameters(&self) -> impl Iterator<Item = &str> {
        (0..self.parameter_count()).filter_map(move |i| self.parameter(i))
    }

    /// Descriptor of the return type.
    pub fn return_type(&self) -> &str {
        let close = self.parameter_ends.last().copied().unwrap_or(1);
        &self.text[close + 1..]
    }
}

impl std::fmt::Display for MethodDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}
