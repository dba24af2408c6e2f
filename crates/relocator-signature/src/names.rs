//! Identifier rules shared by the parser and the construction factories.

use crate::cursor::Cursor;
use crate::error::Result;

/// Characters that may never appear inside a simple name.
const BLOCKED: [char; 7] = ['/', '.', '[', '<', '>', ':', ';'];

pub(crate) fn is_blocked(ch: char) -> bool {
    BLOCKED.contains(&ch)
}

/// Consume one simple identifier (at least one non-blocked character).
pub(crate) fn read_identifier(cursor: &mut Cursor<'_>) -> Result<()> {
    if is_blocked(cursor.current()?) {
        return Err(cursor.error("empty identifier"));
    }
    while let Some(ch) = cursor.peek() {
        if is_blocked(ch) {
            break;
        }
        cursor.advance()?;
    }
    Ok(())
}

/// Consume a slash-separated internal class name such as `java/lang/String`.
pub(crate) fn read_internal_name(cursor: &mut Cursor<'_>) -> Result<()> {
    if cursor.current()? == '/' {
        return Err(cursor.error("slash at the first"));
    }
    read_identifier(cursor)?;
    while cursor.eat('/') {
        match cursor.peek() {
            Some('/') => return Err(cursor.error("double slash")),
            Some(ch) if !is_blocked(ch) => read_identifier(cursor)?,
            _ => return Err(cursor.error("slash at the end of identifier")),
        }
    }
    Ok(())
}

/// Validate an unqualified name: a type variable, type parameter or inner class name.
pub fn validate_simple_name(name: &str, reading: &'static str) -> Result<()> {
    let mut cursor = Cursor::new(name, reading);
    read_identifier(&mut cursor)?;
    cursor.end()
}

/// Validate an internal class name (`java/util/Map$Entry`).
pub fn validate_internal_name(internal_name: &str) -> Result<()> {
    let mut cursor = Cursor::new(internal_name, "class internal name");
    read_internal_name(&mut cursor)?;
    cursor.end()
}
