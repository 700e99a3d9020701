use crate::error::{GainsError, Result};
use std::collections::HashMap;
use std::iter::Peekable;
use std::str::Chars;

/// Replace every `${name}` in `template` with its binding.
///
/// A `$` not followed by `{` is literal, so R accessors like `df$value`
/// pass through untouched.
pub fn expand_placeholders(template: &str, bindings: &HashMap<&str, String>) -> Result<String> {
    let mut output = String::with_capacity(template.len() * 2);
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '$' && chars.peek() == Some(&'{') {
            chars.next();
            let name = consume_placeholder(&mut chars);
            match bindings.get(name.as_str()) {
                Some(value) => output.push_str(value),
                None => return Err(GainsError::UndefinedPlaceholder(name)),
            }
        } else {
            output.push(c);
        }
    }

    Ok(output)
}

// Reads up to and including the closing brace.
fn consume_placeholder(chars: &mut Peekable<Chars>) -> String {
    let mut name = String::new();
    for c in chars.by_ref() {
        if c == '}' {
            break;
        }
        name.push(c);
    }
    name
}
