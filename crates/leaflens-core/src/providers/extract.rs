//! Pull the first JSON object out of free-form model output
//!
//! Generative responses often wrap the requested JSON in prose or markdown
//! fences. The scanner starts at the first `{`, follows nesting depth while
//! skipping over string literals, and parses the balanced slice.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("no JSON object found in response")]
    NoObject,

    #[error("JSON object starting at byte {start} is never closed")]
    Unbalanced { start: usize },

    #[error("invalid JSON object: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// Byte range of the first balanced `{ ... }` in `text`
fn find_object(text: &str) -> Result<(usize, usize), ParseError> {
    let start = text.find('{').ok_or(ParseError::NoObject)?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in text[start..].char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok((start, start + offset + 1));
                }
            }
            _ => {}
        }
    }

    Err(ParseError::Unbalanced { start })
}

/// Raw text of the first JSON object in `text`
pub fn extract_json_str(text: &str) -> Result<&str, ParseError> {
    let (start, end) = find_object(text)?;
    Ok(&text[start..end])
}

/// Parse the first JSON object embedded in `text`
pub fn extract_json_object(text: &str) -> Result<serde_json::Value, ParseError> {
    let raw = extract_json_str(text)?;
    Ok(serde_json::from_str(raw)?)
}
