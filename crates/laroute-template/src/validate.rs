use std::collections::HashSet;

use crate::error::TemplateError;

/// Check that a pattern is well formed.
///
/// The compiler, extractor and expander assume well-formed input and never
/// call this. Route definitions can be checked with it up front.
///
/// Reports:
/// - nested or unclosed braces
/// - unmatched closing braces
/// - empty parameter names
/// - a `?` inside a name anywhere but right before `}`
/// - duplicate parameter names
pub fn validate_pattern(pattern: &str) -> Result<(), TemplateError> {
    let mut seen_params: HashSet<String> = HashSet::new();
    let mut current_param = String::new();
    let mut in_param = false;
    let mut chars = pattern.char_indices().peekable();

    while let Some((pos, ch)) = chars.next() {
        match ch {
            '{' => {
                if in_param {
                    return Err(malformed(pattern, pos, "nested braces not allowed"));
                }
                in_param = true;
            }
            '}' => {
                if !in_param {
                    return Err(malformed(pattern, pos, "unmatched closing brace"));
                }
                in_param = false;

                if current_param.is_empty() {
                    return Err(malformed(pattern, pos, "empty parameter name"));
                }
                if !seen_params.insert(current_param.clone()) {
                    return Err(malformed(
                        pattern,
                        pos,
                        &format!("duplicate parameter '{}'", current_param),
                    ));
                }
                current_param.clear();
            }
            '?' if in_param => {
                if !matches!(chars.peek(), Some((_, '}'))) {
                    return Err(malformed(
                        pattern,
                        pos,
                        "'?' is only allowed right before '}'",
                    ));
                }
            }
            _ if in_param => current_param.push(ch),
            _ => {}
        }
    }

    if in_param {
        return Err(malformed(pattern, pattern.len(), "unclosed brace"));
    }

    Ok(())
}

fn malformed(pattern: &str, pos: usize, reason: &str) -> TemplateError {
    TemplateError::MalformedPattern(format!("{} at byte {} in '{}'", reason, pos, pattern))
}
