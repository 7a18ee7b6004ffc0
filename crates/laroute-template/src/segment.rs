//! Left-to-right tokenizer shared by the compiler, the extractor and the
//! expander.
//!
//! A pattern such as `/users/{id}/posts/{slug?}` is split into literal runs
//! and parameter placeholders. Segments borrow from the pattern; nothing is
//! allocated.

use std::iter::FusedIterator;

/// A single token of a path pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Text copied as-is (slashes included).
    Literal(&'a str),
    /// A `{name}` or `{name?}` placeholder.
    Param { name: &'a str, optional: bool },
    /// A `{` that was never closed; carries the partial name read so far.
    ///
    /// Only produced for malformed patterns, and always last.
    Unterminated(&'a str),
}

impl<'a> Segment<'a> {
    /// Parameter name for `Param` segments.
    pub fn param_name(&self) -> Option<&'a str> {
        match *self {
            Segment::Param { name, .. } => Some(name),
            _ => None,
        }
    }
}

/// Iterator over the segments of a pattern. Created by [`segments`].
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    pattern: &'a str,
    pos: usize,
}

/// Tokenize a pattern lazily.
pub fn segments(pattern: &str) -> Segments<'_> {
    Segments { pattern, pos: 0 }
}

impl<'a> Segments<'a> {
    /// Scan a placeholder whose `{` sits at `self.pos`.
    fn scan_param(&mut self) -> Segment<'a> {
        let bytes = self.pattern.as_bytes();
        let mut start = self.pos + 1;
        let mut i = start;

        while i < bytes.len() {
            match bytes[i] {
                // Nested brace: restart the placeholder here.
                b'{' => {
                    start = i + 1;
                }
                b'}' => {
                    self.pos = i + 1;
                    return Segment::Param {
                        name: &self.pattern[start..i],
                        optional: false,
                    };
                }
                b'?' if bytes.get(i + 1) == Some(&b'}') => {
                    self.pos = i + 2;
                    return Segment::Param {
                        name: &self.pattern[start..i],
                        optional: true,
                    };
                }
                _ => {}
            }
            i += 1;
        }

        self.pos = bytes.len();
        Segment::Unterminated(&self.pattern[start..])
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.pattern[self.pos..];
        if rest.is_empty() {
            return None;
        }

        match rest.as_bytes()[0] {
            b'{' => Some(self.scan_param()),
            // Stray closing brace outside a placeholder.
            b'}' => {
                self.pos += 1;
                Some(Segment::Param {
                    name: "",
                    optional: false,
                })
            }
            _ => {
                let len = rest.find(['{', '}']).unwrap_or(rest.len());
                self.pos += len;
                Some(Segment::Literal(&rest[..len]))
            }
        }
    }
}

impl FusedIterator for Segments<'_> {}
