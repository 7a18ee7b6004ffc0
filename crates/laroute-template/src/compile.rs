//! Pattern → matcher-string rewriting.
//!
//! `{name}` becomes `:name`, `{name?}` becomes `:name?`, and a constraint
//! for `name` is embedded inline as `:name(fragment)`.

use crate::constraint::{normalize_source, ConstraintMap};
use crate::segment::{segments, Segment};

/// Rewrite `pattern` into the `:name` syntax understood by path matchers.
///
/// This is a pure rewrite; constraints are embedded, never evaluated.
/// Patterns without placeholders come back unchanged.
pub fn compile_pattern(pattern: &str, constraints: &ConstraintMap) -> String {
    let mut out = String::with_capacity(pattern.len() + 8);

    for segment in segments(pattern) {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Param { name, optional } => {
                out.push(':');
                out.push_str(name);
                if let Some(constraint) = constraints.get(name) {
                    out.push('(');
                    out.push_str(normalize_source(&constraint.source()));
                    out.push(')');
                }
                if optional {
                    out.push('?');
                }
            }
            // Malformed input: the name is written but no group is closed.
            Segment::Unterminated(partial) => {
                out.push(':');
                out.push_str(partial);
            }
        }
    }

    tracing::trace!(pattern, matcher = %out, "compiled pattern");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(pattern: &str) -> String {
        compile_pattern(pattern, &ConstraintMap::new())
    }

    #[test]
    fn converts_laravel_style_params() {
        let cases = [
            ("/foo", "/foo"),
            ("/{foo}", "/:foo"),
            ("/foo/{bar}", "/foo/:bar"),
            ("/foo/{bar}/{baz}", "/foo/:bar/:baz"),
            ("/foo/{bar}/baz/{qux}", "/foo/:bar/baz/:qux"),
            ("/foo/{bar?}", "/foo/:bar?"),
        ];

        for (pattern, expected) in cases {
            assert_eq!(compile(pattern), expected, "pattern {pattern}");
        }
    }

    #[test]
    fn embeds_constraints_as_groups() {
        let constraints = ConstraintMap::from_regexes([
            ("foo", r"^[a-zA-Z]*$"),
            ("bar", r"^\d+$"),
            ("baz", r"^\w+$"),
        ])
        .unwrap();

        assert_eq!(
            compile_pattern("/{foo}/{bar}/{baz}", &constraints),
            r"/:foo([a-zA-Z]*)/:bar(\d+)/:baz(\w+)"
        );
    }

    #[test]
    fn constraint_group_precedes_optional_marker() {
        let constraints = ConstraintMap::from_regexes([("id", r"^\d+$")]).unwrap();
        assert_eq!(
            compile_pattern("/posts/{id?}", &constraints),
            r"/posts/:id(\d+)?"
        );
    }

    #[test]
    fn constraints_for_absent_names_are_ignored() {
        let constraints = ConstraintMap::from_regexes([("other", r"^\d+$")]).unwrap();
        assert_eq!(compile_pattern("/a/{b}", &constraints), "/a/:b");
    }

    #[test]
    fn empty_pattern() {
        assert_eq!(compile(""), "");
    }

    #[test]
    fn literal_question_mark_is_kept() {
        assert_eq!(compile("/what?/{x}"), "/what?/:x");
    }

    #[test]
    fn unterminated_param_writes_partial_name() {
        assert_eq!(compile("/foo/{bar"), "/foo/:bar");
    }
}
