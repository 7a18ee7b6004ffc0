//! Pattern + values → concrete path.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::constraint::ConstraintMap;
use crate::error::TemplateError;
use crate::query::{stringify, QueryOptions};
use crate::segment::{segments, Segment};
use crate::value::Params;

/// Bytes kept verbatim when a value is written into the path: the URI
/// reserved set plus the unreserved marks.
const PATH_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b';')
    .remove(b',')
    .remove(b'/')
    .remove(b'?')
    .remove(b':')
    .remove(b'@')
    .remove(b'&')
    .remove(b'=')
    .remove(b'+')
    .remove(b'$')
    .remove(b'#')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Expand `pattern` with `values`.
///
/// Every placeholder consumes its value. Values that no placeholder
/// consumed are appended as a query string serialized with `query`
/// (a leading `?` is always requested). A trailing `/` left behind by an
/// omitted optional placeholder is dropped.
///
/// # Errors
///
/// - [`TemplateError::MissingRequiredParameter`] when a required
///   placeholder has no value.
/// - [`TemplateError::ConstraintViolation`] when a supplied value fails the
///   constraint registered for its name.
pub fn expand_path(
    pattern: &str,
    values: &Params,
    constraints: &ConstraintMap,
    query: &QueryOptions,
) -> Result<String, TemplateError> {
    let mut remaining = values.clone();
    let mut path = String::with_capacity(pattern.len());

    for segment in segments(pattern) {
        let (name, optional) = match segment {
            Segment::Literal(text) => {
                path.push_str(text);
                continue;
            }
            Segment::Param { name, optional } => (name, optional),
            Segment::Unterminated(_) => continue,
        };

        let Some(value) = remaining.remove(name) else {
            if optional {
                continue;
            }
            tracing::debug!(pattern, param = name, "missing required parameter");
            return Err(TemplateError::MissingRequiredParameter {
                name: name.to_string(),
            });
        };

        let rendered = value.render();
        if let Some(constraint) = constraints.get(name) {
            if !constraint.test(&rendered) {
                let constraint = constraint.source().into_owned();
                tracing::debug!(pattern, param = name, %constraint, "constraint violation");
                return Err(TemplateError::ConstraintViolation {
                    name: name.to_string(),
                    value: rendered,
                    constraint,
                });
            }
        }

        path.extend(utf8_percent_encode(&rendered, PATH_VALUE));
    }

    if path.len() > 1 && path.ends_with('/') {
        path.pop();
    }

    let query = stringify(&remaining, &query.clone().with_query_prefix(true));
    path.push_str(&query);

    tracing::debug!(pattern, path = %path, "expanded pattern");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand(pattern: &str, values: &Params) -> Result<String, TemplateError> {
        expand_path(pattern, values, &ConstraintMap::new(), &QueryOptions::new())
    }

    #[test]
    fn substitutes_required_value() {
        let values = Params::new().with("bar", 2);
        assert_eq!(expand("/foo/{bar}", &values).unwrap(), "/foo/2");
    }

    #[test]
    fn missing_required_value_fails() {
        let err = expand("/foo/{bar}", &Params::new()).unwrap_err();
        assert!(matches!(
            err,
            TemplateError::MissingRequiredParameter { ref name } if name == "bar"
        ));
        assert_eq!(
            err.to_string(),
            "no value for the non-optional parameter \"bar\""
        );
    }

    #[test]
    fn missing_optional_drops_trailing_slash() {
        assert_eq!(expand("/foo/{bar?}", &Params::new()).unwrap(), "/foo");
    }

    #[test]
    fn optional_value_is_used_when_present() {
        let values = Params::new().with("bar", "x");
        assert_eq!(expand("/foo/{bar?}", &values).unwrap(), "/foo/x");
    }

    #[test]
    fn root_slash_is_kept() {
        assert_eq!(expand("/", &Params::new()).unwrap(), "/");
        assert_eq!(expand("/{a?}", &Params::new()).unwrap(), "/");
    }

    #[test]
    fn only_one_trailing_slash_is_dropped() {
        assert_eq!(expand("/foo//{a?}", &Params::new()).unwrap(), "/foo/");
    }

    #[test]
    fn leftover_values_become_query() {
        let values = Params::new().with("extra", "x");
        assert_eq!(expand("/foo", &values).unwrap(), "/foo?extra=x");
    }

    #[test]
    fn consumed_values_are_not_in_query() {
        let values = Params::new().with("id", 5).with("page", 2).with("sort", "asc");
        assert_eq!(
            expand("/users/{id}", &values).unwrap(),
            "/users/5?page=2&sort=asc"
        );
    }

    #[test]
    fn query_follows_dropped_slash() {
        let values = Params::new().with("q", "a b");
        assert_eq!(expand("/search/{term?}", &values).unwrap(), "/search?q=a%20b");
    }

    #[test]
    fn constraint_violation_fails() {
        let constraints = ConstraintMap::from_regexes([("id", r"^\d+$")]).unwrap();
        let values = Params::new().with("id", "abc");
        let err =
            expand_path("/users/{id}", &values, &constraints, &QueryOptions::new()).unwrap_err();
        assert!(matches!(
            err,
            TemplateError::ConstraintViolation { ref name, ref value, ref constraint }
                if name == "id" && value == "abc" && constraint == r"^\d+$"
        ));
        assert_eq!(
            err.to_string(),
            r#"value "abc" for parameter "id" fails the "^\d+$" constraint"#
        );
    }

    #[test]
    fn constraint_satisfied() {
        let constraints = ConstraintMap::from_regexes([("id", r"^\d+$")]).unwrap();
        let values = Params::new().with("id", 42);
        assert_eq!(
            expand_path("/users/{id}", &values, &constraints, &QueryOptions::new()).unwrap(),
            "/users/42"
        );
    }

    #[test]
    fn absent_optional_value_skips_constraint() {
        let constraints = ConstraintMap::from_regexes([("page", r"^\d+$")]).unwrap();
        assert_eq!(
            expand_path("/list/{page?}", &Params::new(), &constraints, &QueryOptions::new())
                .unwrap(),
            "/list"
        );
    }

    #[test]
    fn missing_check_runs_before_constraint_check() {
        let constraints = ConstraintMap::from_regexes([("id", r"^\d+$")]).unwrap();
        let err = expand_path("/u/{id}", &Params::new(), &constraints, &QueryOptions::new())
            .unwrap_err();
        assert!(matches!(err, TemplateError::MissingRequiredParameter { .. }));
    }

    #[test]
    fn first_failing_placeholder_wins() {
        let err = expand("/{a}/{b}", &Params::new()).unwrap_err();
        assert_eq!(err.parameter(), Some("a"));
    }

    #[test]
    fn values_are_uri_escaped() {
        let values = Params::new().with("name", "hello world/ä?#");
        assert_eq!(
            expand("/greet/{name}", &values).unwrap(),
            "/greet/hello%20world/%C3%A4?#"
        );
    }

    #[test]
    fn percent_in_value_is_escaped() {
        let values = Params::new().with("v", "100%");
        assert_eq!(expand("/{v}", &values).unwrap(), "/100%25");
    }

    #[test]
    fn list_value_in_path_is_comma_joined() {
        let values = Params::new().with("ids", vec![1, 2, 3]);
        assert_eq!(expand("/batch/{ids}", &values).unwrap(), "/batch/1,2,3");
    }

    #[test]
    fn caller_values_are_untouched() {
        let values = Params::new().with("a", 1).with("b", 2);
        let before = values.clone();
        expand("/{a}", &values).unwrap();
        assert_eq!(values, before);
    }

    #[test]
    fn query_options_are_honoured_and_prefix_forced() {
        let values = Params::new().with("b", 2).with("a", 1);
        let query = QueryOptions::new().with_sort(true).with_query_prefix(false);
        assert_eq!(
            expand_path("/x", &values, &ConstraintMap::new(), &query).unwrap(),
            "/x?a=1&b=2"
        );
    }

    #[test]
    fn repeated_placeholder_consumes_once() {
        let values = Params::new().with("a", 1);
        let err = expand("/{a}/{a}", &values).unwrap_err();
        assert_eq!(err.parameter(), Some("a"));
    }
}
