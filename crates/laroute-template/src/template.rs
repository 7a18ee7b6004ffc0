//! A pattern bundled with its constraints.

use crate::compile::compile_pattern;
use crate::constraint::{Constraint, ConstraintMap};
use crate::error::TemplateError;
use crate::expand::expand_path;
use crate::params::{extract_params, ParamInventory};
use crate::query::QueryOptions;
use crate::validate::validate_pattern;
use crate::value::Params;

/// A named route's pattern and constraints, ready to compile or expand.
///
/// ```
/// use laroute_template::{Params, PathTemplate};
///
/// let template = PathTemplate::new("/users/{id}/{tab?}")
///     .with_regex("id", r"^\d+$")
///     .unwrap();
///
/// assert_eq!(template.matcher(), r"/users/:id(\d+)/:tab?");
/// assert_eq!(
///     template.expand(&Params::new().with("id", 7).with("page", 2)).unwrap(),
///     "/users/7?page=2"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct PathTemplate {
    pattern: String,
    constraints: ConstraintMap,
}

impl PathTemplate {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            constraints: ConstraintMap::new(),
        }
    }

    /// Replace all constraints.
    pub fn with_constraints(mut self, constraints: ConstraintMap) -> Self {
        self.constraints = constraints;
        self
    }

    /// Add a constraint for one parameter.
    pub fn with_constraint<C>(mut self, name: impl Into<String>, constraint: C) -> Self
    where
        C: Constraint + Send + Sync + 'static,
    {
        self.constraints.insert(name, constraint);
        self
    }

    /// Add a regex constraint for one parameter.
    pub fn with_regex(
        mut self,
        name: impl Into<String>,
        regex: &str,
    ) -> Result<Self, TemplateError> {
        let added = ConstraintMap::from_regexes([(name, regex)])?;
        self.constraints.merge(&added);
        Ok(self)
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn constraints(&self) -> &ConstraintMap {
        &self.constraints
    }

    /// Matcher string for the host router.
    pub fn matcher(&self) -> String {
        compile_pattern(&self.pattern, &self.constraints)
    }

    pub fn params(&self) -> ParamInventory {
        extract_params(&self.pattern)
    }

    /// Expand with default query options.
    pub fn expand(&self, values: &Params) -> Result<String, TemplateError> {
        self.expand_with(values, &QueryOptions::default())
    }

    pub fn expand_with(
        &self,
        values: &Params,
        query: &QueryOptions,
    ) -> Result<String, TemplateError> {
        expand_path(&self.pattern, values, &self.constraints, query)
    }

    pub fn validate(&self) -> Result<(), TemplateError> {
        validate_pattern(&self.pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn delegates_to_all_operations() {
        let template = PathTemplate::new("/posts/{slug}/{page?}")
            .with_constraint("slug", Regex::new("^[a-z-]+$").unwrap());

        assert_eq!(template.pattern(), "/posts/{slug}/{page?}");
        assert_eq!(template.matcher(), "/posts/:slug([a-z-]+)/:page?");
        assert_eq!(template.params().required, vec!["slug"]);
        assert_eq!(template.params().optional, vec!["page"]);
        assert!(template.validate().is_ok());
        assert_eq!(
            template
                .expand(&Params::new().with("slug", "hello-world"))
                .unwrap(),
            "/posts/hello-world"
        );
    }

    #[test]
    fn constraint_failure_surfaces() {
        let template = PathTemplate::new("/posts/{slug}")
            .with_regex("slug", "^[a-z-]+$")
            .unwrap();
        let err = template
            .expand(&Params::new().with("slug", "Nope"))
            .unwrap_err();
        assert!(matches!(err, TemplateError::ConstraintViolation { .. }));
    }

    #[test]
    fn with_regex_rejects_bad_regex() {
        assert!(PathTemplate::new("/{a}").with_regex("a", "[").is_err());
    }

    #[test]
    fn expand_with_custom_query_options() {
        let template = PathTemplate::new("/items");
        let values = Params::new().with("tags", vec!["a", "b"]);
        let query = QueryOptions::new().with_array_format(crate::ArrayFormat::Repeat);
        assert_eq!(
            template.expand_with(&values, &query).unwrap(),
            "/items?tags=a&tags=b"
        );
    }
}
