//! Per-parameter constraints.
//!
//! A constraint is anything that can test a candidate value and describe
//! itself as a regex fragment. [`regex::Regex`] is the stock implementation.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use regex::Regex;

use crate::error::TemplateError;

/// A validation predicate attached to a named parameter.
pub trait Constraint {
    /// Whether `value` satisfies the constraint.
    fn test(&self, value: &str) -> bool;

    /// Textual form, usable as a matcher fragment once passed through
    /// [`normalize_source`]. May carry `/…/` or `^…$` delimiters.
    fn source(&self) -> Cow<'_, str>;
}

impl Constraint for Regex {
    fn test(&self, value: &str) -> bool {
        self.is_match(value)
    }

    fn source(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

impl<C: Constraint + ?Sized> Constraint for &C {
    fn test(&self, value: &str) -> bool {
        (**self).test(value)
    }

    fn source(&self) -> Cow<'_, str> {
        (**self).source()
    }
}

impl<C: Constraint + ?Sized> Constraint for Box<C> {
    fn test(&self, value: &str) -> bool {
        (**self).test(value)
    }

    fn source(&self) -> Cow<'_, str> {
        (**self).source()
    }
}

impl<C: Constraint + ?Sized> Constraint for Arc<C> {
    fn test(&self, value: &str) -> bool {
        (**self).test(value)
    }

    fn source(&self) -> Cow<'_, str> {
        (**self).source()
    }
}

/// Strip regex delimiters so the source can sit inside a matcher group.
///
/// Removes one leading `/`, then one leading `^`, then one trailing `/`,
/// then one trailing `$`. `/^\d+$/` and `^\d+$` both become `\d+`.
pub fn normalize_source(source: &str) -> &str {
    let s = source.strip_prefix('/').unwrap_or(source);
    let s = s.strip_prefix('^').unwrap_or(s);
    let s = s.strip_suffix('/').unwrap_or(s);
    s.strip_suffix('$').unwrap_or(s)
}

type SharedConstraint = Arc<dyn Constraint + Send + Sync>;

/// Constraints keyed by parameter name.
///
/// Cheap to clone; constraints are shared.
#[derive(Clone, Default)]
pub struct ConstraintMap {
    inner: HashMap<String, SharedConstraint>,
}

impl ConstraintMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile `(name, regex)` pairs into a map.
    pub fn from_regexes<I, K, V>(pairs: I) -> Result<Self, TemplateError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let mut map = Self::new();
        for (name, source) in pairs {
            let name = name.into();
            let regex =
                Regex::new(source.as_ref()).map_err(|source| TemplateError::InvalidConstraint {
                    name: name.clone(),
                    source,
                })?;
            map.insert(name, regex);
        }
        Ok(map)
    }

    /// Add or replace the constraint for `name`.
    pub fn insert<C>(&mut self, name: impl Into<String>, constraint: C)
    where
        C: Constraint + Send + Sync + 'static,
    {
        self.inner.insert(name.into(), Arc::new(constraint));
    }

    /// Builder form of [`ConstraintMap::insert`].
    pub fn with<C>(mut self, name: impl Into<String>, constraint: C) -> Self
    where
        C: Constraint + Send + Sync + 'static,
    {
        self.insert(name, constraint);
        self
    }

    /// Copy every entry of `other` into `self`, replacing same-named ones.
    pub fn merge(&mut self, other: &ConstraintMap) {
        for (name, constraint) in &other.inner {
            self.inner.insert(name.clone(), Arc::clone(constraint));
        }
    }

    /// Look up the constraint for a parameter.
    pub fn get(&self, name: &str) -> Option<&(dyn Constraint + Send + Sync)> {
        self.inner.get(name).map(|c| &**c)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inner.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl fmt::Debug for ConstraintMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.inner.iter().collect();
        names.sort_by(|a, b| a.0.cmp(b.0));
        f.debug_map()
            .entries(names.into_iter().map(|(k, v)| (k, v.source())))
            .finish()
    }
}
