//! Laravel-style route path templates.
//!
//! A pattern such as `/users/{id}/posts/{slug?}` can be:
//! - compiled into a matcher string (`/users/:id/posts/:slug?`) with
//!   [`compile_pattern`],
//! - inventoried into required and optional names with [`extract_params`],
//! - expanded back into a concrete path with [`expand_path`], leftover
//!   values going into the query string.
//!
//! All three share one tokenizer ([`segments`]), so they agree on which
//! characters are structural. Patterns are assumed well formed; use
//! [`validate_pattern`] to check route definitions up front.

pub mod compile;
pub mod constraint;
pub mod error;
pub mod expand;
pub mod params;
pub mod query;
pub mod segment;
pub mod template;
pub mod validate;
pub mod value;

pub use compile::compile_pattern;
pub use constraint::{normalize_source, Constraint, ConstraintMap};
pub use error::TemplateError;
pub use expand::expand_path;
pub use params::{extract_params, ParamInventory};
pub use query::{stringify, ArrayFormat, QueryFormat, QueryOptions};
pub use segment::{segments, Segment, Segments};
pub use template::PathTemplate;
pub use validate::validate_pattern;
pub use value::{ParamValue, Params};
