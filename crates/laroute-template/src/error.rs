use thiserror::Error;

/// Errors produced while expanding or validating a path template.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// A required placeholder had no value.
    #[error("no value for the non-optional parameter \"{name}\"")]
    MissingRequiredParameter { name: String },

    /// A supplied value failed its parameter's constraint.
    #[error("value \"{value}\" for parameter \"{name}\" fails the \"{constraint}\" constraint")]
    ConstraintViolation {
        name: String,
        value: String,
        constraint: String,
    },

    /// A constraint regex did not compile.
    #[error("invalid constraint for parameter \"{name}\": {source}")]
    InvalidConstraint {
        name: String,
        #[source]
        source: regex::Error,
    },

    /// Pattern is not well formed. Only reported by [`crate::validate_pattern`].
    #[error("malformed pattern: {0}")]
    MalformedPattern(String),
}

impl TemplateError {
    /// Name of the parameter the error is about, if any.
    pub fn parameter(&self) -> Option<&str> {
        match self {
            Self::MissingRequiredParameter { name }
            | Self::ConstraintViolation { name, .. }
            | Self::InvalidConstraint { name, .. } => Some(name.as_str()),
            Self::MalformedPattern(_) => None,
        }
    }
}
