//! Parameter inventory of a pattern.

use serde::{Deserialize, Serialize};

use crate::segment::{segments, Segment};

/// Names of the placeholders in a pattern, split by optionality.
///
/// Both lists keep the order in which placeholders appear.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamInventory {
    pub required: Vec<String>,
    pub optional: Vec<String>,
}

impl ParamInventory {
    /// Whether the pattern has no placeholders at all.
    pub fn is_empty(&self) -> bool {
        self.required.is_empty() && self.optional.is_empty()
    }

    /// Whether `name` is one of the placeholders.
    pub fn contains(&self, name: &str) -> bool {
        self.required.iter().chain(&self.optional).any(|n| n == name)
    }
}

/// List the required and optional parameters of `pattern`.
pub fn extract_params(pattern: &str) -> ParamInventory {
    segments(pattern).fold(ParamInventory::default(), |mut inventory, segment| {
        match segment {
            Segment::Param {
                name,
                optional: true,
            } => inventory.optional.push(name.to_string()),
            Segment::Param {
                name,
                optional: false,
            } => inventory.required.push(name.to_string()),
            Segment::Literal(_) | Segment::Unterminated(_) => {}
        }
        inventory
    })
}
