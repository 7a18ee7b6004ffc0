//! Query-string serialization for values left over after expansion.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

use crate::value::{ParamValue, Params};

/// Bytes left alone when encoding a query key or value.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Space encoding used in query output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryFormat {
    /// Space becomes `%20`.
    #[default]
    Rfc3986,
    /// Space becomes `+`.
    Rfc1738,
}

/// How list values are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrayFormat {
    /// `a[0]=x&a[1]=y`
    #[default]
    Indices,
    /// `a[]=x&a[]=y`
    Brackets,
    /// `a=x&a=y`
    Repeat,
    /// `a=x,y`
    Comma,
}

/// Query serialization settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryOptions {
    /// Prepend `?` to non-empty output.
    pub add_query_prefix: bool,

    /// Separator between pairs.
    pub delimiter: String,

    /// Percent-encode keys and values.
    pub encode: bool,

    /// Only encode values; keys are written raw.
    pub encode_values_only: bool,

    pub format: QueryFormat,

    pub array_format: ArrayFormat,

    /// Order pairs by key instead of insertion order.
    pub sort: bool,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            add_query_prefix: false,
            delimiter: "&".to_string(),
            encode: true,
            encode_values_only: false,
            format: QueryFormat::Rfc3986,
            array_format: ArrayFormat::Indices,
            sort: false,
        }
    }
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query_prefix(mut self, enabled: bool) -> Self {
        self.add_query_prefix = enabled;
        self
    }

    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    pub fn with_encode(mut self, enabled: bool) -> Self {
        self.encode = enabled;
        self
    }

    pub fn with_encode_values_only(mut self, enabled: bool) -> Self {
        self.encode_values_only = enabled;
        self
    }

    pub fn with_format(mut self, format: QueryFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_array_format(mut self, format: ArrayFormat) -> Self {
        self.array_format = format;
        self
    }

    pub fn with_sort(mut self, enabled: bool) -> Self {
        self.sort = enabled;
        self
    }

    fn encode_key(&self, key: &str) -> String {
        if self.encode && !self.encode_values_only {
            self.escape(key)
        } else {
            key.to_string()
        }
    }

    fn encode_value(&self, value: &str) -> String {
        if self.encode {
            self.escape(value)
        } else {
            value.to_string()
        }
    }

    fn escape(&self, raw: &str) -> String {
        let encoded = utf8_percent_encode(raw, QUERY_COMPONENT).to_string();
        match self.format {
            QueryFormat::Rfc3986 => encoded,
            QueryFormat::Rfc1738 => encoded.replace("%20", "+"),
        }
    }
}

/// Serialize `params` into a query string.
///
/// Returns an empty string when there is nothing to write, even if
/// `add_query_prefix` is set.
pub fn stringify(params: &Params, options: &QueryOptions) -> String {
    let mut entries: Vec<(&str, &ParamValue)> = params.iter().collect();
    if options.sort {
        entries.sort_by(|a, b| a.0.cmp(b.0));
    }

    let mut pairs = Vec::with_capacity(entries.len());
    for (key, value) in entries {
        match value {
            ParamValue::Scalar(v) => pairs.push(pair(options, key, v)),
            ParamValue::List(items) if items.is_empty() => {}
            ParamValue::List(items) => match options.array_format {
                ArrayFormat::Indices => pairs.extend(
                    items
                        .iter()
                        .enumerate()
                        .map(|(i, v)| pair(options, &format!("{key}[{i}]"), v)),
                ),
                ArrayFormat::Brackets => pairs.extend(
                    items
                        .iter()
                        .map(|v| pair(options, &format!("{key}[]"), v)),
                ),
                ArrayFormat::Repeat => {
                    pairs.extend(items.iter().map(|v| pair(options, key, v)))
                }
                ArrayFormat::Comma => pairs.push(pair(options, key, &items.join(","))),
            },
        }
    }

    if pairs.is_empty() {
        return String::new();
    }

    let joined = pairs.join(options.delimiter.as_str());
    if options.add_query_prefix {
        format!("?{joined}")
    } else {
        joined
    }
}

fn pair(options: &QueryOptions, key: &str, value: &str) -> String {
    format!("{}={}", options.encode_key(key), options.encode_value(value))
}
