//! Stream descriptor contract
//!
//! The descriptor every extractable resource exposes: a unique name, an HTTP
//! path template, a records-path expression selecting the record array from
//! a paginated response envelope, a primary key, an optional replication
//! key, and an ordered field schema. The external extraction framework owns
//! transport, pagination, authentication, and state; a descriptor owns
//! everything between "raw envelope" and "conformed record sequence".

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use crate::error::{SourceError, SourceResult};
use crate::record::{conform, Record};
use crate::schema::FieldList;

/// String parameters used to resolve `{name}` placeholders in path
/// templates and records-path expressions.
#[derive(Debug, Clone, Default)]
pub struct PathParams {
    params: HashMap<String, String>,
}

impl PathParams {
    /// Create an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter using builder pattern.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Set a parameter.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.params.insert(name.into(), value.into());
    }

    /// Get a parameter value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Check if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

/// One parsed piece of a path template.
#[derive(Debug, Clone, PartialEq)]
enum Part {
    Literal(String),
    Param(String),
}

/// An HTTP path template such as `/subscribers` or `/campaigns/{status}`.
///
/// Placeholders are `{name}` where `name` is an identifier; anything else
/// is literal text. Resolution substitutes every placeholder from a
/// [`PathParams`] set and fails on the first missing parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct PathTemplate {
    template: String,
    parts: Vec<Part>,
}

impl PathTemplate {
    /// Create a path template from its string form.
    pub fn new(template: impl Into<String>) -> Self {
        let template = template.into();
        let parts = parse_parts(&template);
        Self { template, parts }
    }

    /// Get the raw template string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.template
    }

    /// Get the placeholder names, in order of appearance.
    #[must_use]
    pub fn params(&self) -> Vec<&str> {
        self.parts
            .iter()
            .filter_map(|p| match p {
                Part::Param(name) => Some(name.as_str()),
                Part::Literal(_) => None,
            })
            .collect()
    }

    /// Check that the template contains no stray braces outside
    /// placeholders.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.parts.iter().all(|p| match p {
            Part::Literal(text) => !text.contains('{') && !text.contains('}'),
            Part::Param(_) => true,
        })
    }

    /// Substitute every placeholder and return the concrete request path.
    pub fn resolve(&self, params: &PathParams) -> SourceResult<String> {
        let mut resolved = String::with_capacity(self.template.len());
        for part in &self.parts {
            match part {
                Part::Literal(text) => resolved.push_str(text),
                Part::Param(name) => match params.get(name) {
                    Some(value) => resolved.push_str(value),
                    None => {
                        return Err(SourceError::MissingPathParam {
                            template: self.template.clone(),
                            param: name.clone(),
                        })
                    }
                },
            }
        }
        Ok(resolved)
    }
}

impl std::fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.template)
    }
}

fn parse_parts(template: &str) -> Vec<Part> {
    let mut parts = Vec::new();
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        let Some(close) = rest[open..].find('}').map(|i| open + i) else {
            break;
        };
        let name = &rest[open + 1..close];
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            // Not a placeholder; keep the brace as literal text.
            parts.push(Part::Literal(rest[..=open].to_string()));
            rest = &rest[open + 1..];
            continue;
        }
        if open > 0 {
            parts.push(Part::Literal(rest[..open].to_string()));
        }
        parts.push(Part::Param(name.to_string()));
        rest = &rest[close + 1..];
    }

    if !rest.is_empty() {
        parts.push(Part::Literal(rest.to_string()));
    }
    parts
}

/// The envelope key a records path selects, after parsing.
#[derive(Debug, Clone, PartialEq)]
enum KeySpec {
    Literal(String),
    Param(String),
    Invalid(String),
}

/// A records-path expression selecting the record array within a paginated
/// response envelope.
///
/// The supported grammar matches the envelope shape the upstream API uses:
/// `$.<key>[*]`, where `<key>` is either a literal envelope key
/// (`$.subscribers[*]`) or a `{param}` placeholder resolved at extraction
/// time (`$.{status}[*]`).
#[derive(Debug, Clone, PartialEq)]
pub struct RecordsPath {
    expression: String,
    key: KeySpec,
}

impl RecordsPath {
    /// Create a records path from its expression form.
    ///
    /// Parsing happens eagerly; an unsupported expression is reported by
    /// [`RecordsPath::validate`] and by any attempt to resolve it.
    pub fn new(expression: impl Into<String>) -> Self {
        let expression = expression.into();
        let key = parse_key_spec(&expression);
        Self { expression, key }
    }

    /// Get the raw expression string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.expression
    }

    /// Check that the expression parsed against the supported grammar.
    pub fn validate(&self) -> SourceResult<()> {
        match &self.key {
            KeySpec::Invalid(message) => Err(SourceError::InvalidRecordsPath {
                expression: self.expression.clone(),
                message: message.clone(),
            }),
            _ => Ok(()),
        }
    }

    /// Resolve the concrete envelope key for this extraction.
    pub fn resolve_key(&self, params: &PathParams) -> SourceResult<String> {
        match &self.key {
            KeySpec::Literal(key) => Ok(key.clone()),
            KeySpec::Param(name) => params.get(name).map(str::to_string).ok_or_else(|| {
                SourceError::MissingPathParam {
                    template: self.expression.clone(),
                    param: name.clone(),
                }
            }),
            KeySpec::Invalid(message) => Err(SourceError::InvalidRecordsPath {
                expression: self.expression.clone(),
                message: message.clone(),
            }),
        }
    }
}

impl std::fmt::Display for RecordsPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.expression)
    }
}

fn parse_key_spec(expression: &str) -> KeySpec {
    let Some(inner) = expression
        .strip_prefix("$.")
        .and_then(|e| e.strip_suffix("[*]"))
    else {
        return KeySpec::Invalid("expected the form '$.<key>[*]'".to_string());
    };

    if inner.is_empty() {
        return KeySpec::Invalid("envelope key is empty".to_string());
    }

    if let Some(name) = inner.strip_prefix('{').and_then(|i| i.strip_suffix('}')) {
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return KeySpec::Invalid(format!("invalid placeholder '{{{name}}}'"));
        }
        return KeySpec::Param(name.to_string());
    }

    if inner.contains(['.', '[', ']', '{', '}']) {
        return KeySpec::Invalid(format!("unsupported envelope key '{inner}'"));
    }

    KeySpec::Literal(inner.to_string())
}

/// The stream-descriptor contract.
///
/// Each extractable resource registers one implementation with the
/// [`Catalog`](crate::catalog::Catalog). Descriptors are static
/// configuration: constructed once at connector startup, never mutated.
pub trait Stream: Send + Sync {
    /// Unique resource name (also the default output table name).
    fn name(&self) -> &str;

    /// HTTP path template for this resource.
    fn path(&self) -> &PathTemplate;

    /// Expression selecting the record array from a response envelope.
    fn records_path(&self) -> &RecordsPath;

    /// Primary-key fields; a non-empty subset of the declared fields.
    ///
    /// Uniqueness of key values is an upstream guarantee, not enforced
    /// here.
    fn primary_keys(&self) -> &[String];

    /// Field used for incremental extraction, if any.
    ///
    /// `None` declares the stream full-refresh.
    fn replication_key(&self) -> Option<&str> {
        None
    }

    /// The ordered field schema of emitted records.
    fn schema(&self) -> &FieldList;

    /// Resolve the concrete request path for this extraction.
    fn resolve_path(&self, params: &PathParams) -> SourceResult<String> {
        self.path().resolve(params)
    }

    /// Extract and conform the records of one response envelope.
    ///
    /// Yields the array elements under the resolved envelope key, in
    /// original order, each conformed against the declared schema. A
    /// missing key or non-array value is an envelope mismatch error; field
    /// level problems never are.
    fn extract_records(&self, envelope: &Value, params: &PathParams) -> SourceResult<Vec<Record>> {
        let key = self.records_path().resolve_key(params)?;

        let rows = envelope
            .get(&key)
            .ok_or_else(|| {
                SourceError::envelope_mismatch(
                    self.name(),
                    format!("response key '{key}' is absent"),
                )
            })?
            .as_array()
            .ok_or_else(|| {
                SourceError::envelope_mismatch(
                    self.name(),
                    format!("response key '{key}' is not an array"),
                )
            })?;

        let records: Vec<Record> = rows.iter().map(|raw| conform(self.schema(), raw)).collect();

        debug!(
            stream = %self.name(),
            key = %key,
            count = records.len(),
            "extracted records from envelope"
        );

        Ok(records)
    }

    /// Validate this descriptor.
    ///
    /// Called by the catalog at registration time.
    fn validate(&self) -> SourceResult<()> {
        if self.name().is_empty() {
            return Err(SourceError::invalid_descriptor(
                "<unnamed>",
                "stream name is empty",
            ));
        }

        let path = self.path();
        if !path.as_str().starts_with('/') {
            return Err(SourceError::invalid_descriptor(
                self.name(),
                format!("path '{path}' must start with '/'"),
            ));
        }
        if !path.is_well_formed() {
            return Err(SourceError::invalid_descriptor(
                self.name(),
                format!("path '{path}' has malformed placeholders"),
            ));
        }

        self.records_path().validate()?;

        if self.schema().is_empty() {
            return Err(SourceError::invalid_descriptor(
                self.name(),
                "schema declares no fields",
            ));
        }

        if self.primary_keys().is_empty() {
            return Err(SourceError::invalid_descriptor(
                self.name(),
                "primary key list is empty",
            ));
        }
        for key in self.primary_keys() {
            if !self.schema().contains(key) {
                return Err(SourceError::invalid_descriptor(
                    self.name(),
                    format!("primary key '{key}' is not a declared field"),
                ));
            }
        }

        if let Some(key) = self.replication_key() {
            if !self.schema().contains(key) {
                return Err(SourceError::invalid_descriptor(
                    self.name(),
                    format!("replication key '{key}' is not a declared field"),
                ));
            }
        }

        Ok(())
    }
}
