//! Stream catalog
//!
//! The set of stream descriptors a source exposes. Built once at connector
//! startup, handed to the external extraction framework, and never mutated
//! afterward.

use serde_json::{json, Value};
use tracing::debug;

use crate::error::{SourceError, SourceResult};
use crate::stream::Stream;

/// A catalog of registered stream descriptors.
///
/// Registration order is preserved; it is the order streams appear in the
/// discovery document and the order the framework extracts them.
#[derive(Default)]
pub struct Catalog {
    streams: Vec<Box<dyn Stream>>,
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("streams", &self.stream_names())
            .finish()
    }
}

impl Catalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a stream descriptor.
    ///
    /// The descriptor is validated first; a descriptor that fails
    /// validation or reuses a registered name is rejected.
    pub fn register(&mut self, stream: Box<dyn Stream>) -> SourceResult<()> {
        stream.validate()?;

        if self.get(stream.name()).is_some() {
            return Err(SourceError::DuplicateStream {
                name: stream.name().to_string(),
            });
        }

        debug!(stream = %stream.name(), path = %stream.path(), "registered stream");
        self.streams.push(stream);
        Ok(())
    }

    /// Find a stream by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn Stream> {
        self.streams
            .iter()
            .find(|s| s.name() == name)
            .map(Box::as_ref)
    }

    /// Find a stream by name, or fail.
    pub fn require(&self, name: &str) -> SourceResult<&dyn Stream> {
        self.get(name).ok_or_else(|| SourceError::StreamNotFound {
            name: name.to_string(),
        })
    }

    /// Iterate over streams in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Stream> {
        self.streams.iter().map(Box::as_ref)
    }

    /// Get all stream names in registration order.
    #[must_use]
    pub fn stream_names(&self) -> Vec<&str> {
        self.streams.iter().map(|s| s.name()).collect()
    }

    /// Get the number of registered streams.
    #[must_use]
    pub fn len(&self) -> usize {
        self.streams.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }

    /// Render the discovery document the extraction framework consumes.
    ///
    /// One entry per stream: name, path template, primary keys,
    /// replication key, and the JSON-Schema rendering of the field list.
    #[must_use]
    pub fn to_discovery_json(&self) -> Value {
        let streams: Vec<Value> = self
            .streams
            .iter()
            .map(|s| {
                json!({
                    "name": s.name(),
                    "path": s.path().as_str(),
                    "records_path": s.records_path().as_str(),
                    "primary_keys": s.primary_keys(),
                    "replication_key": s.replication_key(),
                    "schema": s.schema().to_json_schema(),
                })
            })
            .collect();

        json!({ "streams": streams })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldList, FieldSchema};
    use crate::stream::{PathTemplate, RecordsPath};

    struct NamedStream {
        name: String,
        path: PathTemplate,
        records_path: RecordsPath,
        primary_keys: Vec<String>,
        schema: FieldList,
    }

    impl NamedStream {
        fn new(name: &str) -> Self {
            Self {
                name: name.to_string(),
                path: PathTemplate::new(format!("/{name}")),
                records_path: RecordsPath::new(format!("$.{name}[*]")),
                primary_keys: vec!["id".to_string()],
                schema: FieldList::new().with_field(FieldSchema::integer("id")),
            }
        }
    }

    impl Stream for NamedStream {
        fn name(&self) -> &str {
            &self.name
        }
        fn path(&self) -> &PathTemplate {
            &self.path
        }
        fn records_path(&self) -> &RecordsPath {
            &self.records_path
        }
        fn primary_keys(&self) -> &[String] {
            &self.primary_keys
        }
        fn schema(&self) -> &FieldList {
            &self.schema
        }
    }

    #[test]
    fn test_register_and_lookup() {
        let mut catalog = Catalog::new();
        catalog.register(Box::new(NamedStream::new("subscribers"))).unwrap();
        catalog.register(Box::new(NamedStream::new("groups"))).unwrap();

        assert_eq!(catalog.len(), 2);
        assert!(catalog.get("subscribers").is_some());
        assert!(catalog.get("campaigns").is_none());
        assert!(catalog.require("groups").is_ok());
        assert_eq!(
            catalog.require("campaigns").err().unwrap().error_code(),
            "STREAM_NOT_FOUND"
        );
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let mut catalog = Catalog::new();
        catalog.register(Box::new(NamedStream::new("groups"))).unwrap();

        let err = catalog
            .register(Box::new(NamedStream::new("groups")))
            .unwrap_err();
        assert_eq!(err.error_code(), "DUPLICATE_STREAM");
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_invalid_descriptor_rejected() {
        let mut stream = NamedStream::new("things");
        stream.primary_keys = Vec::new();

        let mut catalog = Catalog::new();
        let err = catalog.register(Box::new(stream)).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_DESCRIPTOR");
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_registration_order_preserved() {
        let mut catalog = Catalog::new();
        for name in ["subscribers", "groups", "campaigns"] {
            catalog.register(Box::new(NamedStream::new(name))).unwrap();
        }

        assert_eq!(
            catalog.stream_names(),
            vec!["subscribers", "groups", "campaigns"]
        );
    }

    #[test]
    fn test_discovery_json_shape() {
        let mut catalog = Catalog::new();
        catalog.register(Box::new(NamedStream::new("subscribers"))).unwrap();

        let discovery = catalog.to_discovery_json();
        let streams = discovery["streams"].as_array().unwrap();
        assert_eq!(streams.len(), 1);

        let entry = &streams[0];
        assert_eq!(entry["name"], "subscribers");
        assert_eq!(entry["path"], "/subscribers");
        assert_eq!(entry["records_path"], "$.subscribers[*]");
        assert_eq!(entry["primary_keys"], serde_json::json!(["id"]));
        assert_eq!(entry["replication_key"], serde_json::Value::Null);
        assert_eq!(entry["schema"]["type"], "object");
    }
}
