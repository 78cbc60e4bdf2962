//! Subscribers stream
//!
//! One record per subscriber: identity, engagement counters, lifecycle
//! metadata, the nested custom-fields object, and lifecycle dates.

use siphon_core::schema::{FieldList, FieldSchema};
use siphon_core::stream::{PathTemplate, RecordsPath, Stream};

/// The `subscribers` stream descriptor.
///
/// Full-refresh; the upstream guarantees `id` uniqueness within the
/// collection.
#[derive(Debug)]
pub struct SubscribersStream {
    path: PathTemplate,
    records_path: RecordsPath,
    primary_keys: Vec<String>,
    schema: FieldList,
}

impl SubscribersStream {
    /// Create the subscribers descriptor with its full field schema.
    #[must_use]
    pub fn new() -> Self {
        let custom_fields = FieldList::new()
            .with_field(FieldSchema::string("last_name"))
            .with_field(FieldSchema::string("company"))
            .with_field(FieldSchema::string("country"))
            .with_field(FieldSchema::string("city"))
            .with_field(FieldSchema::string("phone"))
            .with_field(FieldSchema::string("state"))
            .with_field(FieldSchema::string("zip"));

        let schema = FieldList::new()
            .with_field(FieldSchema::integer("id").with_description("The user's id"))
            .with_field(FieldSchema::string("name").with_description("The user's name"))
            .with_field(FieldSchema::string("email").with_description("The user's email address"))
            .with_field(FieldSchema::integer("sent"))
            .with_field(FieldSchema::integer("opened"))
            .with_field(FieldSchema::integer("clicked"))
            .with_field(FieldSchema::string("type"))
            .with_field(FieldSchema::string("signup_ip"))
            .with_field(FieldSchema::string("signup_timestamp"))
            .with_field(FieldSchema::string("confirmation_ip"))
            .with_field(FieldSchema::string("confirmation_timestamp"))
            .with_field(FieldSchema::object("fields", custom_fields))
            .with_field(FieldSchema::string("date_subscribe"))
            .with_field(FieldSchema::string("date_unsubscribe"))
            .with_field(FieldSchema::string("date_created"))
            .with_field(FieldSchema::string("date_updated"));

        Self {
            path: PathTemplate::new("/subscribers"),
            records_path: RecordsPath::new("$.subscribers[*]"),
            primary_keys: vec!["id".to_string()],
            schema,
        }
    }
}

impl Default for SubscribersStream {
    fn default() -> Self {
        Self::new()
    }
}

impl Stream for SubscribersStream {
    fn name(&self) -> &str {
        "subscribers"
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
