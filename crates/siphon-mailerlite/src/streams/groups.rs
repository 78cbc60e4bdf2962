//! Groups stream
//!
//! One record per subscriber group: identity, membership counters by
//! status, engagement counters, and lifecycle dates.

use siphon_core::schema::{FieldList, FieldSchema};
use siphon_core::stream::{PathTemplate, RecordsPath, Stream};

/// The `groups` stream descriptor.
#[derive(Debug)]
pub struct GroupsStream {
    path: PathTemplate,
    records_path: RecordsPath,
    primary_keys: Vec<String>,
    schema: FieldList,
}

impl GroupsStream {
    /// Create the groups descriptor with its full field schema.
    #[must_use]
    pub fn new() -> Self {
        let schema = FieldList::new()
            .with_field(FieldSchema::integer("id").with_description("ID of the group"))
            .with_field(FieldSchema::string("name").with_description("Title of group"))
            .with_field(
                FieldSchema::integer("total")
                    .with_description("Total count of people in group"),
            )
            .with_field(
                FieldSchema::integer("active")
                    .with_description("Total count of active people in group"),
            )
            .with_field(
                FieldSchema::integer("unsubscribed")
                    .with_description("Total count of unsubscribed people in group"),
            )
            .with_field(
                FieldSchema::integer("bounced")
                    .with_description("Total count of bounced people in group"),
            )
            .with_field(
                FieldSchema::integer("unconfirmed")
                    .with_description("Total count of unconfirmed people in group"),
            )
            .with_field(
                FieldSchema::integer("junk")
                    .with_description("Total count of junk people in group"),
            )
            .with_field(
                FieldSchema::integer("sent")
                    .with_description("Total count of sent emails in a group"),
            )
            .with_field(
                FieldSchema::integer("opened").with_description("Total count of opens in a group"),
            )
            .with_field(
                FieldSchema::integer("clicked")
                    .with_description("Total count of clicks in a group"),
            )
            .with_field(
                FieldSchema::string("date_created")
                    .with_description("Date & time when group is created"),
            )
            .with_field(
                FieldSchema::string("date_updated")
                    .with_description("Date & time when group is updated"),
            );

        Self {
            path: PathTemplate::new("/groups"),
            records_path: RecordsPath::new("$.groups[*]"),
            primary_keys: vec!["id".to_string()],
            schema,
        }
    }
}

impl Default for GroupsStream {
    fn default() -> Self {
        Self::new()
    }
}

impl Stream for GroupsStream {
    fn name(&self) -> &str {
        "groups"
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
