//! Campaigns stream
//!
//! One record per campaign within a status collection. The endpoint is
//! segmented by status (`/campaigns/{status}`) and the response envelope
//! is keyed by the same status value, so both the path template and the
//! records path take a `status` parameter.

use siphon_core::schema::{FieldList, FieldSchema};
use siphon_core::stream::{PathTemplate, RecordsPath, Stream};

/// The `campaigns` stream descriptor.
#[derive(Debug)]
pub struct CampaignsStream {
    path: PathTemplate,
    records_path: RecordsPath,
    primary_keys: Vec<String>,
    schema: FieldList,
}

/// Click/open metrics object attached to sent campaigns.
fn metrics_fields(count_desc: &str, rate_desc: &str) -> FieldList {
    FieldList::new()
        .with_field(FieldSchema::integer("count").with_description(format!(
            "{count_desc}. Available only for sent campaigns"
        )))
        .with_field(FieldSchema::number("rate").with_description(format!(
            "{rate_desc}. Available only for sent campaigns"
        )))
}

impl CampaignsStream {
    /// Create the campaigns descriptor with its full field schema.
    #[must_use]
    pub fn new() -> Self {
        let schema = FieldList::new()
            .with_field(FieldSchema::integer("id").with_description("ID of a campaign"))
            .with_field(
                FieldSchema::string("name").with_description("The internal campaign name"),
            )
            .with_field(
                FieldSchema::integer("total_recipients")
                    .with_description("Total count of receivers in campaign"),
            )
            .with_field(
                FieldSchema::string("status")
                    .with_description("Possible values: sent, draft or outbox")
                    .with_allowed_values(["sent", "draft", "outbox"]),
            )
            .with_field(
                FieldSchema::string("type")
                    .with_description("Possible values: regular, ab, followup or rss")
                    .with_allowed_values(["regular", "ab", "followup", "rss"]),
            )
            .with_field(
                FieldSchema::string("subject").with_description("The subject of the email"),
            )
            .with_field(
                FieldSchema::string("date_created")
                    .with_description("When the campaign is created"),
            )
            .with_field(FieldSchema::string("date_send").with_description(
                "When the email was sent. If campaign type is outbox, this \
                 parameter will show the scheduled date.",
            ))
            .with_field(FieldSchema::object(
                "clicked",
                metrics_fields("Total clicks of campaign", "Click rate of campaign"),
            ))
            .with_field(FieldSchema::object(
                "opened",
                metrics_fields("Total opens of campaign", "Open rate of campaign"),
            ));

        Self {
            path: PathTemplate::new("/campaigns/{status}"),
            records_path: RecordsPath::new("$.{status}[*]"),
            primary_keys: vec!["id".to_string()],
            schema,
        }
    }
}

impl Default for CampaignsStream {
    fn default() -> Self {
        Self::new()
    }
}

impl Stream for CampaignsStream {
    fn name(&self) -> &str {
        "campaigns"
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
