//! # MailerLite Source Definition
//!
//! Stream schemas for extracting marketing data from the MailerLite API:
//! subscribers, groups, and campaigns. Each stream is a leaf descriptor
//! (name, path template, primary key, records path, ordered field schema)
//! registered in a [`Catalog`](siphon_core::catalog::Catalog) the external
//! extraction framework drives.
//!
//! All three streams are full-refresh (no replication key); record `id`
//! uniqueness is an upstream guarantee. The framework owns HTTP transport,
//! pagination, authentication (it sends the configured API key as
//! `X-MailerLite-ApiKey`), retry/backoff, and state checkpointing.
//!
//! ## Example
//!
//! ```
//! use siphon_mailerlite::config::{CampaignStatus, MailerLiteConfig};
//!
//! let config = MailerLiteConfig::new("api-key")
//!     .with_campaign_status(CampaignStatus::Sent);
//! let catalog = siphon_mailerlite::catalog(&config).unwrap();
//!
//! assert_eq!(catalog.stream_names(), vec!["subscribers", "groups", "campaigns"]);
//! ```

pub mod config;
pub mod streams;

pub use config::{CampaignStatus, MailerLiteConfig};
pub use streams::{CampaignsStream, GroupsStream, SubscribersStream};

use siphon_core::catalog::Catalog;
use siphon_core::error::SourceResult;

/// Build the MailerLite stream catalog for a validated configuration.
///
/// This is the entry point the extraction framework calls at startup.
pub fn catalog(config: &MailerLiteConfig) -> SourceResult<Catalog> {
    config.validate()?;

    let mut catalog = Catalog::new();
    catalog.register(Box::new(SubscribersStream::new()))?;
    catalog.register(Box::new(GroupsStream::new()))?;
    catalog.register(Box::new(CampaignsStream::new()))?;
    Ok(catalog)
}
