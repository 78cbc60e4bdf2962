//! # Stream Descriptor Framework
//!
//! Core abstractions for declaring the streams a siphon data source
//! exposes: what each resource is called, where it lives, which envelope
//! key holds its records, and what shape its records take.
//!
//! A source crate (e.g. `siphon-mailerlite`) declares one [`Stream`]
//! descriptor per resource and registers them in a [`Catalog`]. The
//! external extraction framework drives the catalog: it owns HTTP
//! transport, pagination cursoring, authentication, rate limiting,
//! retry/backoff, and state checkpointing. This crate owns everything
//! between a raw response envelope and the schema-conformed record
//! sequence handed back for emission.
//!
//! ## Example
//!
//! ```ignore
//! use siphon_core::prelude::*;
//!
//! // Declare a descriptor and register it.
//! let mut catalog = Catalog::new();
//! catalog.register(Box::new(SubscribersStream::new()))?;
//!
//! // The framework resolves paths and feeds envelopes back in.
//! let stream = catalog.require("subscribers")?;
//! let path = stream.resolve_path(&PathParams::new())?;
//! let records = stream.extract_records(&envelope, &PathParams::new())?;
//! ```
//!
//! ## Tolerance policy
//!
//! Record conformance never aborts an extraction: declared fields absent
//! upstream are emitted as null, unknown upstream fields are dropped, and
//! type mismatches coerce losslessly or null with a warning. Only the
//! envelope shape itself (missing key, non-array value) is an error,
//! because that breaks the stream contract rather than a single value.
//!
//! ## Crate Organization
//!
//! - [`schema`] - Field schema model (`FieldType`, `FieldSchema`, `FieldList`)
//! - [`record`] - Record conformance (`Record`, `conform`)
//! - [`stream`] - Descriptor contract (`Stream`, `PathTemplate`, `RecordsPath`)
//! - [`catalog`] - Stream registration and discovery (`Catalog`)
//! - [`error`] - Error types (`SourceError`, `SourceResult`)

pub mod catalog;
pub mod error;
pub mod record;
pub mod schema;
pub mod stream;

/// Prelude module for convenient imports.
///
/// ```
/// use siphon_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::catalog::Catalog;
    pub use crate::error::{SourceError, SourceResult};
    pub use crate::record::{conform, Record};
    pub use crate::schema::{FieldList, FieldSchema, FieldType};
    pub use crate::stream::{PathParams, PathTemplate, RecordsPath, Stream};
}
