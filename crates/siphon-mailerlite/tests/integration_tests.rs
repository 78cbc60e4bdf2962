//! Integration tests for the MailerLite stream catalog.
//!
//! These tests drive the descriptors the way the extraction framework
//! does: build the catalog from configuration, resolve request paths, feed
//! response envelopes in, and check the conformed records and the
//! discovery document.

use serde_json::json;

use siphon_core::prelude::*;
use siphon_mailerlite::{catalog, CampaignStatus, MailerLiteConfig};

// =============================================================================
// Test Helpers
// =============================================================================

fn sent_config() -> MailerLiteConfig {
    MailerLiteConfig::new("test-api-key").with_campaign_status(CampaignStatus::Sent)
}

fn subscribers_envelope() -> serde_json::Value {
    json!({
        "subscribers": [
            {
                "id": 1,
                "name": "Ada",
                "email": "a@b.com",
                "sent": 10,
                "opened": 6,
                "clicked": 2,
                "type": "subscribed",
                "fields": {
                    "last_name": "Lovelace",
                    "company": "Analytical Engines",
                    "country": "UK",
                    "city": "London",
                    "phone": "+44 20 0000 0000",
                    "state": null,
                    "zip": "SW1"
                },
                "date_created": "2021-03-01 08:30:00"
            },
            {"id": 2, "email": "b@c.com"},
            {"id": 3, "email": "c@d.com", "surprise": "dropped"}
        ],
        "meta": {"page": 1, "last": 4}
    })
}

// =============================================================================
// Catalog Tests
// =============================================================================

#[test]
fn test_catalog_construction() {
    let catalog = catalog(&sent_config()).unwrap();

    assert_eq!(
        catalog.stream_names(),
        vec!["subscribers", "groups", "campaigns"]
    );
    for stream in catalog.iter() {
        assert!(stream.validate().is_ok());
        assert_eq!(stream.primary_keys(), ["id".to_string()]);
        assert!(stream.replication_key().is_none(), "streams are full-refresh");
    }
}

#[test]
fn test_catalog_rejects_empty_api_key() {
    let config = MailerLiteConfig::new("");
    let err = catalog(&config).unwrap_err();
    assert_eq!(err.error_code(), "INVALID_CONFIG");
}

#[test]
fn test_discovery_document_lists_all_streams() {
    let catalog = catalog(&sent_config()).unwrap();
    let discovery = catalog.to_discovery_json();

    let streams = discovery["streams"].as_array().unwrap();
    assert_eq!(streams.len(), 3);

    let campaigns = &streams[2];
    assert_eq!(campaigns["name"], "campaigns");
    assert_eq!(campaigns["path"], "/campaigns/{status}");
    assert_eq!(campaigns["records_path"], "$.{status}[*]");
    assert_eq!(
        campaigns["schema"]["properties"]["status"]["enum"],
        json!(["sent", "draft", "outbox"])
    );
}

#[test]
fn test_primary_keys_are_declared_fields() {
    let catalog = catalog(&sent_config()).unwrap();
    for stream in catalog.iter() {
        assert!(!stream.primary_keys().is_empty());
        for key in stream.primary_keys() {
            assert!(
                stream.schema().contains(key),
                "primary key '{key}' of '{}' must be declared",
                stream.name()
            );
        }
    }
}

// =============================================================================
// Subscribers Tests
// =============================================================================

#[test]
fn test_subscribers_extraction_end_to_end() {
    let catalog = catalog(&sent_config()).unwrap();
    let stream = catalog.require("subscribers").unwrap();
    let params = PathParams::new();

    assert_eq!(stream.resolve_path(&params).unwrap(), "/subscribers");

    let records = stream
        .extract_records(&subscribers_envelope(), &params)
        .unwrap();

    assert_eq!(records.len(), 3);

    // Original envelope order is preserved.
    let ids: Vec<i64> = records
        .iter()
        .map(|r| r.get("id").unwrap().as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);

    // Every record carries the full declared field set.
    for record in &records {
        assert_eq!(record.len(), stream.schema().len());
    }
}

#[test]
fn test_subscribers_missing_fields_are_null() {
    let catalog = catalog(&sent_config()).unwrap();
    let stream = catalog.require("subscribers").unwrap();

    let records = stream
        .extract_records(&subscribers_envelope(), &PathParams::new())
        .unwrap();

    // Second subscriber has only id and email.
    let sparse = &records[1];
    assert!(sparse.is_null("name"));
    assert!(sparse.is_null("fields"));
    assert!(sparse.is_null("date_created"));
    assert_eq!(sparse.get("email"), Some(&json!("b@c.com")));
}

#[test]
fn test_subscribers_unknown_fields_dropped() {
    let catalog = catalog(&sent_config()).unwrap();
    let stream = catalog.require("subscribers").unwrap();

    let records = stream
        .extract_records(&subscribers_envelope(), &PathParams::new())
        .unwrap();

    assert_eq!(records[2].get("surprise"), None);
}

// =============================================================================
// Campaigns Tests
// =============================================================================

#[test]
fn test_campaigns_status_parameter_end_to_end() {
    let config = sent_config();
    let catalog = catalog(&config).unwrap();
    let stream = catalog.require("campaigns").unwrap();
    let params = config.path_params();

    assert_eq!(stream.resolve_path(&params).unwrap(), "/campaigns/sent");

    let envelope = json!({
        "sent": [
            {
                "id": 100,
                "name": "March newsletter",
                "total_recipients": 1500,
                "status": "sent",
                "type": "regular",
                "subject": "News for March",
                "date_created": "2021-03-01 08:00:00",
                "date_send": "2021-03-02 09:00:00",
                "clicked": {"count": 123, "rate": 8.2},
                "opened": {"count": 456, "rate": 30.4}
            }
        ]
    });

    let records = stream.extract_records(&envelope, &params).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].get("subject"), Some(&json!("News for March")));
    assert_eq!(
        records[0].get("opened"),
        Some(&json!({"count": 456, "rate": 30.4}))
    );
}

#[test]
fn test_campaigns_outbox_envelope_key() {
    let config = MailerLiteConfig::new("test-api-key").with_campaign_status(CampaignStatus::Outbox);
    let catalog = catalog(&config).unwrap();
    let stream = catalog.require("campaigns").unwrap();
    let params = config.path_params();

    assert_eq!(stream.resolve_path(&params).unwrap(), "/campaigns/outbox");

    let envelope = json!({
        "outbox": [
            {"id": 9, "name": "Scheduled", "status": "outbox", "type": "regular",
             "date_send": "2021-04-01 10:00:00"}
        ]
    });

    let records = stream.extract_records(&envelope, &params).unwrap();
    assert_eq!(records[0].get("id"), Some(&json!(9)));
    assert!(records[0].is_null("clicked"));
}

#[test]
fn test_campaigns_envelope_under_wrong_key_is_mismatch() {
    let config = sent_config();
    let catalog = catalog(&config).unwrap();
    let stream = catalog.require("campaigns").unwrap();

    // Envelope keyed by "draft" while extracting "sent".
    let envelope = json!({"draft": []});
    let err = stream
        .extract_records(&envelope, &config.path_params())
        .unwrap_err();
    assert_eq!(err.error_code(), "ENVELOPE_MISMATCH");
}

// =============================================================================
// Tolerance Tests
// =============================================================================

#[test]
fn test_type_mismatches_coerce_or_null() {
    let catalog = catalog(&sent_config()).unwrap();
    let stream = catalog.require("groups").unwrap();

    let envelope = json!({
        "groups": [
            {"id": "15", "name": 42, "total": "not-a-number", "active": 3.0}
        ]
    });

    let records = stream
        .extract_records(&envelope, &PathParams::new())
        .unwrap();
    let record = &records[0];

    assert_eq!(record.get("id"), Some(&json!(15)), "numeric string coerces");
    assert_eq!(record.get("name"), Some(&json!("42")), "scalar coerces to string");
    assert!(record.is_null("total"), "unparseable value nulls");
    assert_eq!(record.get("active"), Some(&json!(3)), "whole float coerces");
}
