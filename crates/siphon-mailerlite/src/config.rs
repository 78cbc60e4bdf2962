//! MailerLite source configuration
//!
//! Settings the extraction framework needs to drive the MailerLite
//! streams. The API key is carried, not used: the framework sends it as
//! the `X-MailerLite-ApiKey` request header.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use siphon_core::error::{SourceError, SourceResult};
use siphon_core::stream::PathParams;

/// Default MailerLite API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.mailerlite.com/api/v2";

/// Request header the framework sends the API key in.
pub const API_KEY_HEADER: &str = "X-MailerLite-ApiKey";

/// Which campaigns collection to extract.
///
/// The campaigns endpoint is segmented by status: `/campaigns/{status}`,
/// with the response envelope keyed by the same status value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    /// Campaigns that have been sent.
    #[default]
    Sent,
    /// Campaigns still being drafted.
    Draft,
    /// Campaigns scheduled but not yet sent.
    Outbox,
}

impl CampaignStatus {
    /// Get the string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            CampaignStatus::Sent => "sent",
            CampaignStatus::Draft => "draft",
            CampaignStatus::Outbox => "outbox",
        }
    }

    /// Parse from string.
    pub fn parse_str(s: &str) -> SourceResult<Self> {
        match s.to_lowercase().as_str() {
            "sent" => Ok(CampaignStatus::Sent),
            "draft" => Ok(CampaignStatus::Draft),
            "outbox" => Ok(CampaignStatus::Outbox),
            other => Err(SourceError::invalid_configuration(format!(
                "unknown campaign status '{other}' (expected sent, draft or outbox)"
            ))),
        }
    }
}

impl std::fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Configuration for the MailerLite source.
#[derive(Debug, Clone, Deserialize)]
pub struct MailerLiteConfig {
    /// MailerLite API key. Redacted in Debug output.
    pub api_key: SecretString,

    /// API base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Campaigns collection to extract.
    #[serde(default)]
    pub campaign_status: CampaignStatus,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl MailerLiteConfig {
    /// Create a new configuration with the given API key and defaults.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            base_url: default_base_url(),
            campaign_status: CampaignStatus::default(),
        }
    }

    /// Set the API base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the campaigns collection to extract.
    #[must_use]
    pub fn with_campaign_status(mut self, status: CampaignStatus) -> Self {
        self.campaign_status = status;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> SourceResult<()> {
        if self.api_key.expose_secret().trim().is_empty() {
            return Err(SourceError::invalid_configuration("api_key is empty"));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(SourceError::invalid_configuration(format!(
                "base_url '{}' is not an absolute http(s) URL",
                self.base_url
            )));
        }

        Ok(())
    }

    /// The parameter set used to resolve the campaigns path template and
    /// records path.
    #[must_use]
    pub fn path_params(&self) -> PathParams {
        PathParams::new().with("status", self.campaign_status.as_str())
    }
}
