//! Stream descriptors for the MailerLite API.

pub mod campaigns;
pub mod groups;
pub mod subscribers;

pub use campaigns::CampaignsStream;
pub use groups::GroupsStream;
pub use subscribers::SubscribersStream;
