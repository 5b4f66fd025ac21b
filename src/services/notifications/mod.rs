//! Webhook notifications for detected mod updates.
//!
//! `embed` renders a [`ModInfo`](crate::external::nexus::ModInfo) into a
//! Discord-compatible [`WebhookPayload`]; providers deliver it.

mod discord_provider;
mod provider;

pub mod embed;

pub use discord_provider::DiscordWebhookProvider;
pub use embed::{Embed, EmbedField, WebhookPayload, build_update_payload, truncate_summary};
pub use provider::{NotificationProvider, NotificationResult};
