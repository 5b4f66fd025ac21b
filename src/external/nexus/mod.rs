//! Nexus Mods v1 API source.

mod client;
mod provider;
mod types;

pub use client::{API_KEY_HEADER, NexusClient, UPDATED_SINCE_PARAM};
pub use provider::ModSource;
pub use types::ModInfo;
