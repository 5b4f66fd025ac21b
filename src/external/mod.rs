//! Outbound integrations.

pub mod client;
pub mod nexus;
