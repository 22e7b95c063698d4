//! Outbound adapters implementing domain ports for external systems.
//!
//! - **authentik**: reqwest-backed client for the Authentik REST API.
//!
//! Adapters translate between domain records and wire formats. They contain
//! no connector rules.

pub mod authentik;
