//! Inbound adapters that translate orchestrator requests into directory
//! facade calls while keeping framework details at the edge.

pub mod http;
