//! Request middleware.
//!
//! Purpose: define middleware components for request lifecycle concerns such
//! as tracing. Signature verification lives with the HTTP adapter in
//! `inbound::http::signature`.

pub mod trace;

pub use trace::Trace;
