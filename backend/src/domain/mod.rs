//! Domain primitives, the directory facade and its driven ports.
//!
//! Purpose: keep the connector's rules (signature verification, cursor and
//! error translation, identity mapping) free of HTTP framework types.
//!
//! Public surface:
//! - Error / ErrorKind: the single failure value handlers turn into responses.
//! - Secret: redacted credential wrapper.
//! - directory::DirectoryService: facade over the directory port.
//! - signature: request signing and verification.

pub mod directory;
pub mod error;
pub mod ports;
pub mod secret;
pub mod signature;

pub use self::directory::DirectoryService;
pub use self::error::{Error, ErrorKind};
pub use self::secret::Secret;

/// HTTP header name used to propagate request trace identifiers.
pub const TRACE_ID_HEADER: &str = "trace-id";
