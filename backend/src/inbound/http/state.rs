//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend only
//! on the directory facade and remain testable without network I/O.

use std::sync::Arc;

use crate::domain::DirectoryService;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Facade over the backing directory.
    pub directory: Arc<DirectoryService>,
}

impl HttpState {
    /// Construct state around a directory facade.
    pub fn new(directory: DirectoryService) -> Self {
        Self {
            directory: Arc::new(directory),
        }
    }
}
