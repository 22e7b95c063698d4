//! Domain-level error type shared by every connector operation.
//!
//! The orchestrator contract has a flat error model: an HTTP status plus a
//! message. [`Error`] carries exactly that, together with a coarse
//! [`ErrorKind`] for logging and an optional cause that is logged but never
//! sent to callers. Inbound adapters turn it into responses; nothing else
//! carries error detail across the handler boundary.

use std::fmt;

use crate::middleware::trace::TraceId;

/// Failure category, independent of the HTTP status it maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Missing or invalid request signature headers, or a digest mismatch.
    Authentication,
    /// A required secret or credential is missing.
    Configuration,
    /// A caller-supplied value failed local parsing.
    Validation,
    /// The backing directory rejected the call or could not be reached.
    Downstream,
    /// The route exists in the contract but the directory cannot serve it.
    NotImplemented,
    /// An unexpected failure inside the connector.
    Internal,
}

/// Connector error payload.
///
/// ## Invariants
/// - `status` is the HTTP status the routing layer responds with.
/// - `cause` is diagnostic only and is never serialised to callers.
///
/// # Examples
/// ```
/// use authentik_connector::domain::{Error, ErrorKind};
///
/// let err = Error::downstream(404, "failed to get group from Authentik");
/// assert_eq!(err.kind(), ErrorKind::Downstream);
/// assert_eq!(err.status(), 404);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    status: u16,
    message: String,
    cause: Option<String>,
    trace_id: Option<String>,
}

impl Error {
    fn new(kind: ErrorKind, status: u16, message: impl Into<String>) -> Self {
        Self {
            kind,
            status,
            message: message.into(),
            cause: None,
            trace_id: TraceId::current().map(|id| id.to_string()),
        }
    }

    /// Signature verification failed (401).
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authentication, 401, message)
    }

    /// Required configuration is absent (500).
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, 500, message)
    }

    /// Caller-supplied input failed local validation (400).
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, 400, message)
    }

    /// The request body exceeds the accepted size (413).
    pub fn payload_too_large(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, 413, message)
    }

    /// The directory failed with `status`.
    pub fn downstream(status: u16, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Downstream, status, message)
    }

    /// The contract route is not backed by the directory (501).
    pub fn not_implemented(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotImplemented, 501, message)
    }

    /// Unexpected connector failure (500).
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, 500, message)
    }

    /// Attach the underlying failure for diagnostics.
    #[must_use]
    pub fn with_cause(mut self, cause: impl fmt::Display) -> Self {
        self.cause = Some(cause.to_string());
        self
    }

    /// Attach an explicit trace identifier.
    #[must_use]
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }

    /// Failure category.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// HTTP status returned to the orchestrator.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Human-readable message returned to the orchestrator.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Underlying failure, if one was recorded.
    pub fn cause(&self) -> Option<&str> {
        self.cause.as_deref()
    }

    /// Trace identifier of the request that produced the error.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.cause {
            Some(cause) => write!(f, "{} due to: {cause}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    //! Constructor and formatting coverage.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::unauthorized(Error::unauthorized("no"), ErrorKind::Authentication, 401)]
    #[case::configuration(Error::configuration("no"), ErrorKind::Configuration, 500)]
    #[case::validation(Error::validation("no"), ErrorKind::Validation, 400)]
    #[case::payload_too_large(Error::payload_too_large("no"), ErrorKind::Validation, 413)]
    #[case::downstream(Error::downstream(403, "no"), ErrorKind::Downstream, 403)]
    #[case::not_implemented(Error::not_implemented("no"), ErrorKind::NotImplemented, 501)]
    #[case::internal(Error::internal("no"), ErrorKind::Internal, 500)]
    fn constructors_set_kind_and_status(
        #[case] error: Error,
        #[case] kind: ErrorKind,
        #[case] status: u16,
    ) {
        assert_eq!(error.kind(), kind);
        assert_eq!(error.status(), status);
    }

    #[rstest]
    fn display_includes_cause_when_present() {
        let plain = Error::downstream(502, "failed to list users from Authentik");
        assert_eq!(plain.to_string(), "failed to list users from Authentik");

        let caused = plain.with_cause("connection refused");
        assert_eq!(
            caused.to_string(),
            "failed to list users from Authentik due to: connection refused"
        );
        assert_eq!(caused.message(), "failed to list users from Authentik");
    }

    #[rstest]
    fn trace_id_is_absent_outside_request_scope() {
        assert!(Error::internal("boom").trace_id().is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn trace_id_is_captured_inside_request_scope() {
        let trace_id: TraceId = "00000000-0000-0000-0000-000000000000"
            .parse()
            .expect("valid UUID");
        let error = TraceId::scope(trace_id, async { Error::internal("boom") }).await;
        assert_eq!(error.trace_id(), Some("00000000-0000-0000-0000-000000000000"));
    }
}
