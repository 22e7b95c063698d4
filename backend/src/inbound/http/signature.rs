//! Request signature middleware.
//!
//! Rejects requests without both signature headers before the payload is
//! touched, then buffers the body up to a size cap, checks the signature
//! against it and re-injects the exact bytes so downstream extractors see the
//! body untouched.

use std::rc::Rc;
use std::task::{Context, Poll};

use actix_web::HttpMessage;
use actix_web::body::EitherBody;
use actix_web::dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::CONTENT_LENGTH;
use actix_web::web::{Bytes, BytesMut};
use futures_util::StreamExt;
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::debug;

use crate::domain::signature::{SIGNATURE_HEADER, SignatureHeaders, TIMESTAMP_HEADER};
use crate::domain::{Error, Secret};

/// Largest body buffered for verification, matching `web::PayloadConfig`.
pub const DEFAULT_BODY_LIMIT: usize = 262_144;

/// Middleware rejecting requests whose signature does not match the body.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use authentik_connector::domain::Secret;
/// use authentik_connector::inbound::http::signature::VerifySignature;
///
/// let verify = VerifySignature::new(Secret::new("shared-secret")).limit(64 * 1024);
/// let app = App::new().wrap(verify);
/// ```
#[derive(Clone)]
pub struct VerifySignature {
    secret: Rc<Secret>,
    limit: usize,
}

impl VerifySignature {
    /// Verify requests against `secret`, buffering at most
    /// [`DEFAULT_BODY_LIMIT`] bytes.
    pub fn new(secret: Secret) -> Self {
        Self {
            secret: Rc::new(secret),
            limit: DEFAULT_BODY_LIMIT,
        }
    }

    /// Cap the buffered body at `limit` bytes; larger bodies get a 413.
    #[must_use]
    pub const fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

impl<S, B> Transform<S, ServiceRequest> for VerifySignature
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = VerifySignatureMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(VerifySignatureMiddleware {
            service: Rc::new(service),
            secret: Rc::clone(&self.secret),
            limit: self.limit,
        }))
    }
}

/// Service wrapper produced by [`VerifySignature`].
pub struct VerifySignatureMiddleware<S> {
    service: Rc<S>,
    secret: Rc<Secret>,
    limit: usize,
}

impl<S, B> Service<ServiceRequest> for VerifySignatureMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let secret = Rc::clone(&self.secret);
        let limit = self.limit;
        Box::pin(async move {
            let mut payload = req.take_payload();
            let headers = match SignatureHeaders::require(
                header_value(&req, SIGNATURE_HEADER),
                header_value(&req, TIMESTAMP_HEADER),
            ) {
                Ok(headers) => headers,
                Err(err) => {
                    debug!(path = %req.path(), reason = %err, "rejecting unsigned request");
                    return Ok(req.error_response(err).map_into_right_body());
                }
            };

            if declared_length(&req).is_some_and(|length| length > limit) {
                let err = body_too_large(limit);
                return Ok(req.error_response(err).map_into_right_body());
            }
            let body = match read_body(&mut payload, limit).await {
                Ok(body) => body,
                Err(err) => return Ok(req.error_response(err).map_into_right_body()),
            };

            if let Err(err) = headers.verify_body(&secret, &body) {
                debug!(path = %req.path(), reason = %err, "rejecting unsigned request");
                return Ok(req.error_response(err).map_into_right_body());
            }

            req.set_payload(actix_http::Payload::from(body));
            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

fn header_value<'a>(req: &'a ServiceRequest, name: &str) -> Option<&'a str> {
    req.headers().get(name).and_then(|value| value.to_str().ok())
}

fn declared_length(req: &ServiceRequest) -> Option<usize> {
    header_value(req, CONTENT_LENGTH.as_str()).and_then(|value| value.parse().ok())
}

fn body_too_large(limit: usize) -> Error {
    Error::payload_too_large(format!("request body exceeds {limit} bytes"))
}

async fn read_body(payload: &mut Payload, limit: usize) -> Result<Bytes, Error> {
    let mut body = BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let bytes = chunk
            .map_err(|err| Error::internal("Unable to read request body").with_cause(err))?;
        if body.len() + bytes.len() > limit {
            return Err(body_too_large(limit));
        }
        body.extend_from_slice(&bytes);
    }
    Ok(body.freeze())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::signature::sign;
    use actix_http::error::PayloadError;
    use actix_web::{App, HttpResponse, http::StatusCode, test, web};
    use futures_util::stream;
    use rstest::rstest;
    use serde_json::Value;

    const SECRET: &str = "shh";
    const TIMESTAMP: &str = "1700000000";

    async fn echo(body: Bytes) -> HttpResponse {
        HttpResponse::Ok().body(body)
    }

    async fn call(request: test::TestRequest) -> (StatusCode, Bytes) {
        call_with(VerifySignature::new(Secret::new(SECRET)), request).await
    }

    async fn call_with(
        middleware: VerifySignature,
        request: test::TestRequest,
    ) -> (StatusCode, Bytes) {
        let app = test::init_service(
            App::new()
                .wrap(middleware)
                .route("/echo", web::post().to(echo))
                .route("/echo", web::get().to(echo)),
        )
        .await;
        let res = test::call_service(&app, request.to_request()).await;
        let status = res.status();
        (status, test::read_body(res).await)
    }

    fn signed_post(body: &'static [u8]) -> test::TestRequest {
        let signature = sign(&Secret::new(SECRET), TIMESTAMP, body).expect("signature");
        test::TestRequest::post()
            .uri("/echo")
            .insert_header((TIMESTAMP_HEADER, TIMESTAMP))
            .insert_header((SIGNATURE_HEADER, signature))
            .set_payload(body)
    }

    #[rstest]
    #[actix_web::test]
    async fn signed_body_reaches_the_handler_unchanged() {
        let body: &'static [u8] = b"{ \"user_id\" : \"42\" }\n";
        let (status, echoed) = call(signed_post(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(echoed.as_ref(), body);
    }

    #[rstest]
    #[actix_web::test]
    async fn bodyless_get_is_signed_as_empty_object() {
        let signature = sign(&Secret::new(SECRET), TIMESTAMP, b"{}").expect("signature");
        let request = test::TestRequest::get()
            .uri("/echo")
            .insert_header((TIMESTAMP_HEADER, TIMESTAMP))
            .insert_header((SIGNATURE_HEADER, signature));
        let (status, _) = call(request).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[rstest]
    #[case(None, Some(TIMESTAMP), "X-Opal-Signature header is missing")]
    #[case(Some(""), Some(TIMESTAMP), "X-Opal-Signature header is missing")]
    #[case(Some("00"), None, "X-Opal-Request-Timestamp header is missing")]
    #[case(Some("00"), Some(TIMESTAMP), "Invalid signature")]
    #[actix_web::test]
    async fn bad_headers_are_unauthorised(
        #[case] signature: Option<&str>,
        #[case] timestamp: Option<&str>,
        #[case] message: &str,
    ) {
        let mut request = test::TestRequest::post().uri("/echo").set_payload("{}");
        if let Some(signature) = signature {
            request = request.insert_header((SIGNATURE_HEADER, signature));
        }
        if let Some(timestamp) = timestamp {
            request = request.insert_header((TIMESTAMP_HEADER, timestamp));
        }

        let (status, body) = call(request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let value: Value = serde_json::from_slice(&body).expect("json body");
        assert_eq!(value["code"], 401);
        assert_eq!(value["message"], message);
    }

    #[rstest]
    #[actix_web::test]
    async fn tampered_body_is_unauthorised() {
        let signature = sign(&Secret::new(SECRET), TIMESTAMP, b"{\"user_id\":\"42\"}")
            .expect("signature");
        let request = test::TestRequest::post()
            .uri("/echo")
            .insert_header((TIMESTAMP_HEADER, TIMESTAMP))
            .insert_header((SIGNATURE_HEADER, signature))
            .set_payload("{\"user_id\":\"43\"}");
        let (status, _) = call(request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    fn broken_payload() -> Payload {
        let chunks = stream::iter([
            Ok(Bytes::from_static(b"{\"user_id\"")),
            Err(PayloadError::Incomplete(None)),
        ]);
        Payload::Stream {
            payload: Box::pin(chunks),
        }
    }

    async fn call_middleware(mut request: ServiceRequest) -> (StatusCode, Value) {
        request.set_payload(broken_payload());
        let middleware = VerifySignature::new(Secret::new(SECRET))
            .new_transform(test::ok_service())
            .await
            .expect("middleware");
        let res = middleware.call(request).await.expect("response");
        let status = res.status();
        let body = test::read_body(res).await;
        (status, serde_json::from_slice(&body).expect("json body"))
    }

    #[rstest]
    #[actix_web::test]
    async fn missing_headers_are_rejected_before_the_body_is_read() {
        let request = test::TestRequest::post().uri("/echo").to_srv_request();
        let (status, body) = call_middleware(request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "X-Opal-Signature header is missing");
    }

    #[rstest]
    #[actix_web::test]
    async fn unreadable_body_of_a_signed_request_is_an_internal_error() {
        let request = test::TestRequest::post()
            .uri("/echo")
            .insert_header((TIMESTAMP_HEADER, TIMESTAMP))
            .insert_header((SIGNATURE_HEADER, "00"))
            .to_srv_request();
        let (status, body) = call_middleware(request).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Unable to read request body");
    }

    #[rstest]
    #[case::declared(signed_post(b"{\"user_id\":\"4242\"}"))]
    #[case::streamed(
        signed_post(b"{\"user_id\":\"4242\"}").insert_header((CONTENT_LENGTH, "2"))
    )]
    #[actix_web::test]
    async fn oversized_bodies_are_refused(#[case] request: test::TestRequest) {
        let middleware = VerifySignature::new(Secret::new(SECRET)).limit(8);
        let (status, body) = call_with(middleware, request).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        let value: Value = serde_json::from_slice(&body).expect("json body");
        assert_eq!(value["code"], 413);
        assert_eq!(value["message"], "request body exceeds 8 bytes");
    }

    #[rstest]
    #[actix_web::test]
    async fn body_at_the_limit_is_accepted() {
        let body: &'static [u8] = b"{\"a\":1}";
        let middleware = VerifySignature::new(Secret::new(SECRET)).limit(body.len());
        let (status, echoed) = call_with(middleware, signed_post(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(echoed.as_ref(), body);
    }
}
