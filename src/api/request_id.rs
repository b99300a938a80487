//! Request correlation ids.
//!
//! Every inbound request gets an `X-Request-ID`: the caller's value when it is
//! a well-formed UUID, a fresh v4 UUID otherwise. The id is bound to the
//! request's task for the duration of the request (so log lines can pick it
//! up through [`current`]) and written back on the response whatever its
//! status.

use axum::extract::Request;
use axum::http::{HeaderName, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;
use std::fmt;
use std::future::Future;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

static X_REQUEST_ID: HeaderName = HeaderName::from_static(REQUEST_ID_HEADER);

tokio::task_local! {
    static CURRENT_REQUEST_ID: RequestId;
}

/// A correlation id, always a syntactically valid UUID string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(String);

impl RequestId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Pick the id for a request from its inbound header value.
    ///
    /// Absent or blank values get a generated id. Values that do not parse as
    /// a UUID are logged and replaced, never echoed.
    pub fn establish(inbound: Option<&str>) -> Self {
        match inbound {
            None => Self::generate(),
            Some(value) if value.trim().is_empty() => Self::generate(),
            Some(value) if Uuid::try_parse(value).is_ok() => Self(value.to_string()),
            Some(value) => {
                let generated = Self::generate();
                log::warn!(
                    "Invalid X-Request-ID '{}' from client, replacing with {}",
                    value,
                    generated
                );
                generated
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn header_value(&self) -> Option<HeaderValue> {
        HeaderValue::from_str(&self.0).ok()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Run `body` with `request_id` bound to the current task.
///
/// The binding is released when `body` completes, when it unwinds, and when
/// the returned future is dropped before completion. The output of `body` is
/// passed through untouched.
pub async fn scope<F>(request_id: RequestId, body: F) -> F::Output
where
    F: Future,
{
    CURRENT_REQUEST_ID.scope(request_id, body).await
}

/// The id bound to the calling task, if it is handling a request.
pub fn current() -> Option<RequestId> {
    CURRENT_REQUEST_ID.try_with(RequestId::clone).ok()
}

/// Outermost middleware: establishes the id, runs the rest of the stack inside
/// [`scope`], and stamps the id on the response.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let inbound = request
        .headers()
        .get(&X_REQUEST_ID)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned());
    let request_id = RequestId::establish(inbound.as_deref());

    // Downstream extractors only ever see the validated id.
    if let Some(value) = request_id.header_value() {
        request.headers_mut().insert(X_REQUEST_ID.clone(), value);
    }

    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let mut response = scope(request_id.clone(), async move {
        log::debug!("Request {} {}", method, path);
        next.run(request).await
    })
    .await;

    if let Some(value) = request_id.header_value() {
        response.headers_mut().insert(X_REQUEST_ID.clone(), value);
    }

    response
}
