// HTTP middleware
// Author: kelexine (https://github.com/kelexine)

use axum::http::{HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};

/// Generates `req_<uuid>` request ids, matching the id format in the logs.
#[derive(Clone, Copy, Default)]
pub struct MakeRequestIdPrefixed;

impl MakeRequestId for MakeRequestIdPrefixed {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = format!("req_{}", uuid::Uuid::new_v4().simple());
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Create request ID layers for the application.
/// A client-supplied `x-request-id` is kept as is.
pub fn request_id_layers() -> (SetRequestIdLayer<MakeRequestIdPrefixed>, PropagateRequestIdLayer) {
    (
        SetRequestIdLayer::x_request_id(MakeRequestIdPrefixed),
        PropagateRequestIdLayer::x_request_id(),
    )
}
