//! Application router with the HTTP middleware stack.

use std::time::Duration;

use axum::Router;
use http::{header::CONTENT_TYPE, HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use super::payment::{payment_router, PaymentAppState, SIGNATURE_HEADER};

/// Settings for the middleware wrapped around the routes.
#[derive(Debug, Clone)]
pub struct HttpOptions {
    /// The only origin allowed to call the API from a browser.
    pub frontend_origin: HeaderValue,
    pub request_timeout: Duration,
}

/// Builds the full application: routes, state, CORS, timeout and tracing.
pub fn build_app(state: PaymentAppState, options: HttpOptions) -> Router {
    payment_router()
        .with_state(state)
        .layer(TimeoutLayer::new(options.request_timeout))
        .layer(cors_layer(options.frontend_origin))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origin: HeaderValue) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list([origin]))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE, HeaderName::from_static(SIGNATURE_HEADER)])
}
