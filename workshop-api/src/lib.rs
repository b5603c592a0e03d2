use axum::{body::Body, http::Request, routing::any, Router};
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

pub mod error;
pub mod products;
pub mod state;
pub mod telemetry;

pub use error::AppError;
pub use state::AppState;

pub fn app(state: AppState) -> Router {
    let app_name = state.app_name.clone();

    // Outermost first: the request id must exist before the trace span reads it.
    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(move |request: &Request<Body>| {
                    let request_id = request
                        .headers()
                        .get("x-request-id")
                        .and_then(|value| value.to_str().ok())
                        .unwrap_or("-");

                    tracing::info_span!(
                        "request",
                        app = %app_name,
                        request_id = %request_id,
                        method = %request.method(),
                        uri = %request.uri(),
                        ctx_id = tracing::field::Empty
                    )
                })
                .on_request(DefaultOnRequest::new().level(Level::TRACE))
                .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
        )
        .layer(PropagateRequestIdLayer::x_request_id());

    Router::new()
        .route("/", any(products::get_product))
        .layer(middleware)
        .with_state(state)
}
