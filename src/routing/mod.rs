use std::time::Duration;

use axum::Router;
use axum::error_handling::HandleErrorLayer;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use ccs_api::ApiError;
use ccs_api::error::{ApiErrorKind, GeneralKind};

use crate::net::layer;
use crate::state::ArcShared;

mod handle;

async fn ping() -> (StatusCode, &'static str) {
    (StatusCode::OK, "pong")
}

async fn handle_error(error: tower::BoxError) -> ApiError {
    if error.is::<tower::timeout::error::Elapsed>() {
        return ApiError::from(ApiErrorKind::General(GeneralKind::Timeout));
    }

    tracing::error!("unhandled error when processing request: {error:#?}");

    ApiError::from(ApiErrorKind::General(GeneralKind::InternalFailure))
}

pub fn routes(state: &ArcShared) -> Router {
    Router::new()
        .route(
            "/auth/register",
            post(handle::auth::register::post)
        )
        .route(
            "/auth/register/organization",
            post(handle::auth::register::organization::post)
        )
        .route(
            "/auth/session",
            post(handle::auth::session::post)
        )
        .route(
            "/meetings",
            get(handle::meetings::get)
                .post(handle::meetings::post)
        )
        .route(
            "/meetings/user",
            get(handle::meetings::user::get)
        )
        .route(
            "/conversations/open",
            post(handle::conversations::open::post)
        )
        .route("/ping", get(ping))
        .layer(ServiceBuilder::new()
            .layer(TraceLayer::new_for_http()
                .make_span_with(layer::make_span_with)
                .on_response(layer::on_response)
                .on_failure(layer::on_failure))
            .layer(HandleErrorLayer::new(handle_error))
            .layer(tower::timeout::TimeoutLayer::new(Duration::new(90, 0))))
        .with_state(state.clone())
}
