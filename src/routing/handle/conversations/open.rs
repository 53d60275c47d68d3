use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use ccs_api::ApiError;
use ccs_api::error::{ApiErrorKind, ScheduleKind};
use ccs_lib::sec::authz::Role;

use crate::schedule;
use crate::sec::authn::initiator::Initiator;
use crate::state::ArcShared;
use crate::time::Clock;

/// the temporal gate. the caller may open a conversation only while one of
/// their meetings is inside its access window
pub async fn post(
    State(state): State<ArcShared>,
    initiator: Initiator,
) -> Result<impl IntoResponse, ApiError> {
    let meetings = match initiator.profile.role {
        Role::Admin => schedule::meetings_for_admin(
            state.directory(),
            initiator.profile()
        ).await?,
        Role::User => schedule::meetings_for_user(
            state.directory(),
            &initiator.profile.email
        ).await?,
    };

    let now = state.clock().now_local();

    if state.guard().permits_any(meetings.iter(), now) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::from((
            ApiErrorKind::Schedule(ScheduleKind::OutsideWindow),
            "not within your scheduled time"
        )))
    }
}
