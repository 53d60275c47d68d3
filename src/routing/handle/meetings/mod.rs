use axum::extract::State;
use axum::response::IntoResponse;

use ccs_api::{ApiError, Payload, Validator};

use crate::schedule;
use crate::sec::authn::initiator::Initiator;
use crate::state::ArcShared;

pub mod user;

pub async fn get(
    State(state): State<ArcShared>,
    initiator: Initiator,
) -> Result<impl IntoResponse, ApiError> {
    let list = schedule::meetings_for_admin(
        state.directory(),
        initiator.profile()
    ).await?;

    let list: Vec<ccs_api::meetings::Meeting> = list.into_iter()
        .map(Into::into)
        .collect();

    Ok(Payload::new(list))
}

pub async fn post(
    State(state): State<ArcShared>,
    initiator: Initiator,
    axum::Json(json): axum::Json<ccs_api::meetings::CreateMeeting>,
) -> Result<impl IntoResponse, ApiError> {
    json.validate()?;

    let meeting = schedule::create_meeting(
        state.directory(),
        initiator.profile(),
        json
    ).await?;

    Ok(Payload::new(ccs_api::meetings::Meeting::from(meeting)))
}
