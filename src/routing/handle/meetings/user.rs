use axum::extract::State;
use axum::response::IntoResponse;

use ccs_api::{ApiError, Payload};

use crate::schedule;
use crate::sec::authn::initiator::Initiator;
use crate::state::ArcShared;

/// meetings addressed to the caller's own email, whatever their role
pub async fn get(
    State(state): State<ArcShared>,
    initiator: Initiator,
) -> Result<impl IntoResponse, ApiError> {
    let list = schedule::meetings_for_user(
        state.directory(),
        &initiator.profile.email
    ).await?;

    let list: Vec<ccs_api::meetings::Meeting> = list.into_iter()
        .map(Into::into)
        .collect();

    Ok(Payload::new(list))
}
