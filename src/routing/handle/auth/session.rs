use axum::extract::State;
use axum::response::IntoResponse;

use ccs_api::{ApiError, Payload, Validator};

use crate::sec::authn::session;
use crate::state::ArcShared;

pub async fn post(
    State(state): State<ArcShared>,
    axum::Json(json): axum::Json<ccs_api::auth::SubmittedLogin>,
) -> Result<impl IntoResponse, ApiError> {
    json.validate()?;

    let profile = session::resolve(
        state.directory(),
        state.directory(),
        state.passcodes(),
        json
    ).await?;

    Ok(Payload::new(ccs_api::users::Profile::from(profile)))
}
