use axum::extract::State;
use axum::response::IntoResponse;

use ccs_api::{ApiError, Payload, Validator};

use crate::state::ArcShared;
use crate::user;

pub async fn post(
    State(state): State<ArcShared>,
    axum::Json(json): axum::Json<ccs_api::auth::RegisterOrganization>,
) -> Result<impl IntoResponse, ApiError> {
    json.validate()?;

    let profile = user::register_organization(
        state.directory(),
        state.directory(),
        state.notifier(),
        state.passcodes(),
        json
    ).await?;

    Ok(Payload::new(ccs_api::users::Profile::from(profile)))
}
