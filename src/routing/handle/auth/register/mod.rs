use axum::extract::State;
use axum::response::IntoResponse;

use ccs_api::{ApiError, Payload, Validator};

use crate::state::ArcShared;
use crate::user;

pub mod organization;

pub async fn post(
    State(state): State<ArcShared>,
    axum::Json(json): axum::Json<ccs_api::users::CreateUser>,
) -> Result<impl IntoResponse, ApiError> {
    json.validate()?;

    let profile = user::create_user(
        state.directory(),
        state.directory(),
        json
    ).await?;

    Ok(Payload::new(ccs_api::users::Profile::from(profile)))
}
