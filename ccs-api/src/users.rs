use ccs_lib::sec::authz::Role;

use serde::{Serialize, Deserialize};

use crate::{Validator, ApiError, ApiErrorKind, Detail};
use crate::error::GeneralKind;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub account_id: String,
    pub email: String,
    pub username: String,
    pub role: Role,
    pub passcode_validated: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl Validator for CreateUser {
    fn validate(&self) -> Result<(), ApiError> {
        let mut invalid = Vec::new();

        if !ccs_lib::users::username_valid(&self.username) {
            invalid.push("username");
        }

        if !ccs_lib::users::email_valid(&self.email) {
            invalid.push("email");
        }

        if !ccs_lib::sec::authn::password_valid(&self.password) {
            invalid.push("password");
        }

        if !invalid.is_empty() {
            Err(ApiError::from((
                ApiErrorKind::General(GeneralKind::ValidationFailed),
                Detail::mult_keys(invalid)
            )))
        } else {
            Ok(())
        }
    }
}
