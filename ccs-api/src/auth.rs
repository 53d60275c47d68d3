use serde::{Serialize, Deserialize};

use crate::{Validator, ApiError, ApiErrorKind, Detail};
use crate::error::GeneralKind;

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterOrganization {
    pub org_name: String,
    pub email: String,
    pub password: String,
}

impl Validator for RegisterOrganization {
    fn validate(&self) -> Result<(), ApiError> {
        let mut invalid = Vec::new();

        if !ccs_lib::org::org_name_valid(&self.org_name) {
            invalid.push("org_name");
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

/// credentials for a login attempt. the passcode rides along only on an
/// admin's first login and is otherwise ignored, so its shape is not
/// validated here
#[derive(Debug, Serialize, Deserialize)]
pub struct SubmittedLogin {
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passcode: Option<String>,
}

impl Validator for SubmittedLogin {
    fn validate(&self) -> Result<(), ApiError> {
        let mut invalid = Vec::new();

        if !ccs_lib::users::email_valid(&self.email) {
            invalid.push("email");
        }

        if self.password.is_empty() {
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
