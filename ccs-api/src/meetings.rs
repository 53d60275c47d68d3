use ccs_lib::schedule::MeetingStatus;

use chrono::{NaiveDate, NaiveTime};
use serde::{Serialize, Deserialize};

use crate::{Validator, ApiError, ApiErrorKind, Detail};
use crate::error::GeneralKind;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meeting {
    pub id: String,
    pub admin_id: String,
    pub user_email: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub status: MeetingStatus,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateMeeting {
    pub user_email: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
}

impl Validator for CreateMeeting {
    fn validate(&self) -> Result<(), ApiError> {
        if !ccs_lib::users::email_valid(&self.user_email) {
            Err(ApiError::from((
                ApiErrorKind::General(GeneralKind::ValidationFailed),
                Detail::with_key("user_email")
            )))
        } else {
            Ok(())
        }
    }
}
