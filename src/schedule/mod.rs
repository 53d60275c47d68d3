use ccs_api::ApiError;
use ccs_api::error::{ApiErrorKind, AuthKind};
use ccs_lib::schedule::{access_window_end, scheduled_instant, MeetingStatus};
use ccs_lib::sec::authz::Role;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Serialize, Deserialize};

use crate::collab::Meetings;
use crate::config::Config;
use crate::user::Profile;

#[derive(Debug, Clone)]
pub struct Meeting {
    pub id: String,
    pub admin_id: String,
    pub user_email: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub status: MeetingStatus,
}

impl From<Meeting> for ccs_api::meetings::Meeting {
    fn from(meeting: Meeting) -> Self {
        ccs_api::meetings::Meeting {
            id: meeting.id,
            admin_id: meeting.admin_id,
            user_email: meeting.user_email,
            date: meeting.date,
            time: meeting.time,
            status: meeting.status,
        }
    }
}

/// the attribute set of a meeting document, also its wire shape in the
/// document store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeetingFields {
    pub admin_id: String,
    pub user_email: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub status: MeetingStatus,
}

/// decides whether a conversation tied to a meeting may be opened at a
/// given moment.
///
/// access runs out thirty minutes past the scheduled instant. with
/// `enforce_start` unset there is no opening bound at all, a participant
/// may come in arbitrarily early. that lax default is the long observed
/// contract and the toggle exists so a deployment can choose the strict
/// policy instead
#[derive(Debug, Clone)]
pub struct AccessGuard {
    enforce_start: bool,
}

impl AccessGuard {
    pub fn new(enforce_start: bool) -> AccessGuard {
        AccessGuard {
            enforce_start,
        }
    }

    pub fn from_config(config: &Config) -> AccessGuard {
        AccessGuard {
            enforce_start: config.settings.schedule.enforce_start,
        }
    }

    pub fn permits(&self, meeting: &Meeting, now: NaiveDateTime) -> bool {
        let instant = scheduled_instant(meeting.date, meeting.time);

        if self.enforce_start && now < instant {
            return false;
        }

        now <= access_window_end(instant)
    }

    pub fn permits_any<'a, I>(&self, meetings: I, now: NaiveDateTime) -> bool
    where
        I: IntoIterator<Item = &'a Meeting>
    {
        meetings.into_iter().any(|meeting| self.permits(meeting, now))
    }
}

pub async fn create_meeting(
    store: &impl Meetings,
    caller: &Profile,
    given: ccs_api::meetings::CreateMeeting,
) -> Result<Meeting, ApiError> {
    match caller.role {
        Role::Admin => {},
        Role::User => {
            return Err(ApiError::from(ApiErrorKind::Auth(AuthKind::PermissionDenied)));
        }
    }

    let meeting = store.create_meeting(MeetingFields {
        admin_id: caller.id.clone(),
        user_email: given.user_email,
        date: given.date,
        time: given.time,
        status: MeetingStatus::Scheduled,
    }).await?;

    Ok(meeting)
}

pub async fn meetings_for_admin(
    store: &impl Meetings,
    caller: &Profile,
) -> Result<Vec<Meeting>, ApiError> {
    match caller.role {
        Role::Admin => {},
        Role::User => {
            return Err(ApiError::from(ApiErrorKind::Auth(AuthKind::PermissionDenied)));
        }
    }

    Ok(store.meetings_for_admin(&caller.id).await?)
}

pub async fn meetings_for_user(
    store: &impl Meetings,
    email: &str,
) -> Result<Vec<Meeting>, ApiError> {
    Ok(store.meetings_for_user(email).await?)
}
