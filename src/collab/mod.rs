use ccs_api::ApiError;
use ccs_api::error::{ApiErrorKind, AuthKind, GeneralKind};

use crate::schedule::{Meeting, MeetingFields};
use crate::user::{Profile, ProfileFields};

pub mod http;

#[cfg(test)]
pub mod memory;

pub type AccountId = String;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("collaborator rejected the given credentials")]
    Unauthorized,

    #[error("collaborator reported a conflict: {0}")]
    Conflict(String),

    #[error("unexpected collaborator response: {0}")]
    Response(String),

    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::Unauthorized => ApiError::from(ApiErrorKind::Auth(AuthKind::AuthenticationFailed)),
            Error::Conflict(_) => ApiError::from(ApiErrorKind::General(GeneralKind::AlreadyExists)),
            Error::Response(_) => {
                // detail stops here, the client only learns that the
                // request could not be served
                tracing::error!("collaborator failure: {err}");

                ApiError::from(ApiErrorKind::General(GeneralKind::InternalFailure))
            },
            Error::Transport(ref transport) => {
                tracing::error!("collaborator transport failure: {err}");

                if transport.is_timeout() {
                    ApiError::from(ApiErrorKind::General(GeneralKind::Timeout))
                } else {
                    ApiError::from(ApiErrorKind::General(GeneralKind::InternalFailure))
                }
            }
        }
    }
}

/// the managed account service. owns credentials and identity records,
/// this core never stores either
pub trait Accounts {
    async fn create_account(
        &self,
        email: &str,
        password: &str,
        username: &str,
    ) -> Result<AccountId, Error>;

    async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AccountId, Error>;
}

/// profile documents in the managed document store
pub trait Profiles {
    async fn create_profile(&self, fields: ProfileFields) -> Result<Profile, Error>;

    async fn profile_for_account(&self, account_id: &str) -> Result<Option<Profile>, Error>;

    async fn set_passcode_validated(&self, id: &str) -> Result<Profile, Error>;
}

/// meeting documents in the managed document store
pub trait Meetings {
    async fn create_meeting(&self, fields: MeetingFields) -> Result<Meeting, Error>;

    async fn meetings_for_admin(&self, admin_id: &str) -> Result<Vec<Meeting>, Error>;

    async fn meetings_for_user(&self, email: &str) -> Result<Vec<Meeting>, Error>;
}

/// outbound mail dispatch. fire and forget from this core's perspective,
/// callers log a failure and move on
pub trait Notifier {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<(), Error>;
}
