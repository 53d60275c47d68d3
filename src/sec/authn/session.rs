use ccs_api::ApiError;
use ccs_api::error::{ApiErrorKind, AuthKind, UserKind};
use ccs_lib::sec::authz::Role;

use crate::collab::{Accounts, Profiles};
use crate::time::Clock;
use crate::user::Profile;

use super::passcode::Authenticator;

/// resolves a login attempt into a profile.
///
/// credentials go to the account service first, then the profile document
/// is loaded. an admin whose first login has not been validated yet must
/// also present the passcode issued at registration. the validated flag
/// flips exactly once and the gate never engages again, even if the root
/// key or the clock changes later.
///
/// two first logins racing each other can both pass the check before
/// either write lands. that is fine, a correct passcode is proof of key
/// possession no matter which write wins.
pub async fn resolve<C>(
    accounts: &impl Accounts,
    profiles: &impl Profiles,
    passcodes: &Authenticator<C>,
    given: ccs_api::auth::SubmittedLogin,
) -> Result<Profile, ApiError>
where
    C: Clock
{
    let account_id = accounts.authenticate(&given.email, &given.password).await?;

    let Some(profile) = profiles.profile_for_account(&account_id).await? else {
        tracing::error!("authenticated account \"{account_id}\" has no profile document");

        return Err(ApiError::from(ApiErrorKind::User(UserKind::ProfileNotFound)));
    };

    match profile.role {
        Role::User => return Ok(profile),
        Role::Admin => {}
    }

    if profile.passcode_validated {
        return Ok(profile);
    }

    let Some(passcode) = given.passcode.filter(|v| !v.is_empty()) else {
        return Err(ApiError::from(ApiErrorKind::Auth(AuthKind::PasscodeRequired)));
    };

    if !passcodes.verify(&profile.email, &passcode) {
        return Err(ApiError::from(ApiErrorKind::Auth(AuthKind::InvalidPasscode)));
    }

    let profile = profiles.set_passcode_validated(&profile.id).await?;

    Ok(profile)
}
