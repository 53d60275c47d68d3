use ccs_api::ApiError;
use ccs_lib::sec::authz::Role;

use serde::{Serialize, Deserialize};

use crate::collab::{Accounts, Notifier, Profiles};
use crate::sec::authn::passcode::Authenticator;
use crate::time::Clock;

pub const PASSCODE_SUBJECT: &str = "Your organization passcode";

#[derive(Debug, Clone)]
pub struct Profile {
    pub id: String,
    pub account_id: String,
    pub email: String,
    pub username: String,
    pub role: Role,
    pub passcode_validated: bool,
}

impl From<Profile> for ccs_api::users::Profile {
    fn from(profile: Profile) -> Self {
        ccs_api::users::Profile {
            id: profile.id,
            account_id: profile.account_id,
            email: profile.email,
            username: profile.username,
            role: profile.role,
            passcode_validated: profile.passcode_validated,
        }
    }
}

/// the attribute set of a profile document, also its wire shape in the
/// document store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileFields {
    pub account_id: String,
    pub email: String,
    pub username: String,
    pub role: Role,
    pub passcode_validated: bool,
}

pub async fn create_user(
    accounts: &impl Accounts,
    profiles: &impl Profiles,
    given: ccs_api::users::CreateUser,
) -> Result<Profile, ApiError> {
    let account_id = accounts.create_account(
        &given.email,
        &given.password,
        &given.username
    ).await?;

    let profile = profiles.create_profile(ProfileFields {
        account_id,
        email: given.email,
        username: given.username,
        role: Role::User,
        // regular users never see the passcode gate so the flag is created
        // already satisfied
        passcode_validated: true,
    }).await?;

    Ok(profile)
}

pub async fn register_organization<C>(
    accounts: &impl Accounts,
    profiles: &impl Profiles,
    notifier: &impl Notifier,
    passcodes: &Authenticator<C>,
    given: ccs_api::auth::RegisterOrganization,
) -> Result<Profile, ApiError>
where
    C: Clock
{
    let account_id = accounts.create_account(
        &given.email,
        &given.password,
        &given.org_name
    ).await?;

    let profile = profiles.create_profile(ProfileFields {
        account_id,
        email: given.email,
        username: given.org_name,
        role: Role::Admin,
        passcode_validated: false,
    }).await?;

    let code = passcodes.derive(&profile.email, 0);
    let body = format!(
        "Welcome to the platform. Your one time passcode is {code}. Enter \
        it with your first sign in. It stops working within ten minutes of \
        this message."
    );

    // registration already happened, a dead notifier must not undo it
    if let Err(err) = notifier.send(&profile.email, PASSCODE_SUBJECT, &body).await {
        tracing::warn!("failed to hand off passcode email for {}: {err}", profile.email);
    }

    Ok(profile)
}

#[cfg(test)]
mod test {
    use super::*;

    use crate::collab::memory::{Memory, RecordingNotifier, FailingNotifier};
    use crate::sec::authn::passcode::test_authenticator;
    use crate::time::FixedClock;

    fn user_request() -> ccs_api::users::CreateUser {
        ccs_api::users::CreateUser {
            username: String::from("seeker01"),
            email: String::from("seeker@example.com"),
            password: String::from("correct horse battery staple"),
        }
    }

    fn org_request() -> ccs_api::auth::RegisterOrganization {
        ccs_api::auth::RegisterOrganization {
            org_name: String::from("Open Counsel Collective"),
            email: String::from("alice@org.com"),
            password: String::from("correct horse battery staple"),
        }
    }

    #[tokio::test]
    async fn create_user_profile_is_pre_validated() {
        let store = Memory::new();

        let profile = create_user(&store, &store, user_request())
            .await
            .expect("user registration failed");

        assert_eq!(profile.role, Role::User);
        assert!(profile.passcode_validated);
    }

    #[tokio::test]
    async fn register_organization_hands_passcode_to_notifier() {
        let store = Memory::new();
        let notifier = RecordingNotifier::new();
        let clock = FixedClock::at_millis(0);
        let passcodes = test_authenticator(clock);

        let profile = register_organization(&store, &store, &notifier, &passcodes, org_request())
            .await
            .expect("organization registration failed");

        assert_eq!(profile.role, Role::Admin);
        assert!(!profile.passcode_validated);

        let sent = notifier.sent();

        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "alice@org.com");
        assert_eq!(sent[0].1, PASSCODE_SUBJECT);
        assert!(
            sent[0].2.contains(&passcodes.derive("alice@org.com", 0)),
            "email body does not carry the current window passcode: {:?}",
            sent[0].2
        );
    }

    #[tokio::test]
    async fn register_organization_survives_notifier_failure() {
        let store = Memory::new();
        let clock = FixedClock::at_millis(0);
        let passcodes = test_authenticator(clock);

        let profile = register_organization(&store, &store, &FailingNotifier, &passcodes, org_request())
            .await
            .expect("registration must not fail on notifier failure");

        assert_eq!(profile.role, Role::Admin);
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let store = Memory::new();

        create_user(&store, &store, user_request())
            .await
            .expect("first registration failed");

        let err = create_user(&store, &store, user_request())
            .await
            .expect_err("second registration with the same email succeeded");

        assert_eq!(
            err.kind(),
            &ccs_api::error::ApiErrorKind::General(ccs_api::error::GeneralKind::AlreadyExists)
        );
    }
}
