use std::ops::Deref;
use std::pin::Pin;
use std::future::Future;

use axum::http::HeaderMap;
use axum::http::request::Parts;
use axum::extract::FromRequestParts;
use base64::{Engine, engine::general_purpose::STANDARD};

use ccs_api::ApiError;
use ccs_api::error::{ApiErrorKind, AuthKind, GeneralKind, UserKind};

use crate::collab::{self, Accounts, Profiles};
use crate::collab::http::Directory;
use crate::user::Profile;

/// the caller behind one request.
///
/// there is no session store, every protected request carries basic
/// credentials and is resolved against the account service on arrival
#[derive(Debug)]
pub struct Initiator {
    pub profile: Profile,
}

impl Initiator {
    pub fn profile(&self) -> &Profile {
        &self.profile
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("no authentication mechanism was found")]
    MechanismNotFound,

    #[error("malformed authorization header")]
    InvalidHeader,

    #[error("authenticated account has no profile")]
    ProfileNotFound,

    #[error(transparent)]
    Collaborator(#[from] collab::Error),

    #[error(transparent)]
    HeaderToStr(#[from] axum::http::header::ToStrError),
}

impl From<LookupError> for ApiError {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::MechanismNotFound => ApiError::from(
                ApiErrorKind::Auth(AuthKind::Unauthenticated)
            ),
            LookupError::InvalidHeader |
            LookupError::HeaderToStr(_) => ApiError::from(
                ApiErrorKind::General(GeneralKind::InvalidHeaderValue)
            ),
            LookupError::ProfileNotFound => {
                tracing::error!("authenticated account has no profile document");

                ApiError::from(ApiErrorKind::User(UserKind::ProfileNotFound))
            },
            LookupError::Collaborator(err) => err.into(),
        }
    }
}

fn parse_basic(value: &str) -> Result<(String, String), LookupError> {
    let Some(encoded) = value.strip_prefix("Basic ") else {
        return Err(LookupError::InvalidHeader);
    };

    let decoded = STANDARD.decode(encoded.trim())
        .map_err(|_| LookupError::InvalidHeader)?;
    let decoded = String::from_utf8(decoded)
        .map_err(|_| LookupError::InvalidHeader)?;

    let Some((email, password)) = decoded.split_once(':') else {
        return Err(LookupError::InvalidHeader);
    };

    Ok((email.to_owned(), password.to_owned()))
}

pub async fn lookup_header_map(
    accounts: &impl Accounts,
    profiles: &impl Profiles,
    headers: &HeaderMap,
) -> Result<Initiator, LookupError> {
    let Some(value) = headers.get("authorization") else {
        return Err(LookupError::MechanismNotFound);
    };

    let (email, password) = parse_basic(value.to_str()?)?;

    let account_id = accounts.authenticate(&email, &password).await?;

    let Some(profile) = profiles.profile_for_account(&account_id).await? else {
        return Err(LookupError::ProfileNotFound);
    };

    Ok(Initiator { profile })
}

impl<A, S> FromRequestParts<A> for Initiator
where
    A: Deref<Target = S> + Sync,
    S: AsRef<Directory> + Sync,
{
    type Rejection = ApiError;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        state: &'life1 A,
    ) -> Pin<Box<dyn Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>>
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait
    {
        Box::pin(async move {
            let directory: &Directory = state.deref().as_ref();

            Ok(lookup_header_map(directory, directory, &parts.headers).await?)
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use axum::http::HeaderValue;
    use ccs_lib::sec::authz::Role;

    use crate::collab::memory::Memory;
    use crate::user::ProfileFields;

    fn basic_header(email: &str, password: &str) -> HeaderMap {
        let encoded = STANDARD.encode(format!("{email}:{password}"));
        let mut headers = HeaderMap::new();

        headers.insert(
            "authorization",
            HeaderValue::from_str(&format!("Basic {encoded}")).unwrap()
        );

        headers
    }

    async fn seed(store: &Memory) {
        let account_id = store.create_account("seeker@example.com", "another fine password", "seeker01")
            .await
            .unwrap();

        store.create_profile(ProfileFields {
            account_id,
            email: String::from("seeker@example.com"),
            username: String::from("seeker01"),
            role: Role::User,
            passcode_validated: true,
        }).await.unwrap();
    }

    #[test]
    fn basic_credentials_round_trip() {
        let encoded = STANDARD.encode("alice@org.com:pass:word");

        let (email, password) = parse_basic(&format!("Basic {encoded}"))
            .expect("well formed header failed to parse");

        assert_eq!(email, "alice@org.com");
        assert_eq!(password, "pass:word", "password containing a colon was truncated");

        assert!(parse_basic("Bearer whatever").is_err());
        assert!(parse_basic("Basic not base64!!").is_err());
        assert!(parse_basic(&format!("Basic {}", STANDARD.encode("no separator"))).is_err());
    }

    #[tokio::test]
    async fn resolves_the_calling_profile() {
        let store = Memory::new();

        seed(&store).await;

        let headers = basic_header("seeker@example.com", "another fine password");

        let initiator = lookup_header_map(&store, &store, &headers)
            .await
            .expect("lookup failed for valid credentials");

        assert_eq!(initiator.profile.email, "seeker@example.com");
    }

    #[tokio::test]
    async fn missing_header_is_unauthenticated() {
        let store = Memory::new();

        seed(&store).await;

        let err = lookup_header_map(&store, &store, &HeaderMap::new())
            .await
            .expect_err("lookup without credentials succeeded");

        assert!(matches!(err, LookupError::MechanismNotFound));
    }

    #[tokio::test]
    async fn wrong_credentials_are_rejected() {
        let store = Memory::new();

        seed(&store).await;

        let headers = basic_header("seeker@example.com", "wrong");

        let err = lookup_header_map(&store, &store, &headers)
            .await
            .expect_err("lookup with wrong password succeeded");

        let api: ApiError = err.into();

        assert_eq!(api.kind(), &ApiErrorKind::Auth(AuthKind::AuthenticationFailed));
    }
}
