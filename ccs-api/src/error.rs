use http::StatusCode;
use serde::{Serialize, Deserialize};
use strum::{AsRefStr as StrumAsRefStr};

#[derive(
    Debug, Clone, PartialEq, Eq,
    StrumAsRefStr,
    Serialize, Deserialize
)]
pub enum AuthKind {
    PermissionDenied,
    Unauthenticated,

    // deliberately covers both bad credentials and unknown identity so the
    // response cannot be used to enumerate accounts
    AuthenticationFailed,

    PasscodeRequired,
    InvalidPasscode,
}

impl std::fmt::Display for AuthKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self.as_ref(), f)
    }
}

impl From<&AuthKind> for StatusCode {
    fn from(kind: &AuthKind) -> Self {
        match kind {
            AuthKind::PermissionDenied |
            AuthKind::PasscodeRequired |
            AuthKind::InvalidPasscode => StatusCode::FORBIDDEN,
            AuthKind::Unauthenticated |
            AuthKind::AuthenticationFailed => StatusCode::UNAUTHORIZED,
        }
    }
}

#[derive(
    Debug, Clone, PartialEq, Eq,
    StrumAsRefStr,
    Serialize, Deserialize
)]
pub enum UserKind {
    // the account authenticated but no profile document exists for it. a
    // data integrity fault, not something the caller can correct
    ProfileNotFound,
}

impl std::fmt::Display for UserKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self.as_ref(), f)
    }
}

impl From<&UserKind> for StatusCode {
    fn from(kind: &UserKind) -> Self {
        match kind {
            UserKind::ProfileNotFound => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(
    Debug, Clone, PartialEq, Eq,
    StrumAsRefStr,
    Serialize, Deserialize
)]
pub enum ScheduleKind {
    MeetingNotFound,
    OutsideWindow,
}

impl std::fmt::Display for ScheduleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self.as_ref(), f)
    }
}

impl From<&ScheduleKind> for StatusCode {
    fn from(kind: &ScheduleKind) -> Self {
        match kind {
            ScheduleKind::MeetingNotFound => StatusCode::NOT_FOUND,
            ScheduleKind::OutsideWindow => StatusCode::FORBIDDEN,
        }
    }
}

#[derive(
    Debug, Clone, PartialEq, Eq,
    StrumAsRefStr,
    Serialize, Deserialize
)]
pub enum GeneralKind {
    InternalFailure,
    Timeout,

    AlreadyExists,
    NotFound,

    ValidationFailed,
    InvalidData,
    MissingData,

    InvalidHeaderValue,
    InvalidMethod,
    InvalidRequest,
}

impl std::fmt::Display for GeneralKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self.as_ref(), f)
    }
}

impl From<&GeneralKind> for StatusCode {
    fn from(kind: &GeneralKind) -> StatusCode {
        match kind {
            GeneralKind::InternalFailure => StatusCode::INTERNAL_SERVER_ERROR,
            GeneralKind::Timeout => StatusCode::REQUEST_TIMEOUT,
            GeneralKind::AlreadyExists => StatusCode::CONFLICT,
            GeneralKind::NotFound => StatusCode::NOT_FOUND,
            GeneralKind::ValidationFailed |
            GeneralKind::InvalidData |
            GeneralKind::MissingData |
            GeneralKind::InvalidHeaderValue |
            GeneralKind::InvalidRequest => StatusCode::BAD_REQUEST,
            GeneralKind::InvalidMethod => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

#[derive(
    Debug, Clone, PartialEq, Eq,
    Serialize, Deserialize
)]
pub enum ApiErrorKind {
    General(GeneralKind),
    Auth(AuthKind),
    User(UserKind),
    Schedule(ScheduleKind),
}

impl std::fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiErrorKind::General(v) => std::fmt::Display::fmt(v, f),
            ApiErrorKind::Auth(v) => std::fmt::Display::fmt(v, f),
            ApiErrorKind::User(v) => std::fmt::Display::fmt(v, f),
            ApiErrorKind::Schedule(v) => std::fmt::Display::fmt(v, f),
        }
    }
}

impl From<GeneralKind> for ApiErrorKind {
    fn from(v: GeneralKind) -> Self {
        ApiErrorKind::General(v)
    }
}

impl From<AuthKind> for ApiErrorKind {
    fn from(v: AuthKind) -> Self {
        ApiErrorKind::Auth(v)
    }
}

impl From<UserKind> for ApiErrorKind {
    fn from(v: UserKind) -> Self {
        ApiErrorKind::User(v)
    }
}

impl From<ScheduleKind> for ApiErrorKind {
    fn from(v: ScheduleKind) -> Self {
        ApiErrorKind::Schedule(v)
    }
}

impl From<&ApiErrorKind> for StatusCode {
    fn from(kind: &ApiErrorKind) -> Self {
        match kind {
            ApiErrorKind::General(v) => v.into(),
            ApiErrorKind::Auth(v) => v.into(),
            ApiErrorKind::User(v) => v.into(),
            ApiErrorKind::Schedule(v) => v.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Detail {
    Keys(Vec<String>),
}

impl Detail {
    pub fn with_key(key: impl Into<String>) -> Self {
        Detail::Keys(vec![key.into()])
    }

    pub fn mult_keys<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>
    {
        Detail::Keys(keys.into_iter().map(|k| k.into()).collect())
    }
}

impl std::fmt::Display for Detail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Detail::Keys(list) => {
                let mut iter = list.iter();

                if let Some(first) = iter.next() {
                    write!(f, "{}", first)?;

                    for key in iter {
                        write!(f, ",{}", key)?;
                    }
                }
            },
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    kind: ApiErrorKind,
    detail: Option<Detail>,
    msg: Option<String>,
}

impl ApiError {
    pub fn new() -> Self {
        ApiError {
            kind: ApiErrorKind::General(GeneralKind::InternalFailure),
            detail: None,
            msg: None
        }
    }

    pub fn with_kind<K>(mut self, kind: K) -> Self
    where
        K: Into<ApiErrorKind>
    {
        self.kind = kind.into();
        self
    }

    pub fn with_detail(mut self, detail: Detail) -> Self {
        self.detail = Some(detail);
        self
    }

    pub fn with_message<M>(mut self, msg: M) -> Self
    where
        M: Into<String>
    {
        self.msg = Some(msg.into());
        self
    }

    pub fn kind(&self) -> &ApiErrorKind {
        &self.kind
    }

    pub fn detail(&self) -> Option<&Detail> {
        self.detail.as_ref()
    }

    pub fn message(&self) -> Option<&str> {
        self.msg.as_ref().map(|v| v.as_str())
    }
}

impl std::default::Default for ApiError {
    fn default() -> Self {
        ApiError::new()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)?;

        if let Some(detail) = &self.detail {
            write!(f, ": {}", detail)?;
        }

        if let Some(msg) = &self.msg {
            write!(f, ": {}", msg)?;
        }

        Ok(())
    }
}

impl std::error::Error for ApiError {}

impl<K> From<K> for ApiError
where
    K: Into<ApiErrorKind>
{
    fn from(kind: K) -> Self {
        ApiError {
            kind: kind.into(),
            detail: None,
            msg: None
        }
    }
}

impl<K,M> From<(K, M)> for ApiError
where
    K: Into<ApiErrorKind>,
    M: Into<String>,
{
    fn from((kind, msg): (K, M)) -> Self {
        ApiError {
            kind: kind.into(),
            detail: None,
            msg: Some(msg.into())
        }
    }
}

impl<K> From<(K, Detail)> for ApiError
where
    K: Into<ApiErrorKind>
{
    fn from((kind, detail): (K, Detail)) -> Self {
        ApiError {
            kind: kind.into(),
            detail: Some(detail),
            msg: None
        }
    }
}

impl<K,M> From<(K, Detail, M)> for ApiError
where
    K: Into<ApiErrorKind>,
    M: Into<String>
{
    fn from((kind, detail, msg): (K, Detail, M)) -> Self {
        ApiError {
            kind: kind.into(),
            detail: Some(detail),
            msg: Some(msg.into())
        }
    }
}

impl axum_core::response::IntoResponse for ApiError {
    fn into_response(self) -> axum_core::response::Response {
        let status = StatusCode::from(&self.kind);

        match crate::response::serialize_json(status, &self) {
            Ok(res) => res,
            Err(err) => {
                tracing::error!("ApiError serialization error {:?}", err);
                crate::response::error_json()
            }
        }
    }
}
