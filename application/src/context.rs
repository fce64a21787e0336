/// [`Context`]-related definitions.
use std::sync::atomic::{self, AtomicU16};

use axum::{async_trait, extract::FromRequestParts, RequestPartsExt as _};
use axum_extra::{
    headers::{self, Header},
    TypedHeader,
};
use http::{HeaderName, HeaderValue};
use juniper::{
    http::{GraphQLBatchResponse, GraphQLResponse},
    IntoFieldError as _,
};
use tokio::sync::OnceCell;
use uuid::Uuid;

#[cfg(doc)]
use service::domain::User;
use crate::{api, define_error, AsError, Error, JuniperResponse, Service};

/// Application context.
#[derive(Debug)]
pub struct Context {
    /// [`Service`] instance.
    service: Service,

    /// Error status code.
    error_status_code: AtomicU16,

    /// Parts of the HTTP request.
    parts: http::request::Parts,

    /// Current [`Session`].
    current_session: OnceCell<Session>,
}

impl Context {
    /// Returns [`Service`] instance of this [`Context`].
    #[must_use]
    pub fn service(&self) -> &Service {
        &self.service
    }

    /// Returns the error status code of this [`Context`].
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    #[must_use]
    pub fn error_status_code(&self) -> http::StatusCode {
        http::StatusCode::from_u16(
            self.error_status_code.load(atomic::Ordering::Relaxed),
        )
        .expect("invalid status code")
    }

    /// Sets the error status code for this [`Context`].
    ///
    /// Provided [`http::StatusCode`] will be applied to the response.
    pub fn set_error_status_code(&self, status_code: http::StatusCode) {
        self.error_status_code
            .store(status_code.as_u16(), atomic::Ordering::Relaxed);
    }

    /// Helper method calling [`Context::set_error_status_code()`] inside
    /// [`Result::map_err()`] closure.
    pub fn error(&self) -> impl FnOnce(Error) -> Error + '_ {
        move |err| {
            self.set_error_status_code(err.status_code);
            err
        }
    }

    /// Returns the current [`Session`] for this [`Context`].
    ///
    /// # Errors
    ///
    /// Errors if:
    /// - the current HTTP request has no [`XUserId`] header;
    /// - the provided [`XUserId`] header is malformed.
    pub async fn current_session(&self) -> Result<Session, Error> {
        self.current_session
            .get_or_try_init(|| self.do_authentication())
            .await
            .cloned()
    }

    /// Identifies the [`Session`] by the [`XUserId`] header.
    ///
    /// # Errors
    ///
    /// Errors if the [`XUserId`] header is missing or malformed.
    async fn do_authentication(&self) -> Result<Session, Error> {
        let res = self.parts.clone().extract::<TypedHeader<XUserId>>().await;
        match res {
            Ok(TypedHeader(XUserId(user_id))) => Ok(Session { user_id }),
            Err(e) => {
                if e.is_missing() {
                    Err(AuthError::AuthenticationRequired.into())
                } else {
                    Err(e.into_error())
                }
            }
        }
        .map_err(self.error())
    }
}

impl juniper::Context for Context {}

#[async_trait]
impl<S> FromRequestParts<S> for Context
where
    S: Send + Sync,
{
    type Rejection = JuniperResponse;

    async fn from_request_parts(
        parts: &mut http::request::Parts,
        _: &S,
    ) -> Result<Self, Self::Rejection> {
        let service =
            parts.extensions.get::<Service>().cloned().ok_or_else(|| {
                JuniperResponse {
                    status_code: http::StatusCode::INTERNAL_SERVER_ERROR,
                    response: GraphQLBatchResponse::Single(
                        GraphQLResponse::error(
                            Error::internal(&"missing `Service` extension")
                                .into_field_error(),
                        ),
                    ),
                }
            })?;

        Ok(Self {
            service,
            error_status_code: AtomicU16::new(
                http::StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
            ),
            parts: parts.clone(),
            current_session: OnceCell::new(),
        })
    }
}

/// Session of the [`User`] performing the current HTTP request.
#[derive(Clone, Copy, Debug)]
pub struct Session {
    /// ID of the [`User`] associated with this [`Session`].
    pub user_id: api::user::Id,
}

/// `X-User-Id` HTTP header carrying the ID of the acting [`User`].
///
/// Users are authenticated upstream, so the header is trusted as is.
#[derive(Clone, Copy, Debug)]
pub struct XUserId(pub api::user::Id);

/// Name of the [`XUserId`] header.
static X_USER_ID: HeaderName = HeaderName::from_static("x-user-id");

impl Header for XUserId {
    fn name() -> &'static HeaderName {
        &X_USER_ID
    }

    fn decode<'i, I>(values: &mut I) -> Result<Self, headers::Error>
    where
        I: Iterator<Item = &'i HeaderValue>,
    {
        values
            .next()
            .and_then(|v| v.to_str().ok())
            .and_then(|v| Uuid::parse_str(v.trim()).ok())
            .map(|id| Self(id.into()))
            .ok_or_else(headers::Error::invalid)
    }

    fn encode<E: Extend<HeaderValue>>(&self, values: &mut E) {
        values.extend(HeaderValue::from_str(&self.0.to_string()).ok());
    }
}

define_error! {
    enum AuthError {
        #[code = "AUTHENTICATION_REQUIRED"]
        #[status = UNAUTHORIZED]
        #[message = "`X-User-Id` header is required"]
        AuthenticationRequired,
    }
}

#[cfg(test)]
mod spec {
    use axum_extra::headers::Header as _;
    use http::HeaderValue;

    use super::XUserId;

    #[test]
    fn decodes_user_id() {
        let raw = HeaderValue::from_static(
            "67e55044-10b1-426f-9247-bb680e5fe0c8",
        );
        let header = XUserId::decode(&mut [&raw].into_iter()).unwrap();

        assert_eq!(
            header.0.to_string(),
            "67e55044-10b1-426f-9247-bb680e5fe0c8",
        );
    }

    #[test]
    fn rejects_malformed_user_id() {
        let raw = HeaderValue::from_static("admin");

        assert!(XUserId::decode(&mut [&raw].into_iter()).is_err());
        assert!(XUserId::decode(&mut std::iter::empty()).is_err());
    }
}
