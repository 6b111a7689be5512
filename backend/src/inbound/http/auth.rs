//! Bearer-token identity extraction and role gating.
//!
//! The authenticator behind the [`CallerAuthenticator`] port is an external
//! collaborator; handlers perform the role check *before* invoking the core,
//! which stays role-agnostic.

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest, web};
use futures_util::future::{Ready, ready};

use crate::domain::Error;
use crate::domain::ports::{Caller, CallerAuthenticator};
use crate::domain::user::{Role, UserId};
use crate::inbound::http::error::ApiError;
use crate::inbound::http::state::HttpState;

/// Authenticated caller extracted from the `Authorization` header.
#[derive(Debug, Clone, Copy)]
pub struct Identity(Caller);

impl Identity {
    /// The resolved caller.
    #[must_use]
    pub fn caller(&self) -> &Caller {
        &self.0
    }

    /// The caller's user id.
    #[must_use]
    pub fn user_id(&self) -> &UserId {
        &self.0.id
    }

    /// Fail with `403 Forbidden` unless the caller holds `role`.
    pub fn require_role(&self, role: Role) -> Result<&Caller, ApiError> {
        if self.0.role == role {
            Ok(&self.0)
        } else {
            Err(Error::forbidden(format!("{role} access required")).into())
        }
    }
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(actix_web::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

fn resolve(req: &HttpRequest) -> Result<Identity, ApiError> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| ApiError::from(Error::internal("authenticator state missing")))?;
    let token =
        bearer_token(req).ok_or_else(|| ApiError::from(Error::unauthorized("Unauthorized")))?;
    state
        .auth
        .authenticate(token)
        .map(Identity)
        .ok_or_else(|| Error::unauthorized("Unauthorized").into())
}

impl FromRequest for Identity {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(resolve(req))
    }
}

/// Convenience: authenticate a raw authenticator port directly (used by the
/// WebSocket entry, which cannot rely on the response-error machinery).
pub fn authenticate_request(
    auth: &dyn CallerAuthenticator,
    req: &HttpRequest,
) -> Option<Caller> {
    bearer_token(req).and_then(|token| auth.authenticate(token))
}
