//! Request middleware — bearer-token authentication.
//!
//! Protected routers layer [`auth_middleware`] on top; handlers then pull the
//! verified [`AuthContext`] out of request extensions.

use axum::{extract::Request, http::header::AUTHORIZATION, middleware::Next, response::Response};
use pawtrack_common::error::PawtrackError;
use pawtrack_common::models::user::UserRole;
use uuid::Uuid;

use crate::auth;

/// Identity of the authenticated caller, extracted from a verified access token.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: Uuid,
    pub email: String,
    pub role: UserRole,
}

impl AuthContext {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Admin-only gate.
    pub fn require_admin(&self) -> Result<(), PawtrackError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(PawtrackError::Forbidden)
        }
    }

    /// Owner-or-admin gate for a resource belonging to `owner_id`.
    pub fn require_access(&self, owner_id: Uuid) -> Result<(), PawtrackError> {
        if self.is_admin() || self.user_id == owner_id {
            Ok(())
        } else {
            Err(PawtrackError::Forbidden)
        }
    }
}

/// Verify the `Authorization: Bearer` access token and stash an
/// [`AuthContext`] in request extensions.
pub async fn auth_middleware(mut req: Request, next: Next) -> Result<Response, PawtrackError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(PawtrackError::Unauthorized)?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or(PawtrackError::Unauthorized)?;

    let secret = &pawtrack_common::config::get().auth.jwt_secret;
    let claims = auth::validate_token(token, secret).map_err(map_token_error)?;

    // Refresh tokens cannot be used to call the API directly
    if claims.token_type != "access" {
        return Err(PawtrackError::InvalidToken);
    }

    let user_id = Uuid::parse_str(&claims.sub).map_err(|_| PawtrackError::InvalidToken)?;

    req.extensions_mut().insert(AuthContext {
        user_id,
        email: claims.email,
        role: claims.role,
    });

    Ok(next.run(req).await)
}

/// Map JWT validation failures to API errors.
pub fn map_token_error(e: jsonwebtoken::errors::Error) -> PawtrackError {
    match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => PawtrackError::TokenExpired,
        _ => PawtrackError::InvalidToken,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(role: UserRole) -> AuthContext {
        AuthContext {
            user_id: Uuid::now_v7(),
            email: "pat@example.com".into(),
            role,
        }
    }

    #[test]
    fn test_require_admin() {
        assert!(ctx(UserRole::Admin).require_admin().is_ok());
        assert!(matches!(
            ctx(UserRole::User).require_admin(),
            Err(PawtrackError::Forbidden)
        ));
    }

    #[test]
    fn test_require_access_owner_or_admin() {
        let user = ctx(UserRole::User);
        assert!(user.require_access(user.user_id).is_ok());
        assert!(matches!(
            user.require_access(Uuid::now_v7()),
            Err(PawtrackError::Forbidden)
        ));

        // Admin can touch anyone's resource
        assert!(ctx(UserRole::Admin).require_access(Uuid::now_v7()).is_ok());
    }
}
