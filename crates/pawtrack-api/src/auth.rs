//! Authentication — Argon2id password hashing and JWT token pairs.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use pawtrack_common::models::user::UserRole;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims embedded in access and refresh tokens.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Login email
    pub email: String,
    /// Role at issue time
    pub role: UserRole,
    /// Issued at
    pub iat: i64,
    /// Expiration
    pub exp: i64,
    /// Token type ("access" or "refresh")
    pub token_type: String,
}

/// Token pair returned on register/login/refresh.
#[derive(Debug, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: u64,
    pub token_type: String,
}

/// Hash a password using Argon2id.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2.hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a password against an Argon2id hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(hash)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

fn generate_token(
    user_id: Uuid,
    email: &str,
    role: UserRole,
    secret: &str,
    ttl_secs: u64,
    token_type: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        role,
        iat: now.timestamp(),
        exp: (now + Duration::seconds(ttl_secs as i64)).timestamp(),
        token_type: token_type.to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Generate both access and refresh tokens.
pub fn generate_token_pair(
    user_id: Uuid,
    email: &str,
    role: UserRole,
    secret: &str,
    access_ttl: u64,
    refresh_ttl: u64,
) -> Result<TokenPair, jsonwebtoken::errors::Error> {
    Ok(TokenPair {
        access_token: generate_token(user_id, email, role, secret, access_ttl, "access")?,
        refresh_token: generate_token(user_id, email, role, secret, refresh_ttl, "refresh")?,
        expires_in: access_ttl,
        token_type: "Bearer".to_string(),
    })
}

/// Validate and decode a JWT token.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_password() {
        let hash = hash_password("correct horse battery staple").unwrap();
        assert!(verify_password("correct horse battery staple", &hash).unwrap());
        assert!(!verify_password("wrong password", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let h1 = hash_password("same password").unwrap();
        let h2 = hash_password("same password").unwrap();
        assert_ne!(h1, h2);
    }

    #[test]
    fn test_token_pair_round_trip() {
        let user_id = Uuid::now_v7();
        let pair = generate_token_pair(user_id, "pat@example.com", UserRole::User, "test-secret", 900, 3600)
            .unwrap();

        let access = validate_token(&pair.access_token, "test-secret").unwrap();
        assert_eq!(access.sub, user_id.to_string());
        assert_eq!(access.email, "pat@example.com");
        assert_eq!(access.token_type, "access");

        let refresh = validate_token(&pair.refresh_token, "test-secret").unwrap();
        assert_eq!(refresh.token_type, "refresh");
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let pair = generate_token_pair(Uuid::now_v7(), "pat@example.com", UserRole::User, "secret-a", 900, 3600)
            .unwrap();
        assert!(validate_token(&pair.access_token, "secret-b").is_err());
    }
}
