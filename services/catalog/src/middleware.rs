//! Authentication middleware for JWT token validation
//!
//! Tokens are issued by the identity provider. The catalog only verifies
//! them and turns the claims into the [`AuthUser`] every handler receives.

use axum::{extract::State, http::Request, middleware::Next, response::Response};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::env;
use tracing::{error, warn};
use uuid::Uuid;

use crate::{error::ApiError, models::Role, state::AppState};

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: Uuid,
    /// User roles
    #[serde(default)]
    pub roles: Vec<String>,
    /// Expiration time
    pub exp: u64,
}

/// Authenticated user information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub id: Uuid,
    pub role: Role,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        let role = if claims.roles.iter().any(|r| Role::from_name(r) == Role::Admin) {
            Role::Admin
        } else {
            Role::Partner
        };

        Self {
            id: claims.sub,
            role,
        }
    }
}

/// Key material used to verify tokens
#[derive(Debug, Clone)]
pub enum JwtConfig {
    /// RS256 public key in PEM form
    PublicKey(String),
    /// HS256 shared secret
    Secret(String),
}

impl JwtConfig {
    /// Create a new JwtConfig from environment variables
    ///
    /// `JWT_PUBLIC_KEY` (PEM, or a path to a PEM file) takes precedence over
    /// `JWT_SECRET`.
    pub fn from_env() -> Result<Self, String> {
        if let Ok(public_key) = env::var("JWT_PUBLIC_KEY") {
            return Self::public_key(&public_key).map(JwtConfig::PublicKey);
        }

        env::var("JWT_SECRET")
            .map(JwtConfig::Secret)
            .map_err(|_| "neither JWT_PUBLIC_KEY nor JWT_SECRET is set".to_string())
    }

    // If the public key looks like a file path, read from file (try CWD, then project root)
    fn public_key(value: &str) -> Result<String, String> {
        if value.starts_with("-----BEGIN") {
            return Ok(value.to_string());
        }

        std::fs::read_to_string(value)
            .or_else(|_| {
                let mut path = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
                path.push(value);
                std::fs::read_to_string(path)
            })
            .map(|pem| pem.trim().to_string())
            .map_err(|e| format!("Failed to read public key file: {}", e))
    }
}

/// Verifies bearer tokens against the configured key
#[derive(Clone)]
pub struct JwtVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    pub fn new(config: &JwtConfig) -> Result<Self, jsonwebtoken::errors::Error> {
        let (decoding_key, algorithm) = match config {
            JwtConfig::PublicKey(pem) => {
                (DecodingKey::from_rsa_pem(pem.as_bytes())?, Algorithm::RS256)
            }
            JwtConfig::Secret(secret) => {
                (DecodingKey::from_secret(secret.as_bytes()), Algorithm::HS256)
            }
        };

        let mut validation = Validation::new(algorithm);
        validation.validate_exp = true;

        Ok(Self {
            decoding_key,
            validation,
        })
    }

    pub fn verify(&self, token: &str) -> Result<AuthUser, jsonwebtoken::errors::Error> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims.into())
    }
}

/// Authentication middleware
pub async fn auth_middleware(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let TypedHeader(Authorization(bearer)) = bearer.ok_or(ApiError::Unauthorized)?;

    let user = state.jwt.verify(bearer.token()).map_err(|e| {
        warn!("Rejected bearer token: {}", e);
        ApiError::Unauthorized
    })?;

    // Insert the user into the request extensions
    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

/// Build the verifier from the environment, logging the failure reason
pub fn verifier_from_env() -> anyhow::Result<JwtVerifier> {
    let config = JwtConfig::from_env().map_err(|e| {
        error!("Failed to load JWT config: {}", e);
        anyhow::anyhow!(e)
    })?;

    Ok(JwtVerifier::new(&config)?)
}
