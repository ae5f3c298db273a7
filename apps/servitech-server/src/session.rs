//! Session middleware
//!
//! Requests carry a Supabase access token either as a bearer token or in
//! the `sb-access-token` cookie. Valid tokens become a [`SessionUser`]
//! request extension; missing or invalid ones get a 401 problem on `/api/*`
//! and a redirect to the login page everywhere else.

use crate::config::{AuthConfig, ConfigError};
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use service_desk::{Problem, SessionUser};
use std::sync::Arc;
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "sb-access-token";

const PUBLIC_PATHS: &[&str] = &["/health", "/login", "/register"];
const PUBLIC_PREFIXES: &[&str] = &["/api-docs/"];

#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
    #[serde(default)]
    email: Option<String>,
}

/// Verifies access tokens and decides what unauthenticated requests get
pub struct SessionVerifier {
    enabled: bool,
    key: Option<DecodingKey>,
    validation: Validation,
    login_path: String,
}

impl SessionVerifier {
    pub fn new(config: &AuthConfig) -> Result<Self, ConfigError> {
        let key = config
            .jwt_secret
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| DecodingKey::from_secret(s.as_bytes()));
        if config.enabled && key.is_none() {
            return Err(ConfigError::MissingJwtSecret);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[config.audience.as_str()]);
        validation.set_required_spec_claims(&["exp", "sub", "aud"]);

        Ok(Self {
            enabled: config.enabled,
            key,
            validation,
            login_path: config.login_path.clone(),
        })
    }

    /// Decode and validate a token
    pub fn verify(&self, token: &str) -> anyhow::Result<SessionUser> {
        let key = self
            .key
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("no JWT secret configured"))?;
        let data = decode::<Claims>(token, key, &self.validation)?;
        let user_id = Uuid::parse_str(&data.claims.sub)
            .map_err(|_| anyhow::anyhow!("subject '{}' is not a user id", data.claims.sub))?;

        Ok(SessionUser {
            user_id,
            email: data.claims.email,
        })
    }

    fn reject(&self, request: &Request) -> Response {
        let uri = request.uri();
        if uri.path() == "/api" || uri.path().starts_with("/api/") {
            return Problem::new(StatusCode::UNAUTHORIZED, "Unauthorized")
                .with_detail("A valid session is required")
                .with_instance(uri.path())
                .into_response();
        }

        let next = uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or_else(|| uri.path());
        Redirect::to(&format!("{}?next={}", self.login_path, urlencoding::encode(next)))
            .into_response()
    }

    fn is_public(&self, path: &str) -> bool {
        path == self.login_path
            || PUBLIC_PATHS.contains(&path)
            || PUBLIC_PREFIXES.iter().any(|p| path.starts_with(p))
    }
}

/// Bearer token first, then the session cookie
pub fn access_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());
    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| {
            urlencoding::decode(value)
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| value.to_string())
        })
        .filter(|t| !t.is_empty())
}

/// `axum::middleware::from_fn_with_state` entry point
pub async fn require_session(
    State(verifier): State<Arc<SessionVerifier>>,
    mut request: Request,
    next: Next,
) -> Response {
    if !verifier.enabled || verifier.is_public(request.uri().path()) {
        return next.run(request).await;
    }

    let Some(token) = access_token(request.headers()) else {
        return verifier.reject(&request);
    };

    match verifier.verify(&token) {
        Ok(user) => {
            tracing::debug!(user_id = %user.user_id, "Session verified");
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => {
            tracing::debug!(error = %e, path = %request.uri().path(), "Rejected session token");
            verifier.reject(&request)
        }
    }
}
