#![allow(dead_code)]

use axum::{body::Body, Router};
use chrono::Utc;
use http::{Request, Response};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use servitech_server::config::AuthConfig;
use tower::ServiceExt;
use uuid::Uuid;

pub const SECRET: &str = "super-secret-jwt-token-with-at-least-32-characters";

pub fn print_test_header(name: &str, stages: &[&str]) {
    println!("\n🧪 {}", name);
    for (i, stage) in stages.iter().enumerate() {
        println!("📝 Stage {}: {}", i + 1, stage);
    }
}

pub fn auth_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: Some(SECRET.to_string()),
        ..Default::default()
    }
}

/// HS256 token as issued by Supabase Auth
pub fn token(sub: &str, aud: &str, expires_in_secs: i64) -> String {
    let claims = json!({
        "sub": sub,
        "aud": aud,
        "email": "tecnico@servitech.ec",
        "role": "authenticated",
        "exp": Utc::now().timestamp() + expires_in_secs,
    });
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

pub fn valid_token(user_id: Uuid) -> String {
    token(&user_id.to_string(), "authenticated", 3600)
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap_or(Value::Null)
}
