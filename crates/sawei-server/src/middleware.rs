use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use sawei_core::Environment;
use serde::Serialize;
use subtle::ConstantTimeEq;
use uuid::Uuid;

/// Newtype wrapping a request ID string, stored as a request extension.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Bearer tokens accepted on admin routes.
#[derive(Debug, Clone)]
pub struct AuthState {
    tokens: Arc<Vec<String>>,
    pub enabled: bool,
}

impl AuthState {
    /// Builds auth settings from the configured admin tokens.
    ///
    /// In development an empty token list disables auth; anywhere else it
    /// fails startup.
    pub fn from_tokens(tokens: &[String], env: Environment) -> anyhow::Result<Self> {
        let tokens: Vec<String> = tokens
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(ToOwned::to_owned)
            .collect();

        if tokens.is_empty() {
            if env == Environment::Development {
                tracing::warn!(
                    "SAWEI_ADMIN_TOKENS not set; admin routes unauthenticated in development"
                );
                return Ok(Self {
                    tokens: Arc::new(Vec::new()),
                    enabled: false,
                });
            }

            anyhow::bail!("SAWEI_ADMIN_TOKENS is required outside development");
        }

        Ok(Self {
            tokens: Arc::new(tokens),
            enabled: true,
        })
    }

    fn allows(&self, candidate: &str) -> bool {
        self.tokens.iter().fold(false, |matched, token| {
            matched | bool::from(token.as_bytes().ct_eq(candidate.as_bytes()))
        })
    }
}

#[derive(Debug, Serialize)]
struct MiddlewareErrorBody {
    error: MiddlewareError,
}

#[derive(Debug, Serialize)]
struct MiddlewareError {
    code: &'static str,
    message: &'static str,
}

/// Axum middleware that extracts or generates a request ID.
///
/// An incoming `x-request-id` header is reused; otherwise a `UUIDv4` is
/// generated. The ID goes into request extensions as [`RequestId`] and back
/// out on the response header.
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map_or_else(|| Uuid::new_v4().to_string(), String::from);

    req.extensions_mut().insert(RequestId(id.clone()));

    let mut res = next.run(req).await;

    if let Ok(val) = HeaderValue::from_str(&id) {
        res.headers_mut().insert("x-request-id", val);
    }

    res
}

/// Middleware enforcing Bearer token auth when enabled.
pub async fn require_bearer_auth(
    State(auth): State<AuthState>,
    req: Request,
    next: Next,
) -> Response {
    if !auth.enabled {
        return next.run(req).await;
    }

    match extract_bearer_token(req.headers().get(AUTHORIZATION)) {
        Some(token) if auth.allows(token) => next.run(req).await,
        _ => {
            tracing::warn!(path = %req.uri().path(), "rejected admin request");
            (
                StatusCode::UNAUTHORIZED,
                Json(MiddlewareErrorBody {
                    error: MiddlewareError {
                        code: "unauthorized",
                        message: "missing or invalid bearer token",
                    },
                }),
            )
                .into_response()
        }
    }
}

fn extract_bearer_token(value: Option<&HeaderValue>) -> Option<&str> {
    value
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .filter(|s| !s.trim().is_empty())
}
