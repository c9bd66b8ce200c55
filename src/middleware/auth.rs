use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use http::header::HeaderValue;
use http::Request as HttpRequest;
use http::Response as HttpResponse;
use http_body_util::combinators::UnsyncBoxBody;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use tonic::Status;
use tower::{Layer, Service};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{OrgId, UserId};

/// Claims carried by identity provider session tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default)]
    pub org_id: Option<String>,
    #[serde(default)]
    pub org_role: Option<String>,
    #[serde(default)]
    pub org_permissions: Vec<String>,
    pub exp: i64,
    #[serde(default)]
    pub iat: Option<i64>,
}

/// Verified identity injected by the auth middleware into request extensions.
/// `org_id` is `None` when the user has no active organization.
#[derive(Clone, Debug)]
pub struct Session {
    pub user_id: UserId,
    pub org_id: Option<OrgId>,
    pub role: Option<String>,
    pub permissions: Vec<String>,
}

/// Checks identity provider tokens.
#[derive(Clone)]
pub struct JwtVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    pub fn hs256(secret: &str, issuer: Option<&str>) -> Self {
        Self::with_key(DecodingKey::from_secret(secret.as_bytes()), Algorithm::HS256, issuer)
    }

    pub fn rs256(public_key_pem: &str, issuer: Option<&str>) -> AppResult<Self> {
        let key = DecodingKey::from_rsa_pem(public_key_pem.as_bytes())
            .map_err(|e| AppError::Internal(format!("Invalid JWT public key: {}", e)))?;
        Ok(Self::with_key(key, Algorithm::RS256, issuer))
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        let issuer = config.jwt_issuer.as_deref();
        match (&config.jwt_public_key, &config.jwt_secret) {
            (Some(pem), _) => Self::rs256(pem, issuer),
            (None, Some(secret)) => Ok(Self::hs256(secret, issuer)),
            (None, None) => Err(AppError::Internal(
                "AUTH_JWT_PUBLIC_KEY or AUTH_JWT_SECRET must be set".to_string(),
            )),
        }
    }

    fn with_key(key: DecodingKey, algorithm: Algorithm, issuer: Option<&str>) -> Self {
        let mut validation = Validation::new(algorithm);
        validation.validate_aud = false;
        if let Some(iss) = issuer {
            validation.set_issuer(&[iss]);
        }
        Self { key, validation }
    }

    pub fn verify(&self, token: &str) -> Result<Session, Status> {
        let claims = jsonwebtoken::decode::<Claims>(token, &self.key, &self.validation)
            .map_err(|e| {
                tracing::debug!("Rejected token: {}", e);
                Status::unauthenticated("Invalid or expired token")
            })?
            .claims;

        let user_id = UserId::parse(claims.sub)
            .map_err(|_| Status::unauthenticated("Token subject is not a user"))?;
        // A malformed organization claim is treated as no active organization.
        let org_id = claims.org_id.and_then(|org| OrgId::parse(org).ok());

        Ok(Session {
            user_id,
            org_id,
            role: claims.org_role,
            permissions: claims.org_permissions,
        })
    }
}

/// Public paths that do not require authentication
const PUBLIC_PATHS: &[&str] = &[
    "/grpc.health.v1.Health/Check",
    "/grpc.health.v1.Health/Watch",
    "/grpc.reflection.v1.ServerReflection/ServerReflectionInfo",
    "/grpc.reflection.v1alpha.ServerReflection/ServerReflectionInfo",
];

#[derive(Clone)]
pub struct AuthLayer {
    verifier: Arc<JwtVerifier>,
}

impl AuthLayer {
    pub fn new(verifier: JwtVerifier) -> Self {
        Self {
            verifier: Arc::new(verifier),
        }
    }
}

impl<S> Layer<S> for AuthLayer {
    type Service = AuthMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthMiddleware {
            inner,
            verifier: self.verifier.clone(),
        }
    }
}

#[derive(Clone)]
pub struct AuthMiddleware<S> {
    inner: S,
    verifier: Arc<JwtVerifier>,
}

type BoxBody = UnsyncBoxBody<bytes::Bytes, Status>;

fn grpc_status_response(status: Status) -> HttpResponse<BoxBody> {
    let code = status.code() as i32;

    let mut response = HttpResponse::new(UnsyncBoxBody::default());
    response
        .headers_mut()
        .insert("content-type", HeaderValue::from_static("application/grpc"));
    response
        .headers_mut()
        .insert("grpc-status", HeaderValue::from(code));
    if !status.message().is_empty() {
        if let Ok(val) = HeaderValue::from_str(status.message()) {
            response.headers_mut().insert("grpc-message", val);
        }
    }
    response
}

fn bearer_token<B>(req: &HttpRequest<B>) -> Option<&str> {
    req.headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .filter(|t| !t.is_empty())
}

impl<S, ReqBody> Service<HttpRequest<ReqBody>> for AuthMiddleware<S>
where
    S: Service<HttpRequest<ReqBody>, Response = HttpResponse<BoxBody>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Error: Send + 'static,
    ReqBody: Send + 'static,
{
    type Response = HttpResponse<BoxBody>;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: HttpRequest<ReqBody>) -> Self::Future {
        let mut inner = self.inner.clone();
        std::mem::swap(&mut self.inner, &mut inner);

        let verifier = self.verifier.clone();

        Box::pin(async move {
            if PUBLIC_PATHS.contains(&req.uri().path()) {
                return inner.call(req).await;
            }

            // No token: handlers reject the call when they look up the session.
            let session = match bearer_token(&req).map(|token| verifier.verify(token)) {
                None => None,
                Some(Ok(session)) => Some(session),
                Some(Err(status)) => {
                    tracing::warn!("Authentication failed for {}", req.uri().path());
                    return Ok(grpc_status_response(status));
                }
            };

            if let Some(session) = session {
                tracing::debug!(
                    user_id = %session.user_id,
                    org_id = ?session.org_id.as_ref().map(|o| o.as_str()),
                    "Authenticated {}",
                    req.uri().path()
                );
                req.extensions_mut().insert(session);
            }

            inner.call(req).await
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "test-secret";

    fn token(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn claims() -> Claims {
        Claims {
            sub: "user_2abcdefghijklmnopqrstuvwxyz".to_string(),
            org_id: Some("org_2abcdefghijklmnopqrstuvwxyz".to_string()),
            org_role: Some("org:admin".to_string()),
            org_permissions: vec!["org:tickets:manage".to_string()],
            exp: chrono::Utc::now().timestamp() + 3600,
            iat: Some(chrono::Utc::now().timestamp()),
        }
    }

    #[test]
    fn test_verify_valid_token() {
        let verifier = JwtVerifier::hs256(SECRET, None);
        let session = verifier.verify(&token(&claims(), SECRET)).unwrap();
        assert_eq!(session.user_id.as_str(), "user_2abcdefghijklmnopqrstuvwxyz");
        assert_eq!(
            session.org_id.as_ref().map(|o| o.as_str()),
            Some("org_2abcdefghijklmnopqrstuvwxyz")
        );
        assert_eq!(session.role.as_deref(), Some("org:admin"));
        assert_eq!(session.permissions, vec!["org:tickets:manage".to_string()]);
    }

    #[test]
    fn test_wrong_secret_is_unauthenticated() {
        let verifier = JwtVerifier::hs256(SECRET, None);
        let status = verifier.verify(&token(&claims(), "other")).unwrap_err();
        assert_eq!(status.code(), tonic::Code::Unauthenticated);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let verifier = JwtVerifier::hs256(SECRET, None);
        let expired = Claims {
            exp: chrono::Utc::now().timestamp() - 3600,
            ..claims()
        };
        assert!(verifier.verify(&token(&expired, SECRET)).is_err());
    }

    #[test]
    fn test_malformed_subject_is_rejected() {
        let verifier = JwtVerifier::hs256(SECRET, None);
        let bad = Claims {
            sub: "12345".to_string(),
            ..claims()
        };
        assert!(verifier.verify(&token(&bad, SECRET)).is_err());
    }

    #[test]
    fn test_missing_org_yields_session_without_org() {
        let verifier = JwtVerifier::hs256(SECRET, None);
        let no_org = Claims {
            org_id: None,
            ..claims()
        };
        let session = verifier.verify(&token(&no_org, SECRET)).unwrap();
        assert!(session.org_id.is_none());
    }

    #[test]
    fn test_status_response_headers() {
        let response = grpc_status_response(Status::unauthenticated("Invalid or expired token"));
        assert_eq!(response.headers()["grpc-status"], "16");
        assert_eq!(response.headers()["grpc-message"], "Invalid or expired token");
    }
}
