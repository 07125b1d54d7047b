//! API version negotiation through the `x-api-version` header

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request},
    http::{HeaderValue, request::Parts},
    middleware::Next,
    response::Response,
};

use super::error::ApiError;

/// Request header carrying the requested version
pub const API_VERSION_HEADER: &str = "x-api-version";

/// Response header listing the versions this API serves
pub const SUPPORTED_VERSIONS_HEADER: &str = "api-supported-versions";

pub const DEFAULT_API_VERSION: ApiVersion = ApiVersion { major: 1, minor: 0 };

const SUPPORTED: &[ApiVersion] = &[DEFAULT_API_VERSION];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ApiVersion {
    pub major: u32,
    pub minor: u32,
}

impl ApiVersion {
    /// Parse `"1"` or `"1.0"` style versions
    pub fn parse(raw: &str) -> Option<Self> {
        let mut parts = raw.trim().splitn(2, '.');
        let major = parts.next()?.parse().ok()?;
        let minor = match parts.next() {
            Some(m) => m.parse().ok()?,
            None => 0,
        };
        Some(Self { major, minor })
    }

    pub fn supported_header_value() -> HeaderValue {
        let listed: Vec<String> = SUPPORTED.iter().map(ToString::to_string).collect();
        HeaderValue::from_str(&listed.join(", ")).unwrap_or(HeaderValue::from_static("1.0"))
    }
}

impl std::fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Resolves the requested version; an absent or empty header means the default.
#[async_trait]
impl<S> FromRequestParts<S> for ApiVersion
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(API_VERSION_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|s| !s.is_empty());

        let Some(raw) = raw else {
            return Ok(DEFAULT_API_VERSION);
        };

        match ApiVersion::parse(raw) {
            Some(version) if SUPPORTED.contains(&version) => Ok(version),
            _ => {
                tracing::warn!(requested = raw, "Unsupported API version requested");
                Err(ApiError::UnsupportedApiVersion(raw.to_string()))
            }
        }
    }
}

/// Rejects requests for versions this API does not serve
pub async fn require_api_version(_version: ApiVersion, request: Request, next: Next) -> Response {
    next.run(request).await
}
