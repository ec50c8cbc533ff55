use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};
use std::convert::Infallible;

use crate::state::AppState;
use crate::upstream::TENANT_HEADER;

pub const SAML_HEADER: &str = "tazzy-saml";

/// Per-request tenant context taken from the inbound headers.
///
/// A configured fixed tenant wins over the header. Missing headers become empty
/// strings and are forwarded as-is; the upstream decides what to do with them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantContext {
    pub tenant: String,
    pub saml_key: String,
}

impl TenantContext {
    pub fn from_headers(headers: &HeaderMap, tenant_override: Option<&str>) -> Self {
        let tenant = match tenant_override {
            Some(fixed) => fixed.to_string(),
            None => header_str(headers, TENANT_HEADER),
        };
        Self {
            tenant,
            saml_key: header_str(headers, SAML_HEADER),
        }
    }
}

fn header_str(headers: &HeaderMap, name: &str) -> String {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

#[async_trait]
impl FromRequestParts<AppState> for TenantContext {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(
            &parts.headers,
            state.config.tenant_override.as_deref(),
        ))
    }
}
