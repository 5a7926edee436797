//! Per-request auth context.
//!
//! The gateway issues a JWT access token at login; this server stores it in
//! an HTTP-only cookie and hands it to the gateway on every call. There is no
//! shared auth state: each request re-reads the cookie, and teardown is just
//! clearing it (at logout, or when the gateway answers 401).
//!
//! The token payload is decoded for display only. Verification is the
//! gateway's job; a forged token buys nothing here because every data call is
//! re-checked upstream.

use axum::http::HeaderMap;
use axum::http::header;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;

/// Cookie carrying the gateway access token.
pub const TOKEN_COOKIE: &str = "access_token";

/// Claims we read out of the access token's payload.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct UserClaims {
    pub sub: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub exp: i64,
}

/// The signed-in operator, as far as this request is concerned.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub token: String,
    pub claims: Option<UserClaims>,
}

impl AuthContext {
    /// Build the context from request headers. `None` means no token cookie;
    /// the caller redirects to login.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let token = token_from_headers(headers)?;
        let claims = decode_claims(&token);
        Some(Self { token, claims })
    }

    /// Display name for the header bar.
    pub fn display_name(&self) -> &str {
        match &self.claims {
            Some(c) if !c.full_name.is_empty() => &c.full_name,
            Some(c) if !c.email.is_empty() => &c.email,
            _ => "Operator",
        }
    }
}

/// Extract the access token from the request's cookies.
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    for pair in cookies.split(';') {
        let pair = pair.trim();
        if let Some(value) = pair.strip_prefix(concat_cookie_prefix().as_str()) {
            if !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }
    None
}

fn concat_cookie_prefix() -> String {
    format!("{TOKEN_COOKIE}=")
}

/// Decode the claims from a JWT's payload segment without verifying it.
pub fn decode_claims(token: &str) -> Option<UserClaims> {
    let mut segments = token.split('.');
    let _header = segments.next()?;
    let payload = segments.next()?;

    let bytes = URL_SAFE_NO_PAD.decode(payload).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// `Set-Cookie` value installing the token after login.
pub fn login_cookie(token: &str) -> String {
    format!("{TOKEN_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax")
}

/// `Set-Cookie` value tearing the token down.
pub fn logout_cookie() -> String {
    format!("{TOKEN_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    /// Build an unsigned JWT with the given payload JSON.
    fn fake_jwt(payload: &serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(serde_json::to_vec(payload).unwrap());
        format!("{header}.{body}.signature")
    }

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn decodes_claims_from_payload() {
        let token = fake_jwt(&serde_json::json!({
            "sub": "u-1",
            "full_name": "An Tran",
            "email": "an@example.com",
            "exp": 1700000000
        }));

        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.sub, "u-1");
        assert_eq!(claims.full_name, "An Tran");
        assert_eq!(claims.email, "an@example.com");
    }

    #[test]
    fn garbage_tokens_yield_no_claims() {
        assert!(decode_claims("not-a-jwt").is_none());
        assert!(decode_claims("a.b.c").is_none());
        assert!(decode_claims("").is_none());
    }

    #[test]
    fn token_extracted_from_cookie_header() {
        let headers = headers_with_cookie("theme=dark; access_token=tok123; lang=vi");
        assert_eq!(token_from_headers(&headers).as_deref(), Some("tok123"));
    }

    #[test]
    fn missing_or_empty_cookie_is_none() {
        assert!(token_from_headers(&HeaderMap::new()).is_none());

        let headers = headers_with_cookie("theme=dark");
        assert!(token_from_headers(&headers).is_none());

        let headers = headers_with_cookie("access_token=");
        assert!(token_from_headers(&headers).is_none());
    }

    #[test]
    fn context_prefers_full_name_then_email() {
        let token = fake_jwt(&serde_json::json!({"sub": "u", "full_name": "An", "email": "e"}));
        let headers = headers_with_cookie(&format!("access_token={token}"));
        let ctx = AuthContext::from_headers(&headers).unwrap();
        assert_eq!(ctx.display_name(), "An");

        let token = fake_jwt(&serde_json::json!({"sub": "u", "email": "e@x.com"}));
        let headers = headers_with_cookie(&format!("access_token={token}"));
        let ctx = AuthContext::from_headers(&headers).unwrap();
        assert_eq!(ctx.display_name(), "e@x.com");
    }

    #[test]
    fn undecodable_token_still_yields_context() {
        // The gateway may issue token formats we cannot decode; the token is
        // still forwarded, only the display name falls back.
        let headers = headers_with_cookie("access_token=opaque-token");
        let ctx = AuthContext::from_headers(&headers).unwrap();
        assert_eq!(ctx.token, "opaque-token");
        assert!(ctx.claims.is_none());
        assert_eq!(ctx.display_name(), "Operator");
    }

    #[test]
    fn cookie_values() {
        assert_eq!(
            login_cookie("tok"),
            "access_token=tok; Path=/; HttpOnly; SameSite=Lax"
        );
        assert!(logout_cookie().contains("Max-Age=0"));
    }
}
