//! Anti-forgery tokens for the "Add Cafe" form.
//!
//! Each browser gets a random nonce in the `cafe_csrf` cookie. The form carries
//! `sha256(secret ":" nonce)` in a hidden `csrf_token` input, so a POST is only
//! accepted from a page this server rendered for the same browser.

use actix_web::cookie::{Cookie, SameSite};
use actix_web::HttpRequest;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use uuid::Uuid;

pub const CSRF_COOKIE: &str = "cafe_csrf";
pub const CSRF_FIELD: &str = "csrf_token";

pub const MISSING_TOKEN: &str = "The CSRF token is missing.";
pub const INVALID_TOKEN: &str = "The CSRF token is invalid.";

#[derive(Debug, Clone)]
pub struct CsrfGuard {
    secret: String,
    enabled: bool,
}

/// What a rendered form needs: the hidden token, plus the cookie to set when
/// the browser did not have a nonce yet.
pub struct CsrfTicket {
    pub token: Option<String>,
    pub cookie: Option<Cookie<'static>>,
}

impl CsrfGuard {
    pub fn new(secret: impl Into<String>, enabled: bool) -> Self {
        Self {
            secret: secret.into(),
            enabled,
        }
    }

    pub fn token_for(&self, nonce: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.secret.as_bytes());
        hasher.update(b":");
        hasher.update(nonce.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Token for the form about to be rendered. Reuses the browser's nonce so
    /// several open tabs stay valid.
    pub fn issue(&self, req: &HttpRequest) -> CsrfTicket {
        if !self.enabled {
            return CsrfTicket {
                token: None,
                cookie: None,
            };
        }

        match request_nonce(req) {
            Some(nonce) => CsrfTicket {
                token: Some(self.token_for(&nonce)),
                cookie: None,
            },
            None => {
                let nonce = Uuid::new_v4().to_string();
                CsrfTicket {
                    token: Some(self.token_for(&nonce)),
                    cookie: Some(nonce_cookie(nonce)),
                }
            }
        }
    }

    /// Checks a submitted token against the request's nonce cookie.
    pub fn verify(&self, req: &HttpRequest, token: Option<&str>) -> Result<(), &'static str> {
        if !self.enabled {
            return Ok(());
        }

        let (nonce, token) = match (request_nonce(req), token.filter(|t| !t.is_empty())) {
            (Some(nonce), Some(token)) => (nonce, token),
            _ => return Err(MISSING_TOKEN),
        };

        let expected = self.token_for(&nonce);
        if bool::from(token.as_bytes().ct_eq(expected.as_bytes())) {
            Ok(())
        } else {
            Err(INVALID_TOKEN)
        }
    }
}

fn request_nonce(req: &HttpRequest) -> Option<String> {
    req.cookie(CSRF_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|nonce| !nonce.is_empty())
}

fn nonce_cookie(nonce: String) -> Cookie<'static> {
    Cookie::build(CSRF_COOKIE, nonce)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish()
}
