//! Per-browser state kept in cookies: the nonce behind the analyze form's CSRF
//! token, and the flash message shown once after a rejected submission.
use crate::Flash;
use hmac::{digest::Key, Hmac, Mac};
use http::{
    header::{self, InvalidHeaderValue},
    HeaderMap, HeaderValue,
};
use rand::RngCore;
use sha2::Sha256;

pub const CSRF_COOKIE: &str = "spoofy_csrf";
pub const FLASH_COOKIE: &str = "spoofy_flash";
const NONCE_LEN: usize = 16;

lazy_static::lazy_static! {
    static ref CSRF_KEY: CsrfKey = CsrfKey::from_env();
}

/// Key shared by every request. Read from `SECRET_KEY`, otherwise random for
/// the life of the process.
pub fn csrf_key() -> &'static CsrfKey {
    &CSRF_KEY
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CsrfError {
    #[error("CSRF cookie is missing")]
    MissingCookie,
    #[error("CSRF token is missing")]
    MissingToken,
    #[error("CSRF token does not match")]
    Mismatch,
}

/// Signs cookie nonces. The form carries the signature, so a cross-site post
/// can't produce a token matching the browser's cookie.
#[derive(Clone)]
pub struct CsrfKey(Hmac<Sha256>);

impl CsrfKey {
    pub fn new(secret: &[u8]) -> Result<Self, hmac::digest::InvalidLength> {
        Hmac::<Sha256>::new_from_slice(secret).map(Self)
    }

    pub fn random() -> Self {
        let mut key = Key::<Hmac<Sha256>>::default();
        rand::thread_rng().fill_bytes(key.as_mut_slice());
        Self(Hmac::new(&key))
    }

    fn from_env() -> Self {
        match std::env::var("SECRET_KEY") {
            Ok(secret) if !secret.is_empty() => Self::new(secret.as_bytes()).unwrap_or_else(|err| {
                log::warn!("Unusable SECRET_KEY ({}), using a random key", err);
                Self::random()
            }),
            _ => {
                log::info!("SECRET_KEY is not set, using a random key");
                Self::random()
            }
        }
    }

    pub fn token(&self, nonce: &str) -> String {
        let mut mac = self.0.clone();
        mac.update(nonce.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    pub fn verify(&self, nonce: &str, token: &str) -> bool {
        let Ok(token) = hex::decode(token) else {
            return false;
        };
        let mut mac = self.0.clone();
        mac.update(nonce.as_bytes());
        mac.verify_slice(&token).is_ok()
    }

    /// Checks the submitted `token` against the nonce cookie in `headers`.
    pub fn check(&self, headers: &HeaderMap, token: Option<&str>) -> Result<(), CsrfError> {
        let nonce = csrf_nonce(headers).ok_or(CsrfError::MissingCookie)?;
        let token = token.filter(|token| !token.is_empty()).ok_or(CsrfError::MissingToken)?;
        if self.verify(nonce, token) {
            Ok(())
        } else {
            Err(CsrfError::Mismatch)
        }
    }
}

impl std::fmt::Debug for CsrfKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("CsrfKey(..)")
    }
}

pub fn new_nonce() -> String {
    let mut nonce = [0u8; NONCE_LEN];
    rand::thread_rng().fill_bytes(&mut nonce);
    hex::encode(nonce)
}

/// Value of the cookie `name`, if the request sent one.
pub fn cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}

pub fn csrf_nonce(headers: &HeaderMap) -> Option<&str> {
    cookie(headers, CSRF_COOKIE)
        .filter(|nonce| nonce.len() == NONCE_LEN * 2 && nonce.bytes().all(|b| b.is_ascii_hexdigit()))
}

pub fn flash(headers: &HeaderMap) -> Option<Flash> {
    cookie(headers, FLASH_COOKIE).and_then(|flash| flash.parse().ok())
}

pub fn set_cookie(name: &str, value: &str) -> Result<HeaderValue, InvalidHeaderValue> {
    HeaderValue::try_from(format!("{name}={value}; Path=/; HttpOnly; SameSite=Lax"))
}

pub fn clear_cookie(name: &str) -> Result<HeaderValue, InvalidHeaderValue> {
    HeaderValue::try_from(format!("{name}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    #[test]
    fn token_matches_only_its_nonce() {
        let key = CsrfKey::new(b"secret").unwrap();
        let nonce = new_nonce();
        let token = key.token(&nonce);
        assert!(key.verify(&nonce, &token));
        assert!(!key.verify(&new_nonce(), &token));
        assert!(!key.verify(&nonce, "not hex"));
        assert!(!CsrfKey::new(b"other").unwrap().verify(&nonce, &token));
        assert!(!CsrfKey::random().verify(&nonce, &token));
    }

    #[test]
    fn reads_cookies() {
        let headers = headers("theme=dark; spoofy_flash=invalid_domain;spoofy_csrf=abc");
        assert_eq!(cookie(&headers, "theme"), Some("dark"));
        assert_eq!(cookie(&headers, "missing"), None);
        assert_eq!(flash(&headers), Some(Flash::InvalidDomain));
        // too short to be a nonce
        assert_eq!(csrf_nonce(&headers), None);
        assert_eq!(flash(&self::headers("spoofy_flash=bogus")), None);
    }

    #[test]
    fn check_reports_what_is_missing() {
        let key = CsrfKey::new(b"secret").unwrap();
        let nonce = new_nonce();
        let token = key.token(&nonce);
        let headers = headers(&format!("{CSRF_COOKIE}={nonce}"));
        assert_eq!(key.check(&headers, Some(&token)), Ok(()));
        assert_eq!(key.check(&headers, None), Err(CsrfError::MissingToken));
        assert_eq!(key.check(&headers, Some("")), Err(CsrfError::MissingToken));
        assert_eq!(key.check(&headers, Some(&key.token("x"))), Err(CsrfError::Mismatch));
        assert_eq!(key.check(&HeaderMap::new(), Some(&token)), Err(CsrfError::MissingCookie));
    }

    #[test]
    fn cookie_attributes() {
        let value = set_cookie(FLASH_COOKIE, Flash::InvalidDomain.as_str()).unwrap();
        assert_eq!(value, "spoofy_flash=invalid_domain; Path=/; HttpOnly; SameSite=Lax");
        let value = clear_cookie(FLASH_COOKIE).unwrap();
        assert!(value.to_str().unwrap().ends_with("Max-Age=0"));
        assert!(set_cookie(CSRF_COOKIE, "line\nbreak").is_err());
    }
}
