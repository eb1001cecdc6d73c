use axum::extract::FromRef;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use time::{Duration, OffsetDateTime};
use tracing::debug;

use crate::config::JwtConfig;
use crate::state::AppState;

pub use super::claims::Claims;

/// Signing and verification keys plus the configured access-token TTL.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    pub access_ttl: Duration,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        Self::new(&state.config.jwt)
    }
}

impl JwtKeys {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            access_ttl: Duration::minutes(config.ttl_minutes),
        }
    }

    /// Issues a token for `username`. Falls back to 15 minutes when no TTL is
    /// given; the login endpoint passes the configured TTL.
    pub fn sign(&self, username: &str, ttl: Option<Duration>) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let exp = now + ttl.unwrap_or_else(|| Duration::minutes(15));
        let claims = Claims {
            sub: username.to_string(),
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(username = %username, "jwt signed");
        Ok(token)
    }

    pub fn sign_access(&self, username: &str) -> anyhow::Result<String> {
        self.sign(username, Some(self.access_ttl))
    }

    /// Fails on signature mismatch, expiry, or malformed payload.
    pub fn verify(&self, token: &str) -> anyhow::Result<Claims> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())?;
        debug!(username = %data.claims.sub, "jwt verified");
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_keys(secret: &str, ttl_minutes: i64) -> JwtKeys {
        JwtKeys::new(&JwtConfig {
            secret: secret.into(),
            ttl_minutes,
        })
    }

    #[test]
    fn sign_and_verify_roundtrips_username() {
        let keys = make_keys("dev-secret", 30);
        let token = keys.sign_access("alice").expect("sign");
        let claims = keys.verify(&token).expect("verify");
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.exp - claims.iat, 30 * 60);
    }

    #[test]
    fn sign_without_ttl_defaults_to_fifteen_minutes() {
        let keys = make_keys("dev-secret", 30);
        let token = keys.sign("bob", None).expect("sign");
        let claims = keys.verify(&token).expect("verify");
        assert_eq!(claims.exp - claims.iat, 15 * 60);
    }

    #[test]
    fn verify_rejects_expired_token() {
        let keys = make_keys("dev-secret", 30);
        // Well past the decoder's default leeway.
        let token = keys.sign("carol", Some(Duration::minutes(-5))).expect("sign");
        assert!(keys.verify(&token).is_err());
    }

    #[test]
    fn verify_rejects_wrong_secret() {
        let keys = make_keys("dev-secret", 30);
        let other = make_keys("other-secret", 30);
        let token = keys.sign_access("dave").expect("sign");
        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn verify_rejects_malformed_token() {
        let keys = make_keys("dev-secret", 30);
        assert!(keys.verify("not.a.jwt").is_err());
        assert!(keys.verify("").is_err());
    }
}
