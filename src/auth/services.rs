use lazy_static::lazy_static;
use regex::Regex;
use sqlx::PgPool;
use tracing::warn;

use crate::auth::password::verify_password;
use crate::auth::repo::User;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Checks username/password against the directory. Unknown user, wrong
/// password, and inactive account all collapse into `None` so the login
/// response cannot leak which one failed.
pub async fn authenticate(
    db: &PgPool,
    username: &str,
    password: &str,
) -> anyhow::Result<Option<User>> {
    let Some(user) = User::find_by_username(db, username).await? else {
        return Ok(None);
    };
    if !verify_password(password, &user.password_hash)? {
        warn!(username = %username, "password mismatch");
        return Ok(None);
    }
    if !user.is_active {
        warn!(username = %username, "login attempt for inactive account");
        return Ok(None);
    }
    Ok(Some(user))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("user.name+tag@example.org"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("missing@domain"));
        assert!(!is_valid_email("spaces in@host.com"));
        assert!(!is_valid_email("@host.com"));
    }
}
