use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::repo::User;

/// Request body for user registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: Option<String>,
    pub password: String,
    #[serde(default = "default_goal")]
    pub daily_calorie_goal: Option<i32>,
}

fn default_goal() -> Option<i32> {
    Some(2000)
}

/// Form body for the OAuth2-style token endpoint.
#[derive(Debug, Deserialize)]
pub struct TokenForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// Public part of the user returned to clients; never carries the hash.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub username: String,
    pub email: Option<String>,
    pub daily_calorie_goal: Option<i32>,
    pub is_active: bool,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
            daily_calorie_goal: u.daily_calorie_goal,
            is_active: u.is_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_goal_defaults_to_2000_when_missing() {
        let req: RegisterRequest =
            serde_json::from_str(r#"{"username":"a","password":"secret1"}"#).unwrap();
        assert_eq!(req.daily_calorie_goal, Some(2000));
    }

    #[test]
    fn register_goal_can_be_explicitly_null() {
        let req: RegisterRequest =
            serde_json::from_str(r#"{"username":"a","password":"secret1","daily_calorie_goal":null}"#)
                .unwrap();
        assert_eq!(req.daily_calorie_goal, None);
    }

    #[test]
    fn public_user_serialization_excludes_hash() {
        let user = User {
            id: Uuid::new_v4(),
            username: "alice".into(),
            email: Some("alice@example.com".into()),
            password_hash: "argon2-secret".into(),
            daily_calorie_goal: Some(1800),
            is_active: true,
            created_at: time::OffsetDateTime::now_utc(),
        };
        let json = serde_json::to_string(&PublicUser::from(user)).unwrap();
        assert!(json.contains("alice"));
        assert!(!json.contains("argon2-secret"));
    }
}
