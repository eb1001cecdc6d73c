use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// User record in the database. Accounts are never deleted in current scope.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub daily_calorie_goal: Option<i32>,
    pub is_active: bool,
    pub created_at: OffsetDateTime,
}

const USER_COLUMNS: &str =
    "id, username, email, password_hash, daily_calorie_goal, is_active, created_at";

impl User {
    pub async fn find_by_username(db: &PgPool, username: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<User>> {
        let user =
            sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
                .bind(id)
                .fetch_optional(db)
                .await?;
        Ok(user)
    }

    /// Inserts a new active user. Uniqueness of username/email is ultimately
    /// enforced by the unique indexes; callers map that violation to Conflict.
    pub async fn create(
        db: &PgPool,
        username: &str,
        email: Option<&str>,
        password_hash: &str,
        daily_calorie_goal: Option<i32>,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (username, email, password_hash, daily_calorie_goal, is_active)
            VALUES ($1, $2, $3, $4, TRUE)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .bind(daily_calorie_goal)
        .fetch_one(db)
        .await
    }
}
