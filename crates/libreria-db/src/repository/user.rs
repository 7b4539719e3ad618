//! # User Repository
//!
//! Plain CRUD over application users. Sales reference users through a
//! nullable foreign key with ON DELETE SET NULL, so removing a user never
//! fails on referential grounds - their sales simply lose the owner.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use libreria_core::validation::validate_new_user;
use libreria_core::{NewUser, User};

/// Repository for user database operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

const USER_COLUMNS: &str = "id, name, email, created_at";

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Inserts a new user after validating name and email.
    pub async fn insert(&self, user: &NewUser) -> DbResult<User> {
        validate_new_user(user)?;

        debug!(name = %user.name, "inserting user");

        let result = sqlx::query(
            "INSERT INTO users (name, email, created_at) VALUES (?1, ?2, ?3)",
        )
        .bind(user.name.trim())
        .bind(user.email.trim())
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("User", id))
    }

    /// Returns all users in insertion (id) order.
    pub async fn list(&self) -> DbResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Gets a user by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Deletes a user by id. Returns `false` when the id does not exist.
    /// Sales owned by the user keep existing with a NULL owner.
    pub async fn delete(&self, id: i64) -> DbResult<bool> {
        debug!(id, "deleting user");

        let result = sqlx::query("DELETE FROM users WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
