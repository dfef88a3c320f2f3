//! Local account registry and the persisted sign-in session.
//!
//! Passwords are stored and compared verbatim. This registry only separates
//! one person's calendar from another's on a shared device; it is not a
//! security boundary.

use rusqlite::{params, OptionalExtension, Row};
use uuid::Uuid;

use crate::error::AuthError;
use crate::models::user::{AuthStatus, User};
use crate::services::database::Database;

pub struct AuthService<'a> {
    db: &'a Database,
}

impl<'a> AuthService<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Register a new account and sign it in.
    pub fn sign_up(
        &self,
        email: &str,
        password: &str,
        name: Option<&str>,
    ) -> Result<User, AuthError> {
        let email = normalize_email(email)?;
        if password.is_empty() {
            return Err(AuthError::InvalidInput("Password cannot be empty".to_string()));
        }

        let conn = self.db.connection();
        let taken: i64 = conn.query_row(
            "SELECT COUNT(*) FROM users WHERE email = ?1",
            [&email],
            |row| row.get(0),
        )?;
        if taken > 0 {
            return Err(AuthError::EmailTaken);
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            email,
            name: name
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string),
        };
        conn.execute(
            "INSERT INTO users (id, email, password, name) VALUES (?1, ?2, ?3, ?4)",
            params![user.id, user.email, password, user.name],
        )?;

        self.start_session(&user)?;
        log::info!("Registered account {}", user.email);
        Ok(user)
    }

    /// Check credentials and make the matching account the current user.
    pub fn sign_in(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = normalize_email(email)?;

        let user = self
            .db
            .connection()
            .query_row(
                "SELECT id, email, name FROM users WHERE email = ?1 AND password = ?2",
                params![email, password],
                map_user_row,
            )
            .optional()?
            .ok_or(AuthError::InvalidCredentials)?;

        self.start_session(&user)?;
        log::info!("Signed in as {}", user.email);
        Ok(user)
    }

    /// End the current session. Signing out with no session is not an error.
    pub fn sign_out(&self) -> Result<(), AuthError> {
        let cleared = self
            .db
            .connection()
            .execute("DELETE FROM session WHERE id = 1", [])?;
        if cleared > 0 {
            log::info!("Signed out");
        }
        Ok(())
    }

    pub fn current_user(&self) -> Result<Option<User>, AuthError> {
        let user = self
            .db
            .connection()
            .query_row(
                "SELECT u.id, u.email, u.name
                 FROM session s JOIN users u ON u.id = s.user_id
                 WHERE s.id = 1",
                [],
                map_user_row,
            )
            .optional()?;

        Ok(user)
    }

    pub fn status(&self) -> Result<AuthStatus, AuthError> {
        Ok(match self.current_user()? {
            Some(_) => AuthStatus::Authenticated,
            None => AuthStatus::Unauthenticated,
        })
    }

    fn start_session(&self, user: &User) -> Result<(), AuthError> {
        self.db.connection().execute(
            "INSERT OR REPLACE INTO session (id, user_id, signed_in_at)
             VALUES (1, ?1, CURRENT_TIMESTAMP)",
            [&user.id],
        )?;
        Ok(())
    }
}

fn normalize_email(email: &str) -> Result<String, AuthError> {
    let email = email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(AuthError::InvalidInput(format!(
            "'{}' is not a valid email address",
            email
        )));
    }
    Ok(email)
}

fn map_user_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        name: row.get(2)?,
    })
}
