use super::db::Db;
use crate::libs::error::TaskError;
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

const INSERT_USER: &str = "INSERT INTO users (name, email, password_hash) VALUES (?1, ?2, ?3)";
const SELECT_USER_BY_ID: &str = "SELECT id, name, email, created_at FROM users WHERE id = ?1";
const SELECT_USER_BY_EMAIL: &str = "SELECT id, name, email, created_at FROM users WHERE email = ?1";
const SELECT_USER_BY_CREDENTIALS: &str = "SELECT id, name, email, created_at FROM users WHERE email = ?1 AND password_hash = ?2";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub created_at: Option<String>,
}

impl User {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(User {
            id: row.get(0)?,
            name: row.get(1)?,
            email: row.get(2)?,
            created_at: row.get(3)?,
        })
    }
}

pub struct Users {
    conn: Connection,
}

impl Users {
    pub fn new() -> Result<Self> {
        Ok(Self::from_db(Db::new()?))
    }

    pub fn from_db(db: Db) -> Self {
        Self { conn: db.conn }
    }

    /// Registers a new account. Emails are compared case-insensitively.
    pub fn create(&mut self, name: &str, email: &str, password: &str) -> Result<User> {
        let email = normalize_email(email);
        if self.get_by_email(&email)?.is_some() {
            return Err(TaskError::EmailTaken(email).into());
        }

        self.conn.execute(INSERT_USER, params![name.trim(), email, password_digest(&email, password)])?;
        let id = self.conn.last_insert_rowid() as i32;
        tracing::info!(user = id, "user created");

        self.get_by_id(id)?.ok_or_else(|| TaskError::user_not_found(id).into())
    }

    /// Looks up the account matching both email and password.
    pub fn authenticate(&mut self, email: &str, password: &str) -> Result<User> {
        let email = normalize_email(email);
        let user = self
            .conn
            .query_row(SELECT_USER_BY_CREDENTIALS, params![email, password_digest(&email, password)], User::from_row)
            .optional()?;

        user.ok_or_else(|| TaskError::InvalidCredentials.into())
    }

    pub fn get_by_id(&mut self, id: i32) -> Result<Option<User>> {
        self.conn.query_row(SELECT_USER_BY_ID, params![id], User::from_row).optional().map_err(Into::into)
    }

    pub fn get_by_email(&mut self, email: &str) -> Result<Option<User>> {
        self.conn
            .query_row(SELECT_USER_BY_EMAIL, params![normalize_email(email)], User::from_row)
            .optional()
            .map_err(Into::into)
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn password_digest(email: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(email.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}
