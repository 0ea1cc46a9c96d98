//! Store error taxonomy
//!
//! A missing row is never an error here: lookups and targeted mutations return
//! `Ok(None)` and leave the not-found decision to the caller.

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    /// A unique column (team name, user email, label name, board name) would be duplicated
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    /// A foreign key points at a row that does not exist
    #[error("foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),

    /// A credential could not be hashed
    #[error("credential error: {0}")]
    Credential(#[from] linkboard_auth::PasswordError),

    /// Backend unreachable, commit failure or any other database fault
    #[error("storage fault: {0}")]
    Storage(#[source] DbErr),
}

impl StoreError {
    /// Both unique and foreign key failures are client-side conflicts.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            StoreError::UniqueViolation(_) | StoreError::ForeignKeyViolation(_)
        )
    }
}

impl From<DbErr> for StoreError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => StoreError::UniqueViolation(detail),
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
                StoreError::ForeignKeyViolation(detail)
            }
            _ => StoreError::Storage(err),
        }
    }
}
