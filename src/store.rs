//! User and saved-team storage behind an injectable repository.

use crate::models::{SavedTeam, User, UserId};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::RwLock;

/// Errors from the user store.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StoreError {
    /// A writer panicked while holding the lock.
    LockPoisoned,
    /// Another user already registered this email (case-insensitive).
    DuplicateEmail,
    UserNotFound(UserId),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::LockPoisoned => write!(f, "lock error"),
            StoreError::DuplicateEmail => write!(f, "A user with this email already exists"),
            StoreError::UserNotFound(_) => write!(f, "User not found"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Storage for users so handlers can be exercised without a real database.
pub trait UserRepository: Send + Sync {
    fn get_by_id(&self, id: UserId) -> Result<Option<User>, StoreError>;
    /// Email match is case-insensitive.
    fn get_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    /// Insert or replace by id; returns the stored user.
    fn upsert(&self, user: User) -> Result<User, StoreError>;
    /// Insert a user whose email is not taken yet. The email check and the insert must be
    /// atomic: two concurrent calls with the same email give one `DuplicateEmail`.
    fn insert_new(&self, user: User) -> Result<User, StoreError>;
}

/// Process-local store. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserRepository for InMemoryUserRepository {
    fn get_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
        let g = self.users.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(g.get(&id).cloned())
    }

    fn get_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let email = email.trim();
        let g = self.users.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(g.values().find(|u| u.email.eq_ignore_ascii_case(email)).cloned())
    }

    fn upsert(&self, user: User) -> Result<User, StoreError> {
        let mut g = self.users.write().map_err(|_| StoreError::LockPoisoned)?;
        g.insert(user.id, user.clone());
        Ok(user)
    }

    fn insert_new(&self, user: User) -> Result<User, StoreError> {
        let mut g = self.users.write().map_err(|_| StoreError::LockPoisoned)?;
        if g.values().any(|u| u.email.eq_ignore_ascii_case(&user.email)) {
            return Err(StoreError::DuplicateEmail);
        }
        g.insert(user.id, user.clone());
        Ok(user)
    }
}

/// Create a user unless the email is taken.
pub fn register_user(
    repo: &dyn UserRepository,
    email: &str,
    team_name: &str,
    now: DateTime<Utc>,
) -> Result<User, StoreError> {
    let user = repo.insert_new(User::new(email, team_name, now))?;
    log::info!("Registered user {} ({})", user.id, user.email);
    Ok(user)
}

/// Attach an already-validated team to a user.
pub fn save_team(
    repo: &dyn UserRepository,
    id: UserId,
    team: SavedTeam,
    now: DateTime<Utc>,
) -> Result<User, StoreError> {
    let mut user = repo.get_by_id(id)?.ok_or(StoreError::UserNotFound(id))?;
    user.save_team(team, now);
    repo.upsert(user)
}
