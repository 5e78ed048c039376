//! Registered users and their saved team.

use crate::models::team::SavedTeam;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a user.
pub type UserId = Uuid;

/// A manager account. Credentials live with the auth collaborator, not here.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub team_name: String,
    pub saved_team: Option<SavedTeam>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a user with a fresh id and no saved team.
    pub fn new(email: impl Into<String>, team_name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into().trim().to_string(),
            team_name: team_name.into().trim().to_string(),
            saved_team: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the saved team and bump `updated_at`.
    pub fn save_team(&mut self, team: SavedTeam, now: DateTime<Utc>) {
        self.saved_team = Some(team);
        self.updated_at = now;
    }
}
