//! Player model.

use serde::{Deserialize, Serialize};

use super::PlayerId;

/// A league participant, as read from the league store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Stable identifier
    pub id: PlayerId,

    /// Display name
    pub username: String,
}

impl Player {
    pub fn new(id: PlayerId, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
        }
    }
}
