//! UUID-backed entity identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// An opaque, totally ordered entity ID.
///
/// Ordering follows the underlying UUID bytes, which is the same order the
/// league store uses when it lists players "ascending by id".
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(Uuid);

impl EntityId {
    /// Create a fresh random ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Build an ID from a raw 128-bit value.
    pub const fn from_u128(value: u128) -> Self {
        Self(Uuid::from_u128(value))
    }

    /// Get the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl From<Uuid> for EntityId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl FromStr for EntityId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// Type alias for player (user) IDs
pub type PlayerId = EntityId;

/// Type alias for match IDs
pub type MatchId = EntityId;

/// Type alias for league IDs
pub type LeagueId = EntityId;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_id_ordering_follows_value() {
        let low = EntityId::from_u128(1);
        let high = EntityId::from_u128(2);
        assert!(low < high);
    }

    #[test]
    fn test_entity_id_random_ids_differ() {
        assert_ne!(EntityId::new(), EntityId::new());
    }

    #[test]
    fn test_entity_id_serializes_as_plain_uuid() {
        let id = EntityId::from_u128(42);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"00000000-0000-0000-0000-00000000002a\"");

        let deserialized: EntityId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn test_entity_id_from_str() {
        let id: EntityId = "00000000-0000-0000-0000-000000000007".parse().unwrap();
        assert_eq!(id, EntityId::from_u128(7));
    }

    #[test]
    fn test_entity_id_from_str_invalid() {
        assert!("not-a-uuid".parse::<EntityId>().is_err());
    }

    #[test]
    fn test_entity_id_display_and_debug() {
        let id = EntityId::from_u128(1);
        assert_eq!(format!("{}", id), "00000000-0000-0000-0000-000000000001");
        assert!(format!("{:?}", id).starts_with("EntityId("));
    }
}
