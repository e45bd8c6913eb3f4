use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A registered identity as stored: one row per username, with the bcrypt
/// hash of the password. Never serialized to the wire.
#[derive(Debug, Clone, FromRow)]
pub struct IdentityRecord {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// The wire-safe view of an identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub id: i32,
    pub username: String,
}

impl From<IdentityRecord> for Identity {
    fn from(record: IdentityRecord) -> Self {
        Self {
            id: record.id,
            username: record.username,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_identity_drops_the_hash() {
        let record = IdentityRecord {
            id: 7,
            username: "alice".to_string(),
            password_hash: "$2b$12$secret".to_string(),
            created_at: Utc::now(),
        };

        let identity = Identity::from(record);
        let json = serde_json::to_value(&identity).unwrap();

        assert_eq!(json["id"], 7);
        assert_eq!(json["username"], "alice");
        assert!(json.get("password_hash").is_none());
    }
}
