//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a farmer registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegistrationId(Uuid);

impl RegistrationId {
    /// Creates a new random RegistrationId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a RegistrationId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Receipt label sent to the payment gateway for this registration.
    pub fn receipt(&self) -> String {
        format!("reg_{}", self.0)
    }
}

impl Default for RegistrationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RegistrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RegistrationId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_id_generates_unique_values() {
        let id1 = RegistrationId::new();
        let id2 = RegistrationId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn registration_id_parses_from_string() {
        let id = RegistrationId::new();
        let parsed: RegistrationId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn registration_id_rejects_invalid_string() {
        assert!("not-a-uuid".parse::<RegistrationId>().is_err());
    }

    #[test]
    fn receipt_is_derived_from_id() {
        let uuid = Uuid::parse_str("6f1c2b1e-7d3a-4c55-9a8e-2f0d9b3c4e5a").unwrap();
        let id = RegistrationId::from_uuid(uuid);
        assert_eq!(id.receipt(), "reg_6f1c2b1e-7d3a-4c55-9a8e-2f0d9b3c4e5a");
    }

    #[test]
    fn registration_id_serializes_transparently() {
        let uuid = Uuid::parse_str("6f1c2b1e-7d3a-4c55-9a8e-2f0d9b3c4e5a").unwrap();
        let json = serde_json::to_string(&RegistrationId::from_uuid(uuid)).unwrap();
        assert_eq!(json, "\"6f1c2b1e-7d3a-4c55-9a8e-2f0d9b3c4e5a\"");
    }
}
