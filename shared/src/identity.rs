//! Identity - cache scoping key
//!
//! Every cart and order cache is partitioned by identity: either an
//! authenticated customer id or the anonymous guest marker. Storage keys
//! derive from the identity, so no identity can observe another's cache.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The logical owner of a cart/order cache
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", tag = "kind", content = "id")]
pub enum Identity {
    /// Anonymous session, not yet logged in
    #[default]
    Guest,
    /// Authenticated customer
    User(String),
}

impl Identity {
    /// Create an authenticated identity
    pub fn user(id: impl Into<String>) -> Self {
        Identity::User(id.into())
    }

    /// Key component used to scope persisted storage
    pub fn storage_key(&self) -> &str {
        match self {
            Identity::Guest => "guest",
            Identity::User(id) => id,
        }
    }

    /// Whether this identity is the anonymous guest marker
    pub fn is_guest(&self) -> bool {
        matches!(self, Identity::Guest)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.storage_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_key_disambiguates_identities() {
        let guest = Identity::Guest;
        let u1 = Identity::user("u1");
        let u2 = Identity::user("u2");

        assert_eq!(guest.storage_key(), "guest");
        assert_ne!(u1.storage_key(), u2.storage_key());
        assert!(guest.is_guest());
        assert!(!u1.is_guest());
    }
}
