//! Document identifiers.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier of a stored document.
///
/// Generated ids follow the object-id layout used by document databases:
/// a 4-byte big-endian seconds timestamp followed by 8 random bytes, rendered
/// as 24 lowercase hex characters. Ids received from clients are not validated;
/// an id that was never issued simply matches no document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Length of a generated id in hex characters.
    const HEX_LEN: usize = 24;

    /// Generate a fresh identifier.
    pub fn generate() -> Self {
        let seconds = Utc::now().timestamp() as u32;
        let random = Uuid::new_v4();

        let mut bytes = [0u8; 12];
        bytes[..4].copy_from_slice(&seconds.to_be_bytes());
        bytes[4..].copy_from_slice(&random.as_bytes()[..8]);

        let mut hex = String::with_capacity(Self::HEX_LEN);
        for b in bytes {
            hex.push_str(&format!("{b:02x}"));
        }
        Self(hex)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for DocumentId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for DocumentId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<DocumentId> for String {
    fn from(value: DocumentId) -> Self {
        value.0
    }
}
