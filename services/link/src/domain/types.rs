use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Short-lived code a player types in game to prove ownership of a web
/// account's Minecraft identity claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkCode {
    pub id: Uuid,
    pub account_id: Uuid,
    /// Uppercase-normalized code value, unique across live codes.
    pub code: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl LinkCode {
    /// A code is live strictly before its expiry instant.
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

/// Linking-relevant view of a web account. The rows belong to the user
/// collaborator; this service only reads them and flips the link fields.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: Uuid,
    /// Web display name (distinct from the Minecraft username).
    pub username: String,
    pub mc_username: Option<String>,
    pub mc_uuid: Option<Uuid>,
    pub linked: bool,
    pub mc_linked_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Result of a generate call.
#[derive(Debug, Clone)]
pub struct GeneratedCode {
    pub code: String,
    pub expires_at: DateTime<Utc>,
    /// True when the durable write failed and the code lives only in the
    /// process-local mirror until it is used or expires.
    pub degraded: bool,
}

/// Counts reported by one sweep pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct SweepStats {
    pub durable_evicted: u64,
    pub mirror_evicted: u64,
}

/// Fire-and-forget notifications for connected web clients.
#[derive(Debug, Clone)]
pub enum LinkEvent {
    AccountLinked {
        account_id: Uuid,
        mc_username: String,
        mc_uuid: Uuid,
    },
    AccountUnlinked {
        account_id: Uuid,
        previous_mc_username: Option<String>,
    },
}

/// Link code length in characters.
pub const CODE_LEN: usize = 6;

/// Default code time-to-live in minutes (24 hours).
pub const DEFAULT_CODE_TTL_MINUTES: i64 = 1440;
