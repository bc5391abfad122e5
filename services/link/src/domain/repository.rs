#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::types::{Account, LinkCode, LinkEvent};
use crate::error::LinkServiceError;

/// Keyed store for link codes.
///
/// Two implementations exist: the durable sea-orm store and the
/// process-local mirror. The lifecycle manager writes to both and reads
/// primary-first, so the port is identical for either tier. Callers pass
/// codes already uppercase-normalized.
pub trait CodeStore: Send + Sync {
    async fn insert(&self, code: &LinkCode) -> Result<(), LinkServiceError>;

    /// Find a live (unexpired) code by value. Implementations may evict an
    /// expired entry they encounter during the lookup.
    async fn find_live(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<LinkCode>, LinkServiceError>;

    /// Most recently created live code owned by the account.
    async fn find_live_for_account(
        &self,
        account_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Option<LinkCode>, LinkServiceError>;

    /// All live codes, newest first.
    async fn list_live(&self, now: DateTime<Utc>) -> Result<Vec<LinkCode>, LinkServiceError>;

    /// Delete a code by value. Returns `true` if a record was deleted;
    /// deleting an absent code is not an error.
    async fn delete(&self, code: &str) -> Result<bool, LinkServiceError>;

    /// Delete every code owned by the account. Returns the deleted count.
    async fn delete_for_account(&self, account_id: Uuid) -> Result<u64, LinkServiceError>;

    /// Delete every expired code. Returns the deleted count.
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, LinkServiceError>;
}

/// Port onto web-account rows (owned by the user collaborator).
pub trait AccountRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, LinkServiceError>;

    /// Find the account currently holding this Minecraft UUID, if any.
    async fn find_by_mc_uuid(&self, mc_uuid: Uuid) -> Result<Option<Account>, LinkServiceError>;

    /// Record the Minecraft name the owner intends to link, ahead of any
    /// code validation.
    async fn set_pending_mc_username(
        &self,
        id: Uuid,
        mc_username: &str,
    ) -> Result<(), LinkServiceError>;

    /// Persist a completed link: set both Minecraft fields and the linked flag.
    async fn apply_link(
        &self,
        id: Uuid,
        mc_username: &str,
        mc_uuid: Uuid,
        linked_at: DateTime<Utc>,
    ) -> Result<(), LinkServiceError>;

    /// Clear the link fields. The UUID must end up genuinely absent (SQL
    /// NULL) so another account can later claim the same UUID without a
    /// uniqueness violation.
    async fn clear_link(&self, id: Uuid) -> Result<(), LinkServiceError>;
}

/// Sink for account link/unlink notifications.
///
/// Publishing must not block and must not fail the surrounding operation;
/// delivery is best-effort.
pub trait EventSink: Send + Sync {
    fn publish(&self, event: LinkEvent);
}
