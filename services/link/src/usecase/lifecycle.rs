use chrono::{Duration, Utc};
use rand::RngExt;
use uuid::Uuid;

use crate::domain::repository::CodeStore;
use crate::domain::types::{
    CODE_LEN, DEFAULT_CODE_TTL_MINUTES, GeneratedCode, LinkCode, SweepStats,
};
use crate::error::LinkServiceError;

/// Charset for generated link codes (uppercase alphanumeric).
const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Random 6-character code. 36^6 ≈ 2.2e9 values, so accidental collisions
/// among the handful of codes live at any moment are negligible; the unique
/// constraint on the durable store backstops the remainder.
pub fn generate_code() -> String {
    let mut rng = rand::rng();
    (0..CODE_LEN)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

fn normalize(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

/// Orchestrates code generation, lookup, validation, and removal across the
/// durable store and the process-local mirror, and owns the periodic sweep.
///
/// Reads go primary-first with the mirror as fallback; writes go to both,
/// and a failed durable write degrades to mirror-only rather than failing
/// the caller (availability over durability for this feature).
pub struct CodeLifecycle<P, M>
where
    P: CodeStore,
    M: CodeStore,
{
    pub primary: P,
    pub mirror: M,
}

impl<P, M> CodeLifecycle<P, M>
where
    P: CodeStore,
    M: CodeStore,
{
    /// Issue a fresh code for the account, invalidating any previous ones.
    ///
    /// Two concurrent calls for one account race delete-then-insert; the
    /// last writer wins, and the human requesting codes uses whichever they
    /// see last. No stronger ordering is provided.
    pub async fn generate(
        &self,
        account_id: Uuid,
        ttl_minutes: Option<i64>,
    ) -> Result<GeneratedCode, LinkServiceError> {
        let ttl = ttl_minutes
            .filter(|minutes| *minutes > 0)
            .unwrap_or(DEFAULT_CODE_TTL_MINUTES);
        let now = Utc::now();
        let record = LinkCode {
            id: Uuid::new_v4(),
            account_id,
            code: generate_code(),
            expires_at: now + Duration::minutes(ttl),
            created_at: now,
        };

        let mut degraded = false;
        match self.primary.delete_for_account(account_id).await {
            Ok(replaced) => {
                if replaced > 0 {
                    tracing::debug!(%account_id, replaced, "replaced previous link codes");
                }
                if let Err(e) = self.primary.insert(&record).await {
                    tracing::warn!(error = %e, %account_id, "durable code write failed, mirror only");
                    degraded = true;
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, %account_id, "durable code cleanup failed, mirror only");
                degraded = true;
            }
        }

        // The mirror copy is written even on the happy path so it can serve
        // reads if the durable store goes away later.
        let mirrored = match self.mirror.delete_for_account(account_id).await {
            Ok(_) => self.mirror.insert(&record).await,
            Err(e) => Err(e),
        };
        if let Err(e) = mirrored {
            if degraded {
                // neither tier holds the code; this one does fail the caller
                return Err(e);
            }
            tracing::warn!(error = %e, %account_id, "mirror code write failed");
        }

        tracing::info!(
            %account_id,
            code = %record.code,
            expires_at = %record.expires_at,
            degraded,
            "generated link code"
        );

        Ok(GeneratedCode {
            code: record.code,
            expires_at: record.expires_at,
            degraded,
        })
    }

    /// Most recently created live code for the account, if any. Expired
    /// records are treated as absent, never returned.
    pub async fn get_active_for(
        &self,
        account_id: Uuid,
    ) -> Result<Option<LinkCode>, LinkServiceError> {
        let now = Utc::now();
        match self.primary.find_live_for_account(account_id, now).await {
            Ok(Some(code)) => return Ok(Some(code)),
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(error = %e, %account_id, "durable code lookup failed, trying mirror");
            }
        }
        self.mirror.find_live_for_account(account_id, now).await
    }

    /// Look up a live code by value, uppercase-normalized. Does NOT consume
    /// the code — consumption is a separate [`remove`](Self::remove) so that
    /// failures further up (e.g. a UUID conflict) do not burn it.
    pub async fn validate(&self, code: &str) -> Result<Option<LinkCode>, LinkServiceError> {
        let code = normalize(code);
        if code.is_empty() {
            return Ok(None);
        }
        let now = Utc::now();
        match self.primary.find_live(&code, now).await {
            Ok(Some(record)) => return Ok(Some(record)),
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(error = %e, code = %code, "durable code lookup failed, trying mirror");
            }
        }
        self.mirror.find_live(&code, now).await
    }

    /// Delete a code from both tiers. Idempotent: removing an absent code
    /// is not an error. A failed durable delete is logged as a
    /// data-integrity concern but does not fail the caller.
    pub async fn remove(&self, code: &str) -> Result<(), LinkServiceError> {
        let code = normalize(code);
        if let Err(e) = self.primary.delete(&code).await {
            tracing::error!(error = %e, code = %code, "durable code delete failed; stale code remains until sweep");
        }
        self.mirror.delete(&code).await?;
        Ok(())
    }

    /// Delete every code owned by the account from both tiers.
    pub async fn purge_account(&self, account_id: Uuid) -> Result<(), LinkServiceError> {
        if let Err(e) = self.primary.delete_for_account(account_id).await {
            tracing::error!(error = %e, %account_id, "durable code purge failed; stale codes remain until sweep");
        }
        self.mirror.delete_for_account(account_id).await?;
        Ok(())
    }

    /// All live codes across both tiers, newest first, deduplicated by
    /// value (a mirror entry may be the only copy after a degraded write).
    pub async fn list_live(&self) -> Result<Vec<LinkCode>, LinkServiceError> {
        let now = Utc::now();
        let mut codes = match self.primary.list_live(now).await {
            Ok(codes) => codes,
            Err(e) => {
                tracing::warn!(error = %e, "durable code listing failed, mirror only");
                Vec::new()
            }
        };
        for entry in self.mirror.list_live(now).await? {
            if !codes.iter().any(|code| code.code == entry.code) {
                codes.push(entry);
            }
        }
        codes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(codes)
    }

    /// Evict expired codes from both tiers. Runs on a timer independent of
    /// request traffic; a durable-store failure still lets the mirror pass
    /// proceed.
    pub async fn sweep(&self) -> Result<SweepStats, LinkServiceError> {
        let now = Utc::now();
        let durable_evicted = match self.primary.delete_expired(now).await {
            Ok(count) => count,
            Err(e) => {
                tracing::warn!(error = %e, "durable code sweep failed");
                0
            }
        };
        let mirror_evicted = self.mirror.delete_expired(now).await?;
        Ok(SweepStats {
            durable_evicted,
            mirror_evicted,
        })
    }
}
