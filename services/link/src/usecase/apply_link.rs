use chrono::Utc;
use uuid::Uuid;

use craftlink_domain::minecraft::{parse_mc_uuid, validate_mc_username};

use crate::domain::repository::{AccountRepository, CodeStore, EventSink};
use crate::domain::types::LinkEvent;
use crate::error::LinkServiceError;
use crate::usecase::lifecycle::CodeLifecycle;

pub struct ApplyLinkInput {
    pub username: String,
    pub code: String,
    pub uuid: String,
}

#[derive(Debug)]
pub struct ApplyLinkOutput {
    pub account_id: Uuid,
    /// Web display name of the linked account, echoed back to the plugin.
    pub username: String,
}

pub struct ApplyLinkUseCase<A, P, M, E>
where
    A: AccountRepository,
    P: CodeStore,
    M: CodeStore,
    E: EventSink,
{
    pub accounts: A,
    pub codes: CodeLifecycle<P, M>,
    pub events: E,
}

impl<A, P, M, E> ApplyLinkUseCase<A, P, M, E>
where
    A: AccountRepository,
    P: CodeStore,
    M: CodeStore,
    E: EventSink,
{
    pub async fn execute(&self, input: ApplyLinkInput) -> Result<ApplyLinkOutput, LinkServiceError> {
        // 1. Shape checks before any lookup — this endpoint is unauthenticated
        if input.code.trim().is_empty() {
            return Err(LinkServiceError::InvalidInput("Link code is required"));
        }
        if !validate_mc_username(&input.username) {
            return Err(LinkServiceError::InvalidInput("Invalid username format"));
        }
        let mc_uuid = parse_mc_uuid(&input.uuid)
            .ok_or(LinkServiceError::InvalidInput("Invalid UUID format"))?;

        // 2. Look the code up without consuming it
        let code = self
            .codes
            .validate(&input.code)
            .await?
            .ok_or(LinkServiceError::InvalidOrExpiredCode)?;

        // 3. Load the owning account
        let Some(account) = self.accounts.find_by_id(code.account_id).await? else {
            // A live code pointing at a missing account means code and
            // account state have diverged; surface loudly, don't swallow.
            tracing::error!(
                account_id = %code.account_id,
                code = %code.code,
                "link code owner missing"
            );
            return Err(LinkServiceError::OwnerAccountMissing);
        };

        // 4. A UUID linked elsewhere rejects the request and leaves the code
        // valid, so the legitimate owner can still use it.
        if let Some(holder) = self.accounts.find_by_mc_uuid(mc_uuid).await? {
            if holder.id != account.id {
                return Err(LinkServiceError::UuidAlreadyLinked);
            }
        }

        // 5. Persist the link, then consume the code — strictly in that
        // order, so a failure in between leaves a stale code rather than a
        // consumed code on an unlinked account.
        self.accounts
            .apply_link(account.id, &input.username, mc_uuid, Utc::now())
            .await?;
        self.codes.remove(&code.code).await?;

        self.events.publish(LinkEvent::AccountLinked {
            account_id: account.id,
            mc_username: input.username.clone(),
            mc_uuid,
        });

        tracing::info!(
            account_id = %account.id,
            mc_username = %input.username,
            mc_uuid = %mc_uuid,
            "account linked"
        );

        Ok(ApplyLinkOutput {
            account_id: account.id,
            username: account.username,
        })
    }
}
