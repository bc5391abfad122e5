use uuid::Uuid;

use crate::domain::repository::{AccountRepository, CodeStore, EventSink};
use crate::domain::types::LinkEvent;
use crate::error::LinkServiceError;
use crate::usecase::lifecycle::CodeLifecycle;

#[derive(Debug)]
pub struct UnlinkOutput {
    /// True when there was nothing to clear; callers retry, so this is a
    /// success, not an error.
    pub already_unlinked: bool,
}

pub struct UnlinkUseCase<A, P, M, E>
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

impl<A, P, M, E> UnlinkUseCase<A, P, M, E>
where
    A: AccountRepository,
    P: CodeStore,
    M: CodeStore,
    E: EventSink,
{
    pub async fn execute(&self, account_id: Uuid) -> Result<UnlinkOutput, LinkServiceError> {
        let account = self
            .accounts
            .find_by_id(account_id)
            .await?
            .ok_or(LinkServiceError::AccountNotFound)?;

        // Either field still set counts as linked, so a half-cleared row
        // from an earlier fault gets fully cleared on retry.
        if !account.linked && account.mc_uuid.is_none() {
            return Ok(UnlinkOutput {
                already_unlinked: true,
            });
        }

        self.accounts.clear_link(account.id).await?;
        // Any outstanding code for this account is now pointless.
        self.codes.purge_account(account.id).await?;

        self.events.publish(LinkEvent::AccountUnlinked {
            account_id: account.id,
            previous_mc_username: account.mc_username.clone(),
        });

        tracing::info!(
            account_id = %account.id,
            previous_mc_username = account.mc_username.as_deref().unwrap_or(""),
            "account unlinked"
        );

        Ok(UnlinkOutput {
            already_unlinked: false,
        })
    }
}
