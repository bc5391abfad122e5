use uuid::Uuid;

use craftlink_domain::minecraft::validate_mc_username;

use crate::domain::repository::{AccountRepository, CodeStore};
use crate::domain::types::GeneratedCode;
use crate::error::LinkServiceError;
use crate::usecase::lifecycle::CodeLifecycle;

pub struct GenerateCodeInput {
    pub account_id: Uuid,
    /// Minecraft name the owner intends to link, stored on the account
    /// ahead of validation so the plugin can surface a pending code.
    pub mc_username: Option<String>,
    pub ttl_minutes: Option<i64>,
}

pub struct GenerateCodeUseCase<A, P, M>
where
    A: AccountRepository,
    P: CodeStore,
    M: CodeStore,
{
    pub accounts: A,
    pub codes: CodeLifecycle<P, M>,
}

impl<A, P, M> GenerateCodeUseCase<A, P, M>
where
    A: AccountRepository,
    P: CodeStore,
    M: CodeStore,
{
    pub async fn execute(
        &self,
        input: GenerateCodeInput,
    ) -> Result<GeneratedCode, LinkServiceError> {
        // 1. Session account must exist and be unlinked
        let account = self
            .accounts
            .find_by_id(input.account_id)
            .await?
            .ok_or(LinkServiceError::AccountNotFound)?;
        if account.linked {
            return Err(LinkServiceError::AlreadyLinked);
        }

        // 2. Remember the intended Minecraft name, if one was given
        if let Some(ref mc_username) = input.mc_username {
            if !validate_mc_username(mc_username) {
                return Err(LinkServiceError::InvalidInput("Invalid username format"));
            }
            self.accounts
                .set_pending_mc_username(account.id, mc_username)
                .await?;
        }

        // 3. Issue the code (invalidates any previous one for this account)
        self.codes.generate(account.id, input.ttl_minutes).await
    }
}
