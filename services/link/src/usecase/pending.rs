use chrono::{DateTime, Utc};

use craftlink_domain::minecraft::{parse_mc_uuid, validate_mc_username};

use crate::domain::repository::{AccountRepository, CodeStore};
use crate::error::LinkServiceError;
use crate::usecase::lifecycle::CodeLifecycle;

pub struct PendingCodeInput {
    pub username: String,
    pub uuid: String,
}

#[derive(Debug)]
pub struct PendingCodeOutput {
    pub code: String,
    pub expires_at: DateTime<Utc>,
}

/// Plugin-side discovery: a player just joined the server — is a link code
/// waiting for them? Matches live codes whose owner is unlinked and either
/// declared this Minecraft name at generate time or declared none.
pub struct PendingCodeUseCase<A, P, M>
where
    A: AccountRepository,
    P: CodeStore,
    M: CodeStore,
{
    pub accounts: A,
    pub codes: CodeLifecycle<P, M>,
}

impl<A, P, M> PendingCodeUseCase<A, P, M>
where
    A: AccountRepository,
    P: CodeStore,
    M: CodeStore,
{
    pub async fn execute(
        &self,
        input: PendingCodeInput,
    ) -> Result<Option<PendingCodeOutput>, LinkServiceError> {
        if !validate_mc_username(&input.username) {
            return Err(LinkServiceError::InvalidInput("Invalid username format"));
        }
        if parse_mc_uuid(&input.uuid).is_none() {
            return Err(LinkServiceError::InvalidInput("Invalid UUID format"));
        }

        // Newest first, so a re-generated code wins over a stale one
        for code in self.codes.list_live().await? {
            let Some(account) = self.accounts.find_by_id(code.account_id).await? else {
                continue;
            };
            if account.linked {
                continue;
            }
            let name_matches = match &account.mc_username {
                Some(name) => name == &input.username,
                None => true,
            };
            if name_matches {
                return Ok(Some(PendingCodeOutput {
                    code: code.code,
                    expires_at: code.expires_at,
                }));
            }
        }
        Ok(None)
    }
}
