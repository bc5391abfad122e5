use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};
use uuid::Uuid;

use craftlink_link_schema::{accounts, link_codes};

use crate::domain::repository::{AccountRepository, CodeStore};
use crate::domain::types::{Account, LinkCode};
use crate::error::LinkServiceError;

// ── Durable code store ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCodeStore {
    pub db: DatabaseConnection,
}

impl CodeStore for DbCodeStore {
    async fn insert(&self, code: &LinkCode) -> Result<(), LinkServiceError> {
        link_codes::ActiveModel {
            id: Set(code.id),
            account_id: Set(code.account_id),
            code: Set(code.code.clone()),
            expires_at: Set(code.expires_at),
            created_at: Set(code.created_at),
        }
        .insert(&self.db)
        .await
        .context("insert link code")?;
        Ok(())
    }

    async fn find_live(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<LinkCode>, LinkServiceError> {
        let model = link_codes::Entity::find()
            .filter(link_codes::Column::Code.eq(code))
            .filter(link_codes::Column::ExpiresAt.gt(now))
            .one(&self.db)
            .await
            .context("find live link code")?;
        Ok(model.map(link_code_from_model))
    }

    async fn find_live_for_account(
        &self,
        account_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Option<LinkCode>, LinkServiceError> {
        let model = link_codes::Entity::find()
            .filter(link_codes::Column::AccountId.eq(account_id))
            .filter(link_codes::Column::ExpiresAt.gt(now))
            .order_by_desc(link_codes::Column::CreatedAt)
            .one(&self.db)
            .await
            .context("find live link code for account")?;
        Ok(model.map(link_code_from_model))
    }

    async fn list_live(&self, now: DateTime<Utc>) -> Result<Vec<LinkCode>, LinkServiceError> {
        let models = link_codes::Entity::find()
            .filter(link_codes::Column::ExpiresAt.gt(now))
            .order_by_desc(link_codes::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list live link codes")?;
        Ok(models.into_iter().map(link_code_from_model).collect())
    }

    async fn delete(&self, code: &str) -> Result<bool, LinkServiceError> {
        let result = link_codes::Entity::delete_many()
            .filter(link_codes::Column::Code.eq(code))
            .exec(&self.db)
            .await
            .context("delete link code")?;
        Ok(result.rows_affected > 0)
    }

    async fn delete_for_account(&self, account_id: Uuid) -> Result<u64, LinkServiceError> {
        let result = link_codes::Entity::delete_many()
            .filter(link_codes::Column::AccountId.eq(account_id))
            .exec(&self.db)
            .await
            .context("delete link codes for account")?;
        Ok(result.rows_affected)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, LinkServiceError> {
        let result = link_codes::Entity::delete_many()
            .filter(link_codes::Column::ExpiresAt.lte(now))
            .exec(&self.db)
            .await
            .context("delete expired link codes")?;
        Ok(result.rows_affected)
    }
}

fn link_code_from_model(model: link_codes::Model) -> LinkCode {
    LinkCode {
        id: model.id,
        account_id: model.account_id,
        code: model.code,
        expires_at: model.expires_at,
        created_at: model.created_at,
    }
}

// ── Account repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAccountRepository {
    pub db: DatabaseConnection,
}

impl AccountRepository for DbAccountRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, LinkServiceError> {
        let model = accounts::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find account by id")?;
        Ok(model.map(account_from_model))
    }

    async fn find_by_mc_uuid(&self, mc_uuid: Uuid) -> Result<Option<Account>, LinkServiceError> {
        let model = accounts::Entity::find()
            .filter(accounts::Column::McUuid.eq(mc_uuid))
            .one(&self.db)
            .await
            .context("find account by mc uuid")?;
        Ok(model.map(account_from_model))
    }

    async fn set_pending_mc_username(
        &self,
        id: Uuid,
        mc_username: &str,
    ) -> Result<(), LinkServiceError> {
        accounts::ActiveModel {
            id: Set(id),
            mc_username: Set(Some(mc_username.to_owned())),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("set pending mc username")?;
        Ok(())
    }

    async fn apply_link(
        &self,
        id: Uuid,
        mc_username: &str,
        mc_uuid: Uuid,
        linked_at: DateTime<Utc>,
    ) -> Result<(), LinkServiceError> {
        accounts::ActiveModel {
            id: Set(id),
            mc_username: Set(Some(mc_username.to_owned())),
            mc_uuid: Set(Some(mc_uuid)),
            linked: Set(true),
            mc_linked_at: Set(Some(linked_at)),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("apply account link")?;
        Ok(())
    }

    async fn clear_link(&self, id: Uuid) -> Result<(), LinkServiceError> {
        // mc_uuid goes back to SQL NULL. The unique constraint treats NULLs
        // as distinct, so the released UUID is free for another account and
        // unlinked accounts never collide with each other.
        accounts::ActiveModel {
            id: Set(id),
            mc_username: Set(None),
            mc_uuid: Set(None),
            linked: Set(false),
            mc_linked_at: Set(None),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("clear account link")?;
        Ok(())
    }
}

fn account_from_model(model: accounts::Model) -> Account {
    Account {
        id: model.id,
        username: model.username,
        mc_username: model.mc_username,
        mc_uuid: model.mc_uuid,
        linked: model.linked,
        mc_linked_at: model.mc_linked_at,
        created_at: model.created_at,
    }
}
