use sea_orm::entity::prelude::*;

/// Web account row. Owned by the user collaborator; only the
/// linking-relevant columns are read or written by this service.
///
/// `mc_uuid` is nullable-unique: unlinking sets it back to NULL, and
/// Postgres treats NULLs as distinct, so any number of unlinked accounts
/// coexist while a non-null UUID can belong to at most one account.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    pub mc_username: Option<String>,
    #[sea_orm(unique)]
    pub mc_uuid: Option<Uuid>,
    pub linked: bool,
    pub mc_linked_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::link_codes::Entity")]
    LinkCodes,
}

impl Related<super::link_codes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LinkCodes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
