use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LinkCodes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LinkCodes::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(LinkCodes::AccountId).uuid().not_null())
                    .col(
                        ColumnDef::new(LinkCodes::Code)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(LinkCodes::ExpiresAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LinkCodes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(LinkCodes::Table, LinkCodes::AccountId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(LinkCodes::Table)
                    .col(LinkCodes::AccountId)
                    .name("idx_link_codes_account_id")
                    .to_owned(),
            )
            .await?;

        // The sweep deletes by expiry; keep that scan off the table.
        manager
            .create_index(
                Index::create()
                    .table(LinkCodes::Table)
                    .col(LinkCodes::ExpiresAt)
                    .name("idx_link_codes_expires_at")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LinkCodes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum LinkCodes {
    Table,
    Id,
    AccountId,
    Code,
    ExpiresAt,
    CreatedAt,
}

#[derive(Iden)]
enum Accounts {
    Table,
    Id,
}
