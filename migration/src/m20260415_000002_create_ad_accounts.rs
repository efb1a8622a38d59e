use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AdAccounts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AdAccounts::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AdAccounts::Platform).string().not_null())
                    .col(ColumnDef::new(AdAccounts::AccountName).string().not_null())
                    .col(
                        ColumnDef::new(AdAccounts::SpendLimit)
                            .decimal_len(20, 4)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AdAccounts::TotalSpend)
                            .decimal_len(20, 4)
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(AdAccounts::ClientId).integer())
                    .col(
                        ColumnDef::new(AdAccounts::CreatedAt)
                            .timestamp()
                            .default(SimpleExpr::Keyword(Keyword::CurrentTimestamp)),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name("fk_ad_accounts_client_id")
                    .from(AdAccounts::Table, AdAccounts::ClientId)
                    .to(Clients::Table, Clients::Id)
                    .on_delete(ForeignKeyAction::SetNull)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AdAccounts::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum AdAccounts {
    Table,
    Id,
    Platform,
    AccountName,
    SpendLimit,
    TotalSpend,
    ClientId,
    CreatedAt,
}

#[derive(Iden)]
enum Clients {
    Table,
    Id,
}
