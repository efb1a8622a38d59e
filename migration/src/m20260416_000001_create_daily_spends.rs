use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DailySpends::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DailySpends::CampaignId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DailySpends::Date)
                            .date()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DailySpends::Amount)
                            .decimal_len(20, 4)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DailySpends::CreatedAt)
                            .timestamp()
                            .default(SimpleExpr::Keyword(Keyword::CurrentTimestamp)),
                    )
                    .col(
                        ColumnDef::new(DailySpends::UpdatedAt)
                            .timestamp()
                            .default(SimpleExpr::Keyword(Keyword::CurrentTimestamp)),
                    )
                    // One row per campaign per calendar day
                    .primary_key(
                        Index::create()
                            .col(DailySpends::CampaignId)
                            .col(DailySpends::Date)
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name("fk_daily_spends_campaign_id")
                    .from(DailySpends::Table, DailySpends::CampaignId)
                    .to(Campaigns::Table, Campaigns::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DailySpends::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum DailySpends {
    Table,
    CampaignId,
    Date,
    Amount,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Campaigns {
    Table,
    Id,
}
