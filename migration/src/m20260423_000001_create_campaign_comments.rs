use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CampaignComments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CampaignComments::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CampaignComments::CampaignId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CampaignComments::Author).string().not_null())
                    .col(ColumnDef::new(CampaignComments::Body).text().not_null())
                    .col(
                        ColumnDef::new(CampaignComments::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(SimpleExpr::Keyword(Keyword::CurrentTimestamp)),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name("fk_campaign_comments_campaign_id")
                    .from(CampaignComments::Table, CampaignComments::CampaignId)
                    .to(Campaigns::Table, Campaigns::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_campaign_comments_campaign_created")
                    .table(CampaignComments::Table)
                    .col(CampaignComments::CampaignId)
                    .col(CampaignComments::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CampaignComments::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum CampaignComments {
    Table,
    Id,
    CampaignId,
    Author,
    Body,
    CreatedAt,
}

#[derive(Iden)]
enum Campaigns {
    Table,
    Id,
}
