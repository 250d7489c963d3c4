use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Couples::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Couples::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Couples::User1Id).uuid().not_null())
                    .col(ColumnDef::new(Couples::User2Id).uuid().not_null())
                    .col(
                        ColumnDef::new(Couples::RelationshipStatus)
                            .string()
                            .not_null()
                            .default("engaged"),
                    )
                    .col(
                        ColumnDef::new(Couples::ConnectedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Couples::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Couples::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Couples::Table)
                    .col(Couples::User1Id)
                    .unique()
                    .name("idx_couples_user1_id")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Couples::Table)
                    .col(Couples::User2Id)
                    .unique()
                    .name("idx_couples_user2_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Couples::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Couples {
    Table,
    Id,
    User1Id,
    User2Id,
    RelationshipStatus,
    ConnectedAt,
    CreatedAt,
    UpdatedAt,
}
