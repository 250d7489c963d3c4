use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PartnerInvitations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PartnerInvitations::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PartnerInvitations::InviterId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PartnerInvitations::InviteeEmail).string())
                    .col(ColumnDef::new(PartnerInvitations::Code).string())
                    .col(
                        ColumnDef::new(PartnerInvitations::Kind)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PartnerInvitations::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(PartnerInvitations::ExpiresAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PartnerInvitations::AcceptedAt)
                            .timestamp_with_time_zone(),
                    )
                    .col(
                        ColumnDef::new(PartnerInvitations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(PartnerInvitations::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Codes are lookup keys from the accept path; must be unique.
        manager
            .create_index(
                Index::create()
                    .table(PartnerInvitations::Table)
                    .col(PartnerInvitations::Code)
                    .unique()
                    .name("idx_partner_invitations_code")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(PartnerInvitations::Table)
                    .col(PartnerInvitations::InviterId)
                    .col(PartnerInvitations::Status)
                    .name("idx_partner_invitations_inviter_id_status")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(PartnerInvitations::Table)
                    .col(PartnerInvitations::InviteeEmail)
                    .col(PartnerInvitations::Status)
                    .name("idx_partner_invitations_invitee_email_status")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PartnerInvitations::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum PartnerInvitations {
    Table,
    Id,
    InviterId,
    InviteeEmail,
    Code,
    Kind,
    Status,
    ExpiresAt,
    AcceptedAt,
    CreatedAt,
    UpdatedAt,
}
