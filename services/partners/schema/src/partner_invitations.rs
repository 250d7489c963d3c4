use sea_orm::entity::prelude::*;

/// An offer to link two user accounts as partners, sent by email or by
/// short code. Exactly one of `invitee_email`/`code` is set per `kind`.
/// `status` is one of pending/accepted/declined/expired; rows are immutable
/// once non-pending apart from timestamps.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "partner_invitations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub inviter_id: Uuid,
    pub invitee_email: Option<String>,
    pub code: Option<String>,
    pub kind: String,
    pub status: String,
    pub expires_at: chrono::DateTime<chrono::Utc>,
    pub accepted_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
