use sea_orm::entity::prelude::*;

/// Two linked user accounts. Created only inside the invitation-accept
/// transaction; deleted on explicit disconnect. A user appears in at most
/// one row.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "couples")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user1_id: Uuid,
    pub user2_id: Uuid,
    pub relationship_status: String,
    pub connected_at: chrono::DateTime<chrono::Utc>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
