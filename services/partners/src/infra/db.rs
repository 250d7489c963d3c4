use anyhow::anyhow;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect, TransactionError, TransactionTrait,
    sea_query::Expr,
};
use uuid::Uuid;

use troth_domain::pagination::PageRequest;
use troth_partners_schema::{couples, notifications, partner_invitations};

use crate::domain::repository::{CoupleRepository, InvitationRepository, NotificationRepository};
use crate::domain::types::{Couple, Invitation, InvitationKind, InvitationStatus, Notification};
use crate::error::PartnersServiceError;

/// Map a sea-orm error onto the service taxonomy: connection failures are
/// configuration/transient problems, everything else is internal.
fn map_db_err(err: DbErr, what: &'static str) -> PartnersServiceError {
    match err {
        DbErr::Conn(_) => PartnersServiceError::NotConfigured,
        DbErr::ConnectionAcquire(_) => PartnersServiceError::TransientNetwork,
        other => PartnersServiceError::Internal(anyhow::Error::new(other).context(what)),
    }
}

fn map_txn_err(err: TransactionError<DbErr>, what: &'static str) -> PartnersServiceError {
    match err {
        TransactionError::Connection(db) => map_db_err(db, what),
        TransactionError::Transaction(db) => map_db_err(db, what),
    }
}

// ── Invitation repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbInvitationRepository {
    pub db: DatabaseConnection,
}

impl InvitationRepository for DbInvitationRepository {
    async fn create(&self, invitation: &Invitation) -> Result<(), PartnersServiceError> {
        partner_invitations::ActiveModel {
            id: Set(invitation.id),
            inviter_id: Set(invitation.inviter_id),
            invitee_email: Set(invitation.invitee_email.clone()),
            code: Set(invitation.code.clone()),
            kind: Set(invitation.kind.as_str().to_owned()),
            status: Set(invitation.status.as_str().to_owned()),
            expires_at: Set(invitation.expires_at),
            accepted_at: Set(invitation.accepted_at),
            created_at: Set(invitation.created_at),
            updated_at: Set(invitation.updated_at),
        }
        .insert(&self.db)
        .await
        .map_err(|e| map_db_err(e, "create invitation"))?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Invitation>, PartnersServiceError> {
        let model = partner_invitations::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| map_db_err(e, "find invitation by id"))?;
        model.map(invitation_from_model).transpose()
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Invitation>, PartnersServiceError> {
        let model = partner_invitations::Entity::find()
            .filter(partner_invitations::Column::Code.eq(code))
            .one(&self.db)
            .await
            .map_err(|e| map_db_err(e, "find invitation by code"))?;
        model.map(invitation_from_model).transpose()
    }

    async fn list_sent_pending(
        &self,
        inviter_id: Uuid,
    ) -> Result<Vec<Invitation>, PartnersServiceError> {
        let now = Utc::now();
        let models = partner_invitations::Entity::find()
            .filter(partner_invitations::Column::InviterId.eq(inviter_id))
            .filter(partner_invitations::Column::Status.eq(InvitationStatus::Pending.as_str()))
            .filter(partner_invitations::Column::ExpiresAt.gt(now))
            .order_by_desc(partner_invitations::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| map_db_err(e, "list sent pending invitations"))?;
        models.into_iter().map(invitation_from_model).collect()
    }

    async fn list_received_pending(
        &self,
        invitee_email: &str,
    ) -> Result<Vec<Invitation>, PartnersServiceError> {
        let now = Utc::now();
        let models = partner_invitations::Entity::find()
            .filter(partner_invitations::Column::InviteeEmail.eq(invitee_email))
            .filter(partner_invitations::Column::Status.eq(InvitationStatus::Pending.as_str()))
            .filter(partner_invitations::Column::ExpiresAt.gt(now))
            .order_by_desc(partner_invitations::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| map_db_err(e, "list received pending invitations"))?;
        models.into_iter().map(invitation_from_model).collect()
    }

    async fn accept_and_link(
        &self,
        invitation_id: Uuid,
        accepted_at: DateTime<Utc>,
        couple: &Couple,
    ) -> Result<bool, PartnersServiceError> {
        let couple = couple.clone();
        self.db
            .transaction::<_, bool, DbErr>(move |txn| {
                Box::pin(async move {
                    // Only a row still pending and unexpired can flip; the
                    // loser of a concurrent accept sees zero rows affected.
                    let updated = partner_invitations::Entity::update_many()
                        .col_expr(
                            partner_invitations::Column::Status,
                            Expr::value(InvitationStatus::Accepted.as_str()),
                        )
                        .col_expr(
                            partner_invitations::Column::AcceptedAt,
                            Expr::value(Some(accepted_at)),
                        )
                        .col_expr(
                            partner_invitations::Column::UpdatedAt,
                            Expr::value(accepted_at),
                        )
                        .filter(partner_invitations::Column::Id.eq(invitation_id))
                        .filter(
                            partner_invitations::Column::Status
                                .eq(InvitationStatus::Pending.as_str()),
                        )
                        .filter(partner_invitations::Column::ExpiresAt.gt(accepted_at))
                        .exec(txn)
                        .await?;
                    if updated.rows_affected == 0 {
                        return Ok(false);
                    }

                    couples::ActiveModel {
                        id: Set(couple.id),
                        user1_id: Set(couple.user1_id),
                        user2_id: Set(couple.user2_id),
                        relationship_status: Set(couple.relationship_status.clone()),
                        connected_at: Set(couple.connected_at),
                        created_at: Set(couple.created_at),
                        updated_at: Set(couple.updated_at),
                    }
                    .insert(txn)
                    .await?;
                    Ok(true)
                })
            })
            .await
            .map_err(|e| map_txn_err(e, "accept invitation and link couple"))
    }

    async fn mark_declined(&self, id: Uuid) -> Result<bool, PartnersServiceError> {
        let now = Utc::now();
        let result = partner_invitations::Entity::update_many()
            .col_expr(
                partner_invitations::Column::Status,
                Expr::value(InvitationStatus::Declined.as_str()),
            )
            .col_expr(partner_invitations::Column::UpdatedAt, Expr::value(now))
            .filter(partner_invitations::Column::Id.eq(id))
            .filter(partner_invitations::Column::Status.eq(InvitationStatus::Pending.as_str()))
            .exec(&self.db)
            .await
            .map_err(|e| map_db_err(e, "mark invitation declined"))?;
        Ok(result.rows_affected > 0)
    }

    async fn delete_pending(
        &self,
        id: Uuid,
        inviter_id: Uuid,
    ) -> Result<bool, PartnersServiceError> {
        let result = partner_invitations::Entity::delete_many()
            .filter(partner_invitations::Column::Id.eq(id))
            .filter(partner_invitations::Column::InviterId.eq(inviter_id))
            .filter(partner_invitations::Column::Status.eq(InvitationStatus::Pending.as_str()))
            .exec(&self.db)
            .await
            .map_err(|e| map_db_err(e, "delete pending invitation"))?;
        Ok(result.rows_affected > 0)
    }

    async fn expire_stale(&self) -> Result<u64, PartnersServiceError> {
        let now = Utc::now();
        let result = partner_invitations::Entity::update_many()
            .col_expr(
                partner_invitations::Column::Status,
                Expr::value(InvitationStatus::Expired.as_str()),
            )
            .col_expr(partner_invitations::Column::UpdatedAt, Expr::value(now))
            .filter(partner_invitations::Column::Status.eq(InvitationStatus::Pending.as_str()))
            .filter(partner_invitations::Column::ExpiresAt.lte(now))
            .exec(&self.db)
            .await
            .map_err(|e| map_db_err(e, "expire stale invitations"))?;
        Ok(result.rows_affected)
    }
}

fn invitation_from_model(
    model: partner_invitations::Model,
) -> Result<Invitation, PartnersServiceError> {
    let kind = InvitationKind::parse(&model.kind)
        .ok_or_else(|| anyhow!("unknown invitation kind {:?}", model.kind))?;
    let status = InvitationStatus::parse(&model.status)
        .ok_or_else(|| anyhow!("unknown invitation status {:?}", model.status))?;
    Ok(Invitation {
        id: model.id,
        inviter_id: model.inviter_id,
        invitee_email: model.invitee_email,
        code: model.code,
        kind,
        status,
        expires_at: model.expires_at,
        accepted_at: model.accepted_at,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Couple repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCoupleRepository {
    pub db: DatabaseConnection,
}

impl CoupleRepository for DbCoupleRepository {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Couple>, PartnersServiceError> {
        let model = couples::Entity::find()
            .filter(
                Condition::any()
                    .add(couples::Column::User1Id.eq(user_id))
                    .add(couples::Column::User2Id.eq(user_id)),
            )
            .one(&self.db)
            .await
            .map_err(|e| map_db_err(e, "find couple by user"))?;
        Ok(model.map(couple_from_model))
    }

    async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<bool, PartnersServiceError> {
        let result = couples::Entity::delete_many()
            .filter(couples::Column::Id.eq(id))
            .filter(
                Condition::any()
                    .add(couples::Column::User1Id.eq(user_id))
                    .add(couples::Column::User2Id.eq(user_id)),
            )
            .exec(&self.db)
            .await
            .map_err(|e| map_db_err(e, "delete couple"))?;
        Ok(result.rows_affected > 0)
    }
}

fn couple_from_model(model: couples::Model) -> Couple {
    Couple {
        id: model.id,
        user1_id: model.user1_id,
        user2_id: model.user2_id,
        relationship_status: model.relationship_status,
        connected_at: model.connected_at,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Notification repository ──────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbNotificationRepository {
    pub db: DatabaseConnection,
}

impl NotificationRepository for DbNotificationRepository {
    async fn create(&self, notification: &Notification) -> Result<(), PartnersServiceError> {
        notifications::ActiveModel {
            id: Set(notification.id),
            user_id: Set(notification.user_id),
            kind: Set(notification.kind.clone()),
            title: Set(notification.title.clone()),
            message: Set(notification.message.clone()),
            related_entity_type: Set(notification.related_entity_type.clone()),
            related_entity_id: Set(notification.related_entity_id.clone()),
            is_read: Set(notification.is_read),
            created_at: Set(notification.created_at),
        }
        .insert(&self.db)
        .await
        .map_err(|e| map_db_err(e, "create notification"))?;
        Ok(())
    }

    async fn list(
        &self,
        user_id: Uuid,
        unread_only: bool,
        page: PageRequest,
    ) -> Result<Vec<Notification>, PartnersServiceError> {
        let clamped = page.clamped();
        let mut query =
            notifications::Entity::find().filter(notifications::Column::UserId.eq(user_id));
        if unread_only {
            query = query.filter(notifications::Column::IsRead.eq(false));
        }
        let models = query
            .order_by_desc(notifications::Column::CreatedAt)
            .offset(page.offset())
            .limit(clamped.per_page as u64)
            .all(&self.db)
            .await
            .map_err(|e| map_db_err(e, "list notifications"))?;
        Ok(models.into_iter().map(notification_from_model).collect())
    }

    async fn mark_read(&self, id: Uuid, user_id: Uuid) -> Result<bool, PartnersServiceError> {
        let result = notifications::Entity::update_many()
            .col_expr(notifications::Column::IsRead, Expr::value(true))
            .filter(notifications::Column::Id.eq(id))
            .filter(notifications::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(|e| map_db_err(e, "mark notification read"))?;
        Ok(result.rows_affected > 0)
    }
}

fn notification_from_model(model: notifications::Model) -> Notification {
    Notification {
        id: model.id,
        user_id: model.user_id,
        kind: model.kind,
        title: model.title,
        message: model.message,
        related_entity_type: model.related_entity_type,
        related_entity_id: model.related_entity_id,
        is_read: model.is_read,
        created_at: model.created_at,
    }
}
