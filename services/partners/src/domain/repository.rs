#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use troth_domain::pagination::PageRequest;

use crate::domain::types::{Couple, Invitation, Notification};
use crate::error::PartnersServiceError;

/// Repository for partner invitations.
///
/// Every state transition is conditional on the row still being `pending`;
/// `false`/zero returns mean the race was lost, never an error.
pub trait InvitationRepository: Send + Sync {
    async fn create(&self, invitation: &Invitation) -> Result<(), PartnersServiceError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Invitation>, PartnersServiceError>;

    async fn find_by_code(&self, code: &str) -> Result<Option<Invitation>, PartnersServiceError>;

    /// Active (pending, unexpired) invitations sent by the user, newest first.
    async fn list_sent_pending(
        &self,
        inviter_id: Uuid,
    ) -> Result<Vec<Invitation>, PartnersServiceError>;

    /// Active (pending, unexpired) invitations addressed to the email, newest first.
    async fn list_received_pending(
        &self,
        invitee_email: &str,
    ) -> Result<Vec<Invitation>, PartnersServiceError>;

    /// Atomically accept the invitation and insert the couple row in one
    /// transaction. The update only touches rows still `pending` with
    /// `expires_at` in the future; returns `false` (and inserts nothing)
    /// when another session got there first.
    async fn accept_and_link(
        &self,
        invitation_id: Uuid,
        accepted_at: DateTime<Utc>,
        couple: &Couple,
    ) -> Result<bool, PartnersServiceError>;

    /// Mark a pending invitation declined. Returns `false` if it was no
    /// longer pending.
    async fn mark_declined(&self, id: Uuid) -> Result<bool, PartnersServiceError>;

    /// Delete a pending invitation, scoped to its inviter. Returns `false`
    /// if no pending row matched.
    async fn delete_pending(
        &self,
        id: Uuid,
        inviter_id: Uuid,
    ) -> Result<bool, PartnersServiceError>;

    /// Mark stale pending rows expired. Best-effort maintenance; read paths
    /// never depend on it. Returns the number of rows flipped.
    async fn expire_stale(&self) -> Result<u64, PartnersServiceError>;
}

/// Repository for couple (partner link) rows.
pub trait CoupleRepository: Send + Sync {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Couple>, PartnersServiceError>;

    /// Delete a couple row, scoped to its members. Returns `false` if the
    /// caller is not a member or the row is gone.
    async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<bool, PartnersServiceError>;
}

/// Repository for in-app notifications.
pub trait NotificationRepository: Send + Sync {
    async fn create(&self, notification: &Notification) -> Result<(), PartnersServiceError>;

    /// The user's notifications, newest first.
    async fn list(
        &self,
        user_id: Uuid,
        unread_only: bool,
        page: PageRequest,
    ) -> Result<Vec<Notification>, PartnersServiceError>;

    /// Mark a notification read, scoped to its owner. Returns `false` if no
    /// row matched.
    async fn mark_read(&self, id: Uuid, user_id: Uuid) -> Result<bool, PartnersServiceError>;
}
