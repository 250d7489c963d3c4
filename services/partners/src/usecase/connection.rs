use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::{CoupleRepository, InvitationRepository, NotificationRepository};
use crate::domain::types::{ConnectionState, Notification};
use crate::error::PartnersServiceError;
use crate::usecase::notification::fan_out;

// ── ResolveConnectionState ───────────────────────────────────────────────────

/// Computes the caller's connection state from three reads: couple link,
/// sent invitations, received invitations. The four states are mutually
/// exclusive and exhaustive; resolution order is fixed.
pub struct ResolveConnectionStateUseCase<I, C>
where
    I: InvitationRepository,
    C: CoupleRepository,
{
    pub invitations: I,
    pub couples: C,
}

impl<I, C> ResolveConnectionStateUseCase<I, C>
where
    I: InvitationRepository,
    C: CoupleRepository,
{
    pub async fn execute(
        &self,
        user_id: Uuid,
        user_email: &str,
    ) -> Result<ConnectionState, PartnersServiceError> {
        // Opportunistic cleanup. The reads below filter on expires_at
        // themselves, so a failure here costs nothing.
        if let Err(e) = self.invitations.expire_stale().await {
            tracing::warn!(error = %e, "expire_stale cleanup failed");
        }

        if let Some(couple) = self.couples.find_by_user(user_id).await? {
            return Ok(ConnectionState::Connected(couple));
        }
        if let Some(sent) = self
            .invitations
            .list_sent_pending(user_id)
            .await?
            .into_iter()
            .next()
        {
            return Ok(ConnectionState::PendingSent(sent));
        }
        if let Some(received) = self
            .invitations
            .list_received_pending(user_email)
            .await?
            .into_iter()
            .next()
        {
            return Ok(ConnectionState::PendingReceived(received));
        }
        Ok(ConnectionState::Unconnected)
    }
}

// ── DisconnectPartner ────────────────────────────────────────────────────────

/// Deletes the caller's couple row. Historical invitation rows are left
/// untouched.
pub struct DisconnectPartnerUseCase<C, N>
where
    C: CoupleRepository,
    N: NotificationRepository,
{
    pub couples: C,
    pub notifications: N,
}

impl<C, N> DisconnectPartnerUseCase<C, N>
where
    C: CoupleRepository,
    N: NotificationRepository,
{
    pub async fn execute(&self, user_id: Uuid) -> Result<(), PartnersServiceError> {
        let couple = self
            .couples
            .find_by_user(user_id)
            .await?
            .ok_or(PartnersServiceError::NotFound)?;

        let deleted = self.couples.delete(couple.id, user_id).await?;
        if !deleted {
            // The partner disconnected in between.
            return Err(PartnersServiceError::AlreadyProcessed);
        }

        if let Some(partner_id) = couple.partner_of(user_id) {
            fan_out(
                &self.notifications,
                Notification {
                    id: Uuid::new_v4(),
                    user_id: partner_id,
                    kind: "partner_disconnected".to_owned(),
                    title: "Partner disconnected".to_owned(),
                    message: "Your partner link was removed.".to_owned(),
                    related_entity_type: Some("couple".to_owned()),
                    related_entity_id: Some(couple.id.to_string()),
                    is_read: false,
                    created_at: Utc::now(),
                },
            )
            .await;
        }
        Ok(())
    }
}

// ── ExpireStaleInvitations ───────────────────────────────────────────────────

/// Explicit cleanup pass marking stale pending invitations expired.
/// Best-effort maintenance; read paths never rely on it.
pub struct ExpireStaleInvitationsUseCase<I: InvitationRepository> {
    pub invitations: I,
}

impl<I: InvitationRepository> ExpireStaleInvitationsUseCase<I> {
    pub async fn execute(&self) -> Result<u64, PartnersServiceError> {
        self.invitations.expire_stale().await
    }
}
