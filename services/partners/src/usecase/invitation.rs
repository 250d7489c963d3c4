use chrono::{Duration, Utc};
use rand::RngExt;
use uuid::Uuid;

use crate::domain::repository::{CoupleRepository, InvitationRepository, NotificationRepository};
use crate::domain::types::{
    CODE_INVITATION_TTL_SECS, Couple, EMAIL_INVITATION_TTL_SECS, INVITATION_CODE_LEN, Invitation,
    InvitationKind, InvitationStatus, Notification,
};
use crate::error::PartnersServiceError;
use crate::usecase::notification::fan_out;

/// Charset for generating invitation codes (uppercase alphanumeric).
const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

fn generate_code() -> String {
    let mut rng = rand::rng();
    (0..INVITATION_CODE_LEN)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

/// Precondition shared by send and generate: the caller must be unconnected
/// with no active pending sent invitation.
///
/// Checked before insert at the application layer only, so a concurrent
/// double-submission can leave two pending rows. That is accepted: couple
/// uniqueness is guarded by the conditional accept, and the losing row is
/// reaped by lazy expiry.
async fn ensure_can_invite<I, C>(
    invitations: &I,
    couples: &C,
    user_id: Uuid,
) -> Result<(), PartnersServiceError>
where
    I: InvitationRepository,
    C: CoupleRepository,
{
    if couples.find_by_user(user_id).await?.is_some() {
        return Err(PartnersServiceError::StateConflict);
    }
    if !invitations.list_sent_pending(user_id).await?.is_empty() {
        return Err(PartnersServiceError::StateConflict);
    }
    Ok(())
}

fn notification_for_inviter(invitation: &Invitation, kind: &str, title: &str, message: &str) -> Notification {
    Notification {
        id: Uuid::new_v4(),
        user_id: invitation.inviter_id,
        kind: kind.to_owned(),
        title: title.to_owned(),
        message: message.to_owned(),
        related_entity_type: Some("partner_invitation".to_owned()),
        related_entity_id: Some(invitation.id.to_string()),
        is_read: false,
        created_at: Utc::now(),
    }
}

// ── SendEmailInvitation ──────────────────────────────────────────────────────

pub struct SendEmailInvitationInput {
    pub invitee_email: String,
}

pub struct SendEmailInvitationUseCase<I, C>
where
    I: InvitationRepository,
    C: CoupleRepository,
{
    pub invitations: I,
    pub couples: C,
}

impl<I, C> SendEmailInvitationUseCase<I, C>
where
    I: InvitationRepository,
    C: CoupleRepository,
{
    pub async fn execute(
        &self,
        user_id: Uuid,
        user_email: &str,
        input: SendEmailInvitationInput,
    ) -> Result<Invitation, PartnersServiceError> {
        let invitee_email = input.invitee_email.trim().to_ascii_lowercase();
        if invitee_email.is_empty() || !invitee_email.contains('@') {
            return Err(PartnersServiceError::InvalidInput);
        }
        if invitee_email == user_email {
            return Err(PartnersServiceError::StateConflict);
        }

        ensure_can_invite(&self.invitations, &self.couples, user_id).await?;

        let now = Utc::now();
        let invitation = Invitation {
            id: Uuid::new_v4(),
            inviter_id: user_id,
            invitee_email: Some(invitee_email),
            code: None,
            kind: InvitationKind::Email,
            status: InvitationStatus::Pending,
            expires_at: now + Duration::seconds(EMAIL_INVITATION_TTL_SECS),
            accepted_at: None,
            created_at: now,
            updated_at: now,
        };
        self.invitations.create(&invitation).await?;
        Ok(invitation)
    }
}

// ── GenerateInvitationCode ───────────────────────────────────────────────────

pub struct GenerateInvitationCodeUseCase<I, C>
where
    I: InvitationRepository,
    C: CoupleRepository,
{
    pub invitations: I,
    pub couples: C,
}

impl<I, C> GenerateInvitationCodeUseCase<I, C>
where
    I: InvitationRepository,
    C: CoupleRepository,
{
    pub async fn execute(&self, user_id: Uuid) -> Result<Invitation, PartnersServiceError> {
        ensure_can_invite(&self.invitations, &self.couples, user_id).await?;

        let now = Utc::now();
        let invitation = Invitation {
            id: Uuid::new_v4(),
            inviter_id: user_id,
            invitee_email: None,
            code: Some(generate_code()),
            kind: InvitationKind::Code,
            status: InvitationStatus::Pending,
            expires_at: now + Duration::seconds(CODE_INVITATION_TTL_SECS),
            accepted_at: None,
            created_at: now,
            updated_at: now,
        };
        self.invitations.create(&invitation).await?;
        Ok(invitation)
    }
}

// ── GetSentInvitations / GetReceivedInvitations ──────────────────────────────

pub struct GetSentInvitationsUseCase<I: InvitationRepository> {
    pub invitations: I,
}

impl<I: InvitationRepository> GetSentInvitationsUseCase<I> {
    pub async fn execute(&self, user_id: Uuid) -> Result<Vec<Invitation>, PartnersServiceError> {
        self.invitations.list_sent_pending(user_id).await
    }
}

pub struct GetReceivedInvitationsUseCase<I: InvitationRepository> {
    pub invitations: I,
}

impl<I: InvitationRepository> GetReceivedInvitationsUseCase<I> {
    pub async fn execute(
        &self,
        user_email: &str,
    ) -> Result<Vec<Invitation>, PartnersServiceError> {
        self.invitations.list_received_pending(user_email).await
    }
}

// ── AcceptInvitation ─────────────────────────────────────────────────────────

pub enum AcceptInvitationInput {
    ById(Uuid),
    ByCode(String),
}

pub struct AcceptInvitationUseCase<I, C, N>
where
    I: InvitationRepository,
    C: CoupleRepository,
    N: NotificationRepository,
{
    pub invitations: I,
    pub couples: C,
    pub notifications: N,
}

impl<I, C, N> AcceptInvitationUseCase<I, C, N>
where
    I: InvitationRepository,
    C: CoupleRepository,
    N: NotificationRepository,
{
    pub async fn execute(
        &self,
        user_id: Uuid,
        user_email: &str,
        input: AcceptInvitationInput,
    ) -> Result<Couple, PartnersServiceError> {
        let invitation = match input {
            AcceptInvitationInput::ById(id) => self.invitations.find_by_id(id).await?,
            AcceptInvitationInput::ByCode(code) => {
                let code = code.trim().to_ascii_uppercase();
                if code.is_empty() {
                    return Err(PartnersServiceError::InvalidInput);
                }
                self.invitations.find_by_code(&code).await?
            }
        }
        .ok_or(PartnersServiceError::NotFound)?;

        if invitation.inviter_id == user_id {
            return Err(PartnersServiceError::StateConflict);
        }
        // Email invitations are addressed; non-addressees cannot even observe them.
        if invitation.kind == InvitationKind::Email
            && invitation.invitee_email.as_deref() != Some(user_email)
        {
            return Err(PartnersServiceError::NotFound);
        }
        if !invitation.is_active() {
            return Err(PartnersServiceError::AlreadyProcessed);
        }
        if self.couples.find_by_user(user_id).await?.is_some() {
            return Err(PartnersServiceError::StateConflict);
        }
        if self.couples.find_by_user(invitation.inviter_id).await?.is_some() {
            return Err(PartnersServiceError::StateConflict);
        }

        let now = Utc::now();
        let couple = Couple {
            id: Uuid::new_v4(),
            user1_id: invitation.inviter_id,
            user2_id: user_id,
            relationship_status: "engaged".to_owned(),
            connected_at: now,
            created_at: now,
            updated_at: now,
        };

        // The conditional update inside accept_and_link is the race guard:
        // of two concurrent accepts, exactly one sees a row flip.
        let linked = self
            .invitations
            .accept_and_link(invitation.id, now, &couple)
            .await?;
        if !linked {
            return Err(PartnersServiceError::AlreadyProcessed);
        }

        fan_out(
            &self.notifications,
            notification_for_inviter(
                &invitation,
                "invitation_accepted",
                "Invitation accepted",
                "Your partner invitation was accepted.",
            ),
        )
        .await;

        Ok(couple)
    }
}

// ── CancelInvitation ─────────────────────────────────────────────────────────

/// Inviter-side cancel (deletes the pending row) or recipient-side decline
/// (marks it declined and notifies the inviter). Callers who are neither
/// see `NotFound`.
pub struct CancelInvitationUseCase<I, N>
where
    I: InvitationRepository,
    N: NotificationRepository,
{
    pub invitations: I,
    pub notifications: N,
}

impl<I, N> CancelInvitationUseCase<I, N>
where
    I: InvitationRepository,
    N: NotificationRepository,
{
    pub async fn execute(
        &self,
        user_id: Uuid,
        user_email: &str,
        id: Uuid,
    ) -> Result<(), PartnersServiceError> {
        let invitation = self
            .invitations
            .find_by_id(id)
            .await?
            .ok_or(PartnersServiceError::NotFound)?;

        if invitation.inviter_id == user_id {
            let deleted = self.invitations.delete_pending(id, user_id).await?;
            if !deleted {
                return Err(PartnersServiceError::AlreadyProcessed);
            }
            return Ok(());
        }

        if invitation.invitee_email.as_deref() == Some(user_email) {
            if !invitation.is_active() {
                return Err(PartnersServiceError::AlreadyProcessed);
            }
            let declined = self.invitations.mark_declined(id).await?;
            if !declined {
                return Err(PartnersServiceError::AlreadyProcessed);
            }
            fan_out(
                &self.notifications,
                notification_for_inviter(
                    &invitation,
                    "invitation_declined",
                    "Invitation declined",
                    "Your partner invitation was declined.",
                ),
            )
            .await;
            return Ok(());
        }

        Err(PartnersServiceError::NotFound)
    }
}
