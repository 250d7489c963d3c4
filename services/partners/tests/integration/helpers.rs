use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use troth_domain::pagination::PageRequest;
use troth_partners::domain::repository::{
    CoupleRepository, InvitationRepository, NotificationRepository,
};
use troth_partners::domain::types::{
    Couple, Invitation, InvitationKind, InvitationStatus, Notification,
};
use troth_partners::error::PartnersServiceError;

/// In-memory store implementing all three repository traits.
///
/// Conditional transitions run under one mutex, mirroring the store's
/// pending-only conditional updates: of two racing accepts exactly one
/// observes a row flip.
#[derive(Clone, Default)]
pub struct MockStore {
    pub invitations: Arc<Mutex<Vec<Invitation>>>,
    pub couples: Arc<Mutex<Vec<Couple>>>,
    pub notifications: Arc<Mutex<Vec<Notification>>>,
    /// Make notification inserts fail, to exercise fan-out swallowing.
    pub fail_notification_create: bool,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_failing_notifications() -> Self {
        Self {
            fail_notification_create: true,
            ..Self::default()
        }
    }

    pub fn insert_invitation(&self, invitation: Invitation) {
        self.invitations.lock().unwrap().push(invitation);
    }

    pub fn insert_couple(&self, couple: Couple) {
        self.couples.lock().unwrap().push(couple);
    }

    pub fn invitation_by_id(&self, id: Uuid) -> Option<Invitation> {
        self.invitations
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.id == id)
            .cloned()
    }

    pub fn couple_count(&self) -> usize {
        self.couples.lock().unwrap().len()
    }

    pub fn notifications_for(&self, user_id: Uuid) -> Vec<Notification> {
        self.notifications
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect()
    }
}

impl InvitationRepository for MockStore {
    async fn create(&self, invitation: &Invitation) -> Result<(), PartnersServiceError> {
        self.invitations.lock().unwrap().push(invitation.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Invitation>, PartnersServiceError> {
        Ok(self.invitation_by_id(id))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Invitation>, PartnersServiceError> {
        Ok(self
            .invitations
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.code.as_deref() == Some(code))
            .cloned())
    }

    async fn list_sent_pending(
        &self,
        inviter_id: Uuid,
    ) -> Result<Vec<Invitation>, PartnersServiceError> {
        Ok(self
            .invitations
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.inviter_id == inviter_id && i.is_active())
            .cloned()
            .collect())
    }

    async fn list_received_pending(
        &self,
        invitee_email: &str,
    ) -> Result<Vec<Invitation>, PartnersServiceError> {
        Ok(self
            .invitations
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.invitee_email.as_deref() == Some(invitee_email) && i.is_active())
            .cloned()
            .collect())
    }

    async fn accept_and_link(
        &self,
        invitation_id: Uuid,
        accepted_at: DateTime<Utc>,
        couple: &Couple,
    ) -> Result<bool, PartnersServiceError> {
        let mut invitations = self.invitations.lock().unwrap();
        let Some(invitation) = invitations.iter_mut().find(|i| {
            i.id == invitation_id
                && i.status == InvitationStatus::Pending
                && i.expires_at > accepted_at
        }) else {
            return Ok(false);
        };
        invitation.status = InvitationStatus::Accepted;
        invitation.accepted_at = Some(accepted_at);
        invitation.updated_at = accepted_at;
        self.couples.lock().unwrap().push(couple.clone());
        Ok(true)
    }

    async fn mark_declined(&self, id: Uuid) -> Result<bool, PartnersServiceError> {
        let mut invitations = self.invitations.lock().unwrap();
        let Some(invitation) = invitations
            .iter_mut()
            .find(|i| i.id == id && i.status == InvitationStatus::Pending)
        else {
            return Ok(false);
        };
        invitation.status = InvitationStatus::Declined;
        invitation.updated_at = Utc::now();
        Ok(true)
    }

    async fn delete_pending(
        &self,
        id: Uuid,
        inviter_id: Uuid,
    ) -> Result<bool, PartnersServiceError> {
        let mut invitations = self.invitations.lock().unwrap();
        let before = invitations.len();
        invitations.retain(|i| {
            !(i.id == id && i.inviter_id == inviter_id && i.status == InvitationStatus::Pending)
        });
        Ok(invitations.len() < before)
    }

    async fn expire_stale(&self) -> Result<u64, PartnersServiceError> {
        let now = Utc::now();
        let mut flipped = 0;
        for invitation in self.invitations.lock().unwrap().iter_mut() {
            if invitation.status == InvitationStatus::Pending && invitation.expires_at <= now {
                invitation.status = InvitationStatus::Expired;
                invitation.updated_at = now;
                flipped += 1;
            }
        }
        Ok(flipped)
    }
}

impl CoupleRepository for MockStore {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Couple>, PartnersServiceError> {
        Ok(self
            .couples
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.user1_id == user_id || c.user2_id == user_id)
            .cloned())
    }

    async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<bool, PartnersServiceError> {
        let mut couples = self.couples.lock().unwrap();
        let before = couples.len();
        couples.retain(|c| !(c.id == id && (c.user1_id == user_id || c.user2_id == user_id)));
        Ok(couples.len() < before)
    }
}

impl NotificationRepository for MockStore {
    async fn create(&self, notification: &Notification) -> Result<(), PartnersServiceError> {
        if self.fail_notification_create {
            return Err(PartnersServiceError::Internal(anyhow::anyhow!(
                "notification insert refused"
            )));
        }
        self.notifications.lock().unwrap().push(notification.clone());
        Ok(())
    }

    async fn list(
        &self,
        user_id: Uuid,
        unread_only: bool,
        page: PageRequest,
    ) -> Result<Vec<Notification>, PartnersServiceError> {
        let clamped = page.clamped();
        let mut items: Vec<Notification> = self
            .notifications
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.user_id == user_id && (!unread_only || !n.is_read))
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items
            .into_iter()
            .skip(page.offset() as usize)
            .take(clamped.per_page as usize)
            .collect())
    }

    async fn mark_read(&self, id: Uuid, user_id: Uuid) -> Result<bool, PartnersServiceError> {
        let mut notifications = self.notifications.lock().unwrap();
        let Some(notification) = notifications
            .iter_mut()
            .find(|n| n.id == id && n.user_id == user_id)
        else {
            return Ok(false);
        };
        notification.is_read = true;
        Ok(true)
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn email_invitation(inviter_id: Uuid, invitee_email: &str, ttl: Duration) -> Invitation {
    let now = Utc::now();
    Invitation {
        id: Uuid::new_v4(),
        inviter_id,
        invitee_email: Some(invitee_email.to_owned()),
        code: None,
        kind: InvitationKind::Email,
        status: InvitationStatus::Pending,
        expires_at: now + ttl,
        accepted_at: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn code_invitation(inviter_id: Uuid, code: &str, ttl: Duration) -> Invitation {
    let now = Utc::now();
    Invitation {
        id: Uuid::new_v4(),
        inviter_id,
        invitee_email: None,
        code: Some(code.to_owned()),
        kind: InvitationKind::Code,
        status: InvitationStatus::Pending,
        expires_at: now + ttl,
        accepted_at: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn couple_of(user1_id: Uuid, user2_id: Uuid) -> Couple {
    let now = Utc::now();
    Couple {
        id: Uuid::new_v4(),
        user1_id,
        user2_id,
        relationship_status: "engaged".to_owned(),
        connected_at: now,
        created_at: now,
        updated_at: now,
    }
}

pub fn notification_for(user_id: Uuid, kind: &str, created_at: DateTime<Utc>) -> Notification {
    Notification {
        id: Uuid::new_v4(),
        user_id,
        kind: kind.to_owned(),
        title: kind.to_owned(),
        message: "message".to_owned(),
        related_entity_type: None,
        related_entity_id: None,
        is_read: false,
        created_at,
    }
}
