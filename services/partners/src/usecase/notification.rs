use uuid::Uuid;

use troth_domain::pagination::PageRequest;

use crate::domain::repository::NotificationRepository;
use crate::domain::types::Notification;
use crate::error::PartnersServiceError;

/// Best-effort notification fan-out for the counterpart of a mutation.
///
/// The primary mutation has already committed; a fan-out failure is logged
/// and swallowed, never surfaced or rolled back.
pub(crate) async fn fan_out<N: NotificationRepository>(repo: &N, notification: Notification) {
    if let Err(e) = repo.create(&notification).await {
        tracing::warn!(
            error = %e,
            kind = %notification.kind,
            user_id = %notification.user_id,
            "notification fan-out failed"
        );
    }
}

// ── GetNotifications ─────────────────────────────────────────────────────────

pub struct GetNotificationsUseCase<N: NotificationRepository> {
    pub notifications: N,
}

impl<N: NotificationRepository> GetNotificationsUseCase<N> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        unread_only: bool,
        page: PageRequest,
    ) -> Result<Vec<Notification>, PartnersServiceError> {
        self.notifications.list(user_id, unread_only, page).await
    }
}

// ── MarkNotificationRead ─────────────────────────────────────────────────────

pub struct MarkNotificationReadUseCase<N: NotificationRepository> {
    pub notifications: N,
}

impl<N: NotificationRepository> MarkNotificationReadUseCase<N> {
    pub async fn execute(&self, user_id: Uuid, id: Uuid) -> Result<(), PartnersServiceError> {
        let marked = self.notifications.mark_read(id, user_id).await?;
        if !marked {
            return Err(PartnersServiceError::NotFound);
        }
        Ok(())
    }
}
