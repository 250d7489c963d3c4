use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use troth_auth_types::identity::IdentityHeaders;
use troth_domain::pagination::PageRequest;

use crate::domain::routes::resolve_route;
use crate::domain::types::Notification;
use crate::error::PartnersServiceError;
use crate::state::AppState;
use crate::usecase::notification::{GetNotificationsUseCase, MarkNotificationReadUseCase};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct NotificationResponse {
    pub id: String,
    pub kind: String,
    pub title: String,
    pub message: String,
    /// Navigable target resolved from the routing table.
    pub route: String,
    pub related_entity_type: Option<String>,
    pub related_entity_id: Option<String>,
    pub is_read: bool,
    #[serde(serialize_with = "troth_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Notification> for NotificationResponse {
    fn from(notification: Notification) -> Self {
        let route = resolve_route(&notification);
        Self {
            id: notification.id.to_string(),
            kind: notification.kind,
            title: notification.title,
            message: notification.message,
            route,
            related_entity_type: notification.related_entity_type,
            related_entity_id: notification.related_entity_id,
            is_read: notification.is_read,
            created_at: notification.created_at,
        }
    }
}

// ── Query params ─────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct NotificationListQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
    #[serde(default)]
    pub unread_only: bool,
}

// ── GET /partners/@me/notifications ──────────────────────────────────────────

pub async fn get_notifications(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Query(query): Query<NotificationListQuery>,
) -> Result<Json<Vec<NotificationResponse>>, PartnersServiceError> {
    let page = PageRequest {
        per_page: query.per_page.unwrap_or(20),
        page: query.page.unwrap_or(1),
    };
    let usecase = GetNotificationsUseCase {
        notifications: state.notification_repo(),
    };
    let notifications = usecase
        .execute(identity.user_id, query.unread_only, page)
        .await?;
    Ok(Json(
        notifications
            .into_iter()
            .map(NotificationResponse::from)
            .collect(),
    ))
}

// ── POST /partners/@me/notifications/{id}/read ───────────────────────────────

pub async fn mark_notification_read(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, PartnersServiceError> {
    let usecase = MarkNotificationReadUseCase {
        notifications: state.notification_repo(),
    };
    usecase.execute(identity.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
