use axum::{
    Router,
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;

use troth_core::health::{healthz, readyz};
use troth_core::middleware::request_id_layer;

use crate::handlers::{
    invitation::{
        accept_invitation, cancel_invitation, generate_invitation_code, get_received_invitations,
        get_sent_invitations, send_invitation,
    },
    notification::{get_notifications, mark_notification_read},
    partner::{disconnect_partner, get_connection},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Connection state
        .route("/partners/@me/connection", get(get_connection))
        .route("/partners/@me/partner", delete(disconnect_partner))
        // Invitations
        .route("/partners/@me/invitations", post(send_invitation))
        .route(
            "/partners/@me/invitations/code",
            post(generate_invitation_code),
        )
        .route("/partners/@me/invitations/sent", get(get_sent_invitations))
        .route(
            "/partners/@me/invitations/received",
            get(get_received_invitations),
        )
        .route("/partners/@me/invitations/accept", post(accept_invitation))
        .route("/partners/@me/invitations/{id}", delete(cancel_invitation))
        // Notifications
        .route("/partners/@me/notifications", get(get_notifications))
        .route(
            "/partners/@me/notifications/{id}/read",
            post(mark_notification_read),
        )
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
