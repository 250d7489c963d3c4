use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;

use troth_auth_types::identity::IdentityHeaders;

use crate::domain::types::{ConnectionState, Couple};
use crate::error::PartnersServiceError;
use crate::handlers::invitation::InvitationResponse;
use crate::state::AppState;
use crate::usecase::connection::{DisconnectPartnerUseCase, ResolveConnectionStateUseCase};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct CoupleResponse {
    pub id: String,
    pub user1_id: String,
    pub user2_id: String,
    pub relationship_status: String,
    #[serde(serialize_with = "troth_core::serde::to_rfc3339_ms")]
    pub connected_at: chrono::DateTime<chrono::Utc>,
}

impl From<Couple> for CoupleResponse {
    fn from(couple: Couple) -> Self {
        Self {
            id: couple.id.to_string(),
            user1_id: couple.user1_id.to_string(),
            user2_id: couple.user2_id.to_string(),
            relationship_status: couple.relationship_status,
            connected_at: couple.connected_at,
        }
    }
}

#[derive(Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ConnectionResponse {
    Connected { couple: CoupleResponse },
    PendingSent { invitation: InvitationResponse },
    PendingReceived { invitation: InvitationResponse },
    Unconnected,
}

impl From<ConnectionState> for ConnectionResponse {
    fn from(state: ConnectionState) -> Self {
        match state {
            ConnectionState::Connected(couple) => Self::Connected {
                couple: couple.into(),
            },
            ConnectionState::PendingSent(invitation) => Self::PendingSent {
                invitation: invitation.into(),
            },
            ConnectionState::PendingReceived(invitation) => Self::PendingReceived {
                invitation: invitation.into(),
            },
            ConnectionState::Unconnected => Self::Unconnected,
        }
    }
}

// ── GET /partners/@me/connection ─────────────────────────────────────────────

pub async fn get_connection(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<ConnectionResponse>, PartnersServiceError> {
    let usecase = ResolveConnectionStateUseCase {
        invitations: state.invitation_repo(),
        couples: state.couple_repo(),
    };
    let connection = usecase
        .execute(identity.user_id, &identity.user_email)
        .await?;
    Ok(Json(connection.into()))
}

// ── DELETE /partners/@me/partner ─────────────────────────────────────────────

pub async fn disconnect_partner(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<StatusCode, PartnersServiceError> {
    let usecase = DisconnectPartnerUseCase {
        couples: state.couple_repo(),
        notifications: state.notification_repo(),
    };
    usecase.execute(identity.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
