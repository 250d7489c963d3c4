use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use troth_auth_types::identity::IdentityHeaders;

use crate::domain::types::Invitation;
use crate::error::PartnersServiceError;
use crate::handlers::partner::CoupleResponse;
use crate::state::AppState;
use crate::usecase::invitation::{
    AcceptInvitationInput, AcceptInvitationUseCase, CancelInvitationUseCase,
    GenerateInvitationCodeUseCase, GetReceivedInvitationsUseCase, GetSentInvitationsUseCase,
    SendEmailInvitationInput, SendEmailInvitationUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct InvitationResponse {
    pub id: String,
    pub kind: &'static str,
    pub status: &'static str,
    pub invitee_email: Option<String>,
    pub code: Option<String>,
    #[serde(serialize_with = "troth_core::serde::to_rfc3339_ms")]
    pub expires_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "troth_core::serde::to_rfc3339_ms_opt")]
    pub accepted_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(serialize_with = "troth_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Invitation> for InvitationResponse {
    fn from(invitation: Invitation) -> Self {
        Self {
            id: invitation.id.to_string(),
            kind: invitation.kind.as_str(),
            status: invitation.status.as_str(),
            invitee_email: invitation.invitee_email,
            code: invitation.code,
            expires_at: invitation.expires_at,
            accepted_at: invitation.accepted_at,
            created_at: invitation.created_at,
        }
    }
}

// ── POST /partners/@me/invitations ───────────────────────────────────────────

#[derive(Deserialize)]
pub struct SendInvitationRequest {
    pub invitee_email: String,
}

pub async fn send_invitation(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<SendInvitationRequest>,
) -> Result<(StatusCode, Json<InvitationResponse>), PartnersServiceError> {
    let usecase = SendEmailInvitationUseCase {
        invitations: state.invitation_repo(),
        couples: state.couple_repo(),
    };
    let invitation = usecase
        .execute(
            identity.user_id,
            &identity.user_email,
            SendEmailInvitationInput {
                invitee_email: body.invitee_email,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(invitation.into())))
}

// ── POST /partners/@me/invitations/code ──────────────────────────────────────

pub async fn generate_invitation_code(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<InvitationResponse>), PartnersServiceError> {
    let usecase = GenerateInvitationCodeUseCase {
        invitations: state.invitation_repo(),
        couples: state.couple_repo(),
    };
    let invitation = usecase.execute(identity.user_id).await?;
    Ok((StatusCode::CREATED, Json(invitation.into())))
}

// ── GET /partners/@me/invitations/sent ───────────────────────────────────────

pub async fn get_sent_invitations(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<Vec<InvitationResponse>>, PartnersServiceError> {
    let usecase = GetSentInvitationsUseCase {
        invitations: state.invitation_repo(),
    };
    let invitations = usecase.execute(identity.user_id).await?;
    Ok(Json(
        invitations.into_iter().map(InvitationResponse::from).collect(),
    ))
}

// ── GET /partners/@me/invitations/received ───────────────────────────────────

pub async fn get_received_invitations(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<Vec<InvitationResponse>>, PartnersServiceError> {
    let usecase = GetReceivedInvitationsUseCase {
        invitations: state.invitation_repo(),
    };
    let invitations = usecase.execute(&identity.user_email).await?;
    Ok(Json(
        invitations.into_iter().map(InvitationResponse::from).collect(),
    ))
}

// ── POST /partners/@me/invitations/accept ────────────────────────────────────

/// Exactly one of `invitation_id` / `invitation_code` must be set.
#[derive(Deserialize)]
pub struct AcceptInvitationRequest {
    pub invitation_id: Option<Uuid>,
    pub invitation_code: Option<String>,
}

pub async fn accept_invitation(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<AcceptInvitationRequest>,
) -> Result<Json<CoupleResponse>, PartnersServiceError> {
    let input = match (body.invitation_id, body.invitation_code) {
        (Some(id), None) => AcceptInvitationInput::ById(id),
        (None, Some(code)) => AcceptInvitationInput::ByCode(code),
        _ => return Err(PartnersServiceError::InvalidInput),
    };
    let usecase = AcceptInvitationUseCase {
        invitations: state.invitation_repo(),
        couples: state.couple_repo(),
        notifications: state.notification_repo(),
    };
    let couple = usecase
        .execute(identity.user_id, &identity.user_email, input)
        .await?;
    Ok(Json(couple.into()))
}

// ── DELETE /partners/@me/invitations/{id} ────────────────────────────────────

pub async fn cancel_invitation(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, PartnersServiceError> {
    let usecase = CancelInvitationUseCase {
        invitations: state.invitation_repo(),
        notifications: state.notification_repo(),
    };
    usecase
        .execute(identity.user_id, &identity.user_email, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
