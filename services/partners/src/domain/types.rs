use chrono::{DateTime, Utc};
use uuid::Uuid;

/// How an invitation addresses its recipient: by email, or by a short code
/// handed over out-of-band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvitationKind {
    Email,
    Code,
}

impl InvitationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Code => "code",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "email" => Some(Self::Email),
            "code" => Some(Self::Code),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Declined,
    Expired,
}

impl InvitationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Declined => "declined",
            Self::Expired => "expired",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "accepted" => Some(Self::Accepted),
            "declined" => Some(Self::Declined),
            "expired" => Some(Self::Expired),
            _ => None,
        }
    }
}

/// An offer to link two accounts as partners.
///
/// Exactly one of `invitee_email`/`code` is set, matching `kind`. Expiry is
/// lazy: a row may still read `pending` in storage after `expires_at` has
/// passed, so liveness checks go through [`Invitation::is_active`].
#[derive(Debug, Clone)]
pub struct Invitation {
    pub id: Uuid,
    pub inviter_id: Uuid,
    pub invitee_email: Option<String>,
    pub code: Option<String>,
    pub kind: InvitationKind,
    pub status: InvitationStatus,
    pub expires_at: DateTime<Utc>,
    pub accepted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Invitation {
    /// Pending and not past its expiry. An expired-but-unmarked row is never
    /// treated as active.
    pub fn is_active(&self) -> bool {
        self.status == InvitationStatus::Pending && self.expires_at > Utc::now()
    }
}

/// Two linked user accounts.
#[derive(Debug, Clone)]
pub struct Couple {
    pub id: Uuid,
    pub user1_id: Uuid,
    pub user2_id: Uuid,
    pub relationship_status: String,
    pub connected_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Couple {
    /// The other member of the couple, or `None` if `user_id` is not a member.
    pub fn partner_of(&self, user_id: Uuid) -> Option<Uuid> {
        if self.user1_id == user_id {
            Some(self.user2_id)
        } else if self.user2_id == user_id {
            Some(self.user1_id)
        } else {
            None
        }
    }
}

/// In-app notification row. Consumed read-only by the routing table.
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: String,
    pub title: String,
    pub message: String,
    pub related_entity_type: Option<String>,
    pub related_entity_id: Option<String>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// A user's connection state. Exactly one of the four applies; resolution
/// order is couple, then sent, then received.
#[derive(Debug, Clone)]
pub enum ConnectionState {
    Connected(Couple),
    PendingSent(Invitation),
    PendingReceived(Invitation),
    Unconnected,
}

impl ConnectionState {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Connected(_) => "connected",
            Self::PendingSent(_) => "pending_sent",
            Self::PendingReceived(_) => "pending_received",
            Self::Unconnected => "unconnected",
        }
    }
}

/// Email invitations live for a week.
pub const EMAIL_INVITATION_TTL_SECS: i64 = 7 * 24 * 60 * 60;

/// Code invitations are handed over in person; one day is plenty.
pub const CODE_INVITATION_TTL_SECS: i64 = 24 * 60 * 60;

/// Invitation code length in characters.
pub const INVITATION_CODE_LEN: usize = 8;
