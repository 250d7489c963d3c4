use sea_orm::DatabaseConnection;

use crate::infra::db::{DbCoupleRepository, DbInvitationRepository, DbNotificationRepository};

/// Shared application state passed to every handler via axum `State`.
///
/// The database client is constructed once in `main` and injected here;
/// nothing holds it globally.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

impl AppState {
    pub fn invitation_repo(&self) -> DbInvitationRepository {
        DbInvitationRepository {
            db: self.db.clone(),
        }
    }

    pub fn couple_repo(&self) -> DbCoupleRepository {
        DbCoupleRepository {
            db: self.db.clone(),
        }
    }

    pub fn notification_repo(&self) -> DbNotificationRepository {
        DbNotificationRepository {
            db: self.db.clone(),
        }
    }
}
