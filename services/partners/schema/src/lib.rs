//! sea-orm entities owned by the partners service.

pub mod couples;
pub mod notifications;
pub mod partner_invitations;
