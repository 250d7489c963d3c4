pub mod connection;
pub mod invitation;
pub mod notification;
