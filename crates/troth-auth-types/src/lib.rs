//! Types for the identity the gateway injects into service requests.

pub mod identity;
