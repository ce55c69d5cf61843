//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the HR user from a JWT Bearer token.
//! - [`rbac::RequireHr`] -- Requires the `hr` role.

pub mod auth;
pub mod rbac;
