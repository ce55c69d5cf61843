//! Authentication primitives for HR staff.
//!
//! - [`password`] -- Argon2id hashing and verification.
//! - [`jwt`] -- HS256 access-token generation and validation.

pub mod jwt;
pub mod password;

/// Role carried by every HR access token.
pub const ROLE_HR: &str = "hr";
