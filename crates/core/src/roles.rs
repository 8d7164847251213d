//! Well-known role name constants.
//!
//! These must match the `users.role` CHECK constraint in
//! `20260301000001_create_schema.sql`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_MANAGER: &str = "manager";
pub const ROLE_EXTERMINATOR: &str = "exterminator";
