//! Multi-tenant scope resolution.
//!
//! Every report and analytics request runs under a [`TenantScope`] derived
//! from the caller's token claims. Administrators query across all
//! companies; everyone else is pinned to their own `company_id`.

use crate::error::CoreError;
use crate::roles::ROLE_ADMIN;
use crate::types::DbId;

/// The tenant boundary a query must respect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TenantScope {
    /// No tenant filter (administrators only).
    All,
    /// Restricted to a single company.
    Company(DbId),
}

/// Resolve the tenant scope for a caller.
///
/// Administrators are unscoped regardless of whether their token carries a
/// `company_id`. Any other role must carry one; a non-admin token without a
/// tenant id is rejected with [`CoreError::Forbidden`].
pub fn resolve(role: &str, company_id: Option<DbId>) -> Result<TenantScope, CoreError> {
    if role == ROLE_ADMIN {
        return Ok(TenantScope::All);
    }
    company_id
        .map(TenantScope::Company)
        .ok_or_else(|| CoreError::Forbidden("A company id is required for non-admin users".into()))
}
