//! Remote identity/data service adapter.
//!
//! DESIGN
//! ======
//! The registration action talks to the hosted service through the
//! [`IdentityBackend`] trait so it can be exercised against a scripted
//! backend in tests. [`supabase::SupabaseClient`] is the production
//! implementation over the Supabase admin + REST APIs.

pub mod supabase;
pub mod types;

use client::net::types::{Identity, ProfileDetails};
pub use types::{BackendError, NewIdentity};

/// Operations the registration action needs from the hosted service.
#[async_trait::async_trait]
pub trait IdentityBackend: Send + Sync {
    /// Create a credentialed identity. The returned identity may lack an id
    /// if the service misbehaves; callers must check.
    async fn create_identity(&self, request: &NewIdentity) -> Result<Identity, BackendError>;

    /// Insert one profile row and return the rows the service echoed back.
    async fn insert_profile(&self, profile: &ProfileDetails) -> Result<Vec<ProfileDetails>, BackendError>;

    /// Delete an identity by id.
    async fn delete_identity(&self, id: &str) -> Result<(), BackendError>;
}
