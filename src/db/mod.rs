//! Database layer: the user document store and its adapters.
//!
//! Writes replace whole documents. Two concurrent mutations of the same
//! user race and the last write wins; nothing here merges or retries.

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::MemoryStore;

use crate::models::User;
use async_trait::async_trait;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    /// Email uniqueness claims (keyed by normalized, url-encoded email)
    pub const EMAILS: &str = "emails";
}

/// Store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("email already registered")]
    DuplicateEmail,

    #[error("store error: {0}")]
    Backend(String),
}

/// Document store holding one document per user.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fetch a user by id.
    async fn get_user(&self, user_id: &str) -> Result<Option<User>, StoreError>;

    /// Fetch a user by email (matched on the normalized address).
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Store a new user, failing with `DuplicateEmail` if the address is taken.
    async fn insert_user(&self, user: &User) -> Result<(), StoreError>;

    /// Replace the stored document for `user.id`.
    async fn save_user(&self, user: &User) -> Result<(), StoreError>;
}
