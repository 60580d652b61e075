//! User lookup and creation over the document store.

use std::sync::Arc;

use crate::db::UserStore;
use crate::error::{AppError, Result};
use crate::models::{NewUser, User};

/// Finds, creates and saves user documents.
#[derive(Clone)]
pub struct UserDirectory {
    store: Arc<dyn UserStore>,
}

impl UserDirectory {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Load a user by id. A missing document is `UserNotFound`.
    pub async fn lookup_by_id(&self, user_id: &str) -> Result<User> {
        self.store
            .get_user(user_id)
            .await?
            .ok_or(AppError::UserNotFound)
    }

    /// Load a user by email. A missing document is `UserNotFound`.
    pub async fn lookup_by_email(&self, email: &str) -> Result<User> {
        self.store
            .find_user_by_email(email)
            .await?
            .ok_or(AppError::UserNotFound)
    }

    /// Create a user with empty label and habit lists.
    ///
    /// Fails with `DuplicateEmail` when the address is already registered.
    pub async fn create(&self, new_user: NewUser) -> Result<User> {
        let user = User::from_new(new_user);
        self.store.insert_user(&user).await?;
        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Persist the full document.
    pub async fn save(&self, user: &User) -> Result<()> {
        Ok(self.store.save_user(user).await?)
    }
}
