//! In-process user store for local development and tests.

use crate::db::{StoreError, UserStore};
use crate::models::User;
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

/// User documents held in memory. Data is lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    users: DashMap<String, User>,
    /// Normalized email -> user id
    emails: DashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn get_user(&self, user_id: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.get(user_id).map(|entry| entry.value().clone()))
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user_id = match self.emails.get(&User::email_key(email)) {
            Some(entry) => entry.value().clone(),
            None => return Ok(None),
        };
        self.get_user(&user_id).await
    }

    async fn insert_user(&self, user: &User) -> Result<(), StoreError> {
        match self.emails.entry(User::email_key(&user.email)) {
            Entry::Occupied(_) => Err(StoreError::DuplicateEmail),
            Entry::Vacant(slot) => {
                slot.insert(user.id.clone());
                self.users.insert(user.id.clone(), user.clone());
                Ok(())
            }
        }
    }

    async fn save_user(&self, user: &User) -> Result<(), StoreError> {
        self.users.insert(user.id.clone(), user.clone());
        Ok(())
    }
}
