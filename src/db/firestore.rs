// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Collections:
//! - `users/{id}`: the full user document
//! - `emails/{key}`: uniqueness claim pointing at the owning user id

use crate::db::{collections, StoreError, UserStore};
use crate::models::{EmailClaim, User};
use async_trait::async_trait;
use firestore::errors::FirestoreError;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, StoreError> {
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| StoreError::Backend(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, StoreError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            StoreError::Backend(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create an offline client: every operation returns a backend error.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    fn get_client(&self) -> Result<&firestore::FirestoreDb, StoreError> {
        self.client
            .as_ref()
            .ok_or_else(|| StoreError::Backend("Database not connected (offline mode)".to_string()))
    }

    fn claim_doc_id(email: &str) -> String {
        urlencoding::encode(&User::email_key(email)).into_owned()
    }

    async fn get_claim(&self, email: &str) -> Result<Option<EmailClaim>, StoreError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::EMAILS)
            .obj()
            .one(&Self::claim_doc_id(email))
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    async fn release_claim(&self, email: &str) -> Result<(), StoreError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collections::EMAILS)
            .document_id(Self::claim_doc_id(email))
            .execute()
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))
    }
}

#[async_trait]
impl UserStore for FirestoreDb {
    async fn get_user(&self, user_id: &str) -> Result<Option<User>, StoreError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(user_id)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        match self.get_claim(email).await? {
            Some(claim) => self.get_user(&claim.user_id).await,
            None => Ok(None),
        }
    }

    /// Claims the email with a create-only write, then writes the user.
    ///
    /// Firestore rejects the create with ALREADY_EXISTS when the claim is
    /// present, which surfaces as a data conflict.
    async fn insert_user(&self, user: &User) -> Result<(), StoreError> {
        let claim = EmailClaim {
            user_id: user.id.clone(),
        };

        let inserted: Result<EmailClaim, FirestoreError> = self
            .get_client()?
            .fluent()
            .insert()
            .into(collections::EMAILS)
            .document_id(Self::claim_doc_id(&user.email))
            .object(&claim)
            .execute()
            .await;

        match inserted {
            Ok(_) => {}
            Err(FirestoreError::DataConflictError(_)) => return Err(StoreError::DuplicateEmail),
            Err(e) => return Err(StoreError::Backend(e.to_string())),
        }

        if let Err(e) = self.save_user(user).await {
            if let Err(release_err) = self.release_claim(&user.email).await {
                tracing::error!(
                    user_id = %user.id,
                    error = %release_err,
                    "Failed to release email claim after user write failure"
                );
            }
            return Err(e);
        }

        tracing::debug!(user_id = %user.id, "User document created");
        Ok(())
    }

    async fn save_user(&self, user: &User) -> Result<(), StoreError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(&user.id)
            .object(user)
            .execute()
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(())
    }
}
