//! User model for storage and API.

use serde::{Deserialize, Serialize};

use super::Habit;

/// User document stored in Firestore.
///
/// The whole document is read and rewritten on every mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Generated UUID (also used as document ID)
    #[serde(rename = "_id")]
    pub id: String,
    /// Email address as entered at registration
    pub email: String,
    /// Argon2id PHC string
    pub password_hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default)]
    pub labels: Vec<String>,
    /// Active habits
    #[serde(default)]
    pub habits: Vec<Habit>,
    /// Trash
    #[serde(default)]
    pub deleted: Vec<Habit>,
    /// When the user registered (RFC 3339)
    pub created_at: String,
}

/// Fields needed to create a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl User {
    /// Materialize a new user with empty lists.
    pub fn from_new(new_user: NewUser) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            email: new_user.email,
            password_hash: new_user.password_hash,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            labels: Vec::new(),
            habits: Vec::new(),
            deleted: Vec::new(),
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Key used to enforce email uniqueness.
    pub fn email_key(email: &str) -> String {
        email.trim().to_lowercase()
    }
}

/// Uniqueness claim stored under the normalized email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailClaim {
    pub user_id: String,
}

/// User as returned to clients: everything except the password hash.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub labels: Vec<String>,
    pub habits: Vec<Habit>,
    pub deleted: Vec<Habit>,
    pub created_at: String,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            labels: user.labels,
            habits: user.habits,
            deleted: user.deleted,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_omits_password_hash() {
        let user = User::from_new(NewUser {
            email: "a@x.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            first_name: Some("Ada".to_string()),
            last_name: None,
        });

        let json = serde_json::to_value(UserView::from(user)).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert_eq!(json["firstName"], "Ada");
        assert_eq!(json["habits"], serde_json::json!([]));
    }

    #[test]
    fn test_email_key_normalizes() {
        assert_eq!(User::email_key("  A@X.com "), "a@x.com");
    }
}
