use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub display_name: String,
}

impl NewUser {
    /// User named after a handle, with the `<handle>@<handle>.com` address
    /// the gallery fixtures use.
    pub fn from_handle(handle: &str) -> Self {
        Self {
            username: handle.to_string(),
            email: format!("{handle}@{handle}.com"),
            display_name: handle.to_string(),
        }
    }
}
