use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

use crate::config::GalleryConfig;
use crate::database::models::{NewUser, Project, ProjectStatus, User};
use crate::database::{MemoryUserStore, UserStore};
use crate::projects::ProjectForm;

/// Gallery settings used across unit tests
pub fn gallery_config() -> GalleryConfig {
    GalleryConfig {
        site_url: "http://testserver".to_string(),
        templates: vec!["basic".to_string(), "base-template".to_string()],
        forkable_by_default: true,
        name_max_length: 255,
    }
}

/// Valid form for the `basic` template
pub fn project_form(name: &str, data: &str) -> ProjectForm {
    ProjectForm {
        name: name.to_string(),
        template: "basic".to_string(),
        data: Some(Value::String(data.to_string())),
        version: None,
        is_forkable: None,
    }
}

/// Stored-looking project without going through a store
pub fn project_owned_by(author: Uuid, is_forkable: bool) -> Project {
    let now = Utc::now();
    Project {
        id: Uuid::new_v4(),
        name: "Fixture".to_string(),
        author,
        template: "basic".to_string(),
        metadata: "{\"media\":[]}".to_string(),
        status: ProjectStatus::Active,
        is_shared: false,
        is_forkable,
        source: None,
        version: 1,
        created_at: now,
        updated_at: now,
    }
}

/// Helper to create users from a handle
pub async fn create_user(store: &MemoryUserStore, handle: &str) -> User {
    store
        .insert(NewUser::from_handle(handle))
        .await
        .expect("memory store insert")
}
