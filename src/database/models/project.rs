use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle state of a project. Removed projects are hidden from every lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Active,
    Removed,
}

impl ProjectStatus {
    /// Integer stored in the `status` column.
    pub fn code(self) -> i16 {
        match self {
            ProjectStatus::Active => 1,
            ProjectStatus::Removed => 2,
        }
    }

    pub fn from_code(code: i16) -> Option<Self> {
        match code {
            1 => Some(ProjectStatus::Active),
            2 => Some(ProjectStatus::Removed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub author: Uuid,
    pub template: String,
    /// JSON document serialized as text, the form the editor loads.
    pub metadata: String,
    pub status: ProjectStatus,
    pub is_shared: bool,
    pub is_forkable: bool,
    pub source: Option<Uuid>,
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    pub fn is_removed(&self) -> bool {
        self.status == ProjectStatus::Removed
    }

    pub fn summary(&self) -> ProjectSummary {
        ProjectSummary {
            name: self.name.clone(),
            id: self.id,
        }
    }

    /// Representation handed to the editor after a save.
    pub fn butter_data(&self) -> ButterData {
        ButterData {
            id: self.id,
            name: self.name.clone(),
            template: self.template.clone(),
            data: self.metadata.clone(),
        }
    }
}

/// Fields of a project that does not exist yet. The store assigns
/// identity, version and timestamps on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProject {
    pub name: String,
    pub author: Uuid,
    pub template: String,
    pub metadata: String,
    pub is_forkable: bool,
    pub source: Option<Uuid>,
}

/// `{name, id}` entry of a project listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub name: String,
    pub id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ButterData {
    pub id: Uuid,
    pub name: String,
    pub template: String,
    pub data: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_round_trip() {
        for status in [ProjectStatus::Active, ProjectStatus::Removed] {
            assert_eq!(ProjectStatus::from_code(status.code()), Some(status));
        }
        assert_eq!(ProjectStatus::from_code(0), None);
    }
}
