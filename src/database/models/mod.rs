pub mod project;
pub mod user;

pub use project::{ButterData, NewProject, Project, ProjectStatus, ProjectSummary};
pub use user::{NewUser, User};
