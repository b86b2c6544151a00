// Handlers are grouped by what they expose:
// system (public, no auth), projects and users (bearer token required under /api).
pub mod projects;
pub mod system;
pub mod users;

pub use projects::{project_add, project_detail, project_list, project_publish, project_save};
pub use system::{health, root};
pub use users::user_details;
