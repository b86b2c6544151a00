pub mod access;
pub mod error;
pub mod form;
pub mod service;
pub mod urls;

pub use access::{authorize_mutation, MutationGrant};
pub use error::ProjectError;
pub use form::{CleanedProject, FormErrors, ProjectForm};
pub use service::{Mutation, ProjectService, ProjectView};
pub use urls::Locations;
