use uuid::Uuid;

use crate::database::models::{NewProject, Project};

/// What a requester may do when saving over someone's project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationGrant {
    /// Requester owns the project; update it in place.
    InPlace,
    /// Requester may save their changes into a fork of the project.
    Fork,
    Denied,
}

pub fn authorize_mutation(requester: Uuid, project: &Project) -> MutationGrant {
    if project.author == requester {
        MutationGrant::InPlace
    } else if project.is_forkable {
        MutationGrant::Fork
    } else {
        MutationGrant::Denied
    }
}

/// Copy of `source` owned by `new_owner`. The source is left untouched.
pub fn fork(source: &Project, new_owner: Uuid, is_forkable: bool) -> NewProject {
    NewProject {
        name: source.name.clone(),
        author: new_owner,
        template: source.template.clone(),
        metadata: source.metadata.clone(),
        is_forkable,
        source: Some(source.id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::project_owned_by;

    #[test]
    fn author_mutates_in_place() {
        let author = Uuid::new_v4();
        let project = project_owned_by(author, false);
        assert_eq!(authorize_mutation(author, &project), MutationGrant::InPlace);
    }

    #[test]
    fn author_is_never_forked_even_when_forkable() {
        let author = Uuid::new_v4();
        let project = project_owned_by(author, true);
        assert_eq!(authorize_mutation(author, &project), MutationGrant::InPlace);
    }

    #[test]
    fn stranger_forks_forkable_project() {
        let project = project_owned_by(Uuid::new_v4(), true);
        assert_eq!(authorize_mutation(Uuid::new_v4(), &project), MutationGrant::Fork);
    }

    #[test]
    fn stranger_is_denied_on_locked_project() {
        let project = project_owned_by(Uuid::new_v4(), false);
        assert_eq!(authorize_mutation(Uuid::new_v4(), &project), MutationGrant::Denied);
    }

    #[test]
    fn fork_copies_content_under_new_owner() {
        let source = project_owned_by(Uuid::new_v4(), true);
        let owner = Uuid::new_v4();

        let forked = fork(&source, owner, false);

        assert_eq!(forked.author, owner);
        assert_eq!(forked.name, source.name);
        assert_eq!(forked.template, source.template);
        assert_eq!(forked.metadata, source.metadata);
        assert_eq!(forked.source, Some(source.id));
        assert!(!forked.is_forkable);
    }
}
