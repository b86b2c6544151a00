use url::Url;
use uuid::Uuid;

/// Builds author-facing and public locations for projects.
#[derive(Debug, Clone)]
pub struct Locations {
    site: Url,
}

impl Locations {
    pub fn new(site_url: &str) -> Result<Self, url::ParseError> {
        let site = Url::parse(site_url)?;
        if site.cannot_be_a_base() {
            return Err(url::ParseError::RelativeUrlWithCannotBeABaseBase);
        }
        Ok(Self { site })
    }

    /// Where the author reopens the project in the editor.
    pub fn editor_path(&self, id: Uuid) -> String {
        format!("/editor/{id}/")
    }

    /// Public page of the project, relative to the site.
    pub fn project_path(&self, id: Uuid) -> String {
        format!("/project/{id}/")
    }

    /// Public page of the project including the site origin.
    pub fn public_url(&self, id: Uuid) -> String {
        let mut url = self.site.clone();
        let base = self.site.path().trim_end_matches('/');
        url.set_path(&format!("{base}{}", self.project_path(id)));
        url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_url_includes_site_origin() {
        let locations = Locations::new("https://popcorn.example.org").unwrap();
        let id = Uuid::new_v4();
        assert_eq!(
            locations.public_url(id),
            format!("https://popcorn.example.org/project/{id}/")
        );
    }

    #[test]
    fn public_url_keeps_site_prefix() {
        let locations = Locations::new("https://example.org/gallery/").unwrap();
        let id = Uuid::new_v4();
        assert_eq!(
            locations.public_url(id),
            format!("https://example.org/gallery/project/{id}/")
        );
    }

    #[test]
    fn editor_and_public_paths_differ() {
        let locations = Locations::new("http://localhost:8000").unwrap();
        let id = Uuid::new_v4();
        assert_ne!(locations.editor_path(id), locations.project_path(id));
    }

    #[test]
    fn rejects_unusable_site_url() {
        assert!(Locations::new("not a url").is_err());
        assert!(Locations::new("mailto:someone@example.org").is_err());
    }
}
