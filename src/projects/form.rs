use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use validator::{Validate, ValidationErrors};

use crate::config::GalleryConfig;

const REQUIRED: &str = "This field is required.";
const INVALID_JSON: &str = "Enter valid JSON.";

/// Body of a project save, as posted by the editor.
///
/// `data` is the project metadata: either a string holding a JSON
/// document, or the document itself.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ProjectForm {
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(length(min = 1, message = "This field is required."))]
    pub name: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(length(min = 1, message = "This field is required."))]
    pub template: String,

    #[serde(default)]
    pub data: Option<Value>,

    /// Version the client last saw. Saves against a newer version are rejected.
    #[serde(default)]
    pub version: Option<i64>,

    /// Only read when creating a project.
    #[serde(default)]
    pub is_forkable: Option<bool>,
}

// An explicit `null` counts as a missing field
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// A form that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedProject {
    pub name: String,
    pub template: String,
    pub metadata: String,
    pub version: Option<i64>,
    pub is_forkable: Option<bool>,
}

/// Per-field error messages, serialized as `{"field": ["message", ...]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn has(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<ValidationErrors> for FormErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut form_errors = FormErrors::default();
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors.iter() {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                form_errors.add(field.to_string(), message);
            }
        }
        form_errors
    }
}

impl std::fmt::Display for FormErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fields: Vec<&str> = self.0.keys().map(String::as_str).collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

impl ProjectForm {
    /// Validate against the gallery settings, collecting every field error.
    pub fn clean(&self, gallery: &GalleryConfig) -> Result<CleanedProject, FormErrors> {
        let trimmed = ProjectForm {
            name: self.name.trim().to_string(),
            template: self.template.trim().to_string(),
            ..self.clone()
        };

        let mut errors = match trimmed.validate() {
            Ok(()) => FormErrors::default(),
            Err(e) => FormErrors::from(e),
        };

        let name_length = trimmed.name.chars().count();
        if name_length > gallery.name_max_length {
            errors.add(
                "name",
                format!(
                    "Ensure this value has at most {} characters (it has {}).",
                    gallery.name_max_length, name_length
                ),
            );
        }

        if !trimmed.template.is_empty() && !gallery.is_known_template(&trimmed.template) {
            errors.add(
                "template",
                format!(
                    "Select a valid choice. {} is not one of the available choices.",
                    trimmed.template
                ),
            );
        }

        let metadata = match normalize_metadata(trimmed.data.as_ref()) {
            Ok(metadata) => Some(metadata),
            Err(message) => {
                errors.add("data", message);
                None
            }
        };

        match metadata {
            Some(metadata) if errors.is_empty() => Ok(CleanedProject {
                name: trimmed.name,
                template: trimmed.template,
                metadata,
                version: self.version,
                is_forkable: self.is_forkable,
            }),
            _ => Err(errors),
        }
    }
}

/// Metadata must be a JSON object or array. Strings are parsed and kept
/// verbatim, inline documents are serialized.
fn normalize_metadata(data: Option<&Value>) -> Result<String, &'static str> {
    match data {
        None | Some(Value::Null) => Err(REQUIRED),
        Some(Value::String(raw)) if raw.trim().is_empty() => Err(REQUIRED),
        Some(Value::String(raw)) => match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(_)) | Ok(Value::Array(_)) => Ok(raw.clone()),
            _ => Err(INVALID_JSON),
        },
        Some(document @ (Value::Object(_) | Value::Array(_))) => Ok(document.to_string()),
        Some(_) => Err(INVALID_JSON),
    }
}
