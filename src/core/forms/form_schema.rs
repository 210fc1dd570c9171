// The intake form, described as data.
//
// The same schema drives two things:
// 1. The client renders sections/fields from `GET /api/form-schema`.
// 2. The server extracts and validates a submission against it.
//
// Each field has a `FieldKind`, and each kind knows how to validate its input.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

const MB: usize = 1024 * 1024;

// ============================================================================
// FIELD KINDS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FieldKind {
    Text { max_len: usize },
    LongText { max_len: usize },
    Email,
    Phone,
    Url,
    Select { options: &'static [&'static str] },
    Image { max_bytes: usize, multiple: bool },
    Video { max_bytes: usize },
}

impl FieldKind {
    pub fn is_file(&self) -> bool {
        matches!(self, FieldKind::Image { .. } | FieldKind::Video { .. })
    }

    pub fn allows_multiple(&self) -> bool {
        matches!(self, FieldKind::Image { multiple: true, .. })
    }

    /// Validates an already-trimmed, non-empty text value.
    pub fn validate_text(&self, value: &str) -> Result<(), String> {
        match self {
            FieldKind::Text { max_len } | FieldKind::LongText { max_len } => {
                let len = value.chars().count();
                if len > *max_len {
                    return Err(format!("Must be at most {} characters", max_len));
                }
                Ok(())
            }
            FieldKind::Email => validate_email(value),
            FieldKind::Phone => validate_phone(value),
            FieldKind::Url => {
                if value.contains(char::is_whitespace)
                    || !(value.starts_with("https://") || value.starts_with("http://"))
                {
                    return Err("Must be a link starting with http:// or https://".to_string());
                }
                Ok(())
            }
            FieldKind::Select { options } => {
                if options.iter().any(|option| *option == value) {
                    Ok(())
                } else {
                    Err(format!("Must be one of: {}", options.join(", ")))
                }
            }
            FieldKind::Image { .. } | FieldKind::Video { .. } => {
                Err("Expected a file upload".to_string())
            }
        }
    }

    pub fn validate_file(&self, file: &UploadedFile) -> Result<(), String> {
        let (prefix, max_bytes, noun) = match self {
            FieldKind::Image { max_bytes, .. } => ("image/", *max_bytes, "an image"),
            FieldKind::Video { max_bytes } => ("video/", *max_bytes, "a video"),
            _ => return Err("Files are not accepted for this field".to_string()),
        };

        if file.bytes.is_empty() {
            return Err(format!("'{}' is empty", file.file_name));
        }
        if !file.content_type.starts_with(prefix) {
            return Err(format!("'{}' must be {}", file.file_name, noun));
        }
        if file.bytes.len() > max_bytes {
            return Err(format!(
                "'{}' is larger than {} MB",
                file.file_name,
                max_bytes / MB
            ));
        }
        Ok(())
    }
}

fn validate_email(value: &str) -> Result<(), String> {
    let invalid = || Err("Must be a valid email address".to_string());

    if value.contains(char::is_whitespace) {
        return invalid();
    }
    let Some((local, domain)) = value.split_once('@') else {
        return invalid();
    };
    if local.is_empty() || domain.contains('@') {
        return invalid();
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        return invalid();
    }
    Ok(())
}

fn validate_phone(value: &str) -> Result<(), String> {
    if !value
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '(' | ')' | '.' | ' '))
    {
        return Err("Must contain only digits, spaces and + - ( ) .".to_string());
    }
    let digits = value.chars().filter(|c| c.is_ascii_digit()).count();
    if !(7..=20).contains(&digits) {
        return Err("Must contain between 7 and 20 digits".to_string());
    }
    Ok(())
}

// ============================================================================
// SCHEMA
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Show grammar-fix / ask-AI helpers next to this field.
    pub ai_assist: bool,
}

#[derive(Debug, Serialize)]
pub struct Section {
    pub title: &'static str,
    pub fields: &'static [FieldSpec],
}

pub const DEPARTMENTS: &[&str] = &[
    "Leadership",
    "Engineering",
    "Design",
    "Marketing",
    "Sales",
    "Operations",
    "Other",
];

const fn text(name: &'static str, label: &'static str, max_len: usize, required: bool) -> FieldSpec {
    FieldSpec {
        name,
        label,
        kind: FieldKind::Text { max_len },
        required,
        ai_assist: false,
    }
}

const fn story(name: &'static str, label: &'static str, max_len: usize) -> FieldSpec {
    FieldSpec {
        name,
        label,
        kind: FieldKind::LongText { max_len },
        required: false,
        ai_assist: true,
    }
}

pub static FORM_SCHEMA: &[Section] = &[
    Section {
        title: "About you",
        fields: &[
            text("name", "Full name", 120, true),
            FieldSpec {
                name: "email",
                label: "Email",
                kind: FieldKind::Email,
                required: true,
                ai_assist: false,
            },
            FieldSpec {
                name: "phone",
                label: "Phone",
                kind: FieldKind::Phone,
                required: false,
                ai_assist: false,
            },
            text("jobTitle", "Job title", 120, false),
            FieldSpec {
                name: "department",
                label: "Department",
                kind: FieldKind::Select {
                    options: DEPARTMENTS,
                },
                required: false,
                ai_assist: false,
            },
            text("location", "Location", 120, false),
            FieldSpec {
                name: "linkedin",
                label: "LinkedIn profile",
                kind: FieldKind::Url,
                required: false,
                ai_assist: false,
            },
        ],
    },
    Section {
        title: "Your story",
        fields: &[
            story("shortBio", "Short bio (one or two sentences)", 300),
            story("fullBio", "Full bio", 3000),
            story("funFact", "A fun fact about you", 500),
            story("hobbies", "Hobbies and interests", 500),
        ],
    },
    Section {
        title: "Media",
        fields: &[
            FieldSpec {
                name: "headshot",
                label: "Headshot",
                kind: FieldKind::Image {
                    max_bytes: 15 * MB,
                    multiple: false,
                },
                required: true,
                ai_assist: false,
            },
            FieldSpec {
                name: "photos",
                label: "Additional photos",
                kind: FieldKind::Image {
                    max_bytes: 15 * MB,
                    multiple: true,
                },
                required: false,
                ai_assist: false,
            },
            FieldSpec {
                name: "video",
                label: "Intro video",
                kind: FieldKind::Video {
                    max_bytes: 150 * MB,
                },
                required: false,
                ai_assist: false,
            },
        ],
    },
    Section {
        title: "Anything else",
        fields: &[story("notes", "Anything else we should know?", 2000)],
    },
];

pub fn fields() -> impl Iterator<Item = &'static FieldSpec> {
    FORM_SCHEMA.iter().flat_map(|section| section.fields.iter())
}

pub fn field(name: &str) -> Option<&'static FieldSpec> {
    fields().find(|f| f.name == name)
}

// ============================================================================
// EXTRACTION
// ============================================================================

/// A file received from the client, fully buffered.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Form field the file was sent under.
    pub field: String,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Per-field validation messages, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl std::error::Error for FieldErrors {}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl FieldErrors {
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_insert_with(|| message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.0
    }
}

/// A submission that passed validation.
#[derive(Debug)]
pub struct ValidatedForm {
    values: HashMap<&'static str, String>,
    /// Files in schema order (headshot first).
    pub files: Vec<(&'static FieldSpec, UploadedFile)>,
}

impl ValidatedForm {
    /// Trimmed value of a text field, or "" when it was left blank.
    pub fn value(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }
}

/// Validates raw form input against [`FORM_SCHEMA`], collecting every error.
pub fn extract(
    raw: &HashMap<String, String>,
    files: Vec<UploadedFile>,
) -> Result<ValidatedForm, FieldErrors> {
    let mut errors = FieldErrors::default();
    let mut values = HashMap::new();

    let mut by_field: HashMap<String, Vec<UploadedFile>> = HashMap::new();
    for file in files {
        by_field.entry(file.field.clone()).or_default().push(file);
    }

    let mut accepted = Vec::new();

    for spec in fields() {
        if spec.kind.is_file() {
            let received = by_field.remove(spec.name).unwrap_or_default();
            if received.is_empty() {
                if spec.required {
                    errors.add(spec.name, format!("{} is required", spec.label));
                }
                continue;
            }
            if received.len() > 1 && !spec.kind.allows_multiple() {
                errors.add(spec.name, "Only one file is allowed");
                continue;
            }
            for file in received {
                match spec.kind.validate_file(&file) {
                    Ok(()) => accepted.push((spec, file)),
                    Err(message) => errors.add(spec.name, message),
                }
            }
            continue;
        }

        let value = raw.get(spec.name).map(|v| v.trim()).unwrap_or("");
        if value.is_empty() {
            if spec.required {
                errors.add(spec.name, format!("{} is required", spec.label));
            }
            continue;
        }
        match spec.kind.validate_text(value) {
            Ok(()) => {
                values.insert(spec.name, value.to_string());
            }
            Err(message) => errors.add(spec.name, message),
        }
    }

    for name in by_field.keys() {
        tracing::debug!(field = %name, "Ignoring file sent under an unknown field");
    }

    if errors.is_empty() {
        Ok(ValidatedForm {
            values,
            files: accepted,
        })
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(field: &str, name: &str) -> UploadedFile {
        UploadedFile {
            field: field.to_string(),
            file_name: name.to_string(),
            content_type: "image/jpeg".to_string(),
            bytes: vec![0xFF, 0xD8, 0xFF],
        }
    }

    fn raw(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn field_names_are_unique() {
        let mut names: Vec<&str> = fields().map(|f| f.name).collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
    }

    #[test]
    fn email_validation() {
        assert!(FieldKind::Email.validate_text("ada@example.com").is_ok());
        assert!(FieldKind::Email.validate_text("ada@sub.example.co").is_ok());
        assert!(FieldKind::Email.validate_text("ada@example").is_err());
        assert!(FieldKind::Email.validate_text("@example.com").is_err());
        assert!(FieldKind::Email.validate_text("ada@@example.com").is_err());
        assert!(FieldKind::Email.validate_text("ada @example.com").is_err());
        assert!(FieldKind::Email.validate_text("ada@example..com").is_err());
    }

    #[test]
    fn phone_validation() {
        assert!(FieldKind::Phone.validate_text("+1 (555) 123-4567").is_ok());
        assert!(FieldKind::Phone.validate_text("12345").is_err());
        assert!(FieldKind::Phone.validate_text("555-CALL-NOW").is_err());
    }

    #[test]
    fn select_and_url_validation() {
        let department = field("department").unwrap();
        assert!(department.kind.validate_text("Design").is_ok());
        assert!(department.kind.validate_text("Astronomy").is_err());

        assert!(FieldKind::Url.validate_text("https://linkedin.com/in/ada").is_ok());
        assert!(FieldKind::Url.validate_text("linkedin.com/in/ada").is_err());
    }

    #[test]
    fn text_length_counts_characters() {
        let kind = FieldKind::Text { max_len: 3 };
        assert!(kind.validate_text("äöü").is_ok());
        assert!(kind.validate_text("abcd").is_err());
    }

    #[test]
    fn file_validation_checks_type_and_size() {
        let kind = FieldKind::Image {
            max_bytes: 4,
            multiple: false,
        };
        assert!(kind.validate_file(&image("headshot", "me.jpg")).is_ok());

        let mut pdf = image("headshot", "cv.pdf");
        pdf.content_type = "application/pdf".to_string();
        assert!(kind.validate_file(&pdf).is_err());

        let mut big = image("headshot", "big.jpg");
        big.bytes = vec![0; 5];
        assert!(kind.validate_file(&big).is_err());

        let mut empty = image("headshot", "empty.jpg");
        empty.bytes.clear();
        assert!(kind.validate_file(&empty).is_err());
    }

    #[test]
    fn extract_reports_all_missing_required_fields() {
        let errors = extract(&raw(&[("name", "  ")]), vec![]).unwrap_err();
        assert!(errors.get("name").is_some());
        assert!(errors.get("email").is_some());
        assert!(errors.get("headshot").is_some());
        assert!(errors.get("phone").is_none());
    }

    #[test]
    fn extract_trims_and_orders_files() {
        let form = extract(
            &raw(&[("name", " Ada Lovelace "), ("email", "ada@example.com")]),
            vec![
                image("photos", "b.jpg"),
                image("headshot", "a.jpg"),
                image("photos", "c.jpg"),
            ],
        )
        .unwrap();

        assert_eq!(form.value("name"), "Ada Lovelace");
        assert_eq!(form.value("jobTitle"), "");
        let order: Vec<&str> = form.files.iter().map(|(_, f)| f.file_name.as_str()).collect();
        assert_eq!(order, vec!["a.jpg", "b.jpg", "c.jpg"]);
    }

    #[test]
    fn extract_rejects_two_headshots() {
        let errors = extract(
            &raw(&[("name", "Ada"), ("email", "ada@example.com")]),
            vec![image("headshot", "a.jpg"), image("headshot", "b.jpg")],
        )
        .unwrap_err();
        assert_eq!(errors.get("headshot"), Some("Only one file is allowed"));
    }

    #[test]
    fn schema_serializes_kind_tags() {
        let json = serde_json::to_value(FORM_SCHEMA).unwrap();
        let first = &json[0]["fields"][0];
        assert_eq!(first["name"], "name");
        assert_eq!(first["kind"]["type"], "text");
        assert_eq!(json[1]["fields"][0]["aiAssist"], true);
    }
}
