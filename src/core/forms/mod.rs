pub mod form_schema;

pub use form_schema::{extract, field, FieldErrors, FieldKind, UploadedFile, FORM_SCHEMA};
