// Submission orchestration: the only multi-step workflow in the service.
//
//   validate → client folder → dated submission folder → upload files
//            → append row → acknowledgement message
//
// Nothing is written before validation passes. After that the workflow is not
// atomic: a failed file upload only drops that file's URL from the row.

use super::submission_models::{
    Submission, SubmissionReceipt, SubmissionStatus, StoredFile, COLUMN_COUNT, FIRST_DATA_ROW,
    HEADERS, STATUS_COLUMN,
};
use crate::core::ai::DynAssistService;
use crate::core::forms::{self, FieldErrors, FieldKind, UploadedFile};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Spreadsheet error: {0}")]
    Sheet(String),

    #[error("Drive error: {0}")]
    Drive(String),
}

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<FieldErrors> for SubmissionError {
    fn from(errors: FieldErrors) -> Self {
        SubmissionError::Validation(errors)
    }
}

// ============================================================================
// STORAGE TRAITS (PORTS)
// ============================================================================

/// Range-addressed access to the submissions spreadsheet.
#[async_trait]
pub trait SheetStore: Send + Sync {
    /// Appends rows after the last non-empty row of `range`.
    async fn append(&self, range: &str, rows: Vec<Vec<String>>) -> Result<(), StoreError>;

    /// Reads the cells of `range`. Trailing empty cells may be omitted.
    async fn read(&self, range: &str) -> Result<Vec<Vec<String>>, StoreError>;

    /// Overwrites the cells of `range`.
    async fn update(&self, range: &str, rows: Vec<Vec<String>>) -> Result<(), StoreError>;
}

/// Folder and file operations on the drive.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Id of the folder called `name` directly inside `parent_id`, if any.
    async fn find_folder(&self, parent_id: &str, name: &str) -> Result<Option<String>, StoreError>;

    async fn create_folder(&self, parent_id: &str, name: &str) -> Result<String, StoreError>;

    /// Uploads the file and returns its id.
    async fn upload_file(&self, parent_id: &str, file: &UploadedFile) -> Result<String, StoreError>;

    /// Grants read access to anyone with the link.
    async fn make_public(&self, file_id: &str) -> Result<(), StoreError>;

    /// Direct parents of `id`. Unknown ids have none.
    async fn parents(&self, id: &str) -> Result<Vec<String>, StoreError>;

    fn file_url(&self, file_id: &str) -> String {
        format!("https://drive.google.com/file/d/{}/view", file_id)
    }

    fn folder_url(&self, folder_id: &str) -> String {
        format!("https://drive.google.com/drive/folders/{}", folder_id)
    }
}

#[async_trait]
impl SheetStore for Box<dyn SheetStore> {
    async fn append(&self, range: &str, rows: Vec<Vec<String>>) -> Result<(), StoreError> {
        (**self).append(range, rows).await
    }

    async fn read(&self, range: &str) -> Result<Vec<Vec<String>>, StoreError> {
        (**self).read(range).await
    }

    async fn update(&self, range: &str, rows: Vec<Vec<String>>) -> Result<(), StoreError> {
        (**self).update(range, rows).await
    }
}

#[async_trait]
impl FileStore for Box<dyn FileStore> {
    async fn find_folder(&self, parent_id: &str, name: &str) -> Result<Option<String>, StoreError> {
        (**self).find_folder(parent_id, name).await
    }

    async fn create_folder(&self, parent_id: &str, name: &str) -> Result<String, StoreError> {
        (**self).create_folder(parent_id, name).await
    }

    async fn upload_file(&self, parent_id: &str, file: &UploadedFile) -> Result<String, StoreError> {
        (**self).upload_file(parent_id, file).await
    }

    async fn make_public(&self, file_id: &str) -> Result<(), StoreError> {
        (**self).make_public(file_id).await
    }

    async fn parents(&self, id: &str) -> Result<Vec<String>, StoreError> {
        (**self).parents(id).await
    }

    fn file_url(&self, file_id: &str) -> String {
        (**self).file_url(file_id)
    }

    fn folder_url(&self, folder_id: &str) -> String {
        (**self).folder_url(folder_id)
    }
}

// ============================================================================
// CORE SERVICE
// ============================================================================

/// Ancestor levels searched when checking that an upload folder sits under the root.
const MAX_FOLDER_DEPTH: usize = 4;

pub type DynSubmissionService = SubmissionService<Box<dyn SheetStore>, Box<dyn FileStore>>;

#[derive(Debug, Clone)]
pub struct SubmissionConfig {
    /// Tab name inside the spreadsheet.
    pub sheet_name: String,
    /// Drive folder that holds one folder per submitter.
    pub root_folder_id: String,
}

pub struct SubmissionService<S: SheetStore, F: FileStore> {
    sheets: S,
    files: F,
    assist: Option<Arc<DynAssistService>>,
    config: SubmissionConfig,
}

impl<S: SheetStore, F: FileStore> SubmissionService<S, F> {
    pub fn new(
        sheets: S,
        files: F,
        assist: Option<Arc<DynAssistService>>,
        config: SubmissionConfig,
    ) -> Self {
        Self {
            sheets,
            files,
            assist,
            config,
        }
    }

    /// Validates and stores one submission.
    pub async fn submit(
        &self,
        fields: &HashMap<String, String>,
        files: Vec<UploadedFile>,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        self.submit_at(fields, files, Utc::now()).await
    }

    pub async fn submit_at(
        &self,
        fields: &HashMap<String, String>,
        files: Vec<UploadedFile>,
        now: DateTime<Utc>,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        let form = forms::extract(fields, files)?;
        let name = form.value("name");

        let client_folder = self.resolve_folder(&self.config.root_folder_id, name).await?;
        let folder_name = format!("{}-{}", slugify(name), now.format("%Y-%m-%d"));
        let submission_folder = self.files.create_folder(&client_folder, &folder_name).await?;

        tracing::info!(
            submitter = %name,
            folder = %folder_name,
            files = form.files.len(),
            "Storing submission"
        );

        let mut headshot_url = String::new();
        let mut photo_urls = Vec::new();
        let mut video_url = String::new();
        let mut failed_uploads = Vec::new();

        for (spec, file) in &form.files {
            match self.store_file(&submission_folder, file).await {
                Ok(stored) => match spec.kind {
                    FieldKind::Image { multiple: true, .. } => photo_urls.push(stored.url),
                    FieldKind::Video { .. } => video_url = stored.url,
                    _ => headshot_url = stored.url,
                },
                Err(e) => {
                    tracing::warn!(
                        file = %file.file_name,
                        field = %spec.name,
                        error = %e,
                        "Upload failed; leaving it out of the row"
                    );
                    failed_uploads.push(file.file_name.clone());
                }
            }
        }

        let submission = Submission {
            row_index: 0,
            timestamp: now.to_rfc3339_opts(SecondsFormat::Secs, true),
            name: name.to_string(),
            email: form.value("email").to_string(),
            phone: form.value("phone").to_string(),
            job_title: form.value("jobTitle").to_string(),
            department: form.value("department").to_string(),
            location: form.value("location").to_string(),
            linkedin: form.value("linkedin").to_string(),
            short_bio: form.value("shortBio").to_string(),
            full_bio: form.value("fullBio").to_string(),
            fun_fact: form.value("funFact").to_string(),
            hobbies: form.value("hobbies").to_string(),
            headshot_url,
            photo_urls,
            video_url,
            folder_url: self.files.folder_url(&submission_folder),
            notes: form.value("notes").to_string(),
            status: SubmissionStatus::New,
        };

        self.sheets
            .append(&self.range(&format!("A:{}", STATUS_COLUMN)), vec![submission.to_row()])
            .await?;

        let message = self.acknowledgement(name, form.value("jobTitle")).await;

        Ok(SubmissionReceipt {
            message,
            folder_url: submission.folder_url,
            failed_uploads,
        })
    }

    /// Uploads a single file outside of a full submission.
    pub async fn upload(
        &self,
        folder_id: Option<&str>,
        file: UploadedFile,
    ) -> Result<StoredFile, SubmissionError> {
        let kind = if file.content_type.starts_with("video/") {
            forms::field("video")
        } else {
            forms::field("photos")
        }
        .map(|spec| spec.kind);

        if let Some(kind) = kind {
            kind.validate_file(&file)
                .map_err(|message| FieldErrors::single("file", message))?;
        }

        let parent = match folder_id.map(str::trim).filter(|id| !id.is_empty()) {
            None => self.config.root_folder_id.as_str(),
            Some(id) => {
                if !self.is_inside_root(id).await? {
                    tracing::warn!(folder_id = %id, "Rejected upload outside the intake folder");
                    return Err(
                        FieldErrors::single("folderId", "Folder is not part of the intake folder")
                            .into(),
                    );
                }
                id
            }
        };

        Ok(self.store_file(parent, &file).await?)
    }

    /// All submissions, in sheet order.
    pub async fn list(&self) -> Result<Vec<Submission>, SubmissionError> {
        let range = self.range(&format!("A{}:{}", FIRST_DATA_ROW, STATUS_COLUMN));
        let rows = self.sheets.read(&range).await?;

        Ok(rows
            .iter()
            .enumerate()
            .filter(|(_, cells)| cells.iter().any(|c| !c.trim().is_empty()))
            .map(|(offset, cells)| Submission::from_row(FIRST_DATA_ROW + offset as u32, cells))
            .collect())
    }

    /// Writes the status cell of one row. Bad input is rejected before any write.
    pub async fn update_status(
        &self,
        row_index: u32,
        status: &str,
    ) -> Result<SubmissionStatus, SubmissionError> {
        let status: SubmissionStatus = status
            .parse()
            .map_err(|e: super::submission_models::InvalidStatus| {
                FieldErrors::single("status", e.to_string())
            })?;

        if row_index < FIRST_DATA_ROW {
            return Err(FieldErrors::single(
                "rowIndex",
                format!("Row index must be {} or greater", FIRST_DATA_ROW),
            )
            .into());
        }

        let range = self.range(&format!("{}{}", STATUS_COLUMN, row_index));
        self.sheets
            .update(&range, vec![vec![status.to_string()]])
            .await?;

        tracing::info!(row_index, status = %status, "Submission status updated");
        Ok(status)
    }

    /// Writes the header row if the sheet is still blank.
    pub async fn ensure_header_row(&self) -> Result<bool, SubmissionError> {
        let range = self.range(&format!("A1:{}1", STATUS_COLUMN));
        let existing = self.sheets.read(&range).await?;
        if existing.iter().flatten().any(|cell| !cell.trim().is_empty()) {
            return Ok(false);
        }

        let headers: Vec<String> = HEADERS.iter().map(|h| h.to_string()).collect();
        debug_assert_eq!(headers.len(), COLUMN_COUNT);
        self.sheets.update(&range, vec![headers]).await?;
        Ok(true)
    }

    async fn resolve_folder(&self, parent_id: &str, name: &str) -> Result<String, StoreError> {
        if let Some(id) = self.files.find_folder(parent_id, name).await? {
            return Ok(id);
        }
        tracing::info!(folder = %name, "Creating client folder");
        self.files.create_folder(parent_id, name).await
    }

    /// True when `folder_id` is the root or a descendant within `MAX_FOLDER_DEPTH` levels.
    async fn is_inside_root(&self, folder_id: &str) -> Result<bool, StoreError> {
        let root = self.config.root_folder_id.as_str();
        let mut frontier = vec![folder_id.to_string()];

        for _ in 0..=MAX_FOLDER_DEPTH {
            if frontier.iter().any(|id| id == root) {
                return Ok(true);
            }
            let mut next = Vec::new();
            for id in &frontier {
                next.extend(self.files.parents(id).await?);
            }
            if next.is_empty() {
                break;
            }
            frontier = next;
        }
        Ok(false)
    }

    async fn store_file(&self, folder_id: &str, file: &UploadedFile) -> Result<StoredFile, StoreError> {
        let file_id = self.files.upload_file(folder_id, file).await?;
        self.files.make_public(&file_id).await?;
        Ok(StoredFile {
            url: self.files.file_url(&file_id),
            file_id,
        })
    }

    async fn acknowledgement(&self, name: &str, job_title: &str) -> String {
        if let Some(assist) = &self.assist {
            match assist.acknowledge(name, job_title).await {
                Ok(message) => return message,
                Err(e) => {
                    tracing::warn!(error = %e, "Falling back to template acknowledgement")
                }
            }
        }
        fallback_acknowledgement(name)
    }

    fn range(&self, cells: &str) -> String {
        format!("'{}'!{}", self.config.sheet_name.replace('\'', "''"), cells)
    }
}

/// Static thank-you message used when no AI text is available.
pub fn fallback_acknowledgement(name: &str) -> String {
    let first_name = name.split_whitespace().next().unwrap_or("there");
    format!(
        "Thanks, {}! We've received your profile and media. Our team will review it shortly.",
        first_name
    )
}

/// Lowercase ASCII slug: alphanumeric runs joined by single dashes.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    if slug.is_empty() {
        "submission".to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ai::{AiConfig, AiMessage, AiProvider, AssistService};
    use crate::infra::memory::{InMemoryFileStore, InMemorySheetStore};
    use chrono::TimeZone;
    use std::error::Error;

    const ROOT: &str = "root-folder";

    fn config() -> SubmissionConfig {
        SubmissionConfig {
            sheet_name: "Submissions".to_string(),
            root_folder_id: ROOT.to_string(),
        }
    }

    fn service(
        assist: Option<Arc<DynAssistService>>,
    ) -> SubmissionService<InMemorySheetStore, InMemoryFileStore> {
        SubmissionService::new(
            InMemorySheetStore::new(),
            InMemoryFileStore::new(),
            assist,
            config(),
        )
    }

    fn file(field: &str, name: &str, content_type: &str) -> UploadedFile {
        UploadedFile {
            field: field.to_string(),
            file_name: name.to_string(),
            content_type: content_type.to_string(),
            bytes: vec![1, 2, 3],
        }
    }

    fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn ada() -> HashMap<String, String> {
        fields(&[
            ("name", "Ada Lovelace"),
            ("email", "ada@example.com"),
            ("jobTitle", "Analyst"),
        ])
    }

    fn may_first(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, hour, 0, 0).unwrap()
    }

    struct FixedReply(Result<&'static str, &'static str>);

    #[async_trait]
    impl AiProvider for FixedReply {
        async fn chat_complete(
            &self,
            _: &[AiMessage],
            _: &AiConfig,
        ) -> Result<String, Box<dyn Error + Send + Sync>> {
            self.0.map(str::to_string).map_err(|e| e.into())
        }
    }

    fn assist(reply: Result<&'static str, &'static str>) -> Option<Arc<DynAssistService>> {
        let provider: Box<dyn AiProvider> = Box::new(FixedReply(reply));
        Some(Arc::new(AssistService::new(provider, AiConfig::default())))
    }

    #[tokio::test]
    async fn missing_required_input_is_rejected_before_storage() {
        let service = service(None);

        for (input, files) in [
            (fields(&[("email", "ada@example.com")]), vec![file("headshot", "a.jpg", "image/jpeg")]),
            (fields(&[("name", "Ada")]), vec![file("headshot", "a.jpg", "image/jpeg")]),
            (ada(), vec![file("photos", "b.jpg", "image/jpeg")]),
        ] {
            let result = service.submit_at(&input, files, may_first(9)).await;
            assert!(matches!(result, Err(SubmissionError::Validation(_))));
        }

        assert_eq!(service.files.call_count(), 0);
        assert_eq!(service.sheets.call_count(), 0);
    }

    #[tokio::test]
    async fn stores_files_and_appends_a_full_row() {
        let service = service(None);
        let receipt = service
            .submit_at(
                &ada(),
                vec![
                    file("headshot", "a.jpg", "image/jpeg"),
                    file("photos", "b.png", "image/png"),
                    file("video", "hi.mp4", "video/mp4"),
                ],
                may_first(9),
            )
            .await
            .unwrap();

        assert!(receipt.failed_uploads.is_empty());
        assert_eq!(receipt.message, fallback_acknowledgement("Ada Lovelace"));

        let rows = service.sheets.rows();
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.len(), COLUMN_COUNT);
        assert_eq!(row[0], "2024-05-01T09:00:00Z");
        assert_eq!(row[1], "Ada Lovelace");
        assert_eq!(row[4], "Analyst");
        assert!(row[12].starts_with("https://drive.google.com/file/d/"));
        assert_eq!(row[13].lines().count(), 1);
        assert!(!row[14].is_empty());
        assert_eq!(row[15], receipt.folder_url);
        assert_eq!(row[17], "New");

        assert_eq!(service.files.public_count(), 3);
        assert!(service.files.has_folder(ROOT, "Ada Lovelace"));
    }

    #[tokio::test]
    async fn same_day_resubmission_reuses_client_folder() {
        let service = service(None);
        let headshot = || vec![file("headshot", "a.jpg", "image/jpeg")];

        service.submit_at(&ada(), headshot(), may_first(9)).await.unwrap();
        service.submit_at(&ada(), headshot(), may_first(15)).await.unwrap();

        let client_folders = service.files.folders_named(ROOT, "Ada Lovelace");
        assert_eq!(client_folders.len(), 1);

        let dated = service
            .files
            .folders_named(&client_folders[0], "ada-lovelace-2024-05-01");
        assert_eq!(dated.len(), 2);
        assert_ne!(dated[0], dated[1]);
        assert_eq!(service.sheets.rows().len(), 2);
    }

    #[tokio::test]
    async fn failed_upload_only_drops_that_url() {
        let service = service(None);
        service.files.fail_uploads_named("b.png");

        let receipt = service
            .submit_at(
                &ada(),
                vec![
                    file("headshot", "a.jpg", "image/jpeg"),
                    file("photos", "b.png", "image/png"),
                    file("photos", "c.png", "image/png"),
                ],
                may_first(9),
            )
            .await
            .unwrap();

        assert_eq!(receipt.failed_uploads, vec!["b.png".to_string()]);
        let row = &service.sheets.rows()[0];
        assert!(!row[12].is_empty());
        assert_eq!(row[13].lines().count(), 1);
    }

    #[tokio::test]
    async fn acknowledgement_uses_ai_and_falls_back_on_error() {
        let friendly = service(assist(Ok("Welcome aboard, Ada!")));
        let receipt = friendly
            .submit_at(&ada(), vec![file("headshot", "a.jpg", "image/jpeg")], may_first(9))
            .await
            .unwrap();
        assert_eq!(receipt.message, "Welcome aboard, Ada!");

        let broken = service(assist(Err("model overloaded")));
        let receipt = broken
            .submit_at(&ada(), vec![file("headshot", "a.jpg", "image/jpeg")], may_first(9))
            .await
            .unwrap();
        assert_eq!(receipt.message, "Thanks, Ada! We've received your profile and media. Our team will review it shortly.");
    }

    #[tokio::test]
    async fn sheet_failure_surfaces_as_store_error() {
        let service = service(None);
        service.sheets.fail_writes();
        let result = service
            .submit_at(&ada(), vec![file("headshot", "a.jpg", "image/jpeg")], may_first(9))
            .await;
        assert!(matches!(result, Err(SubmissionError::Store(StoreError::Sheet(_)))));
    }

    #[tokio::test]
    async fn invalid_status_is_rejected_before_any_write() {
        let service = service(None);

        let result = service.update_status(5, "Archived").await;
        match result {
            Err(SubmissionError::Validation(errors)) => assert!(errors.get("status").is_some()),
            other => panic!("expected validation error, got {:?}", other),
        }

        let result = service.update_status(1, "Reviewed").await;
        assert!(matches!(result, Err(SubmissionError::Validation(_))));
        assert_eq!(service.sheets.call_count(), 0);
    }

    #[tokio::test]
    async fn status_update_hits_the_listed_row() {
        let service = service(None);
        service.ensure_header_row().await.unwrap();
        for name in ["Ada Lovelace", "Grace Hopper"] {
            let input = fields(&[("name", name), ("email", "x@example.com")]);
            service
                .submit_at(&input, vec![file("headshot", "a.jpg", "image/jpeg")], may_first(9))
                .await
                .unwrap();
        }

        let listed = service.list().await.unwrap();
        assert_eq!(listed.len(), 2);
        let grace = listed.iter().find(|s| s.name == "Grace Hopper").unwrap();
        assert_eq!(grace.row_index, 3);

        let status = service.update_status(grace.row_index, "added").await.unwrap();
        assert_eq!(status, SubmissionStatus::Added);
        assert_eq!(
            service.sheets.last_update_range().as_deref(),
            Some("'Submissions'!R3")
        );

        let listed = service.list().await.unwrap();
        assert_eq!(listed[0].status, SubmissionStatus::New);
        assert_eq!(listed[1].status, SubmissionStatus::Added);
    }

    #[tokio::test]
    async fn header_row_is_written_once() {
        let service = service(None);
        assert!(service.ensure_header_row().await.unwrap());
        assert!(!service.ensure_header_row().await.unwrap());
        assert_eq!(service.sheets.header(), Some(HEADERS.iter().map(|h| h.to_string()).collect()));
    }

    #[tokio::test]
    async fn standalone_upload_defaults_to_root() {
        let service = service(None);
        let stored = service
            .upload(None, file("file", "clip.mov", "video/quicktime"))
            .await
            .unwrap();
        assert_eq!(service.files.parent_of(&stored.file_id).as_deref(), Some(ROOT));

        let result = service
            .upload(Some("elsewhere"), file("file", "cv.pdf", "application/pdf"))
            .await;
        assert!(matches!(result, Err(SubmissionError::Validation(_))));
    }

    #[tokio::test]
    async fn standalone_upload_stays_inside_the_root() {
        let service = service(None);
        let receipt = service
            .submit_at(&ada(), vec![file("headshot", "a.jpg", "image/jpeg")], may_first(9))
            .await
            .unwrap();
        let client_folder = service.files.folders_named(ROOT, "Ada Lovelace")[0].clone();
        let dated = service
            .files
            .folders_named(&client_folder, "ada-lovelace-2024-05-01")[0]
            .clone();
        assert!(receipt.folder_url.ends_with(&dated));

        let stored = service
            .upload(Some(dated.as_str()), file("file", "extra.png", "image/png"))
            .await
            .unwrap();
        assert_eq!(service.files.parent_of(&stored.file_id), Some(dated));

        let uploads_before = service.files.public_count();
        let result = service
            .upload(Some("elsewhere"), file("file", "extra.png", "image/png"))
            .await;
        match result {
            Err(SubmissionError::Validation(errors)) => {
                assert!(errors.get("folderId").is_some());
            }
            other => panic!("expected a folderId error, got {:?}", other.map(|s| s.file_id)),
        }
        assert_eq!(service.files.public_count(), uploads_before);

        let stored = service
            .upload(Some(ROOT), file("file", "extra.png", "image/png"))
            .await
            .unwrap();
        assert_eq!(service.files.parent_of(&stored.file_id).as_deref(), Some(ROOT));
    }

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("Ada Lovelace"), "ada-lovelace");
        assert_eq!(slugify("  O'Brien -- Jr. "), "o-brien-jr");
        assert_eq!(slugify("José Núñez"), "jos-n-ez");
        assert_eq!(slugify("!!!"), "submission");
    }

    #[test]
    fn sheet_names_are_quoted_in_ranges() {
        let mut config = config();
        config.sheet_name = "Team's List".to_string();
        let service = SubmissionService::new(
            InMemorySheetStore::new(),
            InMemoryFileStore::new(),
            None,
            config,
        );
        assert_eq!(service.range("A1:R1"), "'Team''s List'!A1:R1");
    }
}
