// Domain models for a submission and its spreadsheet row.
//
// The sheet is the database: one row per person, 18 fixed columns (A..R),
// header in row 1. A submission is addressed by its row index only.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of columns in the sheet (A through R).
pub const COLUMN_COUNT: usize = 18;

/// Column letter of the status cell.
pub const STATUS_COLUMN: &str = "R";

/// First data row; row 1 holds the headers.
pub const FIRST_DATA_ROW: u32 = 2;

/// Column headers, in sheet order.
pub const HEADERS: [&str; COLUMN_COUNT] = [
    "Timestamp",
    "Full Name",
    "Email",
    "Phone",
    "Job Title",
    "Department",
    "Location",
    "LinkedIn",
    "Short Bio",
    "Full Bio",
    "Fun Fact",
    "Hobbies",
    "Headshot URL",
    "Photo URLs",
    "Video URL",
    "Folder URL",
    "Notes",
    "Status",
];

// ============================================================================
// STATUS
// ============================================================================

/// Triage status shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SubmissionStatus {
    #[default]
    New,
    Reviewed,
    Added,
}

impl SubmissionStatus {
    pub const ALL: [SubmissionStatus; 3] = [
        SubmissionStatus::New,
        SubmissionStatus::Reviewed,
        SubmissionStatus::Added,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::New => "New",
            SubmissionStatus::Reviewed => "Reviewed",
            SubmissionStatus::Added => "Added",
        }
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid status '{0}'. Expected one of: New, Reviewed, Added")]
pub struct InvalidStatus(pub String);

impl FromStr for SubmissionStatus {
    type Err = InvalidStatus;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| InvalidStatus(s.to_string()))
    }
}

// ============================================================================
// SUBMISSION
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    /// 1-based sheet row. Stable as long as nobody inserts rows above it.
    pub row_index: u32,
    pub timestamp: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub job_title: String,
    pub department: String,
    pub location: String,
    pub linkedin: String,
    pub short_bio: String,
    pub full_bio: String,
    pub fun_fact: String,
    pub hobbies: String,
    pub headshot_url: String,
    pub photo_urls: Vec<String>,
    pub video_url: String,
    pub folder_url: String,
    pub notes: String,
    pub status: SubmissionStatus,
}

impl Submission {
    /// Renders the submission as exactly [`COLUMN_COUNT`] cells.
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.timestamp.clone(),
            self.name.clone(),
            self.email.clone(),
            self.phone.clone(),
            self.job_title.clone(),
            self.department.clone(),
            self.location.clone(),
            self.linkedin.clone(),
            self.short_bio.clone(),
            self.full_bio.clone(),
            self.fun_fact.clone(),
            self.hobbies.clone(),
            self.headshot_url.clone(),
            self.photo_urls.join("\n"),
            self.video_url.clone(),
            self.folder_url.clone(),
            self.notes.clone(),
            self.status.to_string(),
        ]
    }

    /// Parses a row read back from the sheet. Missing trailing cells are
    /// treated as empty and an unreadable status falls back to `New`.
    pub fn from_row(row_index: u32, cells: &[String]) -> Self {
        let cell = |i: usize| cells.get(i).map(|c| c.trim().to_string()).unwrap_or_default();

        let photo_urls = cell(13)
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        let status = cell(17).parse().unwrap_or_default();

        Self {
            row_index,
            timestamp: cell(0),
            name: cell(1),
            email: cell(2),
            phone: cell(3),
            job_title: cell(4),
            department: cell(5),
            location: cell(6),
            linkedin: cell(7),
            short_bio: cell(8),
            full_bio: cell(9),
            fun_fact: cell(10),
            hobbies: cell(11),
            headshot_url: cell(12),
            photo_urls,
            video_url: cell(14),
            folder_url: cell(15),
            notes: cell(16),
            status,
        }
    }
}

/// Outcome of a successful submit, returned to the HTTP layer.
#[derive(Debug, Clone)]
pub struct SubmissionReceipt {
    pub message: String,
    pub folder_url: String,
    /// File names whose upload failed and whose URLs are missing from the row.
    pub failed_uploads: Vec<String>,
}

/// A file stored in the drive, with its shareable URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredFile {
    pub file_id: String,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parsing_is_case_insensitive() {
        assert_eq!(
            "reviewed".parse::<SubmissionStatus>(),
            Ok(SubmissionStatus::Reviewed)
        );
        assert_eq!(" Added ".parse::<SubmissionStatus>(), Ok(SubmissionStatus::Added));
        assert_eq!(
            "Archived".parse::<SubmissionStatus>(),
            Err(InvalidStatus("Archived".to_string()))
        );
        assert!("".parse::<SubmissionStatus>().is_err());
    }

    #[test]
    fn row_has_fixed_width_with_status_last() {
        let submission = Submission {
            name: "Ada".to_string(),
            photo_urls: vec!["a".to_string(), "b".to_string()],
            status: SubmissionStatus::Reviewed,
            ..Default::default()
        };
        let row = submission.to_row();
        assert_eq!(row.len(), COLUMN_COUNT);
        assert_eq!(row[1], "Ada");
        assert_eq!(row[13], "a\nb");
        assert_eq!(row[COLUMN_COUNT - 1], "Reviewed");
        assert_eq!(HEADERS[COLUMN_COUNT - 1], "Status");
    }

    #[test]
    fn short_rows_are_padded() {
        let cells = vec!["2024-05-01T10:00:00Z".to_string(), "Grace".to_string()];
        let submission = Submission::from_row(7, &cells);
        assert_eq!(submission.row_index, 7);
        assert_eq!(submission.name, "Grace");
        assert_eq!(submission.email, "");
        assert!(submission.photo_urls.is_empty());
        assert_eq!(submission.status, SubmissionStatus::New);
    }

    #[test]
    fn row_survives_a_sheet_round_trip() {
        let original = Submission {
            row_index: 3,
            timestamp: "2024-05-01T10:00:00Z".to_string(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            photo_urls: vec!["https://x/1".to_string()],
            status: SubmissionStatus::Added,
            ..Default::default()
        };
        assert_eq!(Submission::from_row(3, &original.to_row()), original);
    }
}
