// In-memory implementations of the sheet and drive ports.
//
// They behave like the real services closely enough for the orchestration
// tests: A1 ranges are honoured, appends land after the last non-empty row,
// and drive ids are unique. Every call is counted so tests can assert that
// nothing was touched.

use crate::core::forms::UploadedFile;
use crate::core::submissions::{FileStore, SheetStore, StoreError};
use async_trait::async_trait;
use dashmap::{DashMap, DashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

// ============================================================================
// A1 RANGES
// ============================================================================

/// Zero-based bounds of an A1 range. `None` means unbounded.
#[derive(Debug, PartialEq, Eq)]
struct CellRange {
    first_row: usize,
    last_row: Option<usize>,
    first_col: usize,
}

fn column_index(letters: &str) -> usize {
    letters
        .bytes()
        .fold(0, |acc, b| acc * 26 + (b.to_ascii_uppercase() - b'A' + 1) as usize)
        - 1
}

/// Splits `AB12` into column index and optional zero-based row.
fn parse_cell(cell: &str) -> (usize, Option<usize>) {
    let split = cell.find(|c: char| c.is_ascii_digit()).unwrap_or(cell.len());
    let (letters, digits) = cell.split_at(split);
    let row = digits.parse::<usize>().ok().map(|r| r - 1);
    (column_index(letters), row)
}

fn parse_range(range: &str) -> CellRange {
    let cells = range.rsplit_once('!').map(|(_, c)| c).unwrap_or(range);
    let (start, end) = match cells.split_once(':') {
        Some((start, end)) => (start, Some(end)),
        None => (cells, None),
    };

    let (first_col, first_row) = parse_cell(start);
    let last_row = match end {
        Some(end) => parse_cell(end).1,
        None => first_row,
    };

    CellRange {
        first_row: first_row.unwrap_or(0),
        last_row,
        first_col,
    }
}

// ============================================================================
// SHEET
// ============================================================================

/// A single sheet tab held in memory. Row 0 is sheet row 1.
#[derive(Default)]
pub struct InMemorySheetStore {
    grid: Mutex<Vec<Vec<String>>>,
    calls: AtomicUsize,
    fail_writes: AtomicBool,
    last_update: Mutex<Option<String>>,
}

impl InMemorySheetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every non-empty row, header included.
    pub fn rows(&self) -> Vec<Vec<String>> {
        let grid = self.grid.lock().unwrap();
        grid.iter()
            .filter(|row| row.iter().any(|c| !c.is_empty()))
            .cloned()
            .collect()
    }

    pub fn header(&self) -> Option<Vec<String>> {
        let grid = self.grid.lock().unwrap();
        grid.first().filter(|row| row.iter().any(|c| !c.is_empty())).cloned()
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    pub fn last_update_range(&self) -> Option<String> {
        self.last_update.lock().unwrap().clone()
    }

    fn check_write(&self) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Sheet("write rejected".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl SheetStore for InMemorySheetStore {
    async fn append(&self, _range: &str, rows: Vec<Vec<String>>) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.check_write()?;

        let mut grid = self.grid.lock().unwrap();
        let used = grid
            .iter()
            .rposition(|row| row.iter().any(|c| !c.is_empty()))
            .map_or(0, |i| i + 1);
        grid.truncate(used);
        grid.extend(rows);
        Ok(())
    }

    async fn read(&self, range: &str) -> Result<Vec<Vec<String>>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let bounds = parse_range(range);
        let grid = self.grid.lock().unwrap();
        let end = bounds
            .last_row
            .map_or(grid.len(), |last| (last + 1).min(grid.len()));

        let mut rows: Vec<Vec<String>> = grid
            .get(bounds.first_row..end)
            .unwrap_or_default()
            .iter()
            .map(|row| row.iter().skip(bounds.first_col).cloned().collect())
            .collect();

        // Like the real API, trailing empty rows are omitted.
        while rows.last().is_some_and(|row: &Vec<String>| row.iter().all(|c| c.is_empty())) {
            rows.pop();
        }
        Ok(rows)
    }

    async fn update(&self, range: &str, rows: Vec<Vec<String>>) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.check_write()?;

        let bounds = parse_range(range);
        let mut grid = self.grid.lock().unwrap();
        for (offset, values) in rows.into_iter().enumerate() {
            let row_index = bounds.first_row + offset;
            if grid.len() <= row_index {
                grid.resize(row_index + 1, Vec::new());
            }
            let row = &mut grid[row_index];
            let needed = bounds.first_col + values.len();
            if row.len() < needed {
                row.resize(needed, String::new());
            }
            for (col, value) in values.into_iter().enumerate() {
                row[bounds.first_col + col] = value;
            }
        }

        *self.last_update.lock().unwrap() = Some(range.to_string());
        Ok(())
    }
}

// ============================================================================
// DRIVE
// ============================================================================

#[derive(Debug, Clone)]
struct DriveEntry {
    parent: String,
    name: String,
    is_folder: bool,
}

#[derive(Default)]
pub struct InMemoryFileStore {
    entries: DashMap<String, DriveEntry>,
    public: DashSet<String>,
    failing_names: DashSet<String>,
    next_id: AtomicUsize,
    calls: AtomicUsize,
}

impl InMemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn public_count(&self) -> usize {
        self.public.len()
    }

    /// Uploads of files with this name will fail.
    pub fn fail_uploads_named(&self, file_name: &str) {
        self.failing_names.insert(file_name.to_string());
    }

    pub fn has_folder(&self, parent: &str, name: &str) -> bool {
        !self.folders_named(parent, name).is_empty()
    }

    /// Ids of folders with this name inside `parent`, oldest first.
    pub fn folders_named(&self, parent: &str, name: &str) -> Vec<String> {
        let mut ids: Vec<(usize, String)> = self
            .entries
            .iter()
            .filter(|e| e.is_folder && e.parent == parent && e.name == name)
            .map(|e| (Self::sequence(e.key()), e.key().clone()))
            .collect();
        ids.sort();
        ids.into_iter().map(|(_, id)| id).collect()
    }

    pub fn parent_of(&self, id: &str) -> Option<String> {
        self.entries.get(id).map(|e| e.parent.clone())
    }

    fn sequence(id: &str) -> usize {
        id.rsplit('-').next().and_then(|n| n.parse().ok()).unwrap_or(0)
    }

    fn insert(&self, kind: &str, parent: &str, name: &str, is_folder: bool) -> String {
        let id = format!("{}-{}", kind, self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        self.entries.insert(
            id.clone(),
            DriveEntry {
                parent: parent.to_string(),
                name: name.to_string(),
                is_folder,
            },
        );
        id
    }
}

#[async_trait]
impl FileStore for InMemoryFileStore {
    async fn find_folder(&self, parent_id: &str, name: &str) -> Result<Option<String>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.folders_named(parent_id, name).into_iter().next())
    }

    async fn create_folder(&self, parent_id: &str, name: &str) -> Result<String, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.insert("folder", parent_id, name, true))
    }

    async fn upload_file(&self, parent_id: &str, file: &UploadedFile) -> Result<String, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_names.contains(&file.file_name) {
            return Err(StoreError::Drive(format!("upload of {} failed", file.file_name)));
        }
        Ok(self.insert("file", parent_id, &file.file_name, false))
    }

    async fn make_public(&self, file_id: &str) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.entries.contains_key(file_id) {
            return Err(StoreError::Drive(format!("no such file {}", file_id)));
        }
        self.public.insert(file_id.to_string());
        Ok(())
    }

    async fn parents(&self, id: &str) -> Result<Vec<String>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.parent_of(id).into_iter().collect())
    }
}
