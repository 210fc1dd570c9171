pub mod submission_models;
pub mod submission_service;

pub use submission_service::{
    DynSubmissionService, FileStore, SheetStore, StoreError, SubmissionConfig, SubmissionError,
    SubmissionService,
};
