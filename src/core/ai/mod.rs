pub mod assist_service;
pub mod models;

pub use assist_service::{AiProvider, AssistError, AssistService, DynAssistService};
pub use models::{AiConfig, AiMessage};
