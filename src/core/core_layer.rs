// The core module contains all business logic.
// Each feature gets its own submodule.

#[path = "ai/mod.rs"]
pub mod ai;

#[path = "auth/mod.rs"]
pub mod auth;

#[path = "forms/mod.rs"]
pub mod forms;

#[path = "submissions/mod.rs"]
pub mod submissions;
