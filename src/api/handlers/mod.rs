pub mod assist;
pub mod auth;
pub mod health;
pub mod intake;
pub mod submissions;
