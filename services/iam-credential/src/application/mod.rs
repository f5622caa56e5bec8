pub mod bearer;
pub mod commands;
pub mod handlers;
pub mod queries;
pub mod service;

pub use service::CredentialService;
