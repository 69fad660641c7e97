//! Service layer - orchestration.

pub mod join_service;

pub use join_service::JoinService;
