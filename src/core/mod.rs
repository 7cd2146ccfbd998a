pub mod config;
pub mod error;
pub mod expense;
pub mod member;
pub mod settlement;
pub mod snapshot;
