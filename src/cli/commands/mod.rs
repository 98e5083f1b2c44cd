//! Command handlers. Each maps onto one store operation.

pub mod completions;
pub mod data;
pub mod edit;
pub mod file;
pub mod init;
pub mod query;
pub mod write;
