//! CLI command modules

pub mod info;
pub mod init;
pub mod plan;
pub mod show;
pub mod validate;
