//! CLI commands for daybook

pub mod add;
pub mod backup;
pub mod delete;
pub mod dispatch;
pub mod edit;
pub mod export;
pub mod format;
pub mod helpers;
pub mod import;
pub mod init;
pub mod list;
pub mod search;
pub mod show;
pub mod stats;
pub mod tags;
pub mod templates;
