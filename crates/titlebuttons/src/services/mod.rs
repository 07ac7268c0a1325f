//! Side-effecting services: writing stylesheets, following config edits and
//! the privileged root copy.

pub mod config_watcher;
pub mod file_sync;
pub mod root_apply;
