//! Command implementations for Stevedore CLI

pub mod completions;
mod helpers;
pub mod install;
pub mod list;
pub mod show;
pub mod uninstall;
pub mod version;
