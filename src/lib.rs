//! Per-folder Git user profiles.
//!
//! A profile is a `.gitconfig` holding a `[user]` block inside a folder,
//! plus an `includeIf "gitdir:<folder>/"` block in the global Git config
//! that pulls it in whenever Git runs inside that folder.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod gitconfig;
pub mod menu;
pub mod output;
pub mod profile;
pub mod prompt;
pub mod storage;

pub use commands::{init_profile, list_profiles, remove_profile, InitOutcome, ListOutcome, ProfileEntry, RemoveOutcome};
pub use config::Settings;
pub use error::AppError;
pub use profile::{Identity, LocalProfile};
pub use prompt::{CannedPrompter, InquirePrompter, Prompter};
pub use storage::{GlobalIndex, IncludeBlock, IndexUpdate};

/// Menu entry for leaving a selection
pub const BACK_OPTION: &str = "back";
