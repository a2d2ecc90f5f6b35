use std::{fmt, path::{Path, PathBuf}};

use log::{debug, info};
use serde::Serialize;

use crate::{
    error::AppError,
    profile::{read_identity, resolve_dir, Identity, LocalProfile},
    prompt::Prompter,
    storage::{GlobalIndex, IncludeBlock, IndexUpdate},
};

/// Prompt for the Git user name
pub const NAME_PROMPT: &str = "enter git user name:";
/// Prompt for the Git email address
pub const EMAIL_PROMPT: &str = "enter git email:";

/// Result of setting up a folder profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    /// A profile file was already there; nothing was written
    AlreadyExists { config_path: PathBuf },
    /// The profile file was written and the global config updated
    Created {
        config_path: PathBuf,
        index_update: IndexUpdate,
    },
}

/// One configured folder profile
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ProfileEntry {
    /// Directory the profile applies to
    pub directory: String,
    /// Profile file included for that directory
    pub config_path: String,
    /// Identity read back from the profile file, `None` if it is missing
    pub identity: Option<Identity>,
}

impl fmt::Display for ProfileEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.identity {
            Some(identity) => write!(f, "{}: {} <{}>", self.directory, identity.name, identity.email),
            None => write!(f, "{}: no .gitconfig found", self.directory),
        }
    }
}

/// Result of listing folder profiles
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListOutcome {
    /// The global config does not exist
    NoIndex,
    /// The global config has no folder includes
    Empty,
    /// Folder profiles in file order
    Profiles(Vec<ProfileEntry>),
}

impl ListOutcome {
    /// Listed profiles, empty unless there are any
    pub fn entries(&self) -> &[ProfileEntry] {
        match self {
            ListOutcome::Profiles(entries) => entries,
            ListOutcome::NoIndex | ListOutcome::Empty => &[],
        }
    }
}

/// Result of removing a folder profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveOutcome {
    /// Profile file that was targeted
    pub config_path: PathBuf,
    /// Whether the profile file existed and was deleted
    pub local_removed: bool,
    /// Whether an include block was stripped from the global config
    pub index_updated: bool,
}

/// Sets up a Git profile for `directory`
///
/// # Arguments
/// * `directory` - Folder to scope the identity to
/// * `index` - Global config to register the profile in
/// * `prompter` - Source of the name and email answers
pub fn init_profile<P>(
    directory: &Path,
    index: &GlobalIndex,
    prompter: &mut P,
) -> Result<InitOutcome, AppError>
where
    P: Prompter + ?Sized,
{
    let profile = LocalProfile::new(directory);
    let config_path = profile.config_path();

    if profile.exists() {
        debug!("{} already exists", config_path.display());
        return Ok(InitOutcome::AlreadyExists { config_path });
    }

    let name: String = prompter.ask(NAME_PROMPT)?;
    let email: String = prompter.ask(EMAIL_PROMPT)?;

    if !profile.create(&Identity::new(name, email))? {
        return Ok(InitOutcome::AlreadyExists { config_path });
    }

    let index_update = index.register(&IncludeBlock::for_directory(directory))?;
    info!("profile set up for {}", directory.display());

    Ok(InitOutcome::Created {
        config_path,
        index_update,
    })
}

/// Lists folder profiles registered in the global config
pub fn list_profiles(index: &GlobalIndex) -> Result<ListOutcome, AppError> {
    let Some(blocks) = index.include_blocks()? else {
        return Ok(ListOutcome::NoIndex);
    };

    if blocks.is_empty() {
        return Ok(ListOutcome::Empty);
    }

    let entries = blocks
        .into_iter()
        .map(|block| -> Result<ProfileEntry, AppError> {
            let identity = read_identity(&index.resolve_include_path(&block.path))?;
            Ok(ProfileEntry {
                directory: block.directory,
                config_path: block.path,
                identity,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ListOutcome::Profiles(entries))
}

/// Removes the Git profile of `directory`
///
/// # Arguments
/// * `directory` - Folder whose profile to remove, relative paths are
///   resolved against the current directory
/// * `index` - Global config to unregister the profile from
pub fn remove_profile(directory: &Path, index: &GlobalIndex) -> Result<RemoveOutcome, AppError> {
    let directory: PathBuf = resolve_dir(directory)?;
    let profile = LocalProfile::new(&directory);

    let local_removed = profile.delete()?;
    let index_updated = index.unregister(&IncludeBlock::for_directory(&directory))?;

    if !local_removed && !index_updated {
        debug!("no profile found for {}", directory.display());
    }

    Ok(RemoveOutcome {
        config_path: profile.config_path(),
        local_removed,
        index_updated,
    })
}
