use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use log::{debug, info};

use crate::{
    error::AppError,
    gitconfig::{ConfigFile, Section},
    profile::{normalize_dir, LOCAL_CONFIG_FILE},
};

/// Section name of conditional includes
const INCLUDE_SECTION: &str = "includeIf";
/// Condition prefix matching a repository location
const GITDIR_PREFIX: &str = "gitdir:";

/// Conditional include pairing a directory with its profile file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeBlock {
    /// Directory with forward slashes and no trailing separator
    pub directory: String,
    /// Path of the included config file
    pub path: String,
}

impl IncludeBlock {
    /// Builds the block registering `<directory>/.gitconfig`
    pub fn for_directory(directory: &Path) -> Self {
        let directory = normalize_dir(directory);
        let path = format!("{}/{LOCAL_CONFIG_FILE}", directory.trim_end_matches('/'));
        IncludeBlock { directory, path }
    }

    fn condition(&self) -> String {
        format!("{GITDIR_PREFIX}{}/", self.directory.trim_end_matches('/'))
    }

    fn to_section(&self) -> Section {
        Section::new(INCLUDE_SECTION, Some(&self.condition())).with_entry("path", &self.path)
    }

    fn is_section(&self, section: &Section) -> bool {
        section.matches(INCLUDE_SECTION, Some(&self.condition()))
            && section.get("path").as_deref() == Some(self.path.as_str())
    }

    fn from_section(section: &Section) -> Option<Self> {
        if !section.name().eq_ignore_ascii_case(INCLUDE_SECTION) {
            return None;
        }

        let condition = section.subsection()?.strip_prefix(GITDIR_PREFIX)?;
        let directory = condition.strip_suffix('/').unwrap_or(condition).to_string();
        let path = section
            .get("path")
            .unwrap_or_else(|| format!("{directory}/{LOCAL_CONFIG_FILE}"));
        Some(IncludeBlock { directory, path })
    }
}

fn resolve_include_path(include_path: &str, base: Option<&Path>, home: Option<&Path>) -> PathBuf {
    if let (Some(rest), Some(home)) = (include_path.strip_prefix("~/"), home) {
        return home.join(rest);
    }

    let path = Path::new(include_path);
    match base {
        Some(base) if path.is_relative() => base.join(path),
        _ => path.to_path_buf(),
    }
}

/// Result of registering an include block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexUpdate {
    /// The global config did not exist and was created
    Created,
    /// The block was appended to the existing global config
    Appended,
    /// An identical block was already registered
    AlreadyPresent,
}

/// Global Git config acting as the registry of folder profiles
#[derive(Debug, Clone)]
pub struct GlobalIndex {
    path: PathBuf,
}

impl GlobalIndex {
    /// Creates a store over the config file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        GlobalIndex { path: path.into() }
    }

    /// Location of the global config
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resolves an include `path` value the way Git does: `~/` expands to
    /// the home directory, relative paths start at this config's directory
    pub fn resolve_include_path(&self, include_path: &str) -> PathBuf {
        resolve_include_path(include_path, self.path.parent(), dirs::home_dir().as_deref())
    }

    /// Loads the global config, `None` if it does not exist
    pub fn load(&self) -> Result<Option<ConfigFile>, AppError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(ConfigFile::parse(&contents))),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, file: &ConfigFile) -> Result<(), AppError> {
        fs::write(&self.path, file.to_string())?;
        debug!("saved {}", self.path.display());
        Ok(())
    }

    /// Lists registered folder includes in file order, `None` if the global
    /// config does not exist
    pub fn include_blocks(&self) -> Result<Option<Vec<IncludeBlock>>, AppError> {
        let Some(file) = self.load()? else {
            return Ok(None);
        };

        Ok(Some(
            file.sections()
                .iter()
                .filter_map(IncludeBlock::from_section)
                .collect(),
        ))
    }

    /// Adds `block` unless an identical one is already registered
    pub fn register(&self, block: &IncludeBlock) -> Result<IndexUpdate, AppError> {
        let (mut file, update) = match self.load()? {
            Some(file) if file.sections().iter().any(|section| block.is_section(section)) => {
                debug!("{} already includes {}", self.path.display(), block.path);
                return Ok(IndexUpdate::AlreadyPresent);
            }
            Some(file) => (file, IndexUpdate::Appended),
            None => (ConfigFile::default(), IndexUpdate::Created),
        };

        file.append_section(block.to_section());
        self.save(&file)?;
        info!("registered {} in {}", block.directory, self.path.display());
        Ok(update)
    }

    /// Removes every block identical to `block`. The file is only rewritten
    /// when something was removed.
    pub fn unregister(&self, block: &IncludeBlock) -> Result<bool, AppError> {
        let Some(mut file) = self.load()? else {
            return Ok(false);
        };

        if file.remove_sections(|section| block.is_section(section)) == 0 {
            debug!("no include for {} in {}", block.directory, self.path.display());
            return Ok(false);
        }

        self.save(&file)?;
        info!("unregistered {} from {}", block.directory, self.path.display());
        Ok(true)
    }
}
