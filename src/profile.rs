use std::{
    fs::{self, OpenOptions},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use log::debug;
use serde::Serialize;

use crate::{
    error::AppError,
    gitconfig::{ConfigFile, Section},
};

/// Name of the profile file written into each directory
pub const LOCAL_CONFIG_FILE: &str = ".gitconfig";
/// Shown for a name or email missing from a local profile
pub const MISSING_FIELD: &str = "N/A";

/// Git identity stored in a local profile
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Git user name (user.name)
    pub name: String,
    /// Git email address (user.email)
    pub email: String,
}

impl Identity {
    /// Creates an identity from a name and email
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Identity {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Renders the `[user]` block written to a local profile
    pub fn render(&self) -> String {
        let mut file = ConfigFile::default();
        file.append_section(
            Section::new("user", None)
                .with_entry("name", &self.name)
                .with_entry("email", &self.email),
        );
        file.to_string()
    }
}

/// Identity file scoped to one directory
#[derive(Debug, Clone)]
pub struct LocalProfile {
    directory: PathBuf,
}

impl LocalProfile {
    /// Creates a handle for the profile of `directory`
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        LocalProfile {
            directory: directory.into(),
        }
    }

    /// Path of the profile file, `<directory>/.gitconfig`
    pub fn config_path(&self) -> PathBuf {
        self.directory.join(LOCAL_CONFIG_FILE)
    }

    /// Whether the profile file exists
    pub fn exists(&self) -> bool {
        self.config_path().exists()
    }

    /// Writes the profile file. Returns `false` without touching anything
    /// when the file already exists.
    pub fn create(&self, identity: &Identity) -> Result<bool, AppError> {
        let path = self.config_path();
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::AlreadyExists => return Ok(false),
            Err(err) => return Err(err.into()),
        };

        file.write_all(identity.render().as_bytes())?;
        debug!("wrote local profile {}", path.display());
        Ok(true)
    }

    /// Deletes the profile file, returning whether there was one
    pub fn delete(&self) -> Result<bool, AppError> {
        let path = self.config_path();
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!("deleted local profile {}", path.display());
                Ok(true)
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}

/// Reads the identity from a profile file, `None` if the file is missing.
///
/// Missing fields are reported as [`MISSING_FIELD`].
pub fn read_identity(path: &Path) -> Result<Option<Identity>, AppError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };

    let file = ConfigFile::parse(&contents);
    let field = |key: &str| {
        file.get("user", None, key)
            .unwrap_or_else(|| MISSING_FIELD.to_string())
    };

    Ok(Some(Identity::new(field("name"), field("email"))))
}

/// Formats a directory the way Git expects it in config values:
/// forward slashes, no trailing separator.
pub fn normalize_dir(directory: &Path) -> String {
    let normalized = directory.to_string_lossy().replace('\\', "/");
    let trimmed = normalized.trim_end_matches('/');
    if trimmed.is_empty() {
        // the filesystem root
        normalized
    } else {
        trimmed.to_string()
    }
}

/// Resolves a user-supplied directory against the current directory
pub fn resolve_dir(directory: &Path) -> Result<PathBuf, AppError> {
    Ok(std::path::absolute(directory)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_writes_user_block() {
        let identity = Identity::new("Ada", "ada@example.com");
        assert_eq!(
            identity.render(),
            "[user]\n    name = Ada\n    email = ada@example.com\n"
        );
    }

    #[test]
    fn create_refuses_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let profile = LocalProfile::new(dir.path());

        assert!(profile.create(&Identity::new("Ada", "ada@example.com")).unwrap());
        assert!(!profile.create(&Identity::new("Bob", "bob@example.com")).unwrap());

        let identity = read_identity(&profile.config_path()).unwrap().unwrap();
        assert_eq!(identity, Identity::new("Ada", "ada@example.com"));
    }

    #[test]
    fn delete_reports_whether_file_existed() {
        let dir = tempfile::tempdir().unwrap();
        let profile = LocalProfile::new(dir.path());

        assert!(!profile.delete().unwrap());
        profile.create(&Identity::new("Ada", "ada@example.com")).unwrap();
        assert!(profile.delete().unwrap());
        assert!(!profile.exists());
    }

    #[test]
    fn read_identity_defaults_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(LOCAL_CONFIG_FILE);
        fs::write(&path, "[user]\n\temail = x@example.com\n").unwrap();

        let identity = read_identity(&path).unwrap().unwrap();
        assert_eq!(identity.name, MISSING_FIELD);
        assert_eq!(identity.email, "x@example.com");

        assert_eq!(read_identity(&dir.path().join("missing")).unwrap(), None);
    }

    #[test]
    fn normalize_dir_uses_forward_slashes() {
        assert_eq!(normalize_dir(Path::new("C:\\repos\\alpha")), "C:/repos/alpha");
        assert_eq!(normalize_dir(Path::new("/repos/alpha/")), "/repos/alpha");
        assert_eq!(normalize_dir(Path::new("/")), "/");
    }

    #[test]
    fn resolve_dir_makes_relative_paths_absolute() {
        let resolved = resolve_dir(Path::new("alpha")).unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("alpha"));
    }
}
