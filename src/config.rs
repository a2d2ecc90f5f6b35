use std::path::PathBuf;

use crate::error::AppError;

/// Global Git config file in user's home directory
pub const GLOBAL_CONFIG_FILE: &str = ".gitconfig";

/// Gets the path to the user's global Git config
pub fn default_global_config_path() -> Result<PathBuf, AppError> {
    let home_dir: PathBuf = dirs::home_dir().ok_or(AppError::HomeDirNotFound)?;
    Ok(home_dir.join(GLOBAL_CONFIG_FILE))
}

/// Runtime settings resolved from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Global config that profiles get registered in
    pub global_config: PathBuf,
}

impl Settings {
    /// Uses `global_config` when given, the home directory file otherwise
    pub fn resolve(global_config: Option<PathBuf>) -> Result<Self, AppError> {
        let global_config = match global_config {
            Some(path) => path,
            None => default_global_config_path()?,
        };
        Ok(Settings { global_config })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path_wins() {
        let settings = Settings::resolve(Some(PathBuf::from("/tmp/custom.gitconfig"))).unwrap();
        assert_eq!(settings.global_config, PathBuf::from("/tmp/custom.gitconfig"));
    }

    #[test]
    fn default_path_is_in_home_directory() {
        if let Some(home) = dirs::home_dir() {
            let settings = Settings::resolve(None).unwrap();
            assert_eq!(settings.global_config, home.join(GLOBAL_CONFIG_FILE));
        }
    }
}
