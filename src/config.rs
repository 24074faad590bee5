//! Settings read from `config.toml`:
//!
//! ```toml
//! [paths]
//! site = "/path/to/site"
//! sheets = "/path/to/sheets"
//! ```
//!
//! The file is optional; every value can also come from a CLI flag, and the
//! flag wins when both are present.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use log::debug;
use serde::Deserialize;

const CONFIG_FILE_NAME: &str = "config.toml";

/// Everything the config file can hold. Unknown keys are ignored.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Settings {
    /// `[paths]` table.
    #[serde(default)]
    pub paths: PathSettings,
}

/// Default directories used when the matching CLI flag is absent.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct PathSettings {
    /// Root of the static site holding `_data/songs.csv`.
    pub site: Option<PathBuf>,
    /// Folder holding the sheet-music files.
    pub sheets: Option<PathBuf>,
}

impl Settings {
    /// `<config dir>/choir-songbook/config.toml`, e.g.
    /// `~/.config/choir-songbook/config.toml` on Linux.
    pub fn default_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "choir-songbook")
            .ok_or_else(|| anyhow!("could not locate home directory"))?;
        Ok(dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Load settings from `path`, or from [`Settings::default_path`] when no
    /// path is given. A missing default file yields empty settings; a missing
    /// file that was asked for explicitly is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let path = Self::default_path()?;
                if path.exists() {
                    Self::from_file(&path)
                } else {
                    debug!("no config file at {}, using defaults", path.display());
                    Ok(Self::default())
                }
            }
        }
    }

    /// Read and parse the TOML file at `path`.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let settings = Self::from_toml(&text)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        debug!("loaded config from {}", path.display());
        Ok(settings)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// The site directory from `flag`, falling back to the config file.
    pub fn resolve_site(&self, flag: Option<PathBuf>) -> Result<PathBuf> {
        flag.or_else(|| self.paths.site.clone()).ok_or_else(|| {
            anyhow!("no site directory: pass --site or set paths.site in the config")
        })
    }

    /// The sheet-music directory from `flag`, falling back to the config file.
    pub fn resolve_sheets(&self, flag: Option<PathBuf>) -> Result<PathBuf> {
        flag.or_else(|| self.paths.sheets.clone()).ok_or_else(|| {
            anyhow!("no sheet directory: pass --sheets or set paths.sheets in the config")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    const CONFIG: &str = r#"[paths]
site = "/path/to/site"
sheets = "/path/to/sheet"
"#;

    #[test]
    fn parses_paths() {
        let settings = Settings::from_toml(CONFIG).unwrap();
        assert_eq!(
            settings,
            Settings {
                paths: PathSettings {
                    site: Some(PathBuf::from("/path/to/site")),
                    sheets: Some(PathBuf::from("/path/to/sheet")),
                },
            }
        );
    }

    #[test]
    fn empty_config_is_default() {
        assert_eq!(Settings::from_toml("").unwrap(), Settings::default());
    }

    #[test]
    fn loads_an_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, CONFIG).unwrap();

        let settings = Settings::load(Some(path.as_path())).unwrap();

        assert_eq!(settings.paths.site, Some(PathBuf::from("/path/to/site")));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(Settings::load(Some(dir.path().join("absent.toml").as_path())).is_err());
    }

    #[test]
    fn flags_win_over_the_file() {
        let settings = Settings::from_toml(CONFIG).unwrap();
        assert_eq!(
            settings.resolve_site(Some(PathBuf::from("/flag/site"))).unwrap(),
            PathBuf::from("/flag/site")
        );
        assert_eq!(
            settings.resolve_sheets(None).unwrap(),
            PathBuf::from("/path/to/sheet")
        );
    }

    #[test]
    fn unresolved_paths_are_errors() {
        let settings = Settings::default();
        assert!(settings.resolve_site(None).is_err());
        assert!(settings.resolve_sheets(None).is_err());
    }
}
