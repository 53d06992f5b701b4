//! 启动器配置：`[session]`、`[[applications]]`、`[paths]`、`[shell]`。
//!
//! 每个字段都有默认值，文件不存在时等同于空配置。

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use mangonel_core::SessionConfig;
use mangonel_providers::{AppEntry, PathsConfig, ShellConfig};
use serde::Deserialize;

use crate::{
    APP_DIR,
    error::{StoreError, StoreResult},
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub session: SessionConfig,
    pub applications: Vec<AppEntry>,
    pub paths: PathsConfig,
    pub shell: ShellConfig,
}

impl Config {
    /// 默认位置：`<config_dir>/mangonel/config.toml`。
    pub fn default_path() -> StoreResult<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join("config.toml"))
            .ok_or(StoreError::NoPlatformDir("config"))
    }

    pub fn from_toml_str(s: &str, origin: &Path) -> StoreResult<Self> {
        toml::from_str(s).map_err(|e| StoreError::parse(origin, e))
    }

    /// 读取配置；文件不存在时返回默认配置。
    pub fn load(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(s) => {
                let config = Self::from_toml_str(&s, path)?;
                tracing::debug!(
                    path = %path.display(),
                    applications = config.applications.len(),
                    "config loaded"
                );
                Ok(config)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(StoreError::read(path, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn full_config_parses() {
        let s = r#"
            [session]
            history_cap = 10

            [[applications]]
            name = "Kate"
            exec = "kate -n"
            keywords = ["editor"]

            [[applications]]
            name = "Konsole"
            exec = "konsole"
            icon = "utilities-terminal"

            [paths]
            limit = 8

            [shell]
            enabled = false
        "#;
        let config = Config::from_toml_str(s, Path::new("inline")).unwrap();
        assert_eq!(config.session.history_cap, 10);
        assert_eq!(config.session.path_prefix, "~/");
        assert_eq!(config.applications.len(), 2);
        assert_eq!(config.applications[0].keywords, ["editor"]);
        assert_eq!(config.applications[1].icon.as_deref(), Some("utilities-terminal"));
        assert_eq!(config.paths.limit, 8);
        assert_eq!(config.paths.opener, "xdg-open");
        assert!(!config.shell.enabled);
        assert_eq!(config.shell.shell, "sh");
    }

    #[test]
    fn empty_file_is_default() {
        let config = Config::from_toml_str("", Path::new("inline")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn bad_toml_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[[applications]]\nname = 3\n").unwrap();
        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));
        assert!(err.to_string().contains("config.toml"));
    }
}
